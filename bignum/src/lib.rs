#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]
#![doc = include_str!("../README.md")]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod error;
mod int;
mod limbs;
mod monty;
mod ops;
mod radix;

pub use crate::{
    error::{Error, Result},
    int::BigInt,
    monty::{MontyForm, MontyParams},
};
pub use subtle;
pub use zeroize;
