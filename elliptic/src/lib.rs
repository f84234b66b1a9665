#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]
#![doc = include_str!("../README.md")]

//! ## Usage
//!
//! ```
//! use elliptic::ecdsa::{Ecdsa, SignOptions};
//! use sha2::{Digest, Sha256};
//!
//! let ecdsa = Ecdsa::<Sha256>::from_preset("secp256k1")?;
//! let key = ecdsa.gen_key_pair_with_entropy(b"at least twenty-four bytes of entropy", None)?;
//!
//! let digest = Sha256::digest(b"hello");
//! let signature = key.sign(&digest, &SignOptions::default())?;
//! assert!(key.verify(&digest, &signature));
//! # Ok::<(), elliptic::Error>(())
//! ```

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod drbg;
pub mod ecdh;
pub mod ecdsa;
pub mod eddsa;

pub use bignum::{self, BigInt};
pub use curves::{self, Curve, Error, Point, PointFormat, Result, presets};
pub use digest;
pub use rand_core;
pub use signature;
