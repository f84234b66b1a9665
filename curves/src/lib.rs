#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]
#![doc = include_str!("../README.md")]

//! ## Usage
//!
//! ```
//! use curves::{presets, bignum::BigInt};
//!
//! let curve = presets::curve("secp256k1")?;
//! let g = curve.generator();
//! let k = BigInt::from(42u32);
//!
//! assert_eq!(g.mul(&k), g.mul(&(k.clone() - 1u32)).add(&g)?);
//! assert!(g.mul(curve.n()).is_identity());
//! # Ok::<(), curves::Error>(())
//! ```

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod presets;

mod curve;
mod edwards;
mod error;
mod montgomery;
mod mul;
mod point;
mod precomputed;
mod weierstrass;

pub use crate::{
    curve::{Curve, CurveParams, Domain, EndoParams, Model, ModelParams},
    edwards::{EdwardsCurve, EdwardsPoint},
    error::{Error, Result},
    montgomery::{MontgomeryCurve, MontgomeryPoint},
    mul::{DEFAULT_WINDOW, get_naf},
    point::Point,
    precomputed::{
        AffineCoords, Doubles, DoublesTable, NafTable, NafWindow, Precomputed, PrecomputedTable,
    },
    presets::{HashAlgorithm, Preset, Registry},
    weierstrass::{
        AffinePoint, Endomorphism, JacobianPoint, LatticeVector, PointFormat, WeierstrassCurve,
    },
};
pub use bignum;
