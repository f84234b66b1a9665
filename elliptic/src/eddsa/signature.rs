//! EdDSA signatures and their `R ‖ S` encoding.

use crate::{Error, Result};
use alloc::{sync::Arc, vec::Vec};
use bignum::BigInt;
use curves::{EdwardsCurve, EdwardsPoint};

/// EdDSA signature `R ‖ S`, as defined in [RFC 8032 § 5.1.6].
///
/// [RFC 8032 § 5.1.6]: https://www.rfc-editor.org/rfc/rfc8032#section-5.1.6
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    r: EdwardsPoint,
    s: BigInt,
    r_bytes: Vec<u8>,
}

impl Signature {
    pub(super) fn new(r: EdwardsPoint, s: BigInt, r_bytes: Vec<u8>) -> Self {
        Self { r, s, r_bytes }
    }

    /// Split `bytes` into the encoded point `R` and the little-endian
    /// scalar `S`.
    ///
    /// A wrong length, an undecodable `R` or `S ≥ n` fail with
    /// [`Error::InvalidSignature`].
    pub fn from_bytes(curve: &Arc<EdwardsCurve>, bytes: &[u8]) -> Result<Self> {
        let len = curve.encoding_len();
        if bytes.len() != 2 * len {
            return Err(Error::InvalidSignature);
        }

        let (r_bytes, s_bytes) = bytes.split_at(len);
        let r = curve.decode_point(r_bytes).map_err(|_| Error::InvalidSignature)?;
        let s = BigInt::from_le_bytes(s_bytes);
        if &s >= curve.domain().n() {
            return Err(Error::InvalidSignature);
        }

        Ok(Self::new(r, s, r_bytes.to_vec()))
    }

    /// `R ‖ S`
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut s = self.s.to_le_bytes();
        s.resize(self.r_bytes.len(), 0);

        let mut out = self.r_bytes.clone();
        out.extend_from_slice(&s);
        out
    }

    /// Commitment point `R`.
    pub fn r(&self) -> &EdwardsPoint {
        &self.r
    }

    /// Encoded `R`.
    pub fn r_bytes(&self) -> &[u8] {
        &self.r_bytes
    }

    /// Scalar `S`.
    pub fn s(&self) -> &BigInt {
        &self.s
    }
}
