//! Edwards-curve Digital Signature Algorithm (EdDSA) as defined in
//! [RFC 8032], over any twisted Edwards curve whose hash output is twice the
//! point encoding length.
//!
//! ## Algorithm
//!
//! ```text
//! KeyGen(secret):
//!   h ← H(secret);  a ← clamp(h[..len]);  prefix ← h[len..];  A ← aB
//!
//! Sign(M):
//!   r ← H(prefix ‖ M) mod L;  R ← rB
//!   S ← (r + H(R ‖ A ‖ M)·a) mod L
//!
//! Verify(M, (R, S), A):
//!   accept iff SB = R + H(R ‖ A ‖ M)·A
//! ```
//!
//! [RFC 8032]: https://www.rfc-editor.org/rfc/rfc8032

mod key;
mod signature;

pub use self::{key::KeyPair, signature::Signature};

use crate::{Error, Result};
use alloc::sync::Arc;
use bignum::BigInt;
use core::{fmt, marker::PhantomData};
use curves::{Curve, EdwardsCurve, EdwardsPoint, presets};
use digest::Digest;
use sha2::Sha512;
use zeroize::Zeroizing;

/// EdDSA over a twisted Edwards curve, hashing with `D`.
pub struct Eddsa<D = Sha512>
where
    D: Digest + Clone,
{
    curve: Curve,
    edwards: Arc<EdwardsCurve>,
    g: EdwardsPoint,
    encoding_len: usize,
    digest: PhantomData<D>,
}

impl<D> Eddsa<D>
where
    D: Digest + Clone,
{
    /// EdDSA over `curve`, which must be a twisted Edwards curve.
    pub fn new(curve: &Curve) -> Result<Self> {
        let edwards = curve.as_edwards().ok_or(Error::InvalidParameter)?.clone();
        let encoding_len = edwards.encoding_len();
        if <D as Digest>::output_size() != 2 * encoding_len {
            return Err(Error::InvalidParameter);
        }

        let mut g = edwards.generator();
        if g.precomputed().is_none() {
            g = g.precompute(curve.n().bit_length() + 1)?;
        }

        Ok(Self {
            curve: curve.clone(),
            edwards,
            g,
            encoding_len,
            digest: PhantomData,
        })
    }

    /// EdDSA over a named preset curve.
    pub fn from_preset(name: &str) -> Result<Self> {
        Self::new(&presets::curve(name)?)
    }

    /// Underlying curve.
    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    /// Length of an encoded point, and of the secret key.
    pub fn encoding_len(&self) -> usize {
        self.encoding_len
    }

    /// Expand a secret key.
    pub fn key_from_secret(&self, secret: &[u8]) -> Result<KeyPair<D>> {
        if secret.len() != self.encoding_len {
            return Err(Error::InvalidParameter);
        }

        let hash = Zeroizing::new(D::digest(secret).to_vec());
        let (scalar, prefix) = hash.split_at(self.encoding_len);

        let mut scalar = Zeroizing::new(scalar.to_vec());
        let last = self.encoding_len - 1;
        scalar[0] &= 248;
        scalar[last] &= 127;
        scalar[last] |= 64;
        let scalar = Zeroizing::new(BigInt::from_le_bytes(&scalar));

        let public = self.g.mul(&scalar);
        Ok(KeyPair::new(
            self.clone(),
            Some(key::Expanded {
                secret: Zeroizing::new(secret.to_vec()),
                scalar,
                prefix: Zeroizing::new(prefix.to_vec()),
            }),
            public,
        ))
    }

    /// Verification-only key from an encoded point.
    pub fn key_from_public(&self, bytes: &[u8]) -> Result<KeyPair<D>> {
        let public = self.edwards.decode_point(bytes)?;
        Ok(KeyPair::new(self.clone(), None, public))
    }

    /// Parse an `R ‖ S` signature for this curve.
    pub fn signature_from_bytes(&self, bytes: &[u8]) -> Result<Signature> {
        Signature::from_bytes(&self.edwards, bytes)
    }

    /// Sign `message`.
    pub fn sign(&self, message: &[u8], key: &KeyPair<D>) -> Result<Signature> {
        let expanded = key.expanded()?;
        let n = self.curve.n();

        let r = Zeroizing::new(self.hash_int(&[expanded.prefix.as_slice(), message])?);
        let big_r = self.g.mul(&r);
        let r_bytes = big_r.encode();

        let h = self.hash_int(&[r_bytes.as_slice(), key.public_bytes(), message])?;
        let s = (&*r + &h * &*expanded.scalar).modulo(n)?;
        Ok(Signature::new(big_r, s, r_bytes))
    }

    /// Verify a signature over `message`.
    pub fn verify(&self, message: &[u8], signature: &Signature, key: &KeyPair<D>) -> bool {
        let s = signature.s();
        if s.is_negative() || s >= self.curve.n() {
            return false;
        }

        let Ok(h) = self.hash_int(&[signature.r_bytes(), key.public_bytes(), message]) else {
            return false;
        };

        let Ok(rhs) = signature.r().add(&key.public_key().mul(&h)) else {
            return false;
        };
        self.g.mul(s) == rhs
    }

    /// `H(parts[0] ‖ parts[1] ‖ ...)` read little-endian, modulo `n`.
    pub fn hash_int(&self, parts: &[&[u8]]) -> Result<BigInt> {
        let mut hasher = D::new();
        for part in parts {
            hasher.update(part);
        }
        Ok(BigInt::from_le_bytes(&hasher.finalize()).modulo(self.curve.n())?)
    }
}

impl<D> Clone for Eddsa<D>
where
    D: Digest + Clone,
{
    fn clone(&self) -> Self {
        Self {
            curve: self.curve.clone(),
            edwards: self.edwards.clone(),
            g: self.g.clone(),
            encoding_len: self.encoding_len,
            digest: PhantomData,
        }
    }
}

impl<D> fmt::Debug for Eddsa<D>
where
    D: Digest + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Eddsa").field("curve", &self.curve).finish_non_exhaustive()
    }
}
