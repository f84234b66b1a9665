//! ECDSA key pairs.

use super::{Ecdsa, SignOptions, Signature};
use crate::{Error, Result, ecdh};
use alloc::{string::String, vec::Vec};
use bignum::BigInt;
use core::{cell::OnceCell, fmt};
use curves::{AffinePoint, Point, PointFormat};
use digest::{Digest, core_api::BlockSizeUser};
use sha2::Sha256;
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroizing;

/// ECDSA key pair: a private scalar, a public point, or both.
///
/// The public point of a private key is computed on first use and cached.
///
/// ## Usage
///
/// The [`signature`](::signature) crate's traits are implemented on top of
/// [`KeyPair::sign`] and [`KeyPair::verify`], hashing messages with `D`:
///
/// - [`Signer`](::signature::Signer): sign a message
/// - [`Verifier`](::signature::Verifier): verify a message signature
pub struct KeyPair<D = Sha256>
where
    D: Digest + BlockSizeUser + Clone,
{
    ecdsa: Ecdsa<D>,
    private: Option<Zeroizing<BigInt>>,
    public: OnceCell<AffinePoint>,
}

impl<D> KeyPair<D>
where
    D: Digest + BlockSizeUser + Clone,
{
    pub(super) fn new(ecdsa: Ecdsa<D>, private: Option<Zeroizing<BigInt>>, public: OnceCell<AffinePoint>) -> Self {
        Self {
            ecdsa,
            private,
            public,
        }
    }

    /// Signature scheme this key belongs to.
    pub fn ecdsa(&self) -> &Ecdsa<D> {
        &self.ecdsa
    }

    /// Public point, `d·G`.
    pub fn public_key(&self) -> &AffinePoint {
        self.public.get_or_init(|| match &self.private {
            Some(d) => self.ecdsa.g.mul(d),
            None => AffinePoint::identity(self.ecdsa.g.curve()),
        })
    }

    /// SEC1 encoding of the public point.
    pub fn get_public(&self, format: PointFormat) -> Vec<u8> {
        self.public_key().to_sec1(format)
    }

    /// Hex SEC1 encoding of the public point.
    pub fn get_public_hex(&self, format: PointFormat) -> String {
        hex::encode(self.get_public(format))
    }

    /// Private scalar, if this key has one.
    pub fn get_private(&self) -> Option<&BigInt> {
        self.private.as_deref()
    }

    /// Private scalar as hex, padded to the byte length of `n`.
    pub fn get_private_hex(&self) -> Option<Zeroizing<String>> {
        let width = 2 * self.ecdsa.n.byte_length();
        self.get_private().map(|d| Zeroizing::new(d.to_hex_padded(width)))
    }

    /// Private scalar, or [`Error::MissingKey`].
    pub fn private_scalar(&self) -> Result<&BigInt> {
        self.get_private().ok_or(Error::MissingKey)
    }

    /// Check the public point: not the identity, on the curve, and of
    /// order `n`.
    pub fn validate(&self) -> Result<()> {
        let point = Point::from(self.public_key().clone());
        self.ecdsa.curve.validate_public_key(&point)
    }

    /// Diffie-Hellman: the `x` coordinate of `d·Q`.
    ///
    /// Every problem with `other` is reported as [`Error::TwistSecurity`].
    pub fn derive(&self, other: &Point) -> Result<BigInt> {
        let shared = ecdh::agree(&self.ecdsa.curve, self.private_scalar()?, other)?;
        shared.x().ok_or(Error::TwistSecurity)
    }

    /// Sign a message digest, see [`Ecdsa::sign`].
    pub fn sign(&self, digest: &[u8], opts: &SignOptions<'_>) -> Result<Signature> {
        self.ecdsa.sign(digest, self, opts)
    }

    /// Verify a signature over a message digest, see [`Ecdsa::verify`].
    pub fn verify(&self, digest: &[u8], signature: &Signature) -> bool {
        self.ecdsa.verify(digest, signature, self)
    }
}

impl<D> Clone for KeyPair<D>
where
    D: Digest + BlockSizeUser + Clone,
{
    fn clone(&self) -> Self {
        Self {
            ecdsa: self.ecdsa.clone(),
            private: self.private.clone(),
            public: self.public.clone(),
        }
    }
}

impl<D> ConstantTimeEq for KeyPair<D>
where
    D: Digest + BlockSizeUser + Clone,
{
    fn ct_eq(&self, other: &Self) -> Choice {
        let private = match (&self.private, &other.private) {
            (Some(a), Some(b)) => a.ct_eq(b),
            (None, None) => Choice::from(1),
            _ => Choice::from(0),
        };
        let format = PointFormat::Uncompressed;
        private & self.get_public(format).ct_eq(&other.get_public(format))
    }
}

impl<D> PartialEq for KeyPair<D>
where
    D: Digest + BlockSizeUser + Clone,
{
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<D> Eq for KeyPair<D> where D: Digest + BlockSizeUser + Clone {}

impl<D> fmt::Debug for KeyPair<D>
where
    D: Digest + BlockSizeUser + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("curve", &self.ecdsa.curve.name())
            .field("public", self.public_key())
            .finish_non_exhaustive()
    }
}

impl<D> ::signature::Signer<Signature> for KeyPair<D>
where
    D: Digest + BlockSizeUser + Clone,
{
    fn try_sign(&self, msg: &[u8]) -> ::signature::Result<Signature> {
        self.ecdsa
            .sign_message(msg, self, &SignOptions::default())
            .map_err(|_| ::signature::Error::new())
    }
}

impl<D> ::signature::Verifier<Signature> for KeyPair<D>
where
    D: Digest + BlockSizeUser + Clone,
{
    fn verify(&self, msg: &[u8], signature: &Signature) -> ::signature::Result<()> {
        if self.ecdsa.verify_message(msg, signature, self) {
            Ok(())
        } else {
            Err(::signature::Error::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ecdsa::{Ecdsa, SignOptions};
    use crate::{Error, PointFormat};
    use ::signature::{Signer, Verifier};
    use sha2::Sha256;

    const SECRET: &str = "a1b2c3";

    #[test]
    fn public_key_is_cached() {
        let ecdsa = Ecdsa::<Sha256>::from_preset("secp256k1").unwrap();
        let key = ecdsa.key_from_private_hex(SECRET).unwrap();
        let public = key.public_key().clone();
        assert!(core::ptr::eq(key.public_key(), key.public_key()));
        assert_eq!(public, ecdsa.generator().mul(key.get_private().unwrap()));
        assert_eq!(key.validate(), Ok(()));
    }

    #[test]
    fn private_hex_is_padded() {
        let ecdsa = Ecdsa::<Sha256>::from_preset("p256").unwrap();
        let key = ecdsa.key_from_private_hex(SECRET).unwrap();
        let hex = key.get_private_hex().unwrap();
        assert_eq!(hex.len(), 64);
        assert!(hex.ends_with("a1b2c3"));

        let public = ecdsa
            .key_from_public_hex(&key.get_public_hex(PointFormat::Compressed))
            .unwrap();
        assert_eq!(public.get_private(), None);
        assert!(public.get_private_hex().is_none());
        assert_eq!(public.public_key(), key.public_key());
        assert_ne!(public, key);
    }

    #[test]
    fn public_keys_cannot_sign() {
        let ecdsa = Ecdsa::<Sha256>::from_preset("p256").unwrap();
        let key = ecdsa.key_from_private_hex(SECRET).unwrap();
        let public = ecdsa.key_from_public(&key.public_key().clone().into()).unwrap();

        let digest = [0x42; 32];
        assert_eq!(public.sign(&digest, &SignOptions::default()), Err(Error::MissingKey));
        assert_eq!(public.derive(&key.public_key().clone().into()), Err(Error::MissingKey));

        let signature = key.sign(&digest, &SignOptions::default()).unwrap();
        assert!(public.verify(&digest, &signature));
    }

    #[test]
    fn signature_traits() {
        let ecdsa = Ecdsa::<Sha256>::from_preset("secp256k1").unwrap();
        let key = ecdsa.key_from_private_hex(SECRET).unwrap();

        let signature = key.try_sign(b"hello").unwrap();
        assert!(Verifier::verify(&key, b"hello", &signature).is_ok());
        assert!(Verifier::verify(&key, b"hellO", &signature).is_err());
    }

    #[test]
    fn out_of_range_private_keys() {
        let ecdsa = Ecdsa::<Sha256>::from_preset("secp256k1").unwrap();
        assert_eq!(ecdsa.key_from_private_hex("0").unwrap_err(), Error::InvalidParameter);
        let n = ecdsa.n().clone();
        assert_eq!(ecdsa.key_from_private(&n).unwrap_err(), Error::InvalidParameter);
        assert!(ecdsa.key_from_private(&(n - 1u32)).is_ok());
    }
}
