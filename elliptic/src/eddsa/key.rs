//! EdDSA key pairs.

use super::{Eddsa, Signature};
use crate::{Error, Result};
use alloc::vec::Vec;
use bignum::BigInt;
use core::fmt;
use curves::EdwardsPoint;
use digest::Digest;
use sha2::Sha512;
use zeroize::Zeroizing;

/// Secret key with its hash split into the clamped scalar and the nonce
/// prefix. Every part is wiped on drop.
#[derive(Clone)]
pub(super) struct Expanded {
    pub(super) secret: Zeroizing<Vec<u8>>,
    pub(super) scalar: Zeroizing<BigInt>,
    pub(super) prefix: Zeroizing<Vec<u8>>,
}

/// EdDSA key pair. Keys built from an encoded point can only verify.
pub struct KeyPair<D = Sha512>
where
    D: Digest + Clone,
{
    eddsa: Eddsa<D>,
    expanded: Option<Expanded>,
    public: EdwardsPoint,
    public_bytes: Vec<u8>,
}

impl<D> KeyPair<D>
where
    D: Digest + Clone,
{
    pub(super) fn new(eddsa: Eddsa<D>, expanded: Option<Expanded>, public: EdwardsPoint) -> Self {
        let public_bytes = public.encode();
        Self {
            eddsa,
            expanded,
            public,
            public_bytes,
        }
    }

    pub(super) fn expanded(&self) -> Result<&Expanded> {
        self.expanded.as_ref().ok_or(Error::MissingKey)
    }

    /// Public point `A`.
    pub fn public_key(&self) -> &EdwardsPoint {
        &self.public
    }

    /// Encoded public point.
    pub fn public_bytes(&self) -> &[u8] {
        &self.public_bytes
    }

    /// The secret key this pair was expanded from.
    pub fn secret(&self) -> Result<&[u8]> {
        self.expanded().map(|e| e.secret.as_slice())
    }

    /// Clamped private scalar `a`.
    pub fn private_scalar(&self) -> Result<&BigInt> {
        self.expanded().map(|e| &*e.scalar)
    }

    /// Upper half of the secret key's hash, which seeds signing nonces.
    pub fn message_prefix(&self) -> Result<&[u8]> {
        self.expanded().map(|e| e.prefix.as_slice())
    }

    /// Sign `message`, see [`Eddsa::sign`].
    pub fn sign(&self, message: &[u8]) -> Result<Signature> {
        self.eddsa.sign(message, self)
    }

    /// Verify a signature over `message`, see [`Eddsa::verify`].
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        self.eddsa.verify(message, signature, self)
    }
}

impl<D> Clone for KeyPair<D>
where
    D: Digest + Clone,
{
    fn clone(&self) -> Self {
        Self {
            eddsa: self.eddsa.clone(),
            expanded: self.expanded.clone(),
            public: self.public.clone(),
            public_bytes: self.public_bytes.clone(),
        }
    }
}

impl<D> fmt::Debug for KeyPair<D>
where
    D: Digest + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public", &hex::encode(&self.public_bytes))
            .finish_non_exhaustive()
    }
}

impl<D> ::signature::Signer<Signature> for KeyPair<D>
where
    D: Digest + Clone,
{
    fn try_sign(&self, msg: &[u8]) -> ::signature::Result<Signature> {
        self.sign(msg).map_err(|_| ::signature::Error::new())
    }
}

impl<D> ::signature::Verifier<Signature> for KeyPair<D>
where
    D: Digest + Clone,
{
    fn verify(&self, msg: &[u8], signature: &Signature) -> ::signature::Result<()> {
        if self.eddsa.verify(msg, signature, self) {
            Ok(())
        } else {
            Err(::signature::Error::new())
        }
    }
}
