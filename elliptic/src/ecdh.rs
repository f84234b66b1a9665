//! Elliptic Curve Diffie-Hellman over curves of every model.
//!
//! On Montgomery curves private keys are little-endian byte strings clamped
//! as in [RFC 7748]: the low `log2(h)` bits are cleared, bit `bits(p) - 1`
//! is set and everything above it cleared. The shared secret is then the
//! encoded `u` coordinate, which makes curve25519 agreement X25519.
//!
//! Elsewhere private keys are big-endian scalars in `[1, n - 1]` and the
//! shared secret is the big-endian `x` coordinate of `d·Q`.
//!
//! [RFC 7748]: https://www.rfc-editor.org/rfc/rfc7748

use crate::{Error, Result, ecdsa::MAX_KEY_ATTEMPTS};
use alloc::vec::Vec;
use bignum::BigInt;
use core::fmt;
use curves::{Curve, Model, Point, PointFormat, presets};
use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

/// Diffie-Hellman key agreement on one curve.
#[derive(Clone, Debug)]
pub struct Ecdh {
    curve: Curve,
    g: Point,
}

impl Ecdh {
    /// Key agreement over `curve`.
    pub fn new(curve: &Curve) -> Self {
        Self {
            curve: curve.clone(),
            g: curve.generator(),
        }
    }

    /// Key agreement over a named preset curve.
    pub fn from_preset(name: &str) -> Result<Self> {
        Ok(Self::new(&presets::curve(name)?))
    }

    /// Underlying curve.
    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    /// Length of an encoded private key.
    pub fn private_len(&self) -> usize {
        match self.curve.model() {
            Model::Montgomery => self.curve.domain().field_bytes(),
            _ => self.curve.domain().scalar_bytes(),
        }
    }

    /// Generate a key pair from `rng`.
    pub fn gen_key_pair(&self, rng: &mut impl CryptoRngCore) -> Result<KeyPair> {
        let mut bytes = Zeroizing::new(alloc::vec![0u8; self.private_len()]);

        if self.curve.model() == Model::Montgomery {
            rng.fill_bytes(&mut bytes);
            return self.key_from_private(&bytes);
        }

        let n = self.curve.n();
        for _ in 0..MAX_KEY_ATTEMPTS {
            rng.fill_bytes(&mut bytes);
            let d = Zeroizing::new(BigInt::from_be_bytes(&bytes).mask_bits(n.bit_length()));
            if d.is_zero() || *d >= *n {
                log::debug!("rejected private key candidate");
                continue;
            }
            return Ok(self.key_from_scalar(d));
        }

        Err(Error::IterationLimit)
    }

    /// Key pair from an encoded private key.
    pub fn key_from_private(&self, bytes: &[u8]) -> Result<KeyPair> {
        if bytes.len() != self.private_len() {
            return Err(Error::InvalidParameter);
        }

        let d = match self.curve.model() {
            Model::Montgomery => Zeroizing::new(self.clamp(bytes)?),
            _ => {
                let d = Zeroizing::new(BigInt::from_be_bytes(bytes));
                if d.is_zero() || *d >= *self.curve.n() {
                    return Err(Error::InvalidParameter);
                }
                d
            }
        };

        Ok(self.key_from_scalar(d))
    }

    fn key_from_scalar(&self, scalar: Zeroizing<BigInt>) -> KeyPair {
        KeyPair {
            curve: self.curve.clone(),
            public: self.g.mul(&scalar),
            scalar,
        }
    }

    /// RFC 7748 scalar clamping, generalized to any cofactor which is a
    /// power of two.
    fn clamp(&self, bytes: &[u8]) -> Result<BigInt> {
        let domain = self.curve.domain();
        let h = domain.h();
        let cofactor_bits = h.bit_length().saturating_sub(1);
        if BigInt::one() << cofactor_bits != *h {
            return Err(Error::InvalidParameter);
        }

        let top = domain.p().bit_length() - 1;
        let k = BigInt::from_le_bytes(bytes).mask_bits(top);
        let k = (k >> cofactor_bits) << cofactor_bits;
        Ok(k + (BigInt::one() << top))
    }
}

/// One party's key pair.
#[derive(Clone)]
pub struct KeyPair {
    curve: Curve,
    scalar: Zeroizing<BigInt>,
    public: Point,
}

impl KeyPair {
    /// Private scalar, after clamping on Montgomery curves.
    pub fn private_scalar(&self) -> &BigInt {
        &self.scalar
    }

    /// Public point.
    pub fn public_key(&self) -> &Point {
        &self.public
    }

    /// Public point in the curve's native encoding.
    pub fn public_bytes(&self) -> Result<Vec<u8>> {
        self.public.encode(PointFormat::Uncompressed)
    }

    /// Shared `x` (`u`) coordinate with `peer`.
    ///
    /// Every problem with `peer` is reported as [`Error::TwistSecurity`].
    pub fn derive(&self, peer: &Point) -> Result<BigInt> {
        agree(&self.curve, &self.scalar, peer)?
            .x()
            .ok_or(Error::TwistSecurity)
    }

    /// Shared secret with an encoded `peer` key.
    pub fn derive_bytes(&self, peer: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        let peer = self.curve.decode_point(peer).map_err(|_| Error::TwistSecurity)?;
        let shared = agree(&self.curve, &self.scalar, &peer)?;

        let bytes = match shared {
            Point::Montgomery(shared) => shared.encode()?,
            shared => {
                let x = Zeroizing::new(shared.x().ok_or(Error::TwistSecurity)?);
                x.to_be_bytes_padded(self.curve.domain().field_bytes())?
            }
        };
        Ok(Zeroizing::new(bytes))
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("curve", &self.curve.name())
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

/// `scalar · peer`, after checking `peer` is a valid public key of `curve`.
///
/// Fails with [`Error::TwistSecurity`] for an invalid peer and for a shared
/// point which is the identity, or has `u = 0` on a Montgomery curve.
pub(crate) fn agree(curve: &Curve, scalar: &BigInt, peer: &Point) -> Result<Point> {
    curve
        .validate_public_key(peer)
        .map_err(|_| Error::TwistSecurity)?;

    let shared = peer.mul(scalar);
    match shared.x() {
        None => Err(Error::TwistSecurity),
        Some(u) if u.is_zero() && curve.model() == Model::Montgomery => Err(Error::TwistSecurity),
        Some(_) => Ok(shared),
    }
}

#[cfg(test)]
mod tests {
    use super::Ecdh;
    use crate::Error;
    use bignum::BigInt;
    use hex_literal::hex;

    #[test]
    fn curve25519_clamping() {
        let ecdh = Ecdh::from_preset("curve25519").unwrap();
        let key = ecdh.key_from_private(&[0xff; 32]).unwrap();
        let d = key.private_scalar();
        assert_eq!(d.bit_length(), 255);
        assert!(!d.bit(0) && !d.bit(1) && !d.bit(2));
        assert!(d.bit(3));

        let key = ecdh.key_from_private(&[0; 32]).unwrap();
        assert_eq!(*key.private_scalar(), BigInt::one() << 254);
    }

    #[test]
    fn private_key_length_and_range() {
        let x25519 = Ecdh::from_preset("curve25519").unwrap();
        assert_eq!(x25519.key_from_private(&[1; 31]).unwrap_err(), Error::InvalidParameter);

        let k256 = Ecdh::from_preset("secp256k1").unwrap();
        assert_eq!(k256.key_from_private(&[0; 32]).unwrap_err(), Error::InvalidParameter);
        let n = hex!("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141");
        assert_eq!(k256.key_from_private(&n).unwrap_err(), Error::InvalidParameter);
        assert!(k256.key_from_private(&[1; 32]).is_ok());
    }
}
