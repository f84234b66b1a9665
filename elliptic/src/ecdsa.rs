//! Elliptic Curve Digital Signature Algorithm (ECDSA) over short Weierstrass
//! curves, with deterministic nonces as described in [RFC 6979].
//!
//! ## Algorithm
//!
//! ```text
//! Sign(H, d):
//!   1. Set e ← bits2int(H) mod n.
//!   2. Seed HMAC-DRBG with (d, e, pers).
//!   3. Draw k ← bits2int(DRBG), retrying until 1 ≤ k < n.
//!   4. Set R ← kG and r ← R.x mod n.
//!   5. Set s ← k⁻¹(e + rd) mod n.
//!   6. If low-S is requested and s > n/2, set s ← n - s.
//!   7. Return (r, s).
//!
//! Verify(H, (r, s), Q):
//!   1. Reject unless 1 ≤ r, s < n.
//!   2. Set u1 ← e·s⁻¹ and u2 ← r·s⁻¹.
//!   3. Set P ← u1G + u2Q; reject the identity.
//!   4. Accept iff P.x mod n = r.
//! ```
//!
//! [RFC 6979]: https://www.rfc-editor.org/rfc/rfc6979

mod key;
mod signature;

pub use self::{key::KeyPair, signature::Signature};

use crate::{
    Error, Result,
    drbg::{HmacDrbg, MIN_ENTROPY},
};
use bignum::BigInt;
use core::{cell::OnceCell, fmt, marker::PhantomData};
use curves::{AffinePoint, Curve, Point, presets};
use digest::{Digest, core_api::BlockSizeUser};
use rand_core::CryptoRngCore;
use sha2::Sha256;
use zeroize::Zeroizing;

/// Nonce candidates tried before signing gives up.
pub const MAX_NONCE_ATTEMPTS: usize = 256;

/// Private key candidates tried before key generation gives up.
pub const MAX_KEY_ATTEMPTS: usize = 256;

/// Signing options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SignOptions<'a> {
    /// Normalize `s` to the lower half of `[1, n - 1]`.
    pub canonical: bool,

    /// Personalization string mixed into the nonce generator.
    pub pers: Option<&'a [u8]>,
}

/// ECDSA over a short Weierstrass curve, hashing messages with `D`.
pub struct Ecdsa<D = Sha256>
where
    D: Digest + BlockSizeUser + Clone,
{
    curve: Curve,
    g: AffinePoint,
    n: BigInt,
    n_minus_2: BigInt,
    half_n: BigInt,
    digest: PhantomData<D>,
}

impl<D> Ecdsa<D>
where
    D: Digest + BlockSizeUser + Clone,
{
    /// ECDSA over `curve`, which must be a short Weierstrass curve.
    ///
    /// Curves built without a generator table get a private one covering
    /// the full width of `n`.
    pub fn new(curve: &Curve) -> Result<Self> {
        let weierstrass = curve.as_weierstrass().ok_or(Error::InvalidParameter)?;
        let n = curve.n().clone();

        let mut g = weierstrass.generator();
        if g.precomputed().is_none() {
            g = g.precompute(n.bit_length() + 1)?;
        }

        Ok(Self {
            curve: curve.clone(),
            g,
            n_minus_2: &n - 2u32,
            half_n: &n >> 1,
            n,
            digest: PhantomData,
        })
    }

    /// ECDSA over a named preset curve.
    pub fn from_preset(name: &str) -> Result<Self> {
        Self::new(&presets::curve(name)?)
    }

    /// Underlying curve.
    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    /// Order of the generator.
    pub fn n(&self) -> &BigInt {
        &self.n
    }

    /// Generator, carrying its precomputed table.
    pub fn generator(&self) -> &AffinePoint {
        &self.g
    }

    /// Generate a key pair from `rng`.
    pub fn gen_key_pair(&self, rng: &mut impl CryptoRngCore) -> Result<KeyPair<D>> {
        let mut entropy = Zeroizing::new(alloc::vec![0u8; MIN_ENTROPY.max(self.n.byte_length())]);
        rng.fill_bytes(&mut entropy);
        self.gen_key_pair_with_entropy(&entropy, None)
    }

    /// Deterministically derive a key pair from caller-supplied entropy.
    ///
    /// The DRBG is seeded with `entropy`, the big-endian bytes of `n` as the
    /// nonce and `pers`. Candidates above `n - 2` are rejected and the
    /// accepted candidate is incremented, so the key lies in `[1, n - 1]`.
    pub fn gen_key_pair_with_entropy(&self, entropy: &[u8], pers: Option<&[u8]>) -> Result<KeyPair<D>> {
        let mut drbg = HmacDrbg::<D>::new(entropy, &self.n.to_be_bytes(), pers)?;
        let len = self.n.byte_length();

        for _ in 0..MAX_KEY_ATTEMPTS {
            let bytes = Zeroizing::new(drbg.generate(len)?);
            let candidate = Zeroizing::new(self.truncate(&bytes));
            if *candidate > self.n_minus_2 {
                log::debug!("rejected private key candidate");
                continue;
            }
            return self.key_from_private(&(&*candidate + 1u32));
        }

        Err(Error::IterationLimit)
    }

    /// Key pair from a private scalar in `[1, n - 1]`.
    pub fn key_from_private(&self, d: &BigInt) -> Result<KeyPair<D>> {
        if d.is_negative() || d.is_zero() || *d >= self.n {
            return Err(Error::InvalidParameter);
        }
        Ok(KeyPair::new(self.clone(), Some(Zeroizing::new(d.clone())), OnceCell::new()))
    }

    /// Key pair from a big-endian private scalar.
    pub fn key_from_private_bytes(&self, bytes: &[u8]) -> Result<KeyPair<D>> {
        self.key_from_private(&Zeroizing::new(BigInt::from_be_bytes(bytes)))
    }

    /// Key pair from a hex private scalar.
    pub fn key_from_private_hex(&self, hex: &str) -> Result<KeyPair<D>> {
        let d = Zeroizing::new(BigInt::from_hex(hex)?);
        self.key_from_private(&d)
    }

    /// Verification-only key pair from a point of this curve.
    ///
    /// The point must not be the identity. See [`KeyPair::validate`] for the
    /// full public key check.
    pub fn key_from_public(&self, point: &Point) -> Result<KeyPair<D>> {
        let point = point.to_affine_point().ok_or(Error::InvalidPoint)?;
        if point.curve() != self.g.curve() || point.is_identity() {
            return Err(Error::InvalidPoint);
        }
        Ok(KeyPair::new(self.clone(), None, OnceCell::from(point)))
    }

    /// Verification-only key pair from a SEC1 encoded point.
    pub fn key_from_public_bytes(&self, bytes: &[u8]) -> Result<KeyPair<D>> {
        self.key_from_public(&self.curve.decode_point(bytes)?)
    }

    /// Verification-only key pair from a hex SEC1 encoded point.
    pub fn key_from_public_hex(&self, hex: &str) -> Result<KeyPair<D>> {
        let bytes = hex::decode(hex).map_err(|_| Error::Encoding)?;
        self.key_from_public_bytes(&bytes)
    }

    /// Sign a message digest.
    pub fn sign(&self, digest: &[u8], key: &KeyPair<D>, opts: &SignOptions<'_>) -> Result<Signature> {
        let d = key.private_scalar()?;
        let len = self.n.byte_length();
        let msg = self.truncate(digest).modulo(&self.n)?;

        let entropy = Zeroizing::new(d.to_be_bytes_padded(len.max(MIN_ENTROPY))?);
        let nonce = msg.to_be_bytes_padded(len)?;
        let mut drbg = HmacDrbg::<D>::new(&entropy, &nonce, opts.pers)?;

        for _ in 0..MAX_NONCE_ATTEMPTS {
            let bytes = Zeroizing::new(drbg.generate(len)?);
            let k = Zeroizing::new(self.truncate(&bytes));
            if k.is_zero() || *k >= self.n {
                log::debug!("rejected nonce candidate");
                continue;
            }

            let point = self.g.mul(&k);
            let (Some(x), Some(y)) = (point.x(), point.y()) else {
                log::debug!("rejected nonce candidate");
                continue;
            };

            let r = x.modulo(&self.n)?;
            if r.is_zero() {
                log::debug!("rejected nonce candidate");
                continue;
            }

            let k_inv = Zeroizing::new(k.invm(&self.n)?);
            let mut s = (&*k_inv * (&msg + &r * d)).modulo(&self.n)?;
            if s.is_zero() {
                log::debug!("rejected nonce candidate");
                continue;
            }

            let mut recovery_id = y.is_odd() as u8 | (((x != r) as u8) << 1);
            if opts.canonical && s > self.half_n {
                s = &self.n - &s;
                recovery_id ^= 1;
            }

            return Ok(Signature::new(r, s).with_recovery_id(recovery_id));
        }

        Err(Error::IterationLimit)
    }

    /// Hash `message` with `D`, then sign the digest.
    pub fn sign_message(&self, message: &[u8], key: &KeyPair<D>, opts: &SignOptions<'_>) -> Result<Signature> {
        self.sign(&D::digest(message), key, opts)
    }

    /// Verify a signature over a message digest.
    pub fn verify(&self, digest: &[u8], signature: &Signature, key: &KeyPair<D>) -> bool {
        self.verify_point(digest, signature, key.public_key())
    }

    /// Verify a DER encoded signature over a message digest.
    ///
    /// Malformed DER is an error; a well-formed but wrong signature is `false`.
    pub fn verify_der(&self, digest: &[u8], der: &[u8], key: &KeyPair<D>) -> Result<bool> {
        let signature = Signature::from_der(der)?;
        Ok(self.verify(digest, &signature, key))
    }

    /// Hash `message` with `D`, then verify the signature over the digest.
    pub fn verify_message(&self, message: &[u8], signature: &Signature, key: &KeyPair<D>) -> bool {
        self.verify(&D::digest(message), signature, key)
    }

    fn verify_point(&self, digest: &[u8], signature: &Signature, q: &AffinePoint) -> bool {
        let (r, s) = (signature.r(), signature.s());
        if !self.in_range(r) || !self.in_range(s) {
            return false;
        }

        let Ok(msg) = self.truncate(digest).modulo(&self.n) else {
            return false;
        };
        let Ok(s_inv) = s.invm(&self.n) else {
            return false;
        };
        let (Ok(u1), Ok(u2)) = ((&msg * &s_inv).modulo(&self.n), (r * &s_inv).modulo(&self.n)) else {
            return false;
        };

        let Ok(point) = self.g.mul_add(&u1, q, &u2) else {
            return false;
        };

        match point.x().map(|x| x.modulo(&self.n)) {
            Some(Ok(x)) => x == *r,
            _ => false,
        }
    }

    /// Recover the public key from a signature and its recovery id `j`.
    ///
    /// Bit 0 of `j` is the parity of `R.y`, bit 1 says `R.x` was reduced
    /// modulo `n`. Fails with [`Error::InvalidSignature`] when no key
    /// matches.
    pub fn recover_public_key(&self, digest: &[u8], signature: &Signature, j: u8) -> Result<AffinePoint> {
        if j > 3 {
            return Err(Error::InvalidParameter);
        }

        let (r, s) = (signature.r(), signature.s());
        if !self.in_range(r) || !self.in_range(s) {
            return Err(Error::InvalidSignature);
        }

        let domain = self.curve.domain();
        let second = j & 2 != 0;
        if second && *r >= domain.p().modulo(&self.n)? {
            return Err(Error::InvalidSignature);
        }

        let x = if second { r + &self.n } else { r.clone() };
        let weierstrass = self.curve.as_weierstrass().ok_or(Error::InvalidParameter)?;
        let point = weierstrass
            .point_from_x(&x, j & 1 != 0)
            .map_err(|_| Error::InvalidSignature)?;

        let e = self.truncate(digest).modulo(&self.n)?;
        let r_inv = r.invm(&self.n)?;
        let s1 = ((&self.n - &e) * &r_inv).modulo(&self.n)?;
        let s2 = (s * &r_inv).modulo(&self.n)?;

        let q = self.g.mul_add(&s1, &point, &s2)?;
        if q.is_identity() {
            return Err(Error::InvalidSignature);
        }
        Ok(q)
    }

    /// Find the recovery id under which `signature` recovers `public`.
    pub fn key_recovery_param(&self, digest: &[u8], signature: &Signature, public: &AffinePoint) -> Result<u8> {
        (0..4)
            .find(|&j| {
                self.recover_public_key(digest, signature, j)
                    .is_ok_and(|q| q == *public)
            })
            .ok_or(Error::InvalidSignature)
    }

    /// Leftmost `bits(n)` bits of `bytes`, as an integer (`bits2int`).
    pub(crate) fn truncate(&self, bytes: &[u8]) -> BigInt {
        let value = BigInt::from_be_bytes(bytes);
        let excess = (bytes.len() * 8).saturating_sub(self.n.bit_length());
        value >> excess
    }

    fn in_range(&self, value: &BigInt) -> bool {
        !value.is_negative() && !value.is_zero() && *value < self.n
    }
}

impl<D> Clone for Ecdsa<D>
where
    D: Digest + BlockSizeUser + Clone,
{
    fn clone(&self) -> Self {
        Self {
            curve: self.curve.clone(),
            g: self.g.clone(),
            n: self.n.clone(),
            n_minus_2: self.n_minus_2.clone(),
            half_n: self.half_n.clone(),
            digest: PhantomData,
        }
    }
}

impl<D> fmt::Debug for Ecdsa<D>
where
    D: Digest + BlockSizeUser + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ecdsa").field("curve", &self.curve).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::Ecdsa;
    use hex_literal::hex;
    use sha2::Sha256;

    #[test]
    fn truncates_wide_digests() {
        let ecdsa = Ecdsa::<Sha256>::from_preset("p256").unwrap();
        let digest = hex!(
            "001be0a5686f0c826a08601b828a2c0a347bf8cbbce0f7b6e5d87f114712395e"
            "aaf0429a5d3c224363a2602dfe91e0f6"
        );
        let expected: bignum::BigInt =
            "49255321320058729917982773444793127850273694476748623591312642711554767198"
                .parse()
                .unwrap();
        assert_eq!(ecdsa.truncate(&digest), expected);

        // Digests no wider than n are left alone.
        let short = hex!("00ff");
        assert_eq!(ecdsa.truncate(&short), bignum::BigInt::from(0xffu32));
    }
}
