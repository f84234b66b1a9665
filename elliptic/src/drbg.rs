//! HMAC_DRBG as specified in [NIST SP 800-90A] section 10.1.2.
//!
//! ## Algorithm
//!
//! ```text
//! Update(seed):
//!   K = HMAC(K, V || 0x00 || seed);  V = HMAC(K, V)
//!   if seed is present:
//!     K = HMAC(K, V || 0x01 || seed);  V = HMAC(K, V)
//!
//! Instantiate(entropy, nonce, pers):
//!   K = 0x00 00 .. 00;  V = 0x01 01 .. 01
//!   Update(entropy || nonce || pers)
//!
//! Generate(len, add):
//!   if add is present: Update(add)
//!   T = V = HMAC(K, V) until len bytes are produced
//!   Update(add)
//! ```
//!
//! ECDSA seeded with the private key and the message digest is the
//! deterministic nonce construction of [RFC 6979].
//!
//! [NIST SP 800-90A]: https://csrc.nist.gov/pubs/sp/800/90/a/r1/final
//! [RFC 6979]: https://www.rfc-editor.org/rfc/rfc6979

use crate::{Error, Result};
use alloc::vec::Vec;
use core::{fmt, marker::PhantomData};
use digest::{Digest, core_api::BlockSizeUser};
use hmac::{Mac, SimpleHmac};
use zeroize::Zeroize;

/// Minimum number of entropy bytes (192 bits).
pub const MIN_ENTROPY: usize = 24;

/// Requests allowed between reseeds.
pub const RESEED_INTERVAL: u64 = 1 << 48;

/// Deterministic random bit generator over `HMAC<D>`.
pub struct HmacDrbg<D>
where
    D: Digest + BlockSizeUser + Clone,
{
    k: Vec<u8>,
    v: Vec<u8>,
    reseed_counter: u64,
    digest: PhantomData<D>,
}

impl<D> HmacDrbg<D>
where
    D: Digest + BlockSizeUser + Clone,
{
    /// Instantiate from `entropy`, which must be at least [`MIN_ENTROPY`]
    /// bytes, a nonce and an optional personalization string.
    pub fn new(entropy: &[u8], nonce: &[u8], pers: Option<&[u8]>) -> Result<Self> {
        if entropy.len() < MIN_ENTROPY {
            return Err(Error::InvalidParameter);
        }

        let len = <D as Digest>::output_size();
        let mut drbg = Self {
            k: alloc::vec![0x00; len],
            v: alloc::vec![0x01; len],
            reseed_counter: 1,
            digest: PhantomData,
        };

        let pers = pers.unwrap_or_default();
        drbg.update(Some(&[entropy, nonce, pers][..]))?;
        Ok(drbg)
    }

    /// Mix in fresh entropy and optional additional input, resetting the
    /// reseed counter.
    pub fn reseed(&mut self, entropy: &[u8], add: Option<&[u8]>) -> Result<()> {
        if entropy.len() < MIN_ENTROPY {
            return Err(Error::InvalidParameter);
        }

        self.update(Some(&[entropy, add.unwrap_or_default()][..]))?;
        self.reseed_counter = 1;
        log::debug!("HMAC-DRBG reseeded");
        Ok(())
    }

    /// Generate `len` bytes.
    pub fn generate(&mut self, len: usize) -> Result<Vec<u8>> {
        self.generate_with(len, None)
    }

    /// Generate `len` bytes, mixing in additional input first.
    ///
    /// `Some(&[])` still runs both update rounds, so it yields a different
    /// stream than `None`.
    pub fn generate_with(&mut self, len: usize, add: Option<&[u8]>) -> Result<Vec<u8>> {
        if self.reseed_counter > RESEED_INTERVAL {
            return Err(Error::IterationLimit);
        }

        if let Some(add) = add {
            self.update(Some(&[add][..]))?;
        }

        let mut out = Vec::with_capacity(len + self.v.len());
        while out.len() < len {
            self.v = self.mac(&[self.v.as_slice()])?;
            out.extend_from_slice(&self.v);
        }
        out.truncate(len);

        match add {
            Some(add) => self.update(Some(&[add][..]))?,
            None => self.update(None)?,
        }
        self.reseed_counter += 1;
        Ok(out)
    }

    fn update(&mut self, seed: Option<&[&[u8]]>) -> Result<()> {
        self.round(0x00, seed.unwrap_or_default())?;
        if let Some(seed) = seed {
            self.round(0x01, seed)?;
        }
        Ok(())
    }

    /// `K = HMAC(K, V || tag || seed)`, then `V = HMAC(K, V)`.
    fn round(&mut self, tag: u8, seed: &[&[u8]]) -> Result<()> {
        let tag = [tag];
        let mut parts = Vec::with_capacity(seed.len() + 2);
        parts.push(self.v.as_slice());
        parts.push(&tag);
        parts.extend_from_slice(seed);

        let k = self.mac(&parts)?;
        self.k.zeroize();
        self.k = k;
        self.v = self.mac(&[self.v.as_slice()])?;
        Ok(())
    }

    /// `HMAC(K, parts[0] || parts[1] || ...)`
    fn mac(&self, parts: &[&[u8]]) -> Result<Vec<u8>> {
        let mut mac = <SimpleHmac<D> as Mac>::new_from_slice(&self.k)
            .map_err(|_| Error::InvalidParameter)?;
        for part in parts {
            mac.update(part);
        }
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

impl<D> Drop for HmacDrbg<D>
where
    D: Digest + BlockSizeUser + Clone,
{
    fn drop(&mut self) {
        self.k.zeroize();
        self.v.zeroize();
    }
}

impl<D> fmt::Debug for HmacDrbg<D>
where
    D: Digest + BlockSizeUser + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacDrbg")
            .field("reseed_counter", &self.reseed_counter)
            .finish_non_exhaustive()
    }
}
