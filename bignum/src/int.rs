//! Signed arbitrary-precision integers.

use crate::{
    Error, Result,
    limbs::{self, LIMB_BITS, Limb},
};
use alloc::{vec, vec::Vec};
use core::{cmp::Ordering, fmt};
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

/// Signed arbitrary-precision integer.
///
/// Stored as a sign flag and a little-endian vector of 32-bit limbs with no
/// most significant zero limbs. Zero has no limbs and is never negative.
///
/// All public operations return new values.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct BigInt {
    pub(crate) negative: bool,
    pub(crate) limbs: Vec<Limb>,
}

impl BigInt {
    /// Zero.
    pub const fn zero() -> Self {
        Self {
            negative: false,
            limbs: Vec::new(),
        }
    }

    /// One.
    pub fn one() -> Self {
        Self::from(1u32)
    }

    /// Build from a sign and limbs, restoring the canonical form.
    pub(crate) fn from_parts(negative: bool, mut limbs: Vec<Limb>) -> Self {
        limbs::normalize(&mut limbs);
        let negative = negative && !limbs.is_empty();
        Self { negative, limbs }
    }

    pub(crate) fn from_limbs(limbs: Vec<Limb>) -> Self {
        Self::from_parts(false, limbs)
    }

    /// Decode a non-negative integer from big-endian bytes.
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        let mut limbs = Vec::with_capacity(bytes.len().div_ceil(4));
        for chunk in bytes.rchunks(4) {
            let limb = chunk
                .iter()
                .fold(0, |acc: Limb, &byte| (acc << 8) | byte as Limb);
            limbs.push(limb);
        }
        Self::from_limbs(limbs)
    }

    /// Decode a non-negative integer from little-endian bytes.
    pub fn from_le_bytes(bytes: &[u8]) -> Self {
        let mut limbs = Vec::with_capacity(bytes.len().div_ceil(4));
        for chunk in bytes.chunks(4) {
            let limb = chunk
                .iter()
                .rev()
                .fold(0, |acc: Limb, &byte| (acc << 8) | byte as Limb);
            limbs.push(limb);
        }
        Self::from_limbs(limbs)
    }

    /// Big-endian bytes of the magnitude, without leading zeros.
    ///
    /// Zero encodes as an empty vector.
    pub fn to_be_bytes(&self) -> Vec<u8> {
        let mut out = self.to_le_bytes();
        out.reverse();
        out
    }

    /// Little-endian bytes of the magnitude, without trailing zeros.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.limbs.len() * 4);
        for limb in &self.limbs {
            out.extend_from_slice(&limb.to_le_bytes());
        }
        while out.last() == Some(&0) {
            out.pop();
        }
        out
    }

    /// Big-endian bytes of the magnitude, left-padded with zeros to `len`.
    ///
    /// Fails with [`Error::InvalidParameter`] when the value needs more bytes.
    pub fn to_be_bytes_padded(&self, len: usize) -> Result<Vec<u8>> {
        let bytes = self.to_be_bytes();
        if bytes.len() > len {
            return Err(Error::InvalidParameter);
        }

        let mut out = vec![0u8; len - bytes.len()];
        out.extend_from_slice(&bytes);
        Ok(out)
    }

    /// Little-endian bytes of the magnitude, right-padded with zeros to `len`.
    pub fn to_le_bytes_padded(&self, len: usize) -> Result<Vec<u8>> {
        let mut out = self.to_le_bytes();
        if out.len() > len {
            return Err(Error::InvalidParameter);
        }

        out.resize(len, 0);
        Ok(out)
    }

    /// Is this value zero?
    pub fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }

    /// Is this value strictly negative?
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Is this value even?
    pub fn is_even(&self) -> bool {
        !self.is_odd()
    }

    /// Is this value odd?
    pub fn is_odd(&self) -> bool {
        self.limbs.first().is_some_and(|limb| limb & 1 == 1)
    }

    /// Is the magnitude equal to one?
    pub fn is_one(&self) -> bool {
        !self.negative && self.limbs == [1]
    }

    /// Number of bits in the magnitude.
    pub fn bit_length(&self) -> usize {
        limbs::bit_length(&self.limbs)
    }

    /// Number of bytes in the magnitude.
    pub fn byte_length(&self) -> usize {
        self.bit_length().div_ceil(8)
    }

    /// Test bit `i` of the magnitude.
    pub fn bit(&self, i: usize) -> bool {
        self.limbs
            .get(i / LIMB_BITS)
            .is_some_and(|limb| (limb >> (i % LIMB_BITS)) & 1 == 1)
    }

    /// Low `bits` bits of the magnitude. The sign is kept.
    pub fn mask_bits(&self, bits: usize) -> Self {
        let mut limbs = self.limbs.clone();
        limbs::mask_assign(&mut limbs, bits);
        Self::from_parts(self.negative, limbs)
    }

    /// Low 32 bits of the magnitude.
    pub fn low_u32(&self) -> u32 {
        self.limbs.first().copied().unwrap_or(0)
    }

    /// Convert to `u64` if the value is non-negative and fits.
    pub fn to_u64(&self) -> Option<u64> {
        if self.negative || self.limbs.len() > 2 {
            return None;
        }

        let lo = self.low_u32() as u64;
        let hi = self.limbs.get(1).copied().unwrap_or(0) as u64;
        Some(lo | (hi << 32))
    }

    /// Absolute value.
    pub fn abs(&self) -> Self {
        Self::from_limbs(self.limbs.clone())
    }

    /// Square.
    pub fn sqr(&self) -> Self {
        Self::from_limbs(limbs::mul(&self.limbs, &self.limbs))
    }

    /// Raise to a small power.
    pub fn pow(&self, mut exp: u32) -> Self {
        let mut base = self.clone();
        let mut acc = Self::one();
        while exp > 0 {
            if exp & 1 == 1 {
                acc = &acc * &base;
            }
            base = base.sqr();
            exp >>= 1;
        }
        acc
    }

    /// Compare magnitudes, ignoring signs.
    pub fn cmp_abs(&self, other: &Self) -> Ordering {
        limbs::cmp(&self.limbs, &other.limbs)
    }

    /// Division returning `(quotient, remainder)`.
    ///
    /// The quotient truncates toward zero. The remainder is always in
    /// `[0, |divisor|)`:
    ///
    /// - negative dividend, positive divisor: the quotient is `-(|a| / d)` and
    ///   a non-zero remainder `r` is replaced with `d - r`;
    /// - non-negative dividend, negative divisor: the quotient is negated and
    ///   the remainder is left as is;
    /// - both negative: as for the absolute values.
    ///
    /// The first case means `a != q * d + r` for negative dividends. Callers
    /// reducing into `[0, d)` rely on the remainder alone.
    pub fn div_rem(&self, divisor: &Self) -> Result<(Self, Self)> {
        if divisor.is_zero() {
            return Err(Error::ArithmeticDomain);
        }

        let (q, r) = limbs::div_rem(&self.limbs, &divisor.limbs);
        let (q, r) = (Self::from_limbs(q), Self::from_limbs(r));

        Ok(match (self.negative, divisor.negative) {
            (false, false) | (true, true) => (q, r),
            (true, false) if r.is_zero() => (-q, r),
            (true, false) => (-q, &divisor.abs() - &r),
            (false, true) => (-q, r),
        })
    }

    /// Truncating quotient. See [`BigInt::div_rem`].
    pub fn checked_div(&self, divisor: &Self) -> Result<Self> {
        self.div_rem(divisor).map(|(q, _)| q)
    }

    /// Remainder in `[0, |m|)`. See [`BigInt::div_rem`].
    pub fn modulo(&self, m: &Self) -> Result<Self> {
        self.div_rem(m).map(|(_, r)| r)
    }

    /// Divide, rounding to the nearest integer with halves rounded away from
    /// zero.
    pub fn div_round(&self, divisor: &Self) -> Result<Self> {
        if divisor.is_zero() {
            return Err(Error::ArithmeticDomain);
        }

        let (q, r) = limbs::div_rem(&self.limbs, &divisor.limbs);
        let mut q = Self::from_limbs(q);
        let r = Self::from_limbs(r);

        if (&r << 1).cmp_abs(divisor) != Ordering::Less {
            q = &q + &Self::one();
        }

        Ok(if self.negative != divisor.negative {
            -q
        } else {
            q
        })
    }

    /// Modular inverse via the extended binary GCD.
    ///
    /// `p` must be odd and positive. Fails with [`Error::ArithmeticDomain`]
    /// when `gcd(self, p) != 1`.
    pub fn invm(&self, p: &Self) -> Result<Self> {
        if p.negative || p.is_even() {
            return Err(Error::ArithmeticDomain);
        }
        if p.is_one() {
            return Ok(Self::zero());
        }

        let mut a = self.modulo(p)?;
        let mut b = p.clone();
        let mut x1 = Self::one();
        let mut x2 = Self::zero();

        let halve = |x: &mut Self| {
            if x.is_odd() {
                *x = &*x + p;
            }
            *x = &*x >> 1;
        };

        while !a.is_one() && !b.is_one() {
            if a.is_zero() || b.is_zero() {
                return Err(Error::ArithmeticDomain);
            }

            while a.is_even() {
                a = &a >> 1;
                halve(&mut x1);
            }
            while b.is_even() {
                b = &b >> 1;
                halve(&mut x2);
            }

            if a >= b {
                a = &a - &b;
                x1 = &x1 - &x2;
            } else {
                b = &b - &a;
                x2 = &x2 - &x1;
            }
        }

        let inverse = if a.is_one() { x1 } else { x2 };
        inverse.modulo(p)
    }

    /// Add magnitudes, or subtract them when `negate_rhs` flips the signs
    /// apart.
    pub(crate) fn add_signed(&self, rhs: &Self, negate_rhs: bool) -> Self {
        let rhs_negative = rhs.negative ^ negate_rhs;

        if self.negative == rhs_negative {
            let mut limbs = self.limbs.clone();
            limbs::add_assign(&mut limbs, &rhs.limbs);
            return Self::from_parts(self.negative, limbs);
        }

        match self.cmp_abs(rhs) {
            Ordering::Equal => Self::zero(),
            Ordering::Greater => {
                let mut limbs = self.limbs.clone();
                limbs::sub_assign(&mut limbs, &rhs.limbs);
                Self::from_parts(self.negative, limbs)
            }
            Ordering::Less => {
                let mut limbs = rhs.limbs.clone();
                limbs::sub_assign(&mut limbs, &self.limbs);
                Self::from_parts(rhs_negative, limbs)
            }
        }
    }

    pub(crate) fn mul_signed(&self, rhs: &Self) -> Self {
        Self::from_parts(
            self.negative ^ rhs.negative,
            limbs::mul(&self.limbs, &rhs.limbs),
        )
    }

    pub(crate) fn shl_bits(&self, bits: usize) -> Self {
        Self::from_parts(self.negative, limbs::shl(&self.limbs, bits))
    }

    /// Shift the magnitude right, truncating toward zero.
    pub(crate) fn shr_bits(&self, bits: usize) -> Self {
        let mut limbs = self.limbs.clone();
        limbs::shr_assign(&mut limbs, bits);
        Self::from_parts(self.negative, limbs)
    }

    pub(crate) fn negated(&self) -> Self {
        Self::from_parts(!self.negative, self.limbs.clone())
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => self.cmp_abs(other),
            (true, true) => other.cmp_abs(self),
        }
    }
}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl ConstantTimeEq for BigInt {
    fn ct_eq(&self, other: &Self) -> Choice {
        let len = self.limbs.len().max(other.limbs.len());
        let mut acc = Choice::from((self.negative == other.negative) as u8);
        for i in 0..len {
            let a = self.limbs.get(i).copied().unwrap_or(0);
            let b = other.limbs.get(i).copied().unwrap_or(0);
            acc &= a.ct_eq(&b);
        }
        acc
    }
}

impl Zeroize for BigInt {
    fn zeroize(&mut self) {
        self.limbs.zeroize();
        self.negative = false;
    }
}

impl From<u32> for BigInt {
    fn from(n: u32) -> Self {
        Self::from_limbs(vec![n])
    }
}

impl From<u64> for BigInt {
    fn from(n: u64) -> Self {
        Self::from_limbs(vec![n as Limb, (n >> 32) as Limb])
    }
}

impl From<i64> for BigInt {
    fn from(n: i64) -> Self {
        let magnitude = Self::from(n.unsigned_abs());
        Self::from_parts(n < 0, magnitude.limbs)
    }
}

impl From<i32> for BigInt {
    fn from(n: i32) -> Self {
        Self::from(n as i64)
    }
}

impl fmt::Debug for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigInt({:#x})", self)
    }
}
