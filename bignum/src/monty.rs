//! Integers in Montgomery form modulo a fixed odd modulus.
//!
//! A residue `a mod m` is stored as `aR mod m` where `R = 2^shift` and `shift`
//! is the modulus size rounded up to whole limbs. Multiplication then reduces
//! with REDC instead of a division:
//!
//! ```text
//! t = aR * bR
//! q = (t mod R) * (-m^-1) mod R
//! u = (t + q * m) / R = abR mod m    (after one conditional subtraction)
//! ```

use crate::{
    BigInt, Error, Result,
    limbs::{self, LIMB_BITS, Limb},
};
use alloc::sync::Arc;
use core::{
    cmp::Ordering,
    fmt,
    ops::{Add, Mul, Neg, Sub},
};

/// Upper bound on the candidates tried when searching for a quadratic
/// non-residue in Tonelli-Shanks.
const NON_RESIDUE_SEARCH: u32 = 1024;

/// Montgomery reduction context for an odd modulus `m > 1`.
#[derive(Debug, PartialEq, Eq)]
pub struct MontyParams {
    modulus: BigInt,
    shift: usize,
    /// `R mod m`, i.e. one in Montgomery form.
    r: BigInt,
    /// `R^2 mod m`
    r2: BigInt,
    /// `R^-1 mod m`
    r_inv: BigInt,
    /// `-m^-1 mod R`
    m_neg_inv: BigInt,
    /// `-m^-1 mod 2^32`, the part of `m_neg_inv` each REDC step needs.
    m_neg_inv_limb: Limb,
}

impl MontyParams {
    /// Build the context for `modulus`, which must be odd and greater than one.
    pub fn new(modulus: BigInt) -> Result<Arc<Self>> {
        if modulus.is_negative() || modulus.is_even() || modulus.is_one() {
            return Err(Error::InvalidParameter);
        }

        let shift = modulus.limbs.len() * LIMB_BITS;
        let r = (BigInt::one() << shift).modulo(&modulus)?;
        let r2 = r.sqr().modulo(&modulus)?;
        let r_inv = r.invm(&modulus)?;

        let m_neg_inv_limb = inv_limb(modulus.low_u32()).wrapping_neg();
        let m_neg_inv = neg_inv_mod_pow2(&modulus, m_neg_inv_limb, shift);

        Ok(Arc::new(Self {
            modulus,
            shift,
            r,
            r2,
            r_inv,
            m_neg_inv,
            m_neg_inv_limb,
        }))
    }

    /// The modulus `m`.
    pub fn modulus(&self) -> &BigInt {
        &self.modulus
    }

    /// Bit shift such that `R = 2^shift > m`.
    pub fn shift(&self) -> usize {
        self.shift
    }

    /// `R^2 mod m`
    pub fn r2(&self) -> &BigInt {
        &self.r2
    }

    /// `R^-1 mod m`
    pub fn r_inv(&self) -> &BigInt {
        &self.r_inv
    }

    /// `-m^-1 mod R`
    pub fn m_neg_inv(&self) -> &BigInt {
        &self.m_neg_inv
    }

    /// Reduce an arbitrary integer into `[0, m)`.
    pub fn reduce(&self, value: &BigInt) -> BigInt {
        if !value.is_negative() && value.cmp_abs(&self.modulus) == Ordering::Less {
            return value.clone();
        }

        let (_, rem) = limbs::div_rem(&value.limbs, &self.modulus.limbs);
        let rem = BigInt::from_limbs(rem);
        if value.is_negative() && !rem.is_zero() {
            &self.modulus - &rem
        } else {
            rem
        }
    }

    /// REDC of a product of two reduced values.
    fn redc(&self, t: &[Limb]) -> BigInt {
        BigInt::from_limbs(limbs::redc(t, &self.modulus.limbs, self.m_neg_inv_limb))
    }

    fn mont_mul(&self, a: &BigInt, b: &BigInt) -> BigInt {
        self.redc(&limbs::mul(&a.limbs, &b.limbs))
    }
}

/// Inverse of an odd limb modulo `2^32` by Newton iteration.
fn inv_limb(m0: Limb) -> Limb {
    // m0 * m0 == 1 mod 8, so the seed is already correct to 3 bits.
    let mut inv = m0;
    for _ in 0..4 {
        inv = inv.wrapping_mul(2u32.wrapping_sub(m0.wrapping_mul(inv)));
    }
    inv
}

/// Lift `-m^-1 mod 2^32` to `-m^-1 mod 2^shift` by Hensel lifting.
fn neg_inv_mod_pow2(m: &BigInt, neg_inv_limb: Limb, shift: usize) -> BigInt {
    let mut inv = BigInt::from(neg_inv_limb.wrapping_neg());
    let mut bits = LIMB_BITS;

    while bits < shift {
        bits = (bits * 2).min(shift);
        let t = (m * &inv).mask_bits(bits);
        let two_minus_t = (BigInt::one() << bits) + 2u32 - t;
        inv = (&inv * &two_minus_t).mask_bits(bits);
    }

    if inv.is_zero() {
        inv
    } else {
        (BigInt::one() << shift) - inv
    }
}

/// Residue held in Montgomery form, tagged with its context.
///
/// Binary operators panic when the operands come from different contexts;
/// the `try_*` methods return [`Error::InvalidParameter`] instead.
#[derive(Clone)]
pub struct MontyForm {
    montgomery: BigInt,
    params: Arc<MontyParams>,
}

impl MontyForm {
    /// Convert `value` (reduced first) into Montgomery form.
    pub fn new(value: &BigInt, params: &Arc<MontyParams>) -> Self {
        let reduced = params.reduce(value);
        Self {
            montgomery: params.mont_mul(&reduced, &params.r2),
            params: params.clone(),
        }
    }

    /// Additive identity.
    pub fn zero(params: &Arc<MontyParams>) -> Self {
        Self {
            montgomery: BigInt::zero(),
            params: params.clone(),
        }
    }

    /// Multiplicative identity.
    pub fn one(params: &Arc<MontyParams>) -> Self {
        Self {
            montgomery: params.r.clone(),
            params: params.clone(),
        }
    }

    /// Convert back out of Montgomery form.
    pub fn retrieve(&self) -> BigInt {
        self.params.redc(&self.montgomery.limbs)
    }

    /// The raw `aR mod m` representation.
    pub fn as_montgomery(&self) -> &BigInt {
        &self.montgomery
    }

    /// The context this value belongs to.
    pub fn params(&self) -> &Arc<MontyParams> {
        &self.params
    }

    /// Is this value zero?
    pub fn is_zero(&self) -> bool {
        self.montgomery.is_zero()
    }

    /// Is this value one?
    pub fn is_one(&self) -> bool {
        self.montgomery == self.params.r
    }

    /// Parity of the canonical residue.
    pub fn is_odd(&self) -> bool {
        self.retrieve().is_odd()
    }

    fn same_context(&self, rhs: &Self) -> bool {
        Arc::ptr_eq(&self.params, &rhs.params) || self.params.modulus == rhs.params.modulus
    }

    fn with(&self, montgomery: BigInt) -> Self {
        Self {
            montgomery,
            params: self.params.clone(),
        }
    }

    fn add_unchecked(&self, rhs: &Self) -> Self {
        let mut sum = self.montgomery.limbs.clone();
        limbs::add_assign(&mut sum, &rhs.montgomery.limbs);
        if limbs::cmp(&sum, &self.params.modulus.limbs) != Ordering::Less {
            limbs::sub_assign(&mut sum, &self.params.modulus.limbs);
        }
        self.with(BigInt::from_limbs(sum))
    }

    fn sub_unchecked(&self, rhs: &Self) -> Self {
        let mut diff = self.montgomery.limbs.clone();
        if self.montgomery.cmp_abs(&rhs.montgomery) == Ordering::Less {
            limbs::add_assign(&mut diff, &self.params.modulus.limbs);
        }
        limbs::sub_assign(&mut diff, &rhs.montgomery.limbs);
        self.with(BigInt::from_limbs(diff))
    }

    fn mul_unchecked(&self, rhs: &Self) -> Self {
        self.with(self.params.mont_mul(&self.montgomery, &rhs.montgomery))
    }

    /// Checked addition.
    pub fn try_add(&self, rhs: &Self) -> Result<Self> {
        if !self.same_context(rhs) {
            return Err(Error::InvalidParameter);
        }
        Ok(self.add_unchecked(rhs))
    }

    /// Checked subtraction.
    pub fn try_sub(&self, rhs: &Self) -> Result<Self> {
        if !self.same_context(rhs) {
            return Err(Error::InvalidParameter);
        }
        Ok(self.sub_unchecked(rhs))
    }

    /// Checked multiplication.
    pub fn try_mul(&self, rhs: &Self) -> Result<Self> {
        if !self.same_context(rhs) {
            return Err(Error::InvalidParameter);
        }
        Ok(self.mul_unchecked(rhs))
    }

    /// `self * self`
    pub fn square(&self) -> Self {
        self.mul_unchecked(self)
    }

    /// `self + self`
    pub fn double(&self) -> Self {
        self.add_unchecked(self)
    }

    /// Multiplicative inverse.
    ///
    /// The plain inverse of `aR` is `a^-1 R^-1`; two multiplications by `R^2`
    /// carry it back to `a^-1 R`.
    pub fn invert(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(Error::ArithmeticDomain);
        }

        let inv = self.montgomery.invm(&self.params.modulus)?;
        let inv = self.params.mont_mul(&inv, &self.params.r2);
        Ok(self.with(self.params.mont_mul(&inv, &self.params.r2)))
    }

    /// Raise to a non-negative power. The sign of `exp` is ignored.
    pub fn pow(&self, exp: &BigInt) -> Self {
        let mut acc = Self::one(&self.params);
        for i in (0..exp.bit_length()).rev() {
            acc = acc.square();
            if exp.bit(i) {
                acc = acc.mul_unchecked(self);
            }
        }
        acc
    }

    /// Square root, if one exists.
    ///
    /// Uses `a^((m+1)/4)` when `m = 3 mod 4` and Tonelli-Shanks otherwise. The
    /// result is checked, so a non-prime modulus yields `None` rather than a
    /// wrong root.
    pub fn sqrt(&self) -> Option<Self> {
        if self.is_zero() {
            return Some(self.clone());
        }

        let m = &self.params.modulus;
        let candidate = if m.low_u32() & 3 == 3 {
            self.pow(&((m + 1u32) >> 2))
        } else {
            self.tonelli_shanks()?
        };

        (candidate.square() == *self).then_some(candidate)
    }

    fn tonelli_shanks(&self) -> Option<Self> {
        let p_minus_one = &self.params.modulus - 1u32;
        let mut s = 0;
        while !p_minus_one.bit(s) {
            s += 1;
        }
        let q = &p_minus_one >> s;

        let one = Self::one(&self.params);
        let minus_one = -&one;
        let euler = &p_minus_one >> 1;
        let z = (2..NON_RESIDUE_SEARCH)
            .map(|i| Self::new(&BigInt::from(i), &self.params))
            .find(|z| z.pow(&euler) == minus_one)?;

        let mut c = z.pow(&q);
        let mut x = self.pow(&((&q + 1u32) >> 1));
        let mut t = self.pow(&q);
        let mut order = s;

        while !t.is_one() {
            let mut i = 0;
            let mut t2i = t.clone();
            while !t2i.is_one() {
                t2i = t2i.square();
                i += 1;
                if i == order {
                    return None;
                }
            }

            let mut b = c;
            for _ in 0..(order - i - 1) {
                b = b.square();
            }
            x = &x * &b;
            c = b.square();
            t = &t * &c;
            order = i;
        }

        Some(x)
    }
}

impl PartialEq for MontyForm {
    fn eq(&self, other: &Self) -> bool {
        self.same_context(other) && self.montgomery == other.montgomery
    }
}

impl Eq for MontyForm {}

impl fmt::Debug for MontyForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MontyForm({:#x})", self.retrieve())
    }
}

macro_rules! impl_monty_binop {
    ($trait:ident, $method:ident, $inner:ident) => {
        impl $trait<&MontyForm> for &MontyForm {
            type Output = MontyForm;

            /// # Panics
            ///
            /// If the operands belong to different Montgomery contexts. Use
            #[doc = concat!("[`MontyForm::try_", stringify!($method), "`] to get an error instead.")]
            fn $method(self, rhs: &MontyForm) -> MontyForm {
                assert!(self.same_context(rhs), "Montgomery context mismatch");
                self.$inner(rhs)
            }
        }

        impl $trait<MontyForm> for MontyForm {
            type Output = MontyForm;

            fn $method(self, rhs: MontyForm) -> MontyForm {
                (&self).$method(&rhs)
            }
        }

        impl $trait<&MontyForm> for MontyForm {
            type Output = MontyForm;

            fn $method(self, rhs: &MontyForm) -> MontyForm {
                (&self).$method(rhs)
            }
        }

        impl $trait<MontyForm> for &MontyForm {
            type Output = MontyForm;

            fn $method(self, rhs: MontyForm) -> MontyForm {
                self.$method(&rhs)
            }
        }
    };
}

impl_monty_binop!(Add, add, add_unchecked);
impl_monty_binop!(Sub, sub, sub_unchecked);
impl_monty_binop!(Mul, mul, mul_unchecked);

impl Neg for &MontyForm {
    type Output = MontyForm;

    fn neg(self) -> MontyForm {
        if self.is_zero() {
            return self.clone();
        }

        let mut limbs = self.params.modulus.limbs.clone();
        limbs::sub_assign(&mut limbs, &self.montgomery.limbs);
        self.with(BigInt::from_limbs(limbs))
    }
}

impl Neg for MontyForm {
    type Output = MontyForm;

    fn neg(self) -> MontyForm {
        -&self
    }
}
