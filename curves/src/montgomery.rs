//! Montgomery curves: `by² = x³ + ax² + x`.
//!
//! Only the `u` coordinate is kept, as `(X : Z)`, so there is no general
//! addition: multiplication runs the Montgomery ladder over differential
//! additions. This is the arithmetic X25519 (RFC 7748) is built on.

use crate::{
    Error, Result,
    curve::{Domain, le_bytes},
};
use alloc::{sync::Arc, vec::Vec};
use bignum::{BigInt, MontyForm};
use core::fmt;

/// Montgomery curve.
#[derive(Clone)]
pub struct MontgomeryCurve {
    domain: Domain,
    a: MontyForm,
    b: MontyForm,
    /// `(a + 2) / 4`
    a24: MontyForm,
    gx: MontyForm,
}

impl MontgomeryCurve {
    pub(crate) fn new(domain: Domain, a: MontyForm, b: MontyForm, gx: MontyForm) -> Result<Arc<Self>> {
        let four = domain.two.double();
        if b.is_zero() || a.square() == four {
            return Err(Error::InvalidParameter);
        }

        let a24 = &(&a + &domain.two) * &four.invert()?;
        let curve = Arc::new(Self {
            domain,
            a,
            b,
            a24,
            gx,
        });

        let g = curve.generator();
        if !g.validate() || g.is_identity() || !g.ladder(curve.domain.n()).is_identity() {
            return Err(Error::InvalidParameter);
        }

        Ok(curve)
    }

    /// Field, order and cofactor.
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Coefficient `a`.
    pub fn a(&self) -> BigInt {
        self.a.retrieve()
    }

    /// Coefficient `b`.
    pub fn b(&self) -> BigInt {
        self.b.retrieve()
    }

    /// Group generator.
    pub fn generator(self: &Arc<Self>) -> MontgomeryPoint {
        MontgomeryPoint::from_x(self, self.gx.clone())
    }

    /// Point with the given `u`, which must be a field element whose point
    /// lies on the curve.
    pub fn point(self: &Arc<Self>, x: &BigInt) -> Result<MontgomeryPoint> {
        if x.is_negative() || x >= self.domain.p() {
            return Err(Error::InvalidPoint);
        }
        let point = MontgomeryPoint::from_x(self, self.domain.field_element(x));
        if point.validate() {
            Ok(point)
        } else {
            Err(Error::InvalidPoint)
        }
    }

    /// Decode a little-endian `u`, padded to the field's byte length.
    ///
    /// Bits above the field size are masked and the value reduced, as RFC 7748
    /// prescribes. The point must still lie on the curve.
    pub fn decode_point(self: &Arc<Self>, bytes: &[u8]) -> Result<MontgomeryPoint> {
        if bytes.len() != self.domain.field_bytes() {
            return Err(Error::Encoding);
        }

        let bits = self.domain.p().bit_length();
        let u = BigInt::from_le_bytes(bytes).mask_bits(bits);
        let point = MontgomeryPoint::from_x(self, self.domain.field_element(&u));
        if point.validate() {
            Ok(point)
        } else {
            Err(Error::InvalidPoint)
        }
    }
}

impl PartialEq for MontgomeryCurve {
    fn eq(&self, other: &Self) -> bool {
        self.domain == other.domain && self.a == other.a && self.b == other.b && self.gx == other.gx
    }
}

impl Eq for MontgomeryCurve {}

impl fmt::Debug for MontgomeryCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MontgomeryCurve")
            .field("domain", &self.domain)
            .field("a", &self.a)
            .field("b", &self.b)
            .finish()
    }
}

/// x-only point `(X : Z)` on a Montgomery curve.
#[derive(Clone)]
pub struct MontgomeryPoint {
    curve: Arc<MontgomeryCurve>,
    x: MontyForm,
    z: MontyForm,
}

impl MontgomeryPoint {
    /// Point at infinity, `(1 : 0)`.
    pub fn identity(curve: &Arc<MontgomeryCurve>) -> Self {
        Self {
            curve: curve.clone(),
            x: curve.domain.one.clone(),
            z: curve.domain.zero.clone(),
        }
    }

    fn from_x(curve: &Arc<MontgomeryCurve>, x: MontyForm) -> Self {
        Self {
            curve: curve.clone(),
            x,
            z: curve.domain.one.clone(),
        }
    }

    fn with(&self, x: MontyForm, z: MontyForm) -> Self {
        Self {
            curve: self.curve.clone(),
            x,
            z,
        }
    }

    /// Curve this point belongs to.
    pub fn curve(&self) -> &Arc<MontgomeryCurve> {
        &self.curve
    }

    /// Is this the point at infinity?
    pub fn is_identity(&self) -> bool {
        self.z.is_zero()
    }

    pub(crate) fn same_curve(&self, rhs: &Self) -> bool {
        Arc::ptr_eq(&self.curve, &rhs.curve) || self.curve == rhs.curve
    }

    /// Is `(x³ + ax² + x) / b` a square?
    pub fn validate(&self) -> bool {
        let Some(x) = self.normalize() else {
            return true;
        };
        let curve = &self.curve;
        let x2 = x.square();
        let rhs = &(&(&x2 * &x) + &(&curve.a * &x2)) + &x;
        match curve.b.invert() {
            Ok(b_inv) => (&rhs * &b_inv).sqrt().is_some(),
            Err(_) => false,
        }
    }

    /// Affine `u = X / Z` with one inversion, or `None` for the identity.
    fn normalize(&self) -> Option<MontyForm> {
        if self.z.is_one() {
            return Some(self.x.clone());
        }
        self.z.invert().ok().map(|zinv| &self.x * &zinv)
    }

    /// Affine `u`, or `None` for the identity.
    pub fn x(&self) -> Option<BigInt> {
        self.normalize().map(|x| x.retrieve())
    }

    /// Doubling:
    ///
    /// ```text
    /// X2 = (X + Z)² (X - Z)²
    /// Z2 = C ((X - Z)² + a24 C),  C = (X + Z)² - (X - Z)²
    /// ```
    pub fn double(&self) -> Self {
        let aa = (&self.x + &self.z).square();
        let bb = (&self.x - &self.z).square();
        let c = &aa - &bb;
        let x = &aa * &bb;
        let z = &c * &(&bb + &(&self.curve.a24 * &c));
        self.with(x, z)
    }

    /// Differential addition: `self + rhs` given `diff = self - rhs`.
    pub fn diff_add(&self, rhs: &Self, diff: &Self) -> Self {
        let a = &self.x + &self.z;
        let b = &self.x - &self.z;
        let c = &rhs.x + &rhs.z;
        let d = &rhs.x - &rhs.z;
        let da = &d * &a;
        let cb = &c * &b;
        let x = &diff.z * &(&da + &cb).square();
        let z = &diff.x * &(&da - &cb).square();
        self.with(x, z)
    }

    /// `2P + P`, with `2P - P = P` as the difference.
    pub fn triple(&self) -> Self {
        self.double().diff_add(self, self)
    }

    /// Negation does not change `u`.
    pub fn neg(&self) -> Self {
        self.clone()
    }

    /// Montgomery ladder. The sign of `k` is ignored since `-P` and `P` share
    /// `u`.
    pub fn ladder(&self, k: &BigInt) -> Self {
        // a - b = P throughout
        let mut a = self.clone();
        let mut b = Self::identity(&self.curve);

        for i in (0..k.bit_length()).rev() {
            if k.bit(i) {
                b = a.diff_add(&b, self);
                a = a.double();
            } else {
                a = a.diff_add(&b, self);
                b = b.double();
            }
        }

        b
    }

    /// Scalar multiplication, see [`MontgomeryPoint::ladder`].
    pub fn mul(&self, k: &BigInt) -> Self {
        self.ladder(k)
    }

    /// Little-endian `u`, padded to the field's byte length. The identity has
    /// no encoding.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let x = self.x().ok_or(Error::InvalidPoint)?;
        Ok(le_bytes(&x, self.curve.domain.field_bytes()))
    }
}

impl PartialEq for MontgomeryPoint {
    fn eq(&self, other: &Self) -> bool {
        self.same_curve(other) && &self.x * &other.z == &other.x * &self.z
    }
}

impl Eq for MontgomeryPoint {}

impl fmt::Debug for MontgomeryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.normalize() {
            Some(x) => f.debug_tuple("MontgomeryPoint").field(&x).finish(),
            None => write!(f, "MontgomeryPoint(identity)"),
        }
    }
}
