//! Jacobian coordinates: `(X : Y : Z)` represents `(X/Z², Y/Z³)`.

use super::{AffinePoint, WeierstrassCurve};
use crate::{
    mul::{self, Accumulator, DEFAULT_WINDOW},
    precomputed::AffineCoords,
};
use alloc::{sync::Arc, vec::Vec};
use bignum::{BigInt, MontyForm};
use core::fmt;

/// Point on a short Weierstrass curve in Jacobian coordinates.
#[derive(Clone)]
pub struct JacobianPoint {
    pub(crate) curve: Arc<WeierstrassCurve>,
    pub(crate) x: MontyForm,
    pub(crate) y: MontyForm,
    pub(crate) z: MontyForm,
}

impl JacobianPoint {
    /// Additive identity `(1 : 1 : 0)`.
    pub fn identity(curve: &Arc<WeierstrassCurve>) -> Self {
        let one = &curve.domain.one;
        Self {
            curve: curve.clone(),
            x: one.clone(),
            y: one.clone(),
            z: curve.domain.zero.clone(),
        }
    }

    pub(crate) fn from_coords(curve: &Arc<WeierstrassCurve>, coords: &AffineCoords, negate: bool) -> Self {
        Self {
            curve: curve.clone(),
            x: coords.x.clone(),
            y: if negate { -&coords.y } else { coords.y.clone() },
            z: curve.domain.one.clone(),
        }
    }

    /// Curve this point belongs to.
    pub fn curve(&self) -> &Arc<WeierstrassCurve> {
        &self.curve
    }

    /// Is this the point at infinity?
    pub fn is_identity(&self) -> bool {
        self.z.is_zero()
    }

    /// Convert to affine coordinates with one inversion.
    pub fn to_affine(&self) -> AffinePoint {
        if self.is_identity() {
            return AffinePoint::identity(&self.curve);
        }

        match self.z.invert() {
            Ok(zinv) => {
                let zinv2 = zinv.square();
                let x = &self.x * &zinv2;
                let y = &(&self.y * &zinv2) * &zinv;
                AffinePoint::from_coords(&self.curve, x, y)
            }
            Err(_) => AffinePoint::identity(&self.curve),
        }
    }

    /// Does the point satisfy `Y² = X³ + aXZ⁴ + bZ⁶`?
    pub fn validate(&self) -> bool {
        if self.is_identity() {
            return true;
        }
        let z2 = self.z.square();
        let z4 = z2.square();
        let z6 = &z4 * &z2;
        let rhs = &(&self.x.square() * &self.x)
            + &(&(&(&self.curve.a * &self.x) * &z4) + &(&self.curve.b * &z6));
        self.y.square() == rhs
    }

    /// Point addition, `add-1998-cmo-2`.
    pub(crate) fn sum(&self, rhs: &Self) -> Self {
        if rhs.is_identity() {
            return self.clone();
        }
        if self.is_identity() {
            return rhs.clone();
        }

        let pz2 = rhs.z.square();
        let z2 = self.z.square();
        let u1 = &self.x * &pz2;
        let u2 = &rhs.x * &z2;
        let s1 = &(&self.y * &pz2) * &rhs.z;
        let s2 = &(&rhs.y * &z2) * &self.z;

        let h = &u1 - &u2;
        let r = &s1 - &s2;
        if h.is_zero() {
            return if r.is_zero() { self.double() } else { Self::identity(&self.curve) };
        }

        let h2 = h.square();
        let h3 = &h2 * &h;
        let v = &u1 * &h2;

        let x = &(&r.square() + &h3) - &v.double();
        let y = &(&r * &(&v - &x)) - &(&s1 * &h3);
        let z = &(&self.z * &rhs.z) * &h;
        self.with(x, y, z)
    }

    /// Addition of a point with `Z = 1`.
    fn add_mixed(&self, px: &MontyForm, py: &MontyForm) -> Self {
        if self.is_identity() {
            return Self {
                curve: self.curve.clone(),
                x: px.clone(),
                y: py.clone(),
                z: self.curve.domain.one.clone(),
            };
        }

        let z2 = self.z.square();
        let u1 = &self.x;
        let u2 = px * &z2;
        let s1 = &self.y;
        let s2 = &(py * &z2) * &self.z;

        let h = u1 - &u2;
        let r = s1 - &s2;
        if h.is_zero() {
            return if r.is_zero() { self.double() } else { Self::identity(&self.curve) };
        }

        let h2 = h.square();
        let h3 = &h2 * &h;
        let v = u1 * &h2;

        let x = &(&r.square() + &h3) - &v.double();
        let y = &(&r * &(&v - &x)) - &(s1 * &h3);
        let z = &self.z * &h;
        self.with(x, y, z)
    }

    /// Point doubling, choosing the formula by the value of `a`.
    pub fn double(&self) -> Self {
        if self.is_identity() {
            return self.clone();
        }

        if self.curve.a_is_zero {
            self.double_a_zero()
        } else if self.curve.a_is_minus_three {
            self.double_a_minus_three()
        } else {
            self.double_generic()
        }
    }

    /// `dbl-2009-l`
    fn double_a_zero(&self) -> Self {
        let a = self.x.square();
        let b = self.y.square();
        let c = b.square();
        let d = (&(&(&self.x + &b).square() - &a) - &c).double();
        let e = &a.double() + &a;
        let f = e.square();

        let x = &f - &d.double();
        let y = &(&e * &(&d - &x)) - &c.double().double().double();
        let z = (&self.y * &self.z).double();
        self.with(x, y, z)
    }

    /// `dbl-2001-b`
    fn double_a_minus_three(&self) -> Self {
        let delta = self.z.square();
        let gamma = self.y.square();
        let beta = &self.x * &gamma;
        let t = &(&self.x - &delta) * &(&self.x + &delta);
        let alpha = &t.double() + &t;
        let beta4 = beta.double().double();

        let x = &alpha.square() - &beta4.double();
        let z = &(&(&self.y + &self.z).square() - &gamma) - &delta;
        let y = &(&alpha * &(&beta4 - &x)) - &gamma.square().double().double().double();
        self.with(x, y, z)
    }

    /// `dbl-2007-bl`
    fn double_generic(&self) -> Self {
        let xx = self.x.square();
        let yy = self.y.square();
        let yyyy = yy.square();
        let zz = self.z.square();

        let s = (&(&(&self.x + &yy).square() - &xx) - &yyyy).double();
        let m = &(&xx.double() + &xx) + &(&self.curve.a * &zz.square());
        let t = &m.square() - &s.double();

        let y = &(&m * &(&s - &t)) - &yyyy.double().double().double();
        let z = &(&(&self.y + &self.z).square() - &yy) - &zz;
        self.with(t, y, z)
    }

    /// `2P + P`
    pub fn triple(&self) -> Self {
        self.double().sum(self)
    }

    /// Negation: `(X : -Y : Z)`.
    pub fn neg(&self) -> Self {
        self.with(self.x.clone(), -&self.y, self.z.clone())
    }

    /// Windowed NAF multiplication. A negative `k` gives `-(|k|·P)`.
    pub fn mul(&self, k: &BigInt) -> Self {
        mul::wnaf_mul(Self::identity(&self.curve), self, k, DEFAULT_WINDOW)
    }

    /// `φ(X : Y : Z) = (βX : Y : Z)`
    pub(crate) fn endo(&self, beta: &MontyForm) -> Self {
        self.with(&self.x * beta, self.y.clone(), self.z.clone())
    }

    fn with(&self, x: MontyForm, y: MontyForm, z: MontyForm) -> Self {
        Self {
            curve: self.curve.clone(),
            x,
            y,
            z,
        }
    }

    /// Normalize many points sharing one inversion (Montgomery's trick).
    /// `None` if any of them is the identity.
    pub(crate) fn batch_normalize(points: &[Self]) -> Option<Vec<AffineCoords>> {
        let first = points.first()?;
        if points.iter().any(Self::is_identity) {
            return None;
        }

        let mut prefix = Vec::with_capacity(points.len());
        let mut acc = first.curve.domain.one.clone();
        for point in points {
            prefix.push(acc.clone());
            acc = &acc * &point.z;
        }

        let mut inv = acc.invert().ok()?;
        let mut coords = Vec::with_capacity(points.len());
        for (point, before) in points.iter().zip(prefix.iter()).rev() {
            let zinv = &inv * before;
            inv = &inv * &point.z;

            let zinv2 = zinv.square();
            coords.push(AffineCoords {
                x: &point.x * &zinv2,
                y: &(&point.y * &zinv2) * &zinv,
            });
        }
        coords.reverse();
        Some(coords)
    }
}

impl PartialEq for JacobianPoint {
    fn eq(&self, other: &Self) -> bool {
        if !Arc::ptr_eq(&self.curve, &other.curve) && self.curve != other.curve {
            return false;
        }
        match (self.is_identity(), other.is_identity()) {
            (true, true) => return true,
            (false, false) => (),
            _ => return false,
        }

        let z2 = self.z.square();
        let pz2 = other.z.square();
        &self.x * &pz2 == &other.x * &z2
            && &(&self.y * &pz2) * &other.z == &(&other.y * &z2) * &self.z
    }
}

impl Eq for JacobianPoint {}

impl fmt::Debug for JacobianPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_identity() {
            return write!(f, "JacobianPoint(identity)");
        }
        f.debug_struct("JacobianPoint")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("z", &self.z)
            .finish()
    }
}

impl Accumulator for JacobianPoint {
    fn double(&self) -> Self {
        JacobianPoint::double(self)
    }

    fn add(&self, rhs: &Self) -> Self {
        self.sum(rhs)
    }

    fn neg(&self) -> Self {
        JacobianPoint::neg(self)
    }

    fn add_coords(&self, coords: &AffineCoords, negate: bool) -> Self {
        if negate {
            self.add_mixed(&coords.x, &-&coords.y)
        } else {
            self.add_mixed(&coords.x, &coords.y)
        }
    }

    fn normalize_all(points: &[Self]) -> Option<Vec<AffineCoords>> {
        Self::batch_normalize(points)
    }
}
