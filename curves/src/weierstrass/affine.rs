//! Affine points.

use super::{JacobianPoint, WeierstrassCurve};
use crate::{
    Error, Result,
    mul::{self, Accumulator, DEFAULT_WINDOW, PRECOMPUTED_WINDOW, Term},
    precomputed::{AffineCoords, Precomputed},
};
use alloc::{sync::Arc, vec::Vec};
use bignum::{BigInt, MontyForm};
use core::fmt;

/// Point on a short Weierstrass curve in affine coordinates.
///
/// A point may carry a [`Precomputed`] table of its own multiples, which
/// [`AffinePoint::mul`] then uses.
#[derive(Clone)]
pub struct AffinePoint {
    pub(crate) curve: Arc<WeierstrassCurve>,
    pub(crate) x: MontyForm,
    pub(crate) y: MontyForm,

    /// Is this point the point at infinity?
    pub(crate) infinity: bool,

    pub(crate) precomputed: Option<Arc<Precomputed>>,
}

impl AffinePoint {
    /// Additive identity of the group a.k.a. the point at infinity.
    pub fn identity(curve: &Arc<WeierstrassCurve>) -> Self {
        Self {
            curve: curve.clone(),
            x: curve.domain.zero.clone(),
            y: curve.domain.zero.clone(),
            infinity: true,
            precomputed: None,
        }
    }

    /// Trusted coordinates, e.g. the result of arithmetic.
    pub(crate) fn from_coords(curve: &Arc<WeierstrassCurve>, x: MontyForm, y: MontyForm) -> Self {
        Self {
            curve: curve.clone(),
            x,
            y,
            infinity: false,
            precomputed: None,
        }
    }

    pub(crate) fn with_table(self, precomputed: Option<Arc<Precomputed>>) -> Self {
        Self { precomputed, ..self }
    }

    /// Curve this point belongs to.
    pub fn curve(&self) -> &Arc<WeierstrassCurve> {
        &self.curve
    }

    /// Is this point the point at infinity?
    pub fn is_identity(&self) -> bool {
        self.infinity
    }

    /// `x` coordinate, or `None` for the identity.
    pub fn x(&self) -> Option<BigInt> {
        (!self.infinity).then(|| self.x.retrieve())
    }

    /// `y` coordinate, or `None` for the identity.
    pub fn y(&self) -> Option<BigInt> {
        (!self.infinity).then(|| self.y.retrieve())
    }

    /// Table of precomputed multiples, if any.
    pub fn precomputed(&self) -> Option<&Arc<Precomputed>> {
        self.precomputed.as_ref()
    }

    /// Does the point satisfy the curve equation? The identity does.
    pub fn validate(&self) -> bool {
        self.infinity || self.curve.is_on_curve(&self.x, &self.y)
    }

    pub(crate) fn same_curve(&self, rhs: &Self) -> bool {
        Arc::ptr_eq(&self.curve, &rhs.curve) || self.curve == rhs.curve
    }

    /// Point addition.
    pub fn add(&self, rhs: &Self) -> Result<Self> {
        if !self.same_curve(rhs) {
            return Err(Error::InvalidParameter);
        }
        Ok(self.sum(rhs))
    }

    /// Affine addition with one inversion.
    pub(crate) fn sum(&self, rhs: &Self) -> Self {
        if self.infinity {
            return rhs.clone().with_table(None);
        }
        if rhs.infinity {
            return self.clone().with_table(None);
        }

        if self.x == rhs.x {
            return if self.y == rhs.y && !self.y.is_zero() {
                self.double()
            } else {
                Self::identity(&self.curve)
            };
        }

        let slope = (&self.x - &rhs.x)
            .invert()
            .map(|inv| &(&self.y - &rhs.y) * &inv);
        match slope {
            Ok(c) => {
                let x = &(&c.square() - &self.x) - &rhs.x;
                let y = &(&c * &(&self.x - &x)) - &self.y;
                Self::from_coords(&self.curve, x, y)
            }
            Err(_) => Self::identity(&self.curve),
        }
    }

    /// Point doubling with one inversion.
    pub fn double(&self) -> Self {
        if self.infinity {
            return self.clone().with_table(None);
        }

        let ys1 = self.y.double();
        let slope = ys1.invert().map(|inv| {
            let x2 = self.x.square();
            &(&(&x2.double() + &x2) + &self.curve.a) * &inv
        });
        match slope {
            Ok(c) => {
                let x = &c.square() - &self.x.double();
                let y = &(&c * &(&self.x - &x)) - &self.y;
                Self::from_coords(&self.curve, x, y)
            }
            Err(_) => Self::identity(&self.curve),
        }
    }

    /// `2P + P`
    pub fn triple(&self) -> Self {
        self.double().sum(self)
    }

    /// Negation, `(x, -y)`. A precomputed table is negated along with the
    /// point.
    pub fn neg(&self) -> Self {
        if self.infinity {
            return self.clone();
        }
        Self {
            curve: self.curve.clone(),
            x: self.x.clone(),
            y: -&self.y,
            infinity: false,
            precomputed: self.precomputed.as_ref().map(|table| Arc::new(table.negate())),
        }
    }

    /// `(x : y : 1)`, or `(1 : 1 : 0)` for the identity.
    pub fn to_jacobian(&self) -> JacobianPoint {
        if self.infinity {
            return JacobianPoint::identity(&self.curve);
        }
        JacobianPoint {
            curve: self.curve.clone(),
            x: self.x.clone(),
            y: self.y.clone(),
            z: self.curve.domain.one.clone(),
        }
    }

    /// Scalar multiplication.
    ///
    /// Uses, in order of preference: the fixed-base comb when the point has a
    /// table wide enough for `k`, the GLV endomorphism when the curve has one,
    /// and windowed NAF. A negative `k` gives `-(|k|·P)`.
    pub fn mul(&self, k: &BigInt) -> Self {
        if k.is_negative() {
            return self.mul(&k.abs()).neg();
        }
        if self.infinity || k.is_zero() {
            return Self::identity(&self.curve);
        }

        let identity = JacobianPoint::identity(&self.curve);
        if let Some(doubles) = self.precomputed.as_ref().and_then(|table| table.doubles()) {
            if let Some(product) = mul::fixed_naf_mul(identity.clone(), doubles, k) {
                log::trace!("{}: fixed-base multiplication", self.curve.domain.name());
                return product.to_affine();
            }
        }

        let mut terms = Vec::with_capacity(2);
        self.push_terms(k, &mut terms);
        mul::mul_add_many(identity, &terms).to_affine()
    }

    /// `k1·self + k2·rhs`, sharing the doublings.
    pub fn mul_add(&self, k1: &BigInt, rhs: &Self, k2: &BigInt) -> Result<Self> {
        Self::mul_add_many(&[(self, k1), (rhs, k2)])
    }

    /// `Σ kᵢ·Pᵢ` by interleaving the NAFs of every term.
    ///
    /// All points must share a curve; the list must not be empty.
    pub fn mul_add_many(terms: &[(&Self, &BigInt)]) -> Result<Self> {
        Self::combine(terms).map(|sum| sum.to_affine())
    }

    pub(crate) fn combine(terms: &[(&Self, &BigInt)]) -> Result<JacobianPoint> {
        let (first, _) = terms.first().ok_or(Error::InvalidParameter)?;
        if terms.iter().any(|(point, _)| !first.same_curve(point)) {
            return Err(Error::InvalidParameter);
        }

        let mut windows = Vec::with_capacity(terms.len() * 2);
        for (point, k) in terms {
            if !point.infinity && !k.is_zero() {
                point.push_terms(k, &mut windows);
            }
        }

        Ok(mul::mul_add_many(JacobianPoint::identity(&first.curve), &windows))
    }

    /// Append the NAF terms computing `k·self`: two half-width terms on a
    /// curve with an endomorphism, otherwise one.
    fn push_terms<'a>(&'a self, k: &BigInt, terms: &mut Vec<Term<'a, JacobianPoint>>) {
        let naf_table = self.precomputed.as_ref().and_then(|table| table.naf());

        let split = self
            .curve
            .endo
            .as_ref()
            .and_then(|endo| Some((endo, self.curve.split_scalar(k)?)));

        let Some((endo, (k1, k2))) = split else {
            log::trace!("{}: windowed NAF multiplication", self.curve.domain.name());
            match naf_table {
                Some(table) => terms.push(Term::with_table(table, k)),
                None => terms.push(Term::new(&self.to_jacobian(), k, DEFAULT_WINDOW)),
            }
            return;
        };

        log::trace!("{}: endomorphism multiplication", self.curve.domain.name());
        match naf_table {
            Some(table) => {
                let image = table.points.iter().map(|p| p.endo(&endo.beta)).collect();
                terms.push(Term::with_table(table, &k1));
                terms.push(Term::with_coords(image, table.wnd, &k2));
            }
            None => {
                let base = self.to_jacobian();
                let multiples = mul::odd_multiples(&base, DEFAULT_WINDOW);
                match JacobianPoint::normalize_all(&multiples) {
                    Some(coords) => {
                        let image: Vec<AffineCoords> =
                            coords.iter().map(|p| p.endo(&endo.beta)).collect();
                        terms.push(Term::with_coords(coords, DEFAULT_WINDOW, &k1));
                        terms.push(Term::with_coords(image, DEFAULT_WINDOW, &k2));
                    }
                    None => {
                        terms.push(Term::new(&base, &k1, DEFAULT_WINDOW));
                        terms.push(Term::new(&base.endo(&endo.beta), &k2, DEFAULT_WINDOW));
                    }
                }
            }
        }
    }

    /// Copy of this point carrying a table of its multiples: doublings
    /// covering `power` bits and odd multiples for an 8-bit window.
    pub fn precompute(&self, power: usize) -> Result<Self> {
        if self.infinity {
            return Err(Error::InvalidPoint);
        }
        let table = mul::precompute(&self.to_jacobian(), power, PRECOMPUTED_WINDOW)
            .ok_or(Error::InvalidPoint)?;
        Ok(self.clone().with_table(Some(Arc::new(table))))
    }
}

impl PartialEq for AffinePoint {
    fn eq(&self, other: &Self) -> bool {
        if !self.same_curve(other) {
            return false;
        }
        match (self.infinity, other.infinity) {
            (true, true) => true,
            (false, false) => self.x == other.x && self.y == other.y,
            _ => false,
        }
    }
}

impl Eq for AffinePoint {}

impl fmt::Debug for AffinePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.infinity {
            return write!(f, "AffinePoint(identity)");
        }
        f.debug_struct("AffinePoint")
            .field("x", &self.x)
            .field("y", &self.y)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::AffinePoint;
    use crate::presets;
    use bignum::BigInt;

    fn hex(s: &str) -> BigInt {
        BigInt::from_hex(s).unwrap()
    }

    #[test]
    fn group_laws() {
        let curve = presets::curve("p256").unwrap();
        let curve = curve.as_weierstrass().unwrap();
        let g = curve.generator();
        let o = AffinePoint::identity(curve);
        let g2 = g.double();
        let g3 = g.triple();

        assert_eq!(g.sum(&o), g);
        assert_eq!(o.sum(&g), g);
        assert!(g.sum(&g.neg()).is_identity());
        assert_eq!(g.sum(&g), g2);
        assert_eq!(g2.sum(&g), g3);
        assert_eq!(g.sum(&g2).sum(&g3), g.sum(&g2.sum(&g3)));
        assert!(g3.validate());
    }

    #[test]
    fn problematic_scalar() {
        let curve = presets::curve("secp256k1").unwrap();
        let curve = curve.as_weierstrass().unwrap();
        let g = curve.generator();
        assert!(g.precomputed().is_some());

        let k = hex("6d1229a6b24c2e775c062870ad26bc261051e0198c67203167273c7c62538846");
        let plain = g.clone().with_table(None).mul(&k);
        assert_eq!(g.mul(&k), plain);
        assert_eq!(g.to_jacobian().mul(&k).to_affine(), plain);

        let wide = hex("6d1229a6b24c2e775c062870ad26bc261051e0198c67203167273c7c62538846 12345678");
        let plain = g.clone().with_table(None).mul(&wide);
        assert_eq!(g.mul(&wide), plain);
        assert_eq!(g.to_jacobian().mul(&wide).to_affine(), plain);
    }

    #[test]
    fn multiplication_commutes() {
        let curve = presets::curve("secp256k1").unwrap();
        let curve = curve.as_weierstrass().unwrap();
        let g = curve.generator();

        let k1 = hex("32efeba414cd0c830aed727749e816a01c471831536fd2fce28c56b54f5a3bb1");
        let k2 = hex("5f2e49b5d64e53f9811545434706cde4de528af97bfd49fde1f6cf792ee37a8c");
        assert_eq!(g.mul(&k1).mul(&k2), g.mul(&k2).mul(&k1));
    }

    #[test]
    fn negative_scalar() {
        let curve = presets::curve("p192").unwrap();
        let curve = curve.as_weierstrass().unwrap();
        let g = curve.generator();
        let k = BigInt::from(1234567u32);
        assert_eq!(g.mul(&-&k), g.mul(&k).neg());
    }

    #[test]
    fn mul_add_matches_separate_products() {
        for name in ["secp256k1", "p224"] {
            let curve = presets::curve(name).unwrap();
            let curve = curve.as_weierstrass().unwrap();
            let g = curve.generator();
            let q = g.mul(&BigInt::from(0xdead_beefu32));

            let k1 = hex("2f9a30fc8e1d7a6e9c03411b6b5ef2a0c9d3f83a");
            let k2 = hex("c0ffee0123456789abcdef");
            let expected = g.mul(&k1).sum(&q.mul(&k2));
            assert_eq!(g.mul_add(&k1, &q, &k2).unwrap(), expected);
        }
    }

    #[test]
    fn precompute_is_a_new_point() {
        let curve = presets::curve("p256").unwrap();
        let curve = curve.as_weierstrass().unwrap();
        let q = curve.generator().mul(&BigInt::from(7u32));
        assert!(q.precomputed().is_none());

        let fast = q.precompute(257).unwrap();
        assert!(fast.precomputed().is_some());
        assert_eq!(fast, q);

        let k = hex("ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632550");
        assert_eq!(fast.mul(&k), q.mul(&k));
        assert_eq!(fast.neg().mul(&k), q.neg().mul(&k));
    }
}
