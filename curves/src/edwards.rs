//! Twisted Edwards curves: `ax² + y² = c²(1 + dx²y²)`.
//!
//! Points are kept in projective coordinates `(X : Y : Z)` and added with the
//! unified `add-2008-bbjlp` and `dbl-2008-bbjlp` formulas, which have no
//! exceptional cases on complete curves. The identity is `(0 : c : 1)`.
//!
//! Twisted curves (`a != 1`) are supported only with `c = 1`.

use crate::{
    Error, Result,
    curve::{Domain, le_bytes},
    mul::{self, Accumulator, DEFAULT_WINDOW, PRECOMPUTED_WINDOW, Term},
    precomputed::{AffineCoords, Precomputed, PrecomputedTable},
};
use alloc::{sync::Arc, vec::Vec};
use bignum::{BigInt, MontyForm};
use core::fmt;

/// Twisted Edwards curve.
#[derive(Clone)]
pub struct EdwardsCurve {
    domain: Domain,
    a: MontyForm,
    c: MontyForm,
    c2: MontyForm,
    d: MontyForm,
    twisted: bool,
    one_c: bool,
    m_one_a: bool,
    gx: MontyForm,
    gy: MontyForm,
    precomputed: Option<Arc<Precomputed>>,
}

impl EdwardsCurve {
    pub(crate) fn new(
        domain: Domain,
        a: MontyForm,
        c: MontyForm,
        d: MontyForm,
        gx: MontyForm,
        gy: MontyForm,
    ) -> Result<Arc<Self>> {
        let twisted = !a.is_one();
        let one_c = c.is_one();
        if a.is_zero() || c.is_zero() || d.is_zero() || a == d || (twisted && !one_c) {
            return Err(Error::InvalidParameter);
        }

        let curve = Arc::new(Self {
            m_one_a: a == -&domain.one,
            c2: c.square(),
            twisted,
            one_c,
            domain,
            a,
            c,
            d,
            gx,
            gy,
            precomputed: None,
        });

        let g = curve.generator();
        if !g.validate() || g.is_identity() {
            return Err(Error::InvalidParameter);
        }
        if !mul::wnaf_mul(EdwardsPoint::identity(&curve), &g, curve.domain.n(), DEFAULT_WINDOW)
            .is_identity()
        {
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

    /// Coefficient `c`.
    pub fn c(&self) -> BigInt {
        self.c.retrieve()
    }

    /// Coefficient `d`.
    pub fn d(&self) -> BigInt {
        self.d.retrieve()
    }

    /// Is `a != 1`?
    pub fn is_twisted(&self) -> bool {
        self.twisted
    }

    /// Is `a = -1`?
    pub fn is_a_minus_one(&self) -> bool {
        self.m_one_a
    }

    /// Generator table, if one was built or imported.
    pub fn precomputed(&self) -> Option<&Arc<Precomputed>> {
        self.precomputed.as_ref()
    }

    /// Length of an encoded point: `⌈(bits(p) + 1) / 8⌉`.
    pub fn encoding_len(&self) -> usize {
        (self.domain.p().bit_length() + 8) / 8
    }

    /// Group generator, sharing the curve's table.
    pub fn generator(self: &Arc<Self>) -> EdwardsPoint {
        let mut g = EdwardsPoint::from_coords(self, self.gx.clone(), self.gy.clone());
        g.precomputed = self.precomputed.clone();
        g
    }

    /// Point from affine coordinates, checked against the curve equation.
    pub fn point(self: &Arc<Self>, x: &BigInt, y: &BigInt) -> Result<EdwardsPoint> {
        let point = EdwardsPoint::from_coords(self, self.coordinate(x)?, self.coordinate(y)?);
        if point.validate() {
            Ok(point)
        } else {
            Err(Error::InvalidPoint)
        }
    }

    /// Point with the given `y` and `x` parity:
    /// `x² = (y² - c²) / (c²dy² - a)`.
    pub fn point_from_y(self: &Arc<Self>, y: &BigInt, odd: bool) -> Result<EdwardsPoint> {
        let y = self.coordinate(y)?;
        let y2 = y.square();
        let lhs = &y2 - &self.c2;
        let rhs = &(&(&y2 * &self.d) * &self.c2) - &self.a;
        let x2 = &lhs * &rhs.invert().map_err(|_| Error::InvalidPoint)?;

        if x2.is_zero() {
            if odd {
                return Err(Error::InvalidPoint);
            }
            return Ok(EdwardsPoint::from_coords(self, x2, y));
        }

        let x = x2.sqrt().ok_or(Error::InvalidPoint)?;
        let x = if x.is_odd() != odd { -x } else { x };
        Ok(EdwardsPoint::from_coords(self, x, y))
    }

    /// Decode `y` in little-endian with the parity of `x` in the top bit.
    pub fn decode_point(self: &Arc<Self>, bytes: &[u8]) -> Result<EdwardsPoint> {
        if bytes.len() != self.encoding_len() {
            return Err(Error::Encoding);
        }

        let mut y = bytes.to_vec();
        let last = y.len() - 1;
        let odd = y[last] & 0x80 != 0;
        y[last] &= 0x7f;

        self.point_from_y(&BigInt::from_le_bytes(&y), odd)
    }

    fn coordinate(&self, value: &BigInt) -> Result<MontyForm> {
        if value.is_negative() || value >= self.domain.p() {
            return Err(Error::InvalidPoint);
        }
        Ok(self.domain.field_element(value))
    }

    pub(crate) fn with_generator_table(self: &Arc<Self>) -> Result<Arc<Self>> {
        let power = self.domain.n().bit_length() + 1;
        let table = mul::precompute(&self.generator(), power, PRECOMPUTED_WINDOW)
            .ok_or(Error::InvalidParameter)?;
        Ok(self.with_table(table))
    }

    pub(crate) fn with_precomputed(self: &Arc<Self>, table: &PrecomputedTable) -> Result<Arc<Self>> {
        let table = Precomputed::from_table(table, self.domain.field())?;
        let g = self.generator();
        if !mul::verify_table(&table, &g, |coords| EdwardsPoint::lift(self, coords, false)) {
            return Err(Error::InvalidParameter);
        }
        Ok(self.with_table(table))
    }

    fn with_table(&self, table: Precomputed) -> Arc<Self> {
        Arc::new(Self {
            precomputed: Some(Arc::new(table)),
            ..self.clone()
        })
    }
}

impl PartialEq for EdwardsCurve {
    fn eq(&self, other: &Self) -> bool {
        self.domain == other.domain
            && self.a == other.a
            && self.c == other.c
            && self.d == other.d
            && self.gx == other.gx
            && self.gy == other.gy
    }
}

impl Eq for EdwardsCurve {}

impl fmt::Debug for EdwardsCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdwardsCurve")
            .field("domain", &self.domain)
            .field("a", &self.a)
            .field("c", &self.c)
            .field("d", &self.d)
            .field("precomputed", &self.precomputed.is_some())
            .finish()
    }
}

/// Point on a twisted Edwards curve in projective coordinates.
#[derive(Clone)]
pub struct EdwardsPoint {
    curve: Arc<EdwardsCurve>,
    x: MontyForm,
    y: MontyForm,
    z: MontyForm,
    precomputed: Option<Arc<Precomputed>>,
}

impl EdwardsPoint {
    /// Neutral element `(0 : c : 1)`.
    pub fn identity(curve: &Arc<EdwardsCurve>) -> Self {
        Self::from_coords(curve, curve.domain.zero.clone(), curve.c.clone())
    }

    fn from_coords(curve: &Arc<EdwardsCurve>, x: MontyForm, y: MontyForm) -> Self {
        Self {
            curve: curve.clone(),
            x,
            y,
            z: curve.domain.one.clone(),
            precomputed: None,
        }
    }

    fn lift(curve: &Arc<EdwardsCurve>, coords: &AffineCoords, negate: bool) -> Self {
        let x = if negate { -&coords.x } else { coords.x.clone() };
        Self::from_coords(curve, x, coords.y.clone())
    }

    fn with(&self, x: MontyForm, y: MontyForm, z: MontyForm) -> Self {
        Self {
            curve: self.curve.clone(),
            x,
            y,
            z,
            precomputed: None,
        }
    }

    /// Curve this point belongs to.
    pub fn curve(&self) -> &Arc<EdwardsCurve> {
        &self.curve
    }

    /// Table of precomputed multiples, if any.
    pub fn precomputed(&self) -> Option<&Arc<Precomputed>> {
        self.precomputed.as_ref()
    }

    /// Is this the neutral element, `X = 0` and `Y = cZ`?
    pub fn is_identity(&self) -> bool {
        self.x.is_zero() && self.y == &self.curve.c * &self.z
    }

    /// Does the point satisfy `(aX² + Y²)Z² = c²(Z⁴ + dX²Y²)`?
    pub fn validate(&self) -> bool {
        if self.z.is_zero() {
            return false;
        }
        let x2 = self.x.square();
        let y2 = self.y.square();
        let z2 = self.z.square();
        let lhs = &(&(&self.curve.a * &x2) + &y2) * &z2;
        let rhs = &self.curve.c2 * &(&z2.square() + &(&(&self.curve.d * &x2) * &y2));
        lhs == rhs
    }

    /// Affine `(x, y)`.
    pub fn to_affine(&self) -> (BigInt, BigInt) {
        let coords = self.normalize();
        (coords.x.retrieve(), coords.y.retrieve())
    }

    /// Affine `x`.
    pub fn x(&self) -> BigInt {
        self.normalize().x.retrieve()
    }

    /// Affine `y`.
    pub fn y(&self) -> BigInt {
        self.normalize().y.retrieve()
    }

    fn normalize(&self) -> AffineCoords {
        if self.z.is_one() {
            return AffineCoords {
                x: self.x.clone(),
                y: self.y.clone(),
            };
        }
        let zinv = self.z.invert().unwrap_or_else(|_| self.curve.domain.zero.clone());
        AffineCoords {
            x: &self.x * &zinv,
            y: &self.y * &zinv,
        }
    }

    /// Point addition.
    pub fn add(&self, rhs: &Self) -> Result<Self> {
        if !self.same_curve(rhs) {
            return Err(Error::InvalidParameter);
        }
        Ok(self.sum(rhs))
    }

    pub(crate) fn same_curve(&self, rhs: &Self) -> bool {
        Arc::ptr_eq(&self.curve, &rhs.curve) || self.curve == rhs.curve
    }

    /// `add-2008-bbjlp`
    pub(crate) fn sum(&self, rhs: &Self) -> Self {
        let curve = &self.curve;
        let a = &self.z * &rhs.z;
        let b = a.square();
        let c = &self.x * &rhs.x;
        let d = &self.y * &rhs.y;
        let e = &(&curve.d * &c) * &d;
        let f = &b - &e;
        let g = &b + &e;
        let cross = &(&(&(&self.x + &self.y) * &(&rhs.x + &rhs.y)) - &c) - &d;

        let x = &(&a * &f) * &cross;
        let (y, z) = if curve.twisted {
            let ac = if curve.m_one_a { -&c } else { &curve.a * &c };
            (&(&a * &g) * &(&d - &ac), &f * &g)
        } else {
            (&(&a * &g) * &(&d - &c), &(&curve.c * &f) * &g)
        };
        self.with(x, y, z)
    }

    /// `dbl-2008-bbjlp`
    pub fn double(&self) -> Self {
        let curve = &self.curve;
        let b = (&self.x + &self.y).square();
        let c = self.x.square();
        let d = self.y.square();

        if curve.twisted {
            let e = if curve.m_one_a { -&c } else { &curve.a * &c };
            let f = &e + &d;
            let j = &f - &self.z.square().double();
            let x = &(&(&b - &c) - &d) * &j;
            let y = &f * &(&e - &d);
            let z = &f * &j;
            self.with(x, y, z)
        } else {
            let e = &c + &d;
            let h = (&curve.c * &self.z).square();
            let j = &e - &h.double();
            let x = &(&curve.c * &(&b - &e)) * &j;
            let y = &(&curve.c * &e) * &(&c - &d);
            let z = &e * &j;
            self.with(x, y, z)
        }
    }

    /// `2P + P`
    pub fn triple(&self) -> Self {
        self.double().sum(self)
    }

    /// Negation, `(-X : Y : Z)`. A precomputed table is negated along with
    /// the point.
    pub fn neg(&self) -> Self {
        let mut neg = self.with(-&self.x, self.y.clone(), self.z.clone());
        neg.precomputed = self.precomputed.as_ref().map(|table| Arc::new(table.negate_edwards()));
        neg
    }

    /// Scalar multiplication: fixed-base comb when the point has a table wide
    /// enough for `k`, windowed NAF otherwise. A negative `k` gives
    /// `-(|k|·P)`.
    pub fn mul(&self, k: &BigInt) -> Self {
        if k.is_negative() {
            return self.mul(&k.abs()).neg();
        }

        let identity = Self::identity(&self.curve);
        if let Some(doubles) = self.precomputed.as_ref().and_then(|table| table.doubles()) {
            if let Some(product) = mul::fixed_naf_mul(identity.clone(), doubles, k) {
                log::trace!("{}: fixed-base multiplication", self.curve.domain.name());
                return product;
            }
        }

        let mut terms = Vec::with_capacity(1);
        self.push_term(k, &mut terms);
        mul::mul_add_many(identity, &terms)
    }

    /// `k1·self + k2·rhs`, sharing the doublings.
    pub fn mul_add(&self, k1: &BigInt, rhs: &Self, k2: &BigInt) -> Result<Self> {
        Self::mul_add_many(&[(self, k1), (rhs, k2)])
    }

    /// `Σ kᵢ·Pᵢ` by interleaving the NAFs of every term.
    pub fn mul_add_many(terms: &[(&Self, &BigInt)]) -> Result<Self> {
        let (first, _) = terms.first().ok_or(Error::InvalidParameter)?;
        if terms.iter().any(|(point, _)| !first.same_curve(point)) {
            return Err(Error::InvalidParameter);
        }

        let mut windows = Vec::with_capacity(terms.len());
        for (point, k) in terms {
            if !k.is_zero() {
                point.push_term(k, &mut windows);
            }
        }
        Ok(mul::mul_add_many(Self::identity(&first.curve), &windows))
    }

    fn push_term<'a>(&'a self, k: &BigInt, terms: &mut Vec<Term<'a, EdwardsPoint>>) {
        match self.precomputed.as_ref().and_then(|table| table.naf()) {
            Some(table) => terms.push(Term::with_table(table, k)),
            None => terms.push(Term::new(self, k, DEFAULT_WINDOW)),
        }
    }

    /// Copy of this point carrying a table of its multiples.
    pub fn precompute(&self, power: usize) -> Result<Self> {
        let table = mul::precompute(self, power, PRECOMPUTED_WINDOW).ok_or(Error::InvalidPoint)?;
        let mut point = self.clone();
        point.precomputed = Some(Arc::new(table));
        Ok(point)
    }

    /// `⌈(bits(p) + 1) / 8⌉` bytes: `y` in little-endian, with the parity of
    /// `x` in the top bit of the last byte.
    pub fn encode(&self) -> Vec<u8> {
        let coords = self.normalize();
        let mut out = le_bytes(&coords.y.retrieve(), self.curve.encoding_len());
        if coords.x.is_odd() {
            if let Some(last) = out.last_mut() {
                *last |= 0x80;
            }
        }
        out
    }
}

impl Precomputed {
    /// Edwards negation acts on `x`.
    fn negate_edwards(&self) -> Self {
        let mut table = self.clone();
        let flip = |coords: &mut AffineCoords| coords.x = -&coords.x;
        if let Some(doubles) = table.doubles.as_mut() {
            doubles.points.iter_mut().for_each(flip);
        }
        if let Some(naf) = table.naf.as_mut() {
            naf.points.iter_mut().for_each(flip);
        }
        table
    }
}

impl PartialEq for EdwardsPoint {
    fn eq(&self, other: &Self) -> bool {
        self.same_curve(other)
            && &self.x * &other.z == &other.x * &self.z
            && &self.y * &other.z == &other.y * &self.z
    }
}

impl Eq for EdwardsPoint {}

impl fmt::Debug for EdwardsPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let coords = self.normalize();
        f.debug_struct("EdwardsPoint")
            .field("x", &coords.x)
            .field("y", &coords.y)
            .finish()
    }
}

impl Accumulator for EdwardsPoint {
    fn double(&self) -> Self {
        EdwardsPoint::double(self)
    }

    fn add(&self, rhs: &Self) -> Self {
        self.sum(rhs)
    }

    fn neg(&self) -> Self {
        self.with(-&self.x, self.y.clone(), self.z.clone())
    }

    fn add_coords(&self, coords: &AffineCoords, negate: bool) -> Self {
        self.sum(&Self::lift(&self.curve, coords, negate))
    }

    fn normalize_all(points: &[Self]) -> Option<Vec<AffineCoords>> {
        let first = points.first()?;
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
            coords.push(AffineCoords {
                x: &point.x * &zinv,
                y: &point.y * &zinv,
            });
        }
        coords.reverse();
        Some(coords)
    }
}
