//! Curve parameters and the model-independent [`Curve`] handle.

use crate::{
    Error, Result,
    edwards::{EdwardsCurve, EdwardsPoint},
    montgomery::{MontgomeryCurve, MontgomeryPoint},
    point::Point,
    precomputed::PrecomputedTable,
    weierstrass::{AffinePoint, Endomorphism, WeierstrassCurve},
};
use alloc::{string::String, sync::Arc, vec, vec::Vec};
use bignum::{BigInt, MontyForm, MontyParams};
use core::fmt;

/// Static description of a curve, as hex strings.
///
/// Whitespace inside the strings is ignored. A leading `-` is accepted for
/// the lattice basis entries of an endomorphism.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurveParams {
    /// Curve name, used as the [`Registry`](crate::Registry) key.
    pub name: &'static str,

    /// Curve model and its coefficients.
    pub model: ModelParams,

    /// Field prime.
    pub p: &'static str,

    /// Order of the generator.
    pub n: &'static str,

    /// Cofactor.
    pub h: &'static str,

    /// Generator `x` coordinate (`u` for Montgomery curves).
    pub gx: &'static str,

    /// Generator `y` coordinate. Absent for Montgomery curves.
    pub gy: Option<&'static str>,

    /// GLV endomorphism, for short Weierstrass curves which have one.
    pub endo: Option<EndoParams>,

    /// Build the generator's precomputed table at construction.
    pub precompute: bool,
}

/// Model-specific curve coefficients.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelParams {
    /// `y² = x³ + ax + b`
    ShortWeierstrass {
        /// `a`
        a: &'static str,
        /// `b`
        b: &'static str,
    },

    /// `by² = x³ + ax² + x`
    Montgomery {
        /// `a`
        a: &'static str,
        /// `b`
        b: &'static str,
    },

    /// `ax² + y² = c²(1 + dx²y²)`
    TwistedEdwards {
        /// `a`
        a: &'static str,
        /// `c`
        c: &'static str,
        /// `d`
        d: &'static str,
    },
}

/// GLV endomorphism `φ(x, y) = (βx, y) = λ(x, y)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EndoParams {
    /// Cube root of unity in the base field.
    pub beta: &'static str,

    /// Cube root of unity in the scalar field.
    pub lambda: &'static str,

    /// Reduced lattice basis `[(a1, b1), (a2, b2)]` with `a + bλ = 0 mod n`.
    pub basis: [(&'static str, &'static str); 2],
}

/// Curve model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Model {
    /// `y² = x³ + ax + b`
    ShortWeierstrass,

    /// `by² = x³ + ax² + x`
    Montgomery,

    /// `ax² + y² = c²(1 + dx²y²)`
    TwistedEdwards,
}

/// Parameters every model shares: the field, the group order and cofactor.
#[derive(Clone)]
pub struct Domain {
    name: String,
    field: Arc<MontyParams>,
    n: BigInt,
    h: BigInt,
    pub(crate) zero: MontyForm,
    pub(crate) one: MontyForm,
    pub(crate) two: MontyForm,
}

impl Domain {
    pub(crate) fn new(name: &str, p: BigInt, n: BigInt, h: BigInt) -> Result<Self> {
        if n.is_negative() || n.bit_length() < 2 || h.is_negative() || h.is_zero() {
            return Err(Error::InvalidParameter);
        }

        let field = MontyParams::new(p)?;
        let one = MontyForm::one(&field);
        Ok(Self {
            name: name.into(),
            zero: MontyForm::zero(&field),
            two: one.double(),
            one,
            field,
            n,
            h,
        })
    }

    /// Curve name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field prime.
    pub fn p(&self) -> &BigInt {
        self.field.modulus()
    }

    /// Order of the generator.
    pub fn n(&self) -> &BigInt {
        &self.n
    }

    /// Cofactor.
    pub fn h(&self) -> &BigInt {
        &self.h
    }

    /// Montgomery context of the base field.
    pub fn field(&self) -> &Arc<MontyParams> {
        &self.field
    }

    /// Reduce `value` into the base field.
    pub fn field_element(&self, value: &BigInt) -> MontyForm {
        MontyForm::new(value, &self.field)
    }

    /// Byte length of a field element.
    pub fn field_bytes(&self) -> usize {
        self.p().byte_length()
    }

    /// Byte length of a scalar.
    pub fn scalar_bytes(&self) -> usize {
        self.n.byte_length()
    }

    /// Parse an in-range field element.
    pub(crate) fn parse_element(&self, hex: &str) -> Result<MontyForm> {
        let value = parse_hex(hex)?;
        if value.is_negative() || &value >= self.p() {
            return Err(Error::InvalidParameter);
        }
        Ok(self.field_element(&value))
    }

    /// Parse a coefficient, which may be written negated (e.g. `a = -1`).
    pub(crate) fn parse_coefficient(&self, hex: &str) -> Result<MontyForm> {
        Ok(self.field_element(&parse_hex(hex)?))
    }
}

impl PartialEq for Domain {
    fn eq(&self, other: &Self) -> bool {
        self.p() == other.p() && self.n == other.n && self.h == other.h
    }
}

impl Eq for Domain {}

impl fmt::Debug for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Domain")
            .field("name", &self.name)
            .field("p", self.p())
            .field("n", &self.n)
            .field("h", &self.h)
            .finish()
    }
}

pub(crate) fn parse_hex(hex: &str) -> Result<BigInt> {
    BigInt::from_hex(hex).map_err(|_| Error::InvalidParameter)
}

/// Shared handle to a curve of any model.
///
/// Cloning is cheap: the curve itself lives behind an [`Arc`] and is never
/// modified once built.
#[derive(Clone, PartialEq, Eq)]
pub enum Curve {
    /// Short Weierstrass curve.
    ShortWeierstrass(Arc<WeierstrassCurve>),

    /// Montgomery curve.
    Montgomery(Arc<MontgomeryCurve>),

    /// Twisted Edwards curve.
    TwistedEdwards(Arc<EdwardsCurve>),
}

impl Curve {
    /// Build a curve from its parameters.
    ///
    /// The generator is checked to lie on the curve and to have order `n`. An
    /// endomorphism, if given, is checked against the generator.
    pub fn new(params: &CurveParams) -> Result<Self> {
        let domain = Domain::new(
            params.name,
            parse_hex(params.p)?,
            parse_hex(params.n)?,
            parse_hex(params.h)?,
        )?;

        let curve = match params.model {
            ModelParams::ShortWeierstrass { a, b } => {
                let gy = params.gy.ok_or(Error::InvalidParameter)?;
                let endo = params
                    .endo
                    .as_ref()
                    .map(|endo| Endomorphism::new(&domain, endo))
                    .transpose()?;
                let a = domain.parse_coefficient(a)?;
                let b = domain.parse_coefficient(b)?;
                let gx = domain.parse_element(params.gx)?;
                let gy = domain.parse_element(gy)?;
                Curve::ShortWeierstrass(WeierstrassCurve::new(domain, a, b, gx, gy, endo)?)
            }
            ModelParams::Montgomery { a, b } => {
                if params.endo.is_some() {
                    return Err(Error::InvalidParameter);
                }
                let a = domain.parse_coefficient(a)?;
                let b = domain.parse_coefficient(b)?;
                let gx = domain.parse_element(params.gx)?;
                Curve::Montgomery(MontgomeryCurve::new(domain, a, b, gx)?)
            }
            ModelParams::TwistedEdwards { a, c, d } => {
                if params.endo.is_some() {
                    return Err(Error::InvalidParameter);
                }
                let gy = params.gy.ok_or(Error::InvalidParameter)?;
                let a = domain.parse_coefficient(a)?;
                let c = domain.parse_coefficient(c)?;
                let d = domain.parse_coefficient(d)?;
                let gx = domain.parse_element(params.gx)?;
                let gy = domain.parse_element(gy)?;
                Curve::TwistedEdwards(EdwardsCurve::new(domain, a, c, d, gx, gy)?)
            }
        };

        if params.precompute && cfg!(feature = "precomputed-tables") {
            curve.with_generator_table()
        } else {
            Ok(curve)
        }
    }

    /// The same curve with a freshly built generator table.
    pub fn with_generator_table(&self) -> Result<Self> {
        Ok(match self {
            Curve::ShortWeierstrass(curve) => Curve::ShortWeierstrass(curve.with_generator_table()?),
            Curve::TwistedEdwards(curve) => Curve::TwistedEdwards(curve.with_generator_table()?),
            Curve::Montgomery(curve) => Curve::Montgomery(curve.clone()),
        })
    }

    /// The same curve with an imported generator table.
    ///
    /// Every entry is checked: it must lie on the curve, the first entry of
    /// each list must be the generator, and consecutive entries must differ by
    /// the expected multiple.
    pub fn with_precomputed(&self, table: &PrecomputedTable) -> Result<Self> {
        match self {
            Curve::ShortWeierstrass(curve) => Ok(Curve::ShortWeierstrass(curve.with_precomputed(table)?)),
            Curve::TwistedEdwards(curve) => Ok(Curve::TwistedEdwards(curve.with_precomputed(table)?)),
            Curve::Montgomery(_) => Err(Error::InvalidParameter),
        }
    }

    /// Curve model.
    pub fn model(&self) -> Model {
        match self {
            Curve::ShortWeierstrass(_) => Model::ShortWeierstrass,
            Curve::Montgomery(_) => Model::Montgomery,
            Curve::TwistedEdwards(_) => Model::TwistedEdwards,
        }
    }

    /// Field, order and cofactor.
    pub fn domain(&self) -> &Domain {
        match self {
            Curve::ShortWeierstrass(curve) => curve.domain(),
            Curve::Montgomery(curve) => curve.domain(),
            Curve::TwistedEdwards(curve) => curve.domain(),
        }
    }

    /// Curve name.
    pub fn name(&self) -> &str {
        self.domain().name()
    }

    /// Order of the generator.
    pub fn n(&self) -> &BigInt {
        self.domain().n()
    }

    /// GLV endomorphism, if the curve has one.
    pub fn endomorphism(&self) -> Option<&Endomorphism> {
        match self {
            Curve::ShortWeierstrass(curve) => curve.endomorphism(),
            _ => None,
        }
    }

    /// Group generator, carrying the curve's precomputed table if any.
    pub fn generator(&self) -> Point {
        match self {
            Curve::ShortWeierstrass(curve) => Point::Affine(curve.generator()),
            Curve::Montgomery(curve) => Point::Montgomery(curve.generator()),
            Curve::TwistedEdwards(curve) => Point::Edwards(curve.generator()),
        }
    }

    /// Neutral element.
    pub fn identity(&self) -> Point {
        match self {
            Curve::ShortWeierstrass(curve) => Point::Affine(AffinePoint::identity(curve)),
            Curve::Montgomery(curve) => Point::Montgomery(MontgomeryPoint::identity(curve)),
            Curve::TwistedEdwards(curve) => Point::Edwards(EdwardsPoint::identity(curve)),
        }
    }

    /// Point from affine coordinates, checked against the curve equation.
    ///
    /// Montgomery points are x-only; use [`Curve::point_from_x`].
    pub fn point(&self, x: &BigInt, y: &BigInt) -> Result<Point> {
        match self {
            Curve::ShortWeierstrass(curve) => curve.point(x, y).map(Point::Affine),
            Curve::TwistedEdwards(curve) => curve.point(x, y).map(Point::Edwards),
            Curve::Montgomery(_) => Err(Error::InvalidParameter),
        }
    }

    /// Point with the given `x` (`u`) coordinate.
    ///
    /// For short Weierstrass curves `odd` selects the parity of `y`; it is
    /// ignored for Montgomery curves.
    pub fn point_from_x(&self, x: &BigInt, odd: bool) -> Result<Point> {
        match self {
            Curve::ShortWeierstrass(curve) => curve.point_from_x(x, odd).map(Point::Affine),
            Curve::Montgomery(curve) => curve.point(x).map(Point::Montgomery),
            Curve::TwistedEdwards(_) => Err(Error::InvalidParameter),
        }
    }

    /// Edwards point with the given `y` coordinate and `x` parity.
    pub fn point_from_y(&self, y: &BigInt, odd: bool) -> Result<Point> {
        match self {
            Curve::TwistedEdwards(curve) => curve.point_from_y(y, odd).map(Point::Edwards),
            _ => Err(Error::InvalidParameter),
        }
    }

    /// Decode a point in the model's native encoding: SEC1 for short
    /// Weierstrass curves, RFC 8032 for Edwards curves and RFC 7748 for
    /// Montgomery curves.
    pub fn decode_point(&self, bytes: &[u8]) -> Result<Point> {
        match self {
            Curve::ShortWeierstrass(curve) => curve.decode_point(bytes).map(Point::Affine),
            Curve::Montgomery(curve) => curve.decode_point(bytes).map(Point::Montgomery),
            Curve::TwistedEdwards(curve) => curve.decode_point(bytes).map(Point::Edwards),
        }
    }

    /// Check a point supplied as a public key.
    ///
    /// Rejects the identity, points on another curve, points off the curve
    /// and points outside the subgroup of order `n`, all with
    /// [`Error::InvalidPoint`].
    pub fn validate_public_key(&self, point: &Point) -> Result<()> {
        if point.curve() != *self || point.is_identity() || !point.validate() {
            return Err(Error::InvalidPoint);
        }

        if point.mul(self.n()).is_identity() {
            Ok(())
        } else {
            Err(Error::InvalidPoint)
        }
    }

    /// Short Weierstrass curve, if this is one.
    pub fn as_weierstrass(&self) -> Option<&Arc<WeierstrassCurve>> {
        match self {
            Curve::ShortWeierstrass(curve) => Some(curve),
            _ => None,
        }
    }

    /// Montgomery curve, if this is one.
    pub fn as_montgomery(&self) -> Option<&Arc<MontgomeryCurve>> {
        match self {
            Curve::Montgomery(curve) => Some(curve),
            _ => None,
        }
    }

    /// Twisted Edwards curve, if this is one.
    pub fn as_edwards(&self) -> Option<&Arc<EdwardsCurve>> {
        match self {
            Curve::TwistedEdwards(curve) => Some(curve),
            _ => None,
        }
    }
}

impl fmt::Debug for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Curve")
            .field(&self.model())
            .field(&self.name())
            .finish()
    }
}

/// Big-endian bytes of a non-negative value, left-padded to `len`.
pub(crate) fn be_bytes(value: &BigInt, len: usize) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let mut out = vec![0u8; len.saturating_sub(bytes.len())];
    out.extend_from_slice(&bytes);
    out
}

/// Little-endian bytes of a non-negative value, right-padded to `len`.
pub(crate) fn le_bytes(value: &BigInt, len: usize) -> Vec<u8> {
    let mut out = value.to_le_bytes();
    if out.len() < len {
        out.resize(len, 0);
    }
    out
}
