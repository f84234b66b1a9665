//! Points of any curve model behind one type.

use crate::{
    Curve, Error, Model, Result,
    edwards::EdwardsPoint,
    montgomery::MontgomeryPoint,
    weierstrass::{AffinePoint, JacobianPoint, PointFormat},
};
use alloc::vec::Vec;
use bignum::BigInt;

/// Point on a curve of any model, tagged by its coordinate system.
///
/// Binary operations require both operands to come from the same curve and
/// return [`Error::InvalidParameter`] otherwise. Affine and Jacobian points of
/// the same curve mix freely.
#[derive(Clone, Debug)]
pub enum Point {
    /// Short Weierstrass, affine coordinates.
    Affine(AffinePoint),

    /// Short Weierstrass, Jacobian coordinates.
    Jacobian(JacobianPoint),

    /// Twisted Edwards, projective coordinates.
    Edwards(EdwardsPoint),

    /// Montgomery, x-only.
    Montgomery(MontgomeryPoint),
}

impl Point {
    /// Curve this point belongs to.
    pub fn curve(&self) -> Curve {
        match self {
            Point::Affine(p) => Curve::ShortWeierstrass(p.curve().clone()),
            Point::Jacobian(p) => Curve::ShortWeierstrass(p.curve().clone()),
            Point::Edwards(p) => Curve::TwistedEdwards(p.curve().clone()),
            Point::Montgomery(p) => Curve::Montgomery(p.curve().clone()),
        }
    }

    /// Model of the curve this point belongs to.
    pub fn model(&self) -> Model {
        match self {
            Point::Affine(_) | Point::Jacobian(_) => Model::ShortWeierstrass,
            Point::Edwards(_) => Model::TwistedEdwards,
            Point::Montgomery(_) => Model::Montgomery,
        }
    }

    /// Is this the neutral element?
    pub fn is_identity(&self) -> bool {
        match self {
            Point::Affine(p) => p.is_identity(),
            Point::Jacobian(p) => p.is_identity(),
            Point::Edwards(p) => p.is_identity(),
            Point::Montgomery(p) => p.is_identity(),
        }
    }

    /// Does the point satisfy its curve equation?
    pub fn validate(&self) -> bool {
        match self {
            Point::Affine(p) => p.validate(),
            Point::Jacobian(p) => p.validate(),
            Point::Edwards(p) => p.validate(),
            Point::Montgomery(p) => p.validate(),
        }
    }

    /// Point addition.
    ///
    /// Montgomery points are x-only and cannot be added without their
    /// difference; see [`MontgomeryPoint::diff_add`].
    pub fn add(&self, rhs: &Point) -> Result<Point> {
        match (self, rhs) {
            (Point::Affine(a), Point::Affine(b)) => a.add(b).map(Point::Affine),
            (Point::Jacobian(a), Point::Jacobian(b)) => {
                Self::check_jacobian(a, b)?;
                Ok(Point::Jacobian(a.sum(b)))
            }
            (Point::Jacobian(j), Point::Affine(a)) | (Point::Affine(a), Point::Jacobian(j)) => {
                let a = a.to_jacobian();
                Self::check_jacobian(j, &a)?;
                Ok(Point::Jacobian(j.sum(&a)))
            }
            (Point::Edwards(a), Point::Edwards(b)) => a.add(b).map(Point::Edwards),
            _ => Err(Error::InvalidParameter),
        }
    }

    fn check_jacobian(a: &JacobianPoint, b: &JacobianPoint) -> Result<()> {
        if a.curve() == b.curve() {
            Ok(())
        } else {
            Err(Error::InvalidParameter)
        }
    }

    /// `2P`
    pub fn double(&self) -> Point {
        match self {
            Point::Affine(p) => Point::Affine(p.double()),
            Point::Jacobian(p) => Point::Jacobian(p.double()),
            Point::Edwards(p) => Point::Edwards(p.double()),
            Point::Montgomery(p) => Point::Montgomery(p.double()),
        }
    }

    /// `3P`
    pub fn triple(&self) -> Point {
        match self {
            Point::Affine(p) => Point::Affine(p.triple()),
            Point::Jacobian(p) => Point::Jacobian(p.triple()),
            Point::Edwards(p) => Point::Edwards(p.triple()),
            Point::Montgomery(p) => Point::Montgomery(p.triple()),
        }
    }

    /// `-P`
    pub fn neg(&self) -> Point {
        match self {
            Point::Affine(p) => Point::Affine(p.neg()),
            Point::Jacobian(p) => Point::Jacobian(p.neg()),
            Point::Edwards(p) => Point::Edwards(p.neg()),
            Point::Montgomery(p) => Point::Montgomery(p.neg()),
        }
    }

    /// `k·P`. A negative `k` gives `-(|k|·P)`.
    pub fn mul(&self, k: &BigInt) -> Point {
        match self {
            Point::Affine(p) => Point::Affine(p.mul(k)),
            Point::Jacobian(p) => Point::Jacobian(p.mul(k)),
            Point::Edwards(p) => Point::Edwards(p.mul(k)),
            Point::Montgomery(p) => Point::Montgomery(p.mul(k)),
        }
    }

    /// `k1·self + k2·rhs`, sharing the doublings.
    pub fn mul_add(&self, k1: &BigInt, rhs: &Point, k2: &BigInt) -> Result<Point> {
        Self::mul_add_many(&[(self, k1), (rhs, k2)])
    }

    /// `Σ kᵢ·Pᵢ` with interleaved NAFs. Not available for Montgomery points.
    pub fn mul_add_many(terms: &[(&Point, &BigInt)]) -> Result<Point> {
        let (first, _) = terms.first().ok_or(Error::InvalidParameter)?;
        match first.model() {
            Model::ShortWeierstrass => {
                let points = terms
                    .iter()
                    .map(|(point, _)| point.to_affine_point().ok_or(Error::InvalidParameter))
                    .collect::<Result<Vec<_>>>()?;
                let pairs: Vec<_> = points.iter().zip(terms.iter().map(|(_, k)| *k)).collect();
                AffinePoint::mul_add_many(&pairs).map(Point::Affine)
            }
            Model::TwistedEdwards => {
                let pairs = terms
                    .iter()
                    .map(|(point, k)| match point {
                        Point::Edwards(p) => Ok((p, *k)),
                        _ => Err(Error::InvalidParameter),
                    })
                    .collect::<Result<Vec<_>>>()?;
                EdwardsPoint::mul_add_many(&pairs).map(Point::Edwards)
            }
            Model::Montgomery => Err(Error::InvalidParameter),
        }
    }

    /// Normalized form: Jacobian points become affine, others are unchanged.
    pub fn to_affine(&self) -> Point {
        match self {
            Point::Jacobian(p) => Point::Affine(p.to_affine()),
            other => other.clone(),
        }
    }

    /// Affine short Weierstrass point, if this is one.
    pub fn to_affine_point(&self) -> Option<AffinePoint> {
        match self {
            Point::Affine(p) => Some(p.clone()),
            Point::Jacobian(p) => Some(p.to_affine()),
            _ => None,
        }
    }

    /// Edwards point, if this is one.
    pub fn as_edwards(&self) -> Option<&EdwardsPoint> {
        match self {
            Point::Edwards(p) => Some(p),
            _ => None,
        }
    }

    /// Montgomery point, if this is one.
    pub fn as_montgomery(&self) -> Option<&MontgomeryPoint> {
        match self {
            Point::Montgomery(p) => Some(p),
            _ => None,
        }
    }

    /// Affine `x` (`u` for Montgomery points), or `None` for the identity.
    pub fn x(&self) -> Option<BigInt> {
        match self {
            Point::Affine(p) => p.x(),
            Point::Jacobian(p) => p.to_affine().x(),
            Point::Edwards(p) => Some(p.x()),
            Point::Montgomery(p) => p.x(),
        }
    }

    /// Affine `y`, or `None` for the identity and for Montgomery points.
    pub fn y(&self) -> Option<BigInt> {
        match self {
            Point::Affine(p) => p.y(),
            Point::Jacobian(p) => p.to_affine().y(),
            Point::Edwards(p) => Some(p.y()),
            Point::Montgomery(_) => None,
        }
    }

    /// Encode in the model's native format.
    ///
    /// `format` selects the SEC1 form of short Weierstrass points and is
    /// ignored otherwise. The Montgomery identity has no encoding.
    pub fn encode(&self, format: PointFormat) -> Result<Vec<u8>> {
        match self {
            Point::Affine(p) => Ok(p.to_sec1(format)),
            Point::Jacobian(p) => Ok(p.to_affine().to_sec1(format)),
            Point::Edwards(p) => Ok(p.encode()),
            Point::Montgomery(p) => p.encode(),
        }
    }

    /// Copy of this point carrying a table of its multiples covering `power`
    /// bits. Jacobian points are normalized first.
    pub fn precompute(&self, power: usize) -> Result<Point> {
        match self {
            Point::Affine(p) => p.precompute(power).map(Point::Affine),
            Point::Jacobian(p) => p.to_affine().precompute(power).map(Point::Affine),
            Point::Edwards(p) => p.precompute(power).map(Point::Edwards),
            Point::Montgomery(_) => Err(Error::InvalidParameter),
        }
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Point::Affine(a), Point::Affine(b)) => a == b,
            (Point::Jacobian(a), Point::Jacobian(b)) => a == b,
            (Point::Affine(a), Point::Jacobian(j)) | (Point::Jacobian(j), Point::Affine(a)) => {
                a.to_jacobian() == *j
            }
            (Point::Edwards(a), Point::Edwards(b)) => a == b,
            (Point::Montgomery(a), Point::Montgomery(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Point {}

impl From<AffinePoint> for Point {
    fn from(point: AffinePoint) -> Point {
        Point::Affine(point)
    }
}

impl From<JacobianPoint> for Point {
    fn from(point: JacobianPoint) -> Point {
        Point::Jacobian(point)
    }
}

impl From<EdwardsPoint> for Point {
    fn from(point: EdwardsPoint) -> Point {
        Point::Edwards(point)
    }
}

impl From<MontgomeryPoint> for Point {
    fn from(point: MontgomeryPoint) -> Point {
        Point::Montgomery(point)
    }
}
