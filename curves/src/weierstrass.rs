//! Short Weierstrass curves: `y² = x³ + ax + b`.

mod affine;
mod jacobian;
mod sec1;

pub use self::{affine::AffinePoint, jacobian::JacobianPoint, sec1::PointFormat};

use crate::{
    Error, Result,
    curve::{Domain, EndoParams, parse_hex},
    mul::{self, Accumulator, PRECOMPUTED_WINDOW},
    precomputed::{Precomputed, PrecomputedTable},
};
use alloc::sync::Arc;
use bignum::{BigInt, MontyForm};
use core::fmt;

/// Short Weierstrass curve.
#[derive(Clone)]
pub struct WeierstrassCurve {
    pub(crate) domain: Domain,
    pub(crate) a: MontyForm,
    pub(crate) b: MontyForm,
    pub(crate) a_is_zero: bool,
    pub(crate) a_is_minus_three: bool,
    gx: MontyForm,
    gy: MontyForm,
    pub(crate) endo: Option<Endomorphism>,
    pub(crate) precomputed: Option<Arc<Precomputed>>,
}

impl WeierstrassCurve {
    pub(crate) fn new(
        domain: Domain,
        a: MontyForm,
        b: MontyForm,
        gx: MontyForm,
        gy: MontyForm,
        endo: Option<Endomorphism>,
    ) -> Result<Arc<Self>> {
        // 4a³ + 27b² != 0
        let four = domain.two.double();
        let discriminant = &(&four * &a.square()) * &a
            + &domain.field_element(&BigInt::from(27u32)) * &b.square();
        if discriminant.is_zero() {
            return Err(Error::InvalidParameter);
        }

        let minus_three = -&domain.field_element(&BigInt::from(3u32));
        let curve = Arc::new(Self {
            a_is_zero: a.is_zero(),
            a_is_minus_three: a == minus_three,
            domain,
            a,
            b,
            gx,
            gy,
            endo,
            precomputed: None,
        });

        if !curve.is_on_curve(&curve.gx, &curve.gy) {
            return Err(Error::InvalidParameter);
        }

        let g = curve.generator().to_jacobian();
        let identity = JacobianPoint::identity(&curve);
        if !mul::wnaf_mul(identity.clone(), &g, curve.domain.n(), mul::DEFAULT_WINDOW).is_identity() {
            return Err(Error::InvalidParameter);
        }

        if let Some(endo) = &curve.endo {
            let lambda_g = mul::wnaf_mul(identity, &g, &endo.lambda, mul::DEFAULT_WINDOW);
            if lambda_g != g.endo(&endo.beta) {
                return Err(Error::InvalidParameter);
            }
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

    /// GLV endomorphism, if any.
    pub fn endomorphism(&self) -> Option<&Endomorphism> {
        self.endo.as_ref()
    }

    /// Generator table, if one was built or imported.
    pub fn precomputed(&self) -> Option<&Arc<Precomputed>> {
        self.precomputed.as_ref()
    }

    /// Group generator, sharing the curve's table.
    pub fn generator(self: &Arc<Self>) -> AffinePoint {
        AffinePoint::from_coords(self, self.gx.clone(), self.gy.clone())
            .with_table(self.precomputed.clone())
    }

    /// Point from affine coordinates, checked against the curve equation.
    pub fn point(self: &Arc<Self>, x: &BigInt, y: &BigInt) -> Result<AffinePoint> {
        let x = self.coordinate(x)?;
        let y = self.coordinate(y)?;
        if !self.is_on_curve(&x, &y) {
            return Err(Error::InvalidPoint);
        }
        Ok(AffinePoint::from_coords(self, x, y))
    }

    /// Point with the given `x` and `y` parity.
    pub fn point_from_x(self: &Arc<Self>, x: &BigInt, odd: bool) -> Result<AffinePoint> {
        let x = self.coordinate(x)?;
        let y2 = &(&x.square() * &x) + &(&(&self.a * &x) + &self.b);
        let y = y2.sqrt().ok_or(Error::InvalidPoint)?;
        let y = if y.is_odd() != odd { -y } else { y };
        Ok(AffinePoint::from_coords(self, x, y))
    }

    /// Split `k` into `(k1, k2)` with `k = k1 + k2·λ mod n`, both about half
    /// the size of `n`. `None` if the curve has no endomorphism.
    pub fn split_scalar(&self, k: &BigInt) -> Option<(BigInt, BigInt)> {
        self.endo.as_ref()?.split(k, self.domain.n()).ok()
    }

    /// Does `(x, y)` satisfy the curve equation?
    pub(crate) fn is_on_curve(&self, x: &MontyForm, y: &MontyForm) -> bool {
        let rhs = &(&x.square() * x) + &(&(&self.a * x) + &self.b);
        y.square() == rhs
    }

    fn coordinate(&self, value: &BigInt) -> Result<MontyForm> {
        if value.is_negative() || value >= self.domain.p() {
            return Err(Error::InvalidPoint);
        }
        Ok(self.domain.field_element(value))
    }

    /// The same curve with a freshly built generator table.
    pub(crate) fn with_generator_table(self: &Arc<Self>) -> Result<Arc<Self>> {
        let g = self.generator().to_jacobian();
        let power = self.domain.n().bit_length() + 1;
        let table = mul::precompute(&g, power, PRECOMPUTED_WINDOW).ok_or(Error::InvalidParameter)?;
        Ok(self.with_table(table))
    }

    /// The same curve with an imported generator table.
    pub(crate) fn with_precomputed(self: &Arc<Self>, table: &PrecomputedTable) -> Result<Arc<Self>> {
        let table = Precomputed::from_table(table, self.domain.field())?;
        let g = self.generator().to_jacobian();
        if !mul::verify_table(&table, &g, |coords| JacobianPoint::from_coords(self, coords, false)) {
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

impl PartialEq for WeierstrassCurve {
    fn eq(&self, other: &Self) -> bool {
        self.domain == other.domain
            && self.a == other.a
            && self.b == other.b
            && self.gx == other.gx
            && self.gy == other.gy
    }
}

impl Eq for WeierstrassCurve {}

impl fmt::Debug for WeierstrassCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeierstrassCurve")
            .field("domain", &self.domain)
            .field("a", &self.a)
            .field("b", &self.b)
            .field("endomorphism", &self.endo.is_some())
            .field("precomputed", &self.precomputed.is_some())
            .finish()
    }
}

/// GLV endomorphism `φ(x, y) = (βx, y)`, acting on the group as
/// multiplication by `λ`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endomorphism {
    beta: MontyForm,
    lambda: BigInt,
    basis: [LatticeVector; 2],
}

/// Vector `(a, b)` of the lattice `{(a, b) : a + bλ = 0 mod n}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LatticeVector {
    /// First component.
    pub a: BigInt,

    /// Second component.
    pub b: BigInt,
}

impl Endomorphism {
    pub(crate) fn new(domain: &Domain, params: &EndoParams) -> Result<Self> {
        let beta = domain.parse_element(params.beta)?;
        let lambda = parse_hex(params.lambda)?;
        let n = domain.n();

        if beta.is_one() || !(&beta.square() * &beta).is_one() {
            return Err(Error::InvalidParameter);
        }
        if lambda.is_negative() || lambda.is_zero() || &lambda >= n {
            return Err(Error::InvalidParameter);
        }

        let mut basis = [(); 2].map(|_| LatticeVector {
            a: BigInt::zero(),
            b: BigInt::zero(),
        });
        for (vector, (a, b)) in basis.iter_mut().zip(params.basis.iter()) {
            vector.a = parse_hex(a)?;
            vector.b = parse_hex(b)?;
            if !(&vector.a + &(&vector.b * &lambda)).modulo(n)?.is_zero() {
                return Err(Error::InvalidParameter);
            }
        }

        Ok(Self { beta, lambda, basis })
    }

    /// `β`, a non-trivial cube root of unity mod `p`.
    pub fn beta(&self) -> BigInt {
        self.beta.retrieve()
    }

    /// `λ`, the matching cube root of unity mod `n`.
    pub fn lambda(&self) -> &BigInt {
        &self.lambda
    }

    /// Reduced lattice basis.
    pub fn basis(&self) -> &[LatticeVector; 2] {
        &self.basis
    }

    /// Babai rounding against the lattice basis:
    ///
    /// ```text
    /// c1 = round(b2·k / n)
    /// c2 = round(-b1·k / n)
    /// k1 = k - c1·a1 - c2·a2
    /// k2 = -(c1·b1 + c2·b2)
    /// ```
    pub(crate) fn split(&self, k: &BigInt, n: &BigInt) -> Result<(BigInt, BigInt)> {
        let [v1, v2] = &self.basis;
        let c1 = (&v2.b * k).div_round(n)?;
        let c2 = (&(-&v1.b) * k).div_round(n)?;

        let k1 = &(k - &(&c1 * &v1.a)) - &(&c2 * &v2.a);
        let k2 = -(&(&c1 * &v1.b) + &(&c2 * &v2.b));
        Ok((k1, k2))
    }
}

#[cfg(test)]
mod tests {
    use crate::presets;
    use bignum::BigInt;

    #[test]
    fn endomorphism_split_recombines() {
        let curve = presets::curve("secp256k1").unwrap();
        let curve = curve.as_weierstrass().unwrap();
        let endo = curve.endomorphism().unwrap();
        let n = curve.domain().n();

        let k = BigInt::from_hex("6d1229a6b24c2e775c062870ad26bc261051e0198c67203167273c7c62538846")
            .unwrap();
        let (k1, k2) = curve.split_scalar(&k).unwrap();
        assert!(k1.bit_length() <= 129 && k2.bit_length() <= 129);

        let recombined = (&k1 + &(&k2 * endo.lambda())).modulo(n).unwrap();
        assert_eq!(recombined, k);
    }

    #[test]
    fn on_curve_check() {
        let curve = presets::curve("p256").unwrap();
        let curve = curve.as_weierstrass().unwrap();
        let g = curve.generator();
        assert!(curve.point(&g.x().unwrap(), &g.y().unwrap()).is_ok());
        assert!(curve.point(&g.x().unwrap(), &BigInt::from(5u32)).is_err());
        assert!(curve.point(curve.domain().p(), &BigInt::one()).is_err());
    }
}
