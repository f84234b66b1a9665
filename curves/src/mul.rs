//! Scalar multiplication.
//!
//! The algorithms here are written once against [`Accumulator`] and shared by
//! the short Weierstrass (Jacobian) and twisted Edwards (projective) point
//! types:
//!
//! - [`get_naf`]: width-`w` non-adjacent form recoding
//! - windowed NAF multiplication against a table of odd multiples
//! - the fixed-base comb over a cached doubling chain
//! - interleaved multi-scalar multiplication, which the GLV split also uses

use crate::precomputed::{AffineCoords, Doubles, NafWindow, Precomputed};
use alloc::{vec, vec::Vec};
use bignum::BigInt;

/// Window width used when a base point carries no precomputed table.
pub const DEFAULT_WINDOW: usize = 4;

/// Doubling step of the fixed-base comb.
pub(crate) const DOUBLES_STEP: usize = 4;

/// Window width of the odd multiples cached for a precomputed base point.
pub(crate) const PRECOMPUTED_WINDOW: usize = 8;

/// Point representation which multiplication accumulates into.
pub(crate) trait Accumulator: Clone {
    fn double(&self) -> Self;

    fn add(&self, rhs: &Self) -> Self;

    fn neg(&self) -> Self;

    /// Add a normalized table entry, negated when `negate` is set.
    fn add_coords(&self, coords: &AffineCoords, negate: bool) -> Self;

    /// Normalize every point, or `None` if any of them is the identity.
    fn normalize_all(points: &[Self]) -> Option<Vec<AffineCoords>>;
}

/// Width-`w` non-adjacent form of `|k|`, least significant digit first.
///
/// Each digit is zero or odd and lies in `(-2^(w-1), 2^(w-1))`, and every
/// non-zero digit is followed by at least `w - 1` zeros. `w` must be in
/// `2..=16`.
pub fn get_naf(k: &BigInt, w: usize) -> Vec<i32> {
    debug_assert!((2..=16).contains(&w));

    let modulus = 1i64 << w;
    let half = modulus >> 1;
    let mut k = k.abs();
    let mut naf = Vec::with_capacity(k.bit_length() + 1);

    while !k.is_zero() {
        let digit = if k.is_odd() {
            let low = (k.low_u32() as i64) & (modulus - 1);
            let digit = if low >= half { low - modulus } else { low };
            k = &k - &BigInt::from(digit);
            digit as i32
        } else {
            0
        };

        naf.push(digit);
        k = &k >> 1;
    }

    naf
}

/// `{P, 3P, 5P, ..., (2^(w-1) - 1)P}`
pub(crate) fn odd_multiples<A: Accumulator>(base: &A, w: usize) -> Vec<A> {
    let count = 1usize << (w - 2);
    let mut table = Vec::with_capacity(count);
    table.push(base.clone());

    if count > 1 {
        let double = base.double();
        for i in 1..count {
            let next = table[i - 1].add(&double);
            table.push(next);
        }
    }

    table
}

/// Odd multiples of one base point, ready to be indexed by NAF digits.
pub(crate) enum Window<'a, A> {
    /// Normalized entries, added with the cheaper mixed formulas.
    Affine(Vec<AffineCoords>),

    /// Entries borrowed from a precomputed table.
    Table(&'a [AffineCoords]),

    /// Entries which could not be normalized (one of them is the identity).
    Projective(Vec<A>),
}

impl<A: Accumulator> Window<'_, A> {
    fn compute(base: &A, w: usize) -> Self {
        let table = odd_multiples(base, w);
        match A::normalize_all(&table) {
            Some(coords) => Window::Affine(coords),
            None => Window::Projective(table),
        }
    }

    /// Apply one NAF digit to the accumulator.
    fn apply(&self, acc: &A, digit: i32) -> A {
        let index = (digit.unsigned_abs() as usize - 1) / 2;
        let negate = digit < 0;

        match self {
            Window::Affine(coords) => acc.add_coords(&coords[index], negate),
            Window::Table(coords) => acc.add_coords(&coords[index], negate),
            Window::Projective(points) if negate => acc.add(&points[index].neg()),
            Window::Projective(points) => acc.add(&points[index]),
        }
    }
}

/// One `k * P` term of a multi-scalar multiplication.
///
/// The NAF is taken of `|k|`; a negative `k` flips the sign of every digit.
pub(crate) struct Term<'a, A> {
    window: Window<'a, A>,
    naf: Vec<i32>,
    negate: bool,
}

impl<'a, A: Accumulator> Term<'a, A> {
    /// Term for `k * base`, with a freshly computed window of width `w`.
    pub(crate) fn new(base: &A, k: &BigInt, w: usize) -> Self {
        Self {
            window: Window::compute(base, w),
            naf: get_naf(k, w),
            negate: k.is_negative(),
        }
    }

    /// Term for `k * base` reusing the base's precomputed odd multiples.
    pub(crate) fn with_table(table: &'a NafWindow, k: &BigInt) -> Self {
        Self {
            window: Window::Table(&table.points),
            naf: get_naf(k, table.wnd),
            negate: k.is_negative(),
        }
    }

    /// Term for `k * base` given the normalized odd multiples of `base`.
    pub(crate) fn with_coords(coords: Vec<AffineCoords>, wnd: usize, k: &BigInt) -> Self {
        Self {
            window: Window::Affine(coords),
            naf: get_naf(k, wnd),
            negate: k.is_negative(),
        }
    }

    fn apply(&self, acc: &A, digit: i32) -> A {
        let digit = if self.negate { -digit } else { digit };
        self.window.apply(acc, digit)
    }
}

/// Windowed NAF multiplication: `k * base`.
pub(crate) fn wnaf_mul<A: Accumulator>(identity: A, base: &A, k: &BigInt, w: usize) -> A {
    mul_add_many(identity, &[Term::new(base, k, w)])
}

/// Interleaved multi-scalar multiplication: `sum(k_i * P_i)`.
///
/// All NAFs are scanned together from the most significant position down, so
/// the doublings are shared between every term.
pub(crate) fn mul_add_many<A: Accumulator>(identity: A, terms: &[Term<'_, A>]) -> A {
    let len = terms.iter().map(|term| term.naf.len()).max().unwrap_or(0);
    let mut acc = identity;

    for i in (0..len).rev() {
        acc = acc.double();
        for term in terms {
            match term.naf.get(i) {
                Some(&digit) if digit != 0 => acc = term.apply(&acc, digit),
                _ => (),
            }
        }
    }

    acc
}

/// Fixed-base comb multiplication over a cached doubling chain.
///
/// The scalar's NAF (`w = 2`) is regrouped into `step`-digit chunks; chunk
/// `j` selects `2^(j * step) P` from the table. Returns `None` when `k` is
/// too wide for the table.
pub(crate) fn fixed_naf_mul<A: Accumulator>(identity: A, doubles: &Doubles, k: &BigInt) -> Option<A> {
    let step = doubles.step;
    let naf = get_naf(k, 2);

    let repr: Vec<i32> = naf
        .chunks(step)
        .map(|chunk| chunk.iter().rev().fold(0, |acc, &digit| (acc << 1) + digit))
        .collect();

    if repr.len() > doubles.points.len() {
        return None;
    }

    // Largest chunk value a NAF can produce: 0b1010...
    let max = ((1i32 << (step + 1)) - if step % 2 == 0 { 2 } else { 1 }) / 3;

    let mut a = identity.clone();
    let mut b = identity;
    for i in (1..=max).rev() {
        for (j, &chunk) in repr.iter().enumerate() {
            if chunk == i {
                b = b.add_coords(&doubles.points[j], false);
            } else if chunk == -i {
                b = b.add_coords(&doubles.points[j], true);
            }
        }
        a = a.add(&b);
    }

    Some(a)
}

/// Build the doubling chain `P, 2^step P, 2^(2 step) P, ...` covering `power`
/// bits, and the odd multiples of width `wnd`.
///
/// Returns `None` if any entry is the identity, i.e. the base has small order.
pub(crate) fn precompute<A: Accumulator>(base: &A, power: usize, wnd: usize) -> Option<Precomputed> {
    let mut chain = vec![base.clone()];
    let mut acc = base.clone();
    let mut covered = 0;
    while covered < power {
        for _ in 0..DOUBLES_STEP {
            acc = acc.double();
        }
        chain.push(acc.clone());
        covered += DOUBLES_STEP;
    }

    let doubles = Doubles {
        step: DOUBLES_STEP,
        points: A::normalize_all(&chain)?,
    };
    let naf = NafWindow {
        wnd,
        points: A::normalize_all(&odd_multiples(base, wnd))?,
    };

    log::debug!(
        "precomputed {} doubles and {} odd multiples",
        doubles.points.len(),
        naf.points.len()
    );

    Some(Precomputed {
        doubles: Some(doubles),
        naf: Some(naf),
    })
}

/// Check an imported table against its base point: every doubling chain
/// entry must be `2^step` times the previous one and every window entry `2P`
/// more than the previous one. The first entry of each list is `base`.
pub(crate) fn verify_table<A, F>(table: &Precomputed, base: &A, lift: F) -> bool
where
    A: Accumulator + PartialEq,
    F: Fn(&AffineCoords) -> A,
{
    if let Some(doubles) = &table.doubles {
        let mut expected = base.clone();
        for (i, entry) in doubles.points.iter().enumerate() {
            if i > 0 {
                for _ in 0..doubles.step {
                    expected = expected.double();
                }
            }
            if lift(entry) != expected {
                return false;
            }
        }
    }

    if let Some(naf) = &table.naf {
        let double = base.double();
        let mut expected = base.clone();
        for (i, entry) in naf.points.iter().enumerate() {
            if i > 0 {
                expected = expected.add(&double);
            }
            if lift(entry) != expected {
                return false;
            }
        }
    }

    true
}
