//! Limb-level arithmetic on little-endian `u32` magnitudes.
//!
//! Everything here works on raw buffers and mutates in place where that saves
//! an allocation. It is the scratch layer underneath [`BigInt`](crate::BigInt)
//! and [`MontyForm`](crate::MontyForm) and never crosses the public API.

use alloc::{vec, vec::Vec};
use core::cmp::Ordering;

pub(crate) type Limb = u32;
pub(crate) type WideLimb = u64;

/// Size of a limb in bits.
pub(crate) const LIMB_BITS: usize = 32;

/// Drop most significant zero limbs.
pub(crate) fn normalize(a: &mut Vec<Limb>) {
    while a.last() == Some(&0) {
        a.pop();
    }
}

/// View of `a` without its most significant zero limbs.
pub(crate) fn trim(a: &[Limb]) -> &[Limb] {
    let mut len = a.len();
    while len > 0 && a[len - 1] == 0 {
        len -= 1;
    }
    &a[..len]
}

pub(crate) fn cmp(a: &[Limb], b: &[Limb]) -> Ordering {
    let (a, b) = (trim(a), trim(b));
    a.len()
        .cmp(&b.len())
        .then_with(|| a.iter().rev().cmp(b.iter().rev()))
}

pub(crate) fn bit_length(a: &[Limb]) -> usize {
    match trim(a).split_last() {
        Some((top, rest)) => rest.len() * LIMB_BITS + (LIMB_BITS - top.leading_zeros() as usize),
        None => 0,
    }
}

/// `acc += b`
pub(crate) fn add_assign(acc: &mut Vec<Limb>, b: &[Limb]) {
    if acc.len() < b.len() {
        acc.resize(b.len(), 0);
    }

    let mut carry: WideLimb = 0;
    for i in 0..acc.len() {
        let rhs = match b.get(i) {
            Some(&limb) => limb as WideLimb,
            None if carry == 0 => break,
            None => 0,
        };
        let sum = acc[i] as WideLimb + rhs + carry;
        acc[i] = sum as Limb;
        carry = sum >> LIMB_BITS;
    }

    if carry != 0 {
        acc.push(carry as Limb);
    }
}

/// `acc -= b`, where `acc >= b`.
pub(crate) fn sub_assign(acc: &mut Vec<Limb>, b: &[Limb]) {
    debug_assert!(cmp(acc, b) != Ordering::Less);

    let mut borrow = false;
    for i in 0..acc.len() {
        let rhs = match b.get(i) {
            Some(&limb) => limb,
            None if !borrow => break,
            None => 0,
        };
        let (d1, o1) = acc[i].overflowing_sub(rhs);
        let (d2, o2) = d1.overflowing_sub(borrow as Limb);
        acc[i] = d2;
        borrow = o1 | o2;
    }

    debug_assert!(!borrow);
    normalize(acc);
}

/// Schoolbook product.
pub(crate) fn mul(a: &[Limb], b: &[Limb]) -> Vec<Limb> {
    let (a, b) = (trim(a), trim(b));
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    let mut out = vec![0; a.len() + b.len()];
    for (i, &ai) in a.iter().enumerate() {
        if ai == 0 {
            continue;
        }

        let mut carry: WideLimb = 0;
        for (j, &bj) in b.iter().enumerate() {
            let t = ai as WideLimb * bj as WideLimb + out[i + j] as WideLimb + carry;
            out[i + j] = t as Limb;
            carry = t >> LIMB_BITS;
        }
        out[i + b.len()] = carry as Limb;
    }

    normalize(&mut out);
    out
}

/// `acc = acc * m + add`
pub(crate) fn mul_small_add(acc: &mut Vec<Limb>, m: Limb, add: Limb) {
    let mut carry = add as WideLimb;
    for limb in acc.iter_mut() {
        let t = *limb as WideLimb * m as WideLimb + carry;
        *limb = t as Limb;
        carry = t >> LIMB_BITS;
    }

    if carry != 0 {
        acc.push(carry as Limb);
    }
    normalize(acc);
}

/// `acc /= d`, returning the remainder.
pub(crate) fn div_rem_small(acc: &mut Vec<Limb>, d: Limb) -> Limb {
    debug_assert!(d != 0);

    let mut rem: WideLimb = 0;
    for limb in acc.iter_mut().rev() {
        let cur = (rem << LIMB_BITS) | *limb as WideLimb;
        *limb = (cur / d as WideLimb) as Limb;
        rem = cur % d as WideLimb;
    }

    normalize(acc);
    rem as Limb
}

pub(crate) fn shl(a: &[Limb], bits: usize) -> Vec<Limb> {
    let a = trim(a);
    if a.is_empty() {
        return Vec::new();
    }

    let (limbs, rem) = (bits / LIMB_BITS, bits % LIMB_BITS);
    let mut out = vec![0; limbs];
    out.reserve(a.len() + 1);

    if rem == 0 {
        out.extend_from_slice(a);
    } else {
        let mut carry = 0;
        for &limb in a {
            out.push((limb << rem) | carry);
            carry = limb >> (LIMB_BITS - rem);
        }
        if carry != 0 {
            out.push(carry);
        }
    }

    out
}

pub(crate) fn shr_assign(a: &mut Vec<Limb>, bits: usize) {
    let (limbs, rem) = (bits / LIMB_BITS, bits % LIMB_BITS);
    if limbs >= a.len() {
        a.clear();
        return;
    }

    a.drain(..limbs);
    if rem != 0 {
        for i in 0..a.len() {
            let hi = match a.get(i + 1) {
                Some(&next) => next << (LIMB_BITS - rem),
                None => 0,
            };
            a[i] = (a[i] >> rem) | hi;
        }
    }

    normalize(a);
}

/// Keep the low `bits` bits.
pub(crate) fn mask_assign(a: &mut Vec<Limb>, bits: usize) {
    let (limbs, rem) = (bits / LIMB_BITS, bits % LIMB_BITS);
    if limbs >= a.len() {
        return;
    }

    if rem == 0 {
        a.truncate(limbs);
    } else {
        a.truncate(limbs + 1);
        a[limbs] &= (1 << rem) - 1;
    }

    normalize(a);
}

/// Binary long division of magnitudes: returns `(a / b, a % b)`.
///
/// The divisor is shifted up to the dividend's length and walked back down one
/// bit at a time, subtracting wherever it still fits. `b` must be non-zero.
pub(crate) fn div_rem(a: &[Limb], b: &[Limb]) -> (Vec<Limb>, Vec<Limb>) {
    let (a, b) = (trim(a), trim(b));
    debug_assert!(!b.is_empty());

    if cmp(a, b) == Ordering::Less {
        return (Vec::new(), a.to_vec());
    }

    if b.len() == 1 {
        let mut quot = a.to_vec();
        let rem = div_rem_small(&mut quot, b[0]);
        let mut rem = vec![rem];
        normalize(&mut rem);
        return (quot, rem);
    }

    let shift = bit_length(a) - bit_length(b);
    let mut rem = a.to_vec();
    let mut divisor = shl(b, shift);
    let mut quot = vec![0; shift / LIMB_BITS + 1];

    for i in (0..=shift).rev() {
        if cmp(&rem, &divisor) != Ordering::Less {
            sub_assign(&mut rem, &divisor);
            quot[i / LIMB_BITS] |= 1 << (i % LIMB_BITS);
        }
        shr_assign(&mut divisor, 1);
    }

    normalize(&mut quot);
    (quot, rem)
}

/// Word-by-word Montgomery reduction: `t * R^-1 mod m` with `R = 2^(32 * m.len())`.
///
/// Requires `t < m * R` and `m_inv = -m^-1 mod 2^32`.
pub(crate) fn redc(t: &[Limb], m: &[Limb], m_inv: Limb) -> Vec<Limb> {
    let t = trim(t);
    let s = m.len();
    debug_assert!(t.len() <= 2 * s);

    let mut buf = vec![0; 2 * s + 1];
    buf[..t.len()].copy_from_slice(t);

    for i in 0..s {
        let u = buf[i].wrapping_mul(m_inv) as WideLimb;
        let mut carry: WideLimb = 0;
        for (j, &mj) in m.iter().enumerate() {
            let x = u * mj as WideLimb + buf[i + j] as WideLimb + carry;
            buf[i + j] = x as Limb;
            carry = x >> LIMB_BITS;
        }

        let mut k = i + s;
        while carry != 0 {
            let x = buf[k] as WideLimb + carry;
            buf[k] = x as Limb;
            carry = x >> LIMB_BITS;
            k += 1;
        }
    }

    let mut out = buf.split_off(s);
    normalize(&mut out);
    if cmp(&out, m) != Ordering::Less {
        sub_assign(&mut out, m);
    }
    out
}
