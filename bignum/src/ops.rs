//! Operator overloads for [`BigInt`].

use crate::BigInt;
use core::ops::{
    Add, AddAssign, Div, Mul, MulAssign, Neg, Rem, Shl, Shr, Sub, SubAssign,
};

/// Implement a binary operator for every owned/borrowed combination in terms
/// of the `&BigInt op &BigInt` body.
macro_rules! impl_binop {
    ($trait:ident, $method:ident, |$a:ident, $b:ident| $body:expr) => {
        impl $trait<&BigInt> for &BigInt {
            type Output = BigInt;

            fn $method(self, rhs: &BigInt) -> BigInt {
                let ($a, $b) = (self, rhs);
                $body
            }
        }

        impl $trait<BigInt> for BigInt {
            type Output = BigInt;

            fn $method(self, rhs: BigInt) -> BigInt {
                (&self).$method(&rhs)
            }
        }

        impl $trait<&BigInt> for BigInt {
            type Output = BigInt;

            fn $method(self, rhs: &BigInt) -> BigInt {
                (&self).$method(rhs)
            }
        }

        impl $trait<BigInt> for &BigInt {
            type Output = BigInt;

            fn $method(self, rhs: BigInt) -> BigInt {
                self.$method(&rhs)
            }
        }

        impl $trait<u32> for &BigInt {
            type Output = BigInt;

            fn $method(self, rhs: u32) -> BigInt {
                self.$method(&BigInt::from(rhs))
            }
        }

        impl $trait<u32> for BigInt {
            type Output = BigInt;

            fn $method(self, rhs: u32) -> BigInt {
                (&self).$method(&BigInt::from(rhs))
            }
        }
    };
}

macro_rules! impl_assign {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait<&BigInt> for BigInt {
            fn $method(&mut self, rhs: &BigInt) {
                *self = &*self $op rhs;
            }
        }

        impl $trait<BigInt> for BigInt {
            fn $method(&mut self, rhs: BigInt) {
                *self = &*self $op &rhs;
            }
        }
    };
}

impl_binop!(Add, add, |a, b| a.add_signed(b, false));
impl_binop!(Sub, sub, |a, b| a.add_signed(b, true));
impl_binop!(Mul, mul, |a, b| a.mul_signed(b));
impl_binop!(Div, div, |a, b| match a.div_rem(b) {
    Ok((q, _)) => q,
    Err(_) => panic!("attempt to divide by zero"),
});
impl_binop!(Rem, rem, |a, b| match a.div_rem(b) {
    Ok((_, r)) => r,
    Err(_) => panic!("attempt to calculate the remainder with a divisor of zero"),
});

impl_assign!(AddAssign, add_assign, +);
impl_assign!(SubAssign, sub_assign, -);
impl_assign!(MulAssign, mul_assign, *);

impl Neg for BigInt {
    type Output = BigInt;

    fn neg(self) -> BigInt {
        self.negated()
    }
}

impl Neg for &BigInt {
    type Output = BigInt;

    fn neg(self) -> BigInt {
        self.negated()
    }
}

impl Shl<usize> for &BigInt {
    type Output = BigInt;

    fn shl(self, bits: usize) -> BigInt {
        self.shl_bits(bits)
    }
}

impl Shl<usize> for BigInt {
    type Output = BigInt;

    fn shl(self, bits: usize) -> BigInt {
        self.shl_bits(bits)
    }
}

impl Shr<usize> for &BigInt {
    type Output = BigInt;

    /// Shift the magnitude right; the sign is kept, so this truncates toward
    /// zero.
    fn shr(self, bits: usize) -> BigInt {
        self.shr_bits(bits)
    }
}

impl Shr<usize> for BigInt {
    type Output = BigInt;

    fn shr(self, bits: usize) -> BigInt {
        self.shr_bits(bits)
    }
}
