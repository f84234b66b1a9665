//! Textual encodings: base 10 and base 16 only.

use crate::{
    BigInt, Error, Result,
    limbs::{self, Limb},
};
use alloc::{string::String, vec::Vec};
use core::{fmt, str::FromStr};

/// Largest power of ten fitting a limb, and its exponent.
const DECIMAL_CHUNK: (Limb, usize) = (1_000_000_000, 9);

impl BigInt {
    /// Parse a string in base 10 or 16.
    ///
    /// ASCII whitespace anywhere in the input is ignored, so grouped hex
    /// constants such as `"ffffffff 00000001"` parse as written. A single
    /// leading `-` marks a negative value.
    pub fn parse(s: &str, radix: u32) -> Result<Self> {
        if radix != 10 && radix != 16 {
            return Err(Error::InvalidParameter);
        }

        let digits: Vec<u8> = s.bytes().filter(|b| !b.is_ascii_whitespace()).collect();
        let (negative, digits) = match digits.split_first() {
            Some((b'-', rest)) => (true, rest),
            _ => (false, &digits[..]),
        };

        if digits.is_empty() {
            return Err(Error::InvalidParameter);
        }

        let mut acc = Vec::new();
        for &digit in digits {
            let value = (digit as char)
                .to_digit(radix)
                .ok_or(Error::InvalidParameter)?;
            limbs::mul_small_add(&mut acc, radix, value);
        }

        Ok(Self::from_parts(negative, acc))
    }

    /// Parse a hex string; shorthand for `parse(s, 16)`.
    pub fn from_hex(s: &str) -> Result<Self> {
        Self::parse(s, 16)
    }

    /// Format in base 10 or 16, lowercase, with a leading `-` when negative.
    pub fn to_str_radix(&self, radix: u32) -> Result<String> {
        let mut digits = match radix {
            10 => self.decimal_digits(),
            16 => self.hex_digits(),
            _ => return Err(Error::InvalidParameter),
        };

        if self.negative {
            digits.insert(0, '-');
        }
        Ok(digits)
    }

    /// Lowercase hex of the magnitude, zero-padded to at least `width`
    /// characters.
    pub fn to_hex_padded(&self, width: usize) -> String {
        let digits = self.hex_digits();
        let mut out = String::with_capacity(width.max(digits.len()));
        for _ in digits.len()..width {
            out.push('0');
        }
        out.push_str(&digits);
        out
    }

    fn hex_digits(&self) -> String {
        let mut out = String::with_capacity(self.limbs.len() * 8);
        for (i, limb) in self.limbs.iter().rev().enumerate() {
            let chunk = if i == 0 {
                alloc::format!("{limb:x}")
            } else {
                alloc::format!("{limb:08x}")
            };
            out.push_str(&chunk);
        }
        if out.is_empty() {
            out.push('0');
        }
        out
    }

    fn decimal_digits(&self) -> String {
        let (base, width) = DECIMAL_CHUNK;
        let mut rest = self.limbs.clone();
        let mut chunks = Vec::new();
        while !rest.is_empty() {
            chunks.push(limbs::div_rem_small(&mut rest, base));
        }

        let mut out = String::with_capacity(chunks.len() * width);
        for (i, chunk) in chunks.iter().rev().enumerate() {
            let chunk = if i == 0 {
                alloc::format!("{chunk}")
            } else {
                alloc::format!("{chunk:0width$}")
            };
            out.push_str(&chunk);
        }
        if out.is_empty() {
            out.push('0');
        }
        out
    }
}

impl FromStr for BigInt {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s, 10)
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.negative, "", &self.decimal_digits())
    }
}

impl fmt::LowerHex for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.negative, "0x", &self.hex_digits())
    }
}
