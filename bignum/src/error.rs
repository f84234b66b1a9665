//! Error types.

use core::fmt;

/// Result type.
pub type Result<T> = core::result::Result<T, Error>;

/// Big integer errors.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// Malformed numeric literal, unsupported radix, or a value which does not
    /// fit the requested encoding.
    InvalidParameter,

    /// Division by zero, or inversion of an element with no inverse.
    ArithmeticDomain,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidParameter => write!(f, "invalid numeric parameter"),
            Error::ArithmeticDomain => write!(f, "value outside of arithmetic domain"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
