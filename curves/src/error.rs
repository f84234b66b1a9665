//! Error types.

use core::fmt;

/// Result type.
pub type Result<T> = core::result::Result<T, Error>;

/// Elliptic curve errors.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// Malformed numeric literal, unsupported radix or inconsistent curve
    /// parameters.
    InvalidParameter,

    /// Inversion of a non-invertible element, or division by zero.
    ArithmeticDomain,

    /// Point is not on the curve, is the identity where that is not allowed,
    /// lies outside the prime-order subgroup, or cannot be decoded.
    InvalidPoint,

    /// Malformed signature, or `r`/`s` outside of `[1, n - 1]`.
    InvalidSignature,

    /// Peer public key rejected during key agreement.
    TwistSecurity,

    /// Unrecognized point encoding prefix or wrong encoded length.
    Encoding,

    /// Key is missing the half needed for the operation.
    MissingKey,

    /// A rejection-sampling loop hit its attempt limit.
    IterationLimit,

    /// No curve registered under the requested name.
    UnknownCurve,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidParameter => write!(f, "invalid parameter"),
            Error::ArithmeticDomain => write!(f, "value outside of arithmetic domain"),
            Error::InvalidPoint => write!(f, "invalid curve point"),
            Error::InvalidSignature => write!(f, "invalid signature"),
            Error::TwistSecurity => write!(f, "peer public key failed validation"),
            Error::Encoding => write!(f, "unrecognized point encoding"),
            Error::MissingKey => write!(f, "key is missing a required component"),
            Error::IterationLimit => write!(f, "iteration limit exceeded"),
            Error::UnknownCurve => write!(f, "unknown curve"),
        }
    }
}

impl From<bignum::Error> for Error {
    fn from(err: bignum::Error) -> Error {
        match err {
            bignum::Error::InvalidParameter => Error::InvalidParameter,
            bignum::Error::ArithmeticDomain => Error::ArithmeticDomain,
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
