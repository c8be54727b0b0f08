//! Error types.

use core::fmt;

/// Error type covering parsing, construction, and arithmetic failures
/// that must be surfaced to the caller rather than recovered locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A parser encountered a digit outside its base's alphabet.
    InvalidCharacter,
    /// A string input exceeded the safety bound on input length.
    Truncation,
    /// Division or modular reduction was attempted with modulus/divisor 0.
    DivideByZero,
    /// A modular inverse was requested where `gcd(a, m) != 1`.
    NotInvertible,
    /// A modular square root was requested on a quadratic non-residue.
    SqrtNotFound,
    /// `powm` was called against an empty modulus.
    ModulusHasLengthZero,
    /// `set_str`/`get_str` was called with a base outside {2,8,10,16,32,64}.
    InvalidBase,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Error::InvalidCharacter => "invalid character for the given base",
            Error::Truncation => "input exceeded the maximum permitted length",
            Error::DivideByZero => "division or reduction by zero",
            Error::NotInvertible => "value has no modular inverse (gcd != 1)",
            Error::SqrtNotFound => "value is not a quadratic residue",
            Error::ModulusHasLengthZero => "modulus has length zero",
            Error::InvalidBase => "base must be one of 2, 8, 10, 16, 32, 64",
        };
        write!(f, "{msg}")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type used throughout `mpint`.
pub type Result<T> = core::result::Result<T, Error>;
