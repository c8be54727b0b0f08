//! Error and status types for point arithmetic.
//!
//! `Error` covers failures the caller must treat as a bug (an
//! out-of-domain construction); `PointStatus` covers the expected
//! alternative outcome of a computation landing on the identity, kept
//! distinct per the propagation policy this codebase applies elsewhere
//! (`Result` for recoverable failure, a plain enum for an expected
//! alternative).

use core::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// Wraps a failure from the underlying multi-precision layer.
    Mpint(mpint::Error),
    /// A modular inverse unexpectedly failed mid-operation (e.g.
    /// `convert_from` on a projective point with `z = 0`).
    PointError,
    /// The operation's mathematical result is the point at infinity.
    /// Surfaced here only when a caller forces a `Result`-shaped API;
    /// most operations instead report this via [`PointStatus`].
    PointInfinity,
}

impl From<mpint::Error> for Error {
    fn from(e: mpint::Error) -> Self {
        Error::Mpint(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Mpint(e) => write!(f, "underlying integer error: {e}"),
            Error::PointError => write!(f, "point arithmetic inversion failed"),
            Error::PointInfinity => write!(f, "result is the point at infinity"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

pub type Result<T> = core::result::Result<T, Error>;

/// Outcome of an operation that may legitimately land on the identity
/// or fail due to an unexpected inversion failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointStatus {
    Ok,
    Infinity,
    Error,
}
