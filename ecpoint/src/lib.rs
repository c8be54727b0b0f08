//! Elliptic-curve point arithmetic over the multi-precision prime
//! field `mpint` provides, covering short-Weierstrass, Montgomery and
//! twisted-Edwards curve families in affine and projective coordinates.
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod curve;
pub mod error;
mod point;

pub use curve::{CurveFamily, CurveParams};
pub use error::{Error, PointStatus, Result};
pub use point::Point;
