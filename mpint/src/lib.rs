//! Signed multi-precision integers (`Int`) with three selectable modular
//! reduction strategies (naive, Barrett, Montgomery) bundled in a
//! `ModCfg`, plus base conversion, GCD family, Tonelli-Shanks modular
//! square root, and Miller-Rabin primality testing.
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod dev;
pub mod error;
mod int;
mod modcfg;

pub use error::{Error, Result};
pub use int::{ByteOrder, PrimeStatus, RoundingMode};
pub use int::Int;
pub use modcfg::{CustomReducer, ModCfg, ReductionKind};

pub use limb::Limb;
