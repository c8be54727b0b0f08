//! Unchecked limb-array arithmetic primitives.
//!
//! Every function in this crate operates on raw slices of a single limb
//! type and assumes its inputs are already valid: no allocation, no
//! fallible paths, sizes are exactly what the caller says they are.
//! Higher layers (`mpint`) build the normalised, sign-aware `Int` type on
//! top of these.
#![no_std]

extern crate alloc;

mod arith;
mod div;
mod jacobi;
mod modpow;

pub use arith::{add_1, add_n, lshift, mul_1, normalised_size, rshift, sub_1, sub_n};
pub use div::{div_qr_1, tdiv_qr};
pub use jacobi::{basecase_jacobi, jacobi_n};
pub use modpow::{
    binvert, binvert_powm_scratch_size, modexact_1_odd, mul_low_n, pow_low, powm,
};

use core::fmt::Debug;
use core::ops::{BitAnd, BitOr, BitXor, Not, Shl, Shr};

/// A machine word usable as one limb of a multi-precision integer.
///
/// Implemented for `u8`, `u16`, `u32` and `u64`. `Double` is a type twice
/// as wide, used to carry the intermediate result of a single-limb
/// multiply-with-carry or add-with-carry without resorting to hardware
/// carry intrinsics.
pub trait Limb:
    Copy
    + Clone
    + Debug
    + Default
    + Eq
    + Ord
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + Not<Output = Self>
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
{
    /// A type twice the width of `Self`, used for carry-propagating ops.
    type Double: Copy
        + Clone
        + Eq
        + Ord
        + core::ops::Add<Output = Self::Double>
        + core::ops::Sub<Output = Self::Double>
        + core::ops::Mul<Output = Self::Double>
        + core::ops::Div<Output = Self::Double>
        + core::ops::Rem<Output = Self::Double>
        + core::ops::Shr<u32, Output = Self::Double>
        + core::ops::Shl<u32, Output = Self::Double>
        + core::ops::BitAnd<Output = Self::Double>
        + core::ops::BitOr<Output = Self::Double>;

    /// Number of bits in this limb type.
    const BITS: u32;
    const ZERO: Self;
    const ONE: Self;
    const MAX: Self;

    fn from_double(d: Self::Double) -> Self;
    fn to_double(self) -> Self::Double;
    fn double_zero() -> Self::Double;
    fn double_from_u32(v: u32) -> Self::Double;

    /// `Double` as the nearest `f64`, for float-reciprocal reduction
    /// schemes. Exact as long as the value fits within `f64`'s 53-bit
    /// mantissa (true of any `Double` this crate defines up to `u64`;
    /// `u128` values beyond 2^53 lose precision, which is why the
    /// float-reciprocal strategy is only appropriate for narrow moduli).
    fn double_as_f64(d: Self::Double) -> f64;
    /// Truncating `f64` to `Double`, the inverse of [`double_as_f64`](Limb::double_as_f64).
    fn double_from_f64(f: f64) -> Self::Double;

    /// High half of a `Double` value, as a limb.
    fn double_hi(d: Self::Double) -> Self;
    /// Low half of a `Double` value, as a limb.
    fn double_lo(d: Self::Double) -> Self;

    fn wrapping_add(self, rhs: Self) -> Self;
    fn wrapping_sub(self, rhs: Self) -> Self;
    fn wrapping_mul(self, rhs: Self) -> Self;
    fn overflowing_add(self, rhs: Self) -> (Self, bool);
    fn overflowing_sub(self, rhs: Self) -> (Self, bool);

    fn leading_zeros(self) -> u32;
    fn trailing_zeros(self) -> u32;
    fn count_ones(self) -> u32;
    fn is_zero(self) -> bool {
        self == Self::ZERO
    }
    fn is_odd(self) -> bool {
        (self & Self::ONE) == Self::ONE
    }

    fn as_u64(self) -> u64;
    fn from_u64(v: u64) -> Self;
}

macro_rules! impl_limb {
    ($t:ty, $dbl:ty, $bits:expr) => {
        impl Limb for $t {
            type Double = $dbl;

            const BITS: u32 = $bits;
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const MAX: Self = <$t>::MAX;

            #[inline]
            fn from_double(d: Self::Double) -> Self {
                d as Self
            }
            #[inline]
            fn to_double(self) -> Self::Double {
                self as Self::Double
            }
            #[inline]
            fn double_zero() -> Self::Double {
                0
            }
            #[inline]
            fn double_from_u32(v: u32) -> Self::Double {
                v as Self::Double
            }
            #[inline]
            fn double_as_f64(d: Self::Double) -> f64 {
                d as u128 as f64
            }
            #[inline]
            fn double_from_f64(f: f64) -> Self::Double {
                f as u128 as Self::Double
            }
            #[inline]
            fn double_hi(d: Self::Double) -> Self {
                (d >> $bits) as Self
            }
            #[inline]
            fn double_lo(d: Self::Double) -> Self {
                d as Self
            }
            #[inline]
            fn wrapping_add(self, rhs: Self) -> Self {
                self.wrapping_add(rhs)
            }
            #[inline]
            fn wrapping_sub(self, rhs: Self) -> Self {
                self.wrapping_sub(rhs)
            }
            #[inline]
            fn wrapping_mul(self, rhs: Self) -> Self {
                self.wrapping_mul(rhs)
            }
            #[inline]
            fn overflowing_add(self, rhs: Self) -> (Self, bool) {
                self.overflowing_add(rhs)
            }
            #[inline]
            fn overflowing_sub(self, rhs: Self) -> (Self, bool) {
                self.overflowing_sub(rhs)
            }
            #[inline]
            fn leading_zeros(self) -> u32 {
                self.leading_zeros()
            }
            #[inline]
            fn trailing_zeros(self) -> u32 {
                self.trailing_zeros()
            }
            #[inline]
            fn count_ones(self) -> u32 {
                self.count_ones()
            }
            #[inline]
            fn as_u64(self) -> u64 {
                self as u64
            }
            #[inline]
            fn from_u64(v: u64) -> Self {
                v as Self
            }
        }
    };
}

impl_limb!(u8, u16, 8);
impl_limb!(u16, u32, 16);
impl_limb!(u32, u64, 32);
impl_limb!(u64, u128, 64);
