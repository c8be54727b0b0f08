//! The signed multi-precision integer `Int<L>` and its basic surface:
//! construction, comparison, bit access, and shifts. Additive and
//! multiplicative arithmetic, GCD, power/root, and string conversion
//! live in their own sibling modules and are implemented as further
//! `impl` blocks on the same type.

mod arith;
mod gcd;
mod pow;
mod strconv;

use crate::error::{Error, Result};
use alloc::vec;
use alloc::vec::Vec;
use limb::Limb;

/// Division/remainder rounding convention, threaded explicitly through
/// every division-family method rather than defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundingMode {
    /// Round the quotient towards negative infinity.
    Floor,
    /// Round the quotient towards positive infinity.
    Ceil,
    /// Round the quotient towards zero (the remainder keeps the
    /// dividend's sign).
    Trunc,
}

/// Result of a Miller-Rabin primality test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimeStatus {
    ProbablyPrime,
    CompositeWithFactor,
    CompositeNotPowerOfPrime,
    Error,
}

/// Big-endian or little-endian byte order, used for `to_bytes`/`from_bytes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    BigEndian,
    LittleEndian,
}

/// A signed multi-precision integer: an ordered little-endian sequence
/// of limbs of width `L`, plus a sign bit.
///
/// Invariant: `limbs` is either empty (value 0, `neg == false`), or its
/// most significant limb is nonzero. There is no negative zero.
#[derive(Clone, Debug)]
pub struct Int<L: Limb> {
    pub(crate) limbs: Vec<L>,
    pub(crate) neg: bool,
}

impl<L: Limb> Int<L> {
    /// The additive identity.
    pub fn zero() -> Self {
        Int { limbs: Vec::new(), neg: false }
    }

    /// The multiplicative identity.
    pub fn one() -> Self {
        Self::from_u64(1)
    }

    pub fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }

    pub fn is_negative(&self) -> bool {
        self.neg
    }

    pub fn is_odd(&self) -> bool {
        self.limbs.first().map(|l| l.is_odd()).unwrap_or(false)
    }

    pub fn is_even(&self) -> bool {
        !self.is_odd()
    }

    /// Number of significant bits in the magnitude (0 for zero).
    pub fn bit_length(&self) -> usize {
        match self.limbs.last() {
            None => 0,
            Some(top) => {
                let full = (self.limbs.len() as u32 - 1) * L::BITS;
                full as usize + (L::BITS - top.leading_zeros()) as usize
            }
        }
    }

    /// Build an `Int` from raw unsigned limbs, normalising away any
    /// trailing zero limbs. Used by `ModCfg`'s reduction strategies,
    /// which operate on raw limb vectors internally.
    pub(crate) fn from_limbs_unsigned(limbs: Vec<L>) -> Self {
        Self::normalise(limbs, false)
    }

    fn normalise(mut limbs: Vec<L>, neg: bool) -> Self {
        while let Some(top) = limbs.last() {
            if top.is_zero() {
                limbs.pop();
            } else {
                break;
            }
        }
        let neg = if limbs.is_empty() { false } else { neg };
        Int { limbs, neg }
    }

    // ---- construction ----

    pub fn from_i64(v: i64) -> Self {
        let neg = v < 0;
        let mag = (v as i128).unsigned_abs() as u64;
        Self::from_u64(mag).with_sign(neg)
    }

    pub fn from_u64(mut v: u64) -> Self {
        let mut limbs = Vec::new();
        if L::BITS >= 64 {
            if v != 0 {
                limbs.push(L::from_u64(v));
            }
        } else {
            let mask_bits = L::BITS;
            while v != 0 {
                limbs.push(L::from_u64(v & (u64::MAX >> (64 - mask_bits))));
                v >>= mask_bits;
            }
        }
        Int { limbs, neg: false }
    }

    fn with_sign(mut self, neg: bool) -> Self {
        if self.is_zero() {
            self.neg = false;
        } else {
            self.neg = neg;
        }
        self
    }

    /// Construct from an IEEE-754 double. NaN, infinities, and values
    /// with `|x| < 1` yield zero; otherwise the integer part is
    /// extracted limb by limb.
    pub fn from_f64(x: f64) -> Self {
        if x.is_nan() || x.is_infinite() || x.abs() < 1.0 {
            return Self::zero();
        }
        let neg = x.is_sign_negative();
        let mut mag = x.abs().trunc();
        let radix = (1u128 << L::BITS) as f64;
        let mut limbs = Vec::new();
        while mag >= 1.0 {
            let rem = mag % radix;
            limbs.push(L::from_u64(rem as u64));
            mag = (mag - rem) / radix;
        }
        Self::normalise(limbs, neg)
    }

    /// Construct from a big-endian byte array.
    pub fn from_bytes_be(bytes: &[u8]) -> Self {
        let mut limbs = Self::limbs_from_be_bytes(bytes);
        limbs.reverse();
        Self::normalise(limbs, false)
    }

    /// Construct from a little-endian byte array.
    pub fn from_bytes_le(bytes: &[u8]) -> Self {
        let mut be: Vec<u8> = bytes.to_vec();
        be.reverse();
        Self::from_bytes_be(&be)
    }

    fn limbs_from_be_bytes(bytes: &[u8]) -> Vec<L> {
        // Pack big-endian bytes into big-endian limbs of width L::BITS,
        // then the caller reverses to little-endian limb order.
        let limb_bytes = (L::BITS as usize) / 8;
        let limb_bytes = limb_bytes.max(1);
        let mut padded = bytes.to_vec();
        let pad = (limb_bytes - (padded.len() % limb_bytes)) % limb_bytes;
        let mut full = vec![0u8; pad];
        full.extend_from_slice(&padded);
        padded = full;

        let mut limbs = Vec::with_capacity(padded.len() / limb_bytes);
        for chunk in padded.chunks(limb_bytes) {
            let mut v: u64 = 0;
            for &byte in chunk {
                v = (v << 8) | byte as u64;
            }
            limbs.push(L::from_u64(v));
        }
        limbs
    }

    /// Serialise the magnitude as big-endian bytes. Zero serialises to a
    /// single `0x00` byte.
    pub fn to_bytes_be(&self) -> Vec<u8> {
        if self.is_zero() {
            return vec![0u8];
        }
        let limb_bytes = ((L::BITS as usize) / 8).max(1);
        let mut out = Vec::with_capacity(self.limbs.len() * limb_bytes);
        for &limb in self.limbs.iter().rev() {
            let v = limb.as_u64();
            for i in (0..limb_bytes).rev() {
                out.push(((v >> (i * 8)) & 0xFF) as u8);
            }
        }
        // Strip leading zero bytes but keep at least one.
        let first_nonzero = out.iter().position(|&b| b != 0).unwrap_or(out.len() - 1);
        out[first_nonzero..].to_vec()
    }

    /// Serialise the magnitude as little-endian bytes.
    pub fn to_bytes_le(&self) -> Vec<u8> {
        let mut be = self.to_bytes_be();
        be.reverse();
        be
    }

    /// Serialise the magnitude as bytes in the requested order.
    pub fn to_bytes(&self, order: ByteOrder) -> Vec<u8> {
        match order {
            ByteOrder::BigEndian => self.to_bytes_be(),
            ByteOrder::LittleEndian => self.to_bytes_le(),
        }
    }

    /// Construct from a byte array in the requested order.
    pub fn from_bytes(bytes: &[u8], order: ByteOrder) -> Self {
        match order {
            ByteOrder::BigEndian => Self::from_bytes_be(bytes),
            ByteOrder::LittleEndian => Self::from_bytes_le(bytes),
        }
    }

    // ---- comparison ----

    /// Compare magnitudes only, ignoring sign.
    pub fn cmp_abs(&self, other: &Self) -> core::cmp::Ordering {
        use core::cmp::Ordering;
        if self.limbs.len() != other.limbs.len() {
            return self.limbs.len().cmp(&other.limbs.len());
        }
        for i in (0..self.limbs.len()).rev() {
            match self.limbs[i].cmp(&other.limbs[i]) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }

    pub fn cmp_ui(&self, v: u64) -> core::cmp::Ordering {
        self.cmp(&Self::from_u64(v))
    }

    pub fn cmp_si(&self, v: i64) -> core::cmp::Ordering {
        self.cmp(&Self::from_i64(v))
    }

    pub fn cmp_d(&self, v: f64) -> core::cmp::Ordering {
        self.cmp(&Self::from_f64(v.trunc()))
    }

    // ---- bit access ----

    /// The `i`-th bit of the two's-complement infinite-precision
    /// representation (so a negative value reads as if sign-extended
    /// forever with 1-bits).
    pub fn tstbit(&self, i: usize) -> bool {
        if !self.neg {
            let limb_idx = i / L::BITS as usize;
            if limb_idx >= self.limbs.len() {
                return false;
            }
            let bit = (i % L::BITS as usize) as u32;
            (self.limbs[limb_idx] >> bit) & L::ONE == L::ONE
        } else {
            // two's complement of a negative number: invert the bits of
            // (magnitude - 1).
            let mag_minus_one = self.abs_value().sub_magnitude_one();
            let limb_idx = i / L::BITS as usize;
            let bit = (i % L::BITS as usize) as u32;
            let raw = if limb_idx >= mag_minus_one.limbs.len() {
                false
            } else {
                (mag_minus_one.limbs[limb_idx] >> bit) & L::ONE == L::ONE
            };
            !raw
        }
    }

    fn abs_value(&self) -> Self {
        Int { limbs: self.limbs.clone(), neg: false }
    }

    fn sub_magnitude_one(&self) -> Self {
        debug_assert!(!self.is_zero());
        let mut out = vec![L::ZERO; self.limbs.len()];
        limb::sub_1(&mut out, &self.limbs, self.limbs.len(), L::ONE);
        Self::normalise(out, false)
    }

    /// Set bit `i` (adds `2^i` if not already set), preserving sign
    /// semantics by operating on the signed value directly.
    pub fn setbit(&mut self, i: usize) {
        if self.tstbit(i) {
            return;
        }
        let bit_val = Self::one() << i;
        let result = if self.neg {
            self.clone() - bit_val
        } else {
            self.clone() + bit_val
        };
        *self = result;
    }

    /// Clear bit `i` (subtracts `2^i` if currently set).
    pub fn unsetbit(&mut self, i: usize) {
        if !self.tstbit(i) {
            return;
        }
        let bit_val = Self::one() << i;
        let result = if self.neg {
            self.clone() + bit_val
        } else {
            self.clone() - bit_val
        };
        *self = result;
    }

    // ---- shifts ----

    /// Arithmetic left shift: sign preserved, storage grows.
    pub fn shl(&self, bits: usize) -> Self {
        if self.is_zero() || bits == 0 {
            return self.clone();
        }
        let limb_shift = bits / L::BITS as usize;
        let bit_shift = (bits % L::BITS as usize) as u32;
        let mut limbs = vec![L::ZERO; limb_shift];
        limbs.extend(self.limbs.iter().copied());
        if bit_shift > 0 {
            let n = limbs.len();
            let mut shifted = vec![L::ZERO; n + 1];
            let carry = limb::lshift(&mut shifted[limb_shift..n], &limbs[limb_shift..], n - limb_shift, bit_shift);
            shifted[n] = carry;
            limbs = shifted;
        }
        Self::normalise(limbs, self.neg)
    }

    /// Arithmetic right shift: sign preserved; may round down to zero.
    pub fn shr(&self, bits: usize) -> Self {
        if self.is_zero() || bits == 0 {
            return self.clone();
        }
        let limb_shift = bits / L::BITS as usize;
        let bit_shift = (bits % L::BITS as usize) as u32;
        if limb_shift >= self.limbs.len() {
            return Self::zero();
        }
        let mut limbs: Vec<L> = self.limbs[limb_shift..].to_vec();
        if bit_shift > 0 {
            let n = limbs.len();
            let mut out = vec![L::ZERO; n];
            limb::rshift(&mut out, &limbs, n, bit_shift);
            limbs = out;
        }
        Self::normalise(limbs, self.neg)
    }

    // ---- byte/error-returning string front door lives in strconv.rs ----

    pub(crate) fn require_nonzero_modulus(m: &Self) -> Result<()> {
        if m.is_zero() {
            Err(Error::DivideByZero)
        } else {
            Ok(())
        }
    }
}

impl<L: Limb> Default for Int<L> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<L: Limb> zeroize::Zeroize for Int<L> {
    fn zeroize(&mut self) {
        for limb in self.limbs.iter_mut() {
            *limb = L::ZERO;
        }
        self.limbs.clear();
        self.neg = false;
    }
}

impl<L: Limb> PartialEq for Int<L> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == core::cmp::Ordering::Equal
    }
}
impl<L: Limb> Eq for Int<L> {}

impl<L: Limb> PartialOrd for Int<L> {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<L: Limb> Ord for Int<L> {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        use core::cmp::Ordering;
        match (self.neg, other.neg) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => self.cmp_abs(other),
            (true, true) => other.cmp_abs(self),
        }
    }
}

impl<L: Limb> core::ops::Shl<usize> for Int<L> {
    type Output = Self;
    fn shl(self, bits: usize) -> Self {
        Int::shl(&self, bits)
    }
}

impl<L: Limb> core::ops::Shr<usize> for Int<L> {
    type Output = Self;
    fn shr(self, bits: usize) -> Self {
        Int::shr(&self, bits)
    }
}
