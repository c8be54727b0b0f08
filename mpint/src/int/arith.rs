//! Additive and multiplicative arithmetic, including the three rounding
//! modes for division.

use super::{Int, RoundingMode};
use crate::error::{Error, Result};
use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;
use limb::Limb;

fn pad<L: Limb>(a: &[L], n: usize) -> Vec<L> {
    let mut v = a.to_vec();
    v.resize(n, L::ZERO);
    v
}

fn mag_add<L: Limb>(a: &[L], b: &[L]) -> Vec<L> {
    let n = a.len().max(b.len());
    let pa = pad(a, n);
    let pb = pad(b, n);
    let mut r = vec![L::ZERO; n];
    let carry = limb::add_n(&mut r, &pa, &pb, n);
    if carry {
        r.push(L::ONE);
    }
    r
}

/// `a - b` assuming `|a| >= |b|` (caller compares magnitudes first).
fn mag_sub<L: Limb>(a: &[L], b: &[L]) -> Vec<L> {
    let n = a.len();
    let pb = pad(b, n);
    let mut r = vec![L::ZERO; n];
    limb::sub_n(&mut r, a, &pb, n);
    r
}

impl<L: Limb> Int<L> {
    pub fn add(&self, other: &Self) -> Self {
        if self.neg == other.neg {
            Self::normalise(mag_add(&self.limbs, &other.limbs), self.neg)
        } else {
            match self.cmp_abs(other) {
                Ordering::Less => Self::normalise(mag_sub(&other.limbs, &self.limbs), other.neg),
                _ => Self::normalise(mag_sub(&self.limbs, &other.limbs), self.neg),
            }
        }
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    pub fn neg(&self) -> Self {
        if self.is_zero() {
            self.clone()
        } else {
            Int { limbs: self.limbs.clone(), neg: !self.neg }
        }
    }

    pub fn abs(&self) -> Self {
        Int { limbs: self.limbs.clone(), neg: false }
    }

    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        let an = self.limbs.len();
        let bn = other.limbs.len();
        let mut full = vec![L::ZERO; an + bn];
        for i in 0..an {
            if self.limbs[i].is_zero() {
                continue;
            }
            let mut carry = L::double_zero();
            for j in 0..bn {
                let prod = self.limbs[i].to_double() * other.limbs[j].to_double()
                    + full[i + j].to_double()
                    + carry;
                full[i + j] = L::double_lo(prod);
                carry = prod >> L::BITS;
            }
            let mut k = i + bn;
            while carry != L::double_zero() {
                let sum = full[k].to_double() + carry;
                full[k] = L::double_lo(sum);
                carry = sum >> L::BITS;
                k += 1;
            }
        }
        Self::normalise(full, self.neg != other.neg)
    }

    pub fn square(&self) -> Self {
        self.mul(self)
    }

    pub fn mul_2exp(&self, k: usize) -> Self {
        self.shl(k)
    }

    /// Magnitude-only truncating division, used as the basis for all
    /// three rounding modes.
    fn div_qr_trunc_magnitude(&self, other: &Self) -> (Vec<L>, Vec<L>) {
        let an = self.limbs.len();
        let dn = other.limbs.len();
        let mut q = vec![L::ZERO; an.max(1)];
        let mut r = vec![L::ZERO; dn];
        limb::tdiv_qr(Some(&mut q), &mut r, &self.limbs, an, &other.limbs, dn);
        (q, r)
    }

    /// `(q, r)` such that `q * other + r == self` with `r` sign matching
    /// `self` (truncating division), for the given rounding mode.
    pub fn div_qr(&self, other: &Self, mode: RoundingMode) -> Result<(Self, Self)> {
        if other.is_zero() {
            return Err(Error::DivideByZero);
        }
        if self.is_zero() {
            return Ok((Self::zero(), Self::zero()));
        }
        if self.cmp_abs(other) == Ordering::Less {
            // trunc quotient is 0; trunc remainder is self.
            let qt = Self::zero();
            let rt = self.clone();
            return Ok(Self::apply_rounding(qt, rt, self, other, mode));
        }

        let (qmag, rmag) = self.div_qr_trunc_magnitude(other);
        let qt = Self::normalise(qmag, self.neg != other.neg);
        let rt = Self::normalise(rmag, self.neg);
        Ok(Self::apply_rounding(qt, rt, self, other, mode))
    }

    fn apply_rounding(qt: Self, rt: Self, a: &Self, b: &Self, mode: RoundingMode) -> (Self, Self) {
        match mode {
            RoundingMode::Trunc => (qt, rt),
            RoundingMode::Floor => {
                if rt.is_zero() || a.neg == b.neg {
                    (qt, rt)
                } else {
                    (qt.sub(&Self::one()), rt.add(b))
                }
            }
            RoundingMode::Ceil => {
                if rt.is_zero() || a.neg != b.neg {
                    (qt, rt)
                } else {
                    (qt.add(&Self::one()), rt.sub(b))
                }
            }
        }
    }

    pub fn div_q(&self, other: &Self, mode: RoundingMode) -> Result<Self> {
        Ok(self.div_qr(other, mode)?.0)
    }

    pub fn div_r(&self, other: &Self, mode: RoundingMode) -> Result<Self> {
        Ok(self.div_qr(other, mode)?.1)
    }

    pub fn div_qr_ui(&self, v: u64, mode: RoundingMode) -> Result<(Self, Self)> {
        self.div_qr(&Self::from_u64(v), mode)
    }

    /// Division by `2^k`, using a shift instead of the general division
    /// path (the divisor being a power of two makes the quotient and
    /// remainder directly readable off the bit pattern).
    pub fn div_qr_2exp(&self, k: usize, mode: RoundingMode) -> (Self, Self) {
        if self.is_zero() {
            return (Self::zero(), Self::zero());
        }
        let mag = self.abs();
        let qt_mag = mag.shr(k);
        let rt_mag = mag.sub(&qt_mag.shl(k));
        let qt = Self::normalise(qt_mag.limbs, self.neg);
        let rt = Self::normalise(rt_mag.limbs, self.neg);
        let divisor = Self::one() << k;
        Self::apply_rounding(qt, rt, self, &divisor, mode)
    }
}

impl<L: Limb> core::ops::Add for Int<L> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Int::add(&self, &rhs)
    }
}
impl<L: Limb> core::ops::Add<&Int<L>> for &Int<L> {
    type Output = Int<L>;
    fn add(self, rhs: &Int<L>) -> Int<L> {
        Int::add(self, rhs)
    }
}
impl<L: Limb> core::ops::Sub for Int<L> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Int::sub(&self, &rhs)
    }
}
impl<L: Limb> core::ops::Sub<&Int<L>> for &Int<L> {
    type Output = Int<L>;
    fn sub(self, rhs: &Int<L>) -> Int<L> {
        Int::sub(self, rhs)
    }
}
impl<L: Limb> core::ops::Mul for Int<L> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Int::mul(&self, &rhs)
    }
}
impl<L: Limb> core::ops::Mul<&Int<L>> for &Int<L> {
    type Output = Int<L>;
    fn mul(self, rhs: &Int<L>) -> Int<L> {
        Int::mul(self, rhs)
    }
}
impl<L: Limb> core::ops::Neg for Int<L> {
    type Output = Self;
    fn neg(self) -> Self {
        Int::neg(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_sub_roundtrip() {
        let a = Int::<u32>::from_i64(1234);
        let b = Int::<u32>::from_i64(-5678);
        let sum = a.add(&b);
        assert_eq!(sum.cmp_si(-4444), Ordering::Equal);
        let back = sum.sub(&b);
        assert_eq!(back, a);
    }

    #[test]
    fn mul_basic() {
        let a = Int::<u16>::from_i64(12345);
        let b = Int::<u16>::from_i64(-6789);
        let p = a.mul(&b);
        assert_eq!(p.cmp_si(12345 * -6789), Ordering::Equal);
    }

    #[test]
    fn div_floor_ceil_trunc() {
        let a = Int::<u32>::from_i64(-7);
        let b = Int::<u32>::from_i64(2);
        let (qf, rf) = a.div_qr(&b, RoundingMode::Floor).unwrap();
        assert_eq!(qf.cmp_si(-4), Ordering::Equal);
        assert_eq!(rf.cmp_si(1), Ordering::Equal);

        let (qt, rt) = a.div_qr(&b, RoundingMode::Trunc).unwrap();
        assert_eq!(qt.cmp_si(-3), Ordering::Equal);
        assert_eq!(rt.cmp_si(-1), Ordering::Equal);

        let (qc, rc) = a.div_qr(&b, RoundingMode::Ceil).unwrap();
        assert_eq!(qc.cmp_si(-3), Ordering::Equal);
        assert_eq!(rc.cmp_si(-1), Ordering::Equal);
    }

    proptest::proptest! {
        #[test]
        fn add_is_commutative(a: i64, b: i64) {
            let a = Int::<u32>::from_i64(a);
            let b = Int::<u32>::from_i64(b);
            proptest::prop_assert_eq!(a.add(&b), b.add(&a));
        }

        #[test]
        fn mul_is_commutative(a: i32, b: i32) {
            let a = Int::<u32>::from_i64(a as i64);
            let b = Int::<u32>::from_i64(b as i64);
            proptest::prop_assert_eq!(a.mul(&b), b.mul(&a));
        }

        #[test]
        fn floor_div_remainder_matches_divisor_sign_and_reconstructs(a: i64, b in proptest::num::i64::ANY.prop_filter("nonzero", |b| *b != 0)) {
            let ai = Int::<u32>::from_i64(a);
            let bi = Int::<u32>::from_i64(b);
            let (q, r) = ai.div_qr(&bi, RoundingMode::Floor).unwrap();
            proptest::prop_assert_eq!(q.mul(&bi).add(&r), ai);
            if !r.is_zero() {
                proptest::prop_assert_eq!(r.is_negative(), bi.is_negative());
            }
        }
    }
}
