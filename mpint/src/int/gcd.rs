//! Binary GCD, the classical extended-Euclidean `gcdext`, and modular
//! inverse built on top of it.
//!
//! `gcdext` deliberately does not port the original binary-GCD
//! cofactor-tracking recursion: the classical iterative
//! extended-Euclidean recurrence is easier to check directly against
//! the postcondition `s*a + t*b = g` and is mathematically equivalent.
//! Plain `gcd` (no cofactors) keeps the binary-GCD algorithm, which is
//! unambiguous and standard.

use super::{Int, RoundingMode};
use crate::error::{Error, Result};
use core::cmp::Ordering;
use limb::Limb;

impl<L: Limb> Int<L> {
    /// Number of trailing zero bits in the magnitude (0 for zero).
    pub fn trailing_zero_bits(&self) -> usize {
        if self.is_zero() {
            return 0;
        }
        let mut count = 0usize;
        for &limb in &self.limbs {
            if limb.is_zero() {
                count += L::BITS as usize;
            } else {
                count += limb.trailing_zeros() as usize;
                break;
            }
        }
        count
    }

    /// `gcd(self, other)`, always nonnegative. Binary-GCD (Stein's
    /// algorithm): strip common powers of two, then repeatedly make the
    /// larger odd operand even by subtracting the smaller and re-stripping.
    pub fn gcd(&self, other: &Self) -> Self {
        if self.is_zero() {
            return other.abs();
        }
        if other.is_zero() {
            return self.abs();
        }
        let mut u = self.abs();
        let mut v = other.abs();
        let shift = u.trailing_zero_bits().min(v.trailing_zero_bits());
        u = u.shr(u.trailing_zero_bits());
        loop {
            v = v.shr(v.trailing_zero_bits());
            if u.cmp_abs(&v) == Ordering::Greater {
                core::mem::swap(&mut u, &mut v);
            }
            v = v.sub(&u);
            if v.is_zero() {
                break;
            }
        }
        u.shl(shift)
    }

    /// Extended GCD: returns `(g, s, t)` with `g = s*self + t*other`,
    /// `g >= 0`. `gcdext(0, v) = (|v|, 0, sgn(v))`.
    pub fn gcdext(&self, other: &Self) -> (Self, Self, Self) {
        if self.is_zero() {
            let g = other.abs();
            let t = if other.is_zero() {
                Self::zero()
            } else if other.neg {
                Self::from_i64(-1)
            } else {
                Self::one()
            };
            return (g, Self::zero(), t);
        }
        if other.is_zero() {
            let g = self.abs();
            let s = if self.neg { Self::from_i64(-1) } else { Self::one() };
            return (g, s, Self::zero());
        }

        let (mut old_r, mut r) = (self.abs(), other.abs());
        let (mut old_s, mut s) = (Self::one(), Self::zero());
        let (mut old_t, mut t) = (Self::zero(), Self::one());

        while !r.is_zero() {
            let q = old_r.div_q(&r, RoundingMode::Trunc).expect("r checked nonzero");
            let new_r = old_r.sub(&q.mul(&r));
            old_r = core::mem::replace(&mut r, new_r);
            let new_s = old_s.sub(&q.mul(&s));
            old_s = core::mem::replace(&mut s, new_s);
            let new_t = old_t.sub(&q.mul(&t));
            old_t = core::mem::replace(&mut t, new_t);
        }

        let sign_a = if self.neg { Self::from_i64(-1) } else { Self::one() };
        let sign_b = if other.neg { Self::from_i64(-1) } else { Self::one() };
        (old_r, old_s.mul(&sign_a), old_t.mul(&sign_b))
    }

    /// Modular inverse of `self` mod `m`, computed from [`gcdext`].
    /// Fails with `NotInvertible` unless `gcd(self, m) = 1`.
    pub fn invert(&self, m: &Self) -> Result<Self> {
        if m.is_zero() {
            return Err(Error::DivideByZero);
        }
        let (g, s, _t) = self.gcdext(m);
        if g != Self::one() {
            return Err(Error::NotInvertible);
        }
        let mut result = s;
        if result.is_negative() {
            if m.is_negative() {
                result = result.sub(m);
            } else {
                result = result.add(m);
            }
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gcd_basic() {
        let a = Int::<u32>::from_i64(48);
        let b = Int::<u32>::from_i64(18);
        assert_eq!(a.gcd(&b).cmp_si(6), Ordering::Equal);
    }

    #[test]
    fn gcdext_bezout_identity() {
        let a = Int::<u32>::from_i64(240);
        let b = Int::<u32>::from_i64(46);
        let (g, s, t) = a.gcdext(&b);
        assert_eq!(g.cmp_si(2), Ordering::Equal);
        let check = s.mul(&a).add(&t.mul(&b));
        assert_eq!(check, g);
    }

    #[test]
    fn invert_single_limb() {
        // m = 7, a = 55 (= 6 mod 7); invert(a, m) = 6.
        let a = Int::<u32>::from_i64(55);
        let m = Int::<u32>::from_i64(7);
        let inv = a.invert(&m).unwrap();
        assert_eq!(inv.cmp_si(6), Ordering::Equal);
        let (_, r) = a.mul(&inv).div_qr(&m, RoundingMode::Floor).unwrap();
        assert_eq!(r.cmp_si(1), Ordering::Equal);
    }
}
