//! Field arithmetic: the operations `FieldElem` exposes to curve code.

use crate::FieldElem;
use limb::Limb;

impl<W: Limb> FieldElem<W> {
    /// `self + other`, both operands under the same modulus.
    pub fn add(&self, other: &Self) -> Self {
        debug_assert_eq!(self.params.q, other.params.q);
        let sum = self.value.to_double() + other.value.to_double();
        let q = self.params.q.to_double();
        let value = W::from_double(if sum >= q { sum - q } else { sum });
        FieldElem { value, params: self.params.clone() }
    }

    /// `self - other`.
    pub fn sub(&self, other: &Self) -> Self {
        debug_assert_eq!(self.params.q, other.params.q);
        let q = self.params.q.to_double();
        let a = self.value.to_double();
        let b = other.value.to_double();
        let value = W::from_double(if a >= b { a - b } else { a + q - b });
        FieldElem { value, params: self.params.clone() }
    }

    /// Additive inverse: `q - self`, or `0` if `self` is zero.
    pub fn negate(&self) -> Self {
        let value = if self.value.is_zero() {
            W::ZERO
        } else {
            self.params.q.wrapping_sub(self.value)
        };
        FieldElem { value, params: self.params.clone() }
    }

    /// `self * other`.
    pub fn mul(&self, other: &Self) -> Self {
        debug_assert_eq!(self.params.q, other.params.q);
        let value = self.reduce(self.value.to_double() * other.value.to_double());
        FieldElem { value, params: self.params.clone() }
    }

    /// `self * self`.
    pub fn sqr(&self) -> Self {
        self.mul(self)
    }

    /// Halve `self` modulo `q`: if the stored value is odd, fold in `q`
    /// first so the shift lands on an even, exactly-halved total.
    pub fn rshift1(&self) -> Self {
        let v = self.value;
        let q = self.params.q;
        let adjusted = if v.is_odd() {
            let (sum, carry) = v.overflowing_add(q);
            let mut d = sum.to_double();
            if carry {
                d = d + (W::ONE.to_double() << W::BITS);
            }
            W::from_double(d >> 1)
        } else {
            v >> 1
        };
        FieldElem { value: adjusted, params: self.params.clone() }
    }

    /// Double `self` modulo `q`.
    pub fn lshift1(&self) -> Self {
        self.add(self)
    }

    /// `self^e` for a plain exponent `e`, via square-and-multiply.
    pub fn pow(&self, e: &[u8]) -> Self {
        let mut acc = Self::one_like(self);
        for &byte in e {
            for bit in (0..8).rev() {
                acc = acc.sqr();
                if (byte >> bit) & 1 == 1 {
                    acc = acc.mul(self);
                }
            }
        }
        acc
    }

    /// `self / other`, i.e. `self * other.inverse()`.
    pub fn div(&self, other: &Self) -> Option<Self> {
        other.inverse().map(|inv| self.mul(&inv))
    }

    /// Multiplicative inverse via Fermat's little theorem (`self^(q-2)`),
    /// since `q` is assumed prime. Returns `None` for a zero input.
    pub fn inverse(&self) -> Option<Self> {
        if self.value.is_zero() {
            return None;
        }
        let q_minus_2 = self.params.q.wrapping_sub(W::from_u64(2));
        Some(self.pow_limb_exponent(q_minus_2))
    }

    /// The inverse of `2^k` in the field, i.e. `2^(-k) mod q`.
    /// `self`'s value is irrelevant; only its modulus supplies the field.
    pub fn inverse_2k(&self, k: u32) -> Option<Self> {
        let two = Self::convert_to(self.params.clone(), W::from_u64(2));
        let pow2k = two.pow(&k.to_be_bytes());
        pow2k.inverse()
    }

    fn one_like(template: &Self) -> Self {
        Self::convert_to(template.params.clone(), W::ONE)
    }

    fn pow_limb_exponent(&self, e: W) -> Self {
        let mut acc = Self::one_like(self);
        let bits = W::BITS;
        for i in (0..bits).rev() {
            acc = acc.sqr();
            if (e >> i) & W::ONE == W::ONE {
                acc = acc.mul(self);
            }
        }
        acc
    }
}
