//! Division primitives: multi-limb divisor and single-limb-divisor
//! specialisations.

use crate::Limb;

#[inline]
fn get_bit<L: Limb>(a: &[L], an: usize, bit: u32) -> bool {
    let limb_idx = (bit / L::BITS) as usize;
    if limb_idx >= an {
        return false;
    }
    let shift = bit % L::BITS;
    (a[limb_idx] >> shift) & L::ONE == L::ONE
}

#[inline]
fn set_bit<L: Limb>(q: &mut [L], bit: u32) {
    let limb_idx = (bit / L::BITS) as usize;
    let shift = bit % L::BITS;
    q[limb_idx] = q[limb_idx] | (L::ONE << shift);
}

/// Lexicographic `r >= d` over `n` limbs, most significant first.
fn ge<L: Limb>(r: &[L], d: &[L], n: usize) -> bool {
    for i in (0..n).rev() {
        if r[i] != d[i] {
            return r[i] > d[i];
        }
    }
    true
}

/// `q, r <- a divmod d` by bit-serial restoring division: shift the next
/// dividend bit into a running `dn`-limb remainder and subtract the
/// divisor whenever it fits. Quadratic in the bit length, but simple
/// enough to verify directly against the definition of division with
/// remainder.
///
/// `r` must have length >= `dn` and is the remainder on return. `q`, if
/// supplied, must have length >= `an` and holds the quotient on return
/// (only its low `an - dn + 1` limbs can be nonzero). `d[..dn]` must be
/// normalised (`d[dn - 1] != 0`).
pub fn tdiv_qr<L: Limb>(mut q: Option<&mut [L]>, r: &mut [L], a: &[L], an: usize, d: &[L], dn: usize) {
    debug_assert!(dn > 0 && !d[dn - 1].is_zero());

    for limb in r.iter_mut().take(dn) {
        *limb = L::ZERO;
    }
    if let Some(qq) = q.as_deref_mut() {
        for limb in qq.iter_mut().take(an) {
            *limb = L::ZERO;
        }
    }

    let total_bits = an as u32 * L::BITS;
    for i in (0..total_bits).rev() {
        let inject = get_bit(a, an, i);
        let mut inbit = if inject { L::ONE } else { L::ZERO };
        for j in 0..dn {
            let cur = r[j];
            let outbit = (cur >> (L::BITS - 1)) & L::ONE == L::ONE;
            r[j] = (cur << 1) | inbit;
            inbit = if outbit { L::ONE } else { L::ZERO };
        }
        let top_overflow = inbit == L::ONE;

        if top_overflow || ge(r, d, dn) {
            let mut borrow = false;
            for j in 0..dn {
                let (d1, b1) = r[j].overflowing_sub(d[j]);
                let (d2, b2) = d1.overflowing_sub(if borrow { L::ONE } else { L::ZERO });
                r[j] = d2;
                borrow = b1 || b2;
            }
            if let Some(qq) = q.as_deref_mut() {
                set_bit(qq, i);
            }
        }
    }
}

/// Single-limb-divisor division: `q <- a / d`, returns `a % d`. MSB to
/// LSB, a widening division per limb.
pub fn div_qr_1<L: Limb>(q: &mut [L], a: &[L], n: usize, d: L) -> L {
    debug_assert!(!d.is_zero());
    let mut rem = L::double_zero();
    for i in (0..n).rev() {
        let cur = (rem << L::BITS) | a[i].to_double();
        let dd = d.to_double();
        let qi = cur / dd;
        rem = cur % dd;
        q[i] = L::from_double(qi);
    }
    L::from_double(rem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divides_exactly() {
        // 1000 / 7 = 142 remainder 6, as u8 limbs little-endian.
        let a = [232u8, 3]; // 1000
        let d = [7u8];
        let mut r = [0u8; 1];
        let mut q = [0u8; 2];
        tdiv_qr(Some(&mut q), &mut r, &a, 2, &d, 1);
        assert_eq!(q, [142, 0]);
        assert_eq!(r, [6]);
    }

    #[test]
    fn div_qr_1_basic() {
        let a = [232u8, 3];
        let mut q = [0u8; 2];
        let rem = div_qr_1(&mut q, &a, 2, 7);
        assert_eq!(q, [142, 0]);
        assert_eq!(rem, 6);
    }
}
