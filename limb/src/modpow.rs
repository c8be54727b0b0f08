//! Montgomery-adjacent auxiliaries: binary inversion mod a limb radix,
//! truncated low-half multiply/power, exact division, and a
//! self-contained multi-precision modular exponentiation usable without
//! building a full `ModCfg`.

use crate::arith::normalised_size;
use crate::div::tdiv_qr;
use crate::Limb;
use alloc::vec;
use alloc::vec::Vec;

/// Multiplicative inverse of odd `a` modulo the limb radix `B = 2^BITS`,
/// via Newton-Hensel iteration (`x <- x * (2 - a*x)`), doubling the
/// number of correct bits each round starting from the 3-bit-correct
/// seed `x0 = a`.
pub fn binvert<L: Limb>(a: L) -> L {
    debug_assert!(a.is_odd());
    let mut x = a;
    // 3 correct bits initially; doubles each round, so ceil(log2(BITS/3))+1
    // rounds suffice for any width this crate supports (up to 64 bits).
    for _ in 0..7 {
        let two_minus_ax = L::ZERO.wrapping_sub(a.wrapping_mul(x)).wrapping_add(L::from_u64(2));
        x = x.wrapping_mul(two_minus_ax);
    }
    x
}

/// Scratch-buffer limb count sufficient for [`powm`] / the Montgomery
/// reduction inner loop operating on an `n`-limb modulus.
pub fn binvert_powm_scratch_size(n: usize) -> usize {
    2 * n + 2
}

/// `r <- (a * b) mod B^n`: an `n`-by-`n` schoolbook multiply truncated
/// to its low `n` limbs (the high `n` limbs of the full `2n`-limb
/// product are discarded as they would be in a fixed-width Montgomery
/// multiply).
pub fn mul_low_n<L: Limb>(r: &mut [L], a: &[L], b: &[L], n: usize) {
    for limb in r.iter_mut().take(n) {
        *limb = L::ZERO;
    }
    for i in 0..n {
        if a[i].is_zero() {
            continue;
        }
        let mut carry = L::double_zero();
        for j in 0..(n - i) {
            let prod = a[i].to_double() * b[j].to_double() + r[i + j].to_double() + carry;
            r[i + j] = L::double_lo(prod);
            carry = prod >> L::BITS;
        }
    }
}

/// `r <- a^e mod B^n`, computed by square-and-multiply using
/// [`mul_low_n`] at every step (low-`n`-limb truncated arithmetic).
/// `ebits` is the number of bits of `e` to scan, MSB first.
pub fn pow_low<L: Limb>(r: &mut [L], a: &[L], n: usize, e: &[L], ebits: u32) {
    let mut acc = vec![L::ZERO; n];
    acc[0] = L::ONE;
    let mut base: Vec<L> = a[..n.min(a.len())].to_vec();
    base.resize(n, L::ZERO);

    for i in (0..ebits).rev() {
        let limb_idx = (i / L::BITS) as usize;
        let bit_idx = i % L::BITS;
        let bit_set = limb_idx < e.len() && (e[limb_idx] >> bit_idx) & L::ONE == L::ONE;

        let mut tmp = vec![L::ZERO; n];
        mul_low_n(&mut tmp, &acc, &acc, n);
        acc.copy_from_slice(&tmp);

        if bit_set {
            mul_low_n(&mut tmp, &acc, &base, n);
            acc.copy_from_slice(&tmp);
        }
    }
    r[..n].copy_from_slice(&acc);
}

/// Exact division `a / d mod B` for odd single-limb `d`, valid when `d`
/// divides `a` exactly (the caller's responsibility to ensure). Used by
/// the binary-GCD family of algorithms to strip a known factor without a
/// full division.
pub fn modexact_1_odd<L: Limb>(a: L, d: L) -> L {
    a.wrapping_mul(binvert(d))
}

/// Multi-precision modular exponentiation `base^exp mod modulus`,
/// implemented directly from [`tdiv_qr`] rather than requiring a
/// prebuilt `ModCfg` — intended for one-off computations (e.g.
/// precomputing a `ModCfg`'s own Barrett/Montgomery constants).
///
/// `out` must have length >= `mn`. Returns the normalised length of the
/// result actually written.
pub fn powm<L: Limb>(
    out: &mut [L],
    base: &[L],
    bn: usize,
    exp: &[L],
    ebits: u32,
    modulus: &[L],
    mn: usize,
) -> usize {
    debug_assert!(mn > 0 && !modulus[mn - 1].is_zero());

    let mut acc: Vec<L> = vec![L::ZERO; mn];
    acc[0] = L::ONE;
    let mut base_r: Vec<L> = vec![L::ZERO; mn];
    reduce_into(&mut base_r, base, bn, modulus, mn);

    for i in (0..ebits).rev() {
        acc = mulmod(&acc, &acc, modulus, mn);

        let limb_idx = (i / L::BITS) as usize;
        let bit_idx = i % L::BITS;
        let bit_set = limb_idx < exp.len() && (exp[limb_idx] >> bit_idx) & L::ONE == L::ONE;
        if bit_set {
            acc = mulmod(&acc, &base_r, modulus, mn);
        }
    }

    out[..mn].copy_from_slice(&acc);
    normalised_size(&acc, mn)
}

fn reduce_into<L: Limb>(out: &mut [L], a: &[L], an: usize, m: &[L], mn: usize) {
    if an < mn {
        out[..an].copy_from_slice(&a[..an]);
        for limb in out.iter_mut().take(mn).skip(an) {
            *limb = L::ZERO;
        }
        return;
    }
    let mut r = vec![L::ZERO; mn];
    tdiv_qr::<L>(None, &mut r, a, an, m, mn);
    out[..mn].copy_from_slice(&r);
}

fn mulmod<L: Limb>(a: &[L], b: &[L], m: &[L], mn: usize) -> Vec<L> {
    let mut full = vec![L::ZERO; 2 * mn];
    for i in 0..mn {
        if a[i].is_zero() {
            continue;
        }
        let mut carry = L::double_zero();
        for j in 0..mn {
            let prod = a[i].to_double() * b[j].to_double() + full[i + j].to_double() + carry;
            full[i + j] = L::double_lo(prod);
            carry = prod >> L::BITS;
        }
        let mut k = i + mn;
        while carry != L::double_zero() {
            let sum = full[k].to_double() + carry;
            full[k] = L::double_lo(sum);
            carry = sum >> L::BITS;
            k += 1;
        }
    }
    let an = normalised_size(&full, 2 * mn);
    let mut r = vec![L::ZERO; mn];
    tdiv_qr::<L>(None, &mut r, &full, an.max(1), m, mn);
    r
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binvert_roundtrip() {
        let a: u64 = 0x1234_5678_9abc_def1;
        let inv = binvert(a);
        assert_eq!(a.wrapping_mul(inv), 1u64);
    }

    #[test]
    fn powm_small() {
        // 4^13 mod 497 = 445 (textbook RSA example).
        let base = [4u16];
        let exp = [13u16];
        let modulus = [497u16];
        let mut out = [0u16; 1];
        powm(&mut out, &base, 1, &exp, 16, &modulus, 1);
        assert_eq!(out[0], 445);
    }
}
