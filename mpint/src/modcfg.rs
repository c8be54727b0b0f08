//! Modular-reduction configuration: `ModCfg` bundles a modulus with a
//! chosen reduction strategy (naive division, Barrett, or Montgomery)
//! and precomputes whatever constants that strategy needs once, at
//! construction time, rather than on every reduction.

use crate::error::{Error, Result};
use crate::int::{Int, RoundingMode};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use limb::Limb;

/// Which reduction algorithm a [`ModCfg`] applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReductionKind {
    /// Plain division remainder. Always correct, never fast.
    Naive,
    /// Barrett reduction: one precomputed reciprocal `mu`, two
    /// multiplications and a bounded correction per reduce.
    Barrett,
    /// Montgomery REDC. Operands must live in Montgomery form
    /// (`to_montgomery`/`from_montgomery` cross the boundary); requires
    /// an odd modulus.
    Montgomery,
    /// A caller-supplied reduction, for moduli with special structure
    /// (e.g. a Mersenne-like prime) that neither built-in strategy
    /// exploits.
    Custom,
}

/// Hook for a caller-supplied reduction strategy, set via
/// [`ModCfg::with_custom`].
pub trait CustomReducer<L: Limb>: Send + Sync {
    /// Reduce `x` modulo `cfg.m`. `x` may be negative or wider than the
    /// modulus; the implementation is responsible for both.
    fn reduce(&self, x: &Int<L>, cfg: &ModCfg<L>) -> Int<L>;
}

impl<L: Limb> fmt::Debug for dyn CustomReducer<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<custom reducer>")
    }
}

/// A modulus plus a reduction strategy and its precomputed constants.
///
/// Shared by every modular operation on `Int`: `add_mod`, `sub_mod`,
/// `mul_mod`, `square_mod`, `pow_mod`, `sqrt_mod`, and `reduce` all take
/// a `&ModCfg` and dispatch on `kind`.
#[derive(Clone)]
pub struct ModCfg<L: Limb> {
    /// The modulus. Always positive and nonzero.
    pub m: Int<L>,
    /// `m`'s bit length.
    pub mbits: usize,
    /// Number of `L`-limbs needed to hold `m`.
    pub k: usize,
    /// Limb width in bits (`L::BITS`, carried alongside `k` since the
    /// Barrett/Montgomery formulas are stated in terms of both).
    pub blog2: u32,
    /// The selected strategy.
    pub kind: ReductionKind,
    /// Barrett's precomputed reciprocal `floor(B^(2k) / m)`.
    pub mu: Int<L>,
    /// Montgomery's `R^2 mod m`, used to map a value into Montgomery form.
    pub r2: Int<L>,
    /// Montgomery's `-m^(-1) mod B` (a single limb).
    pub ninv: L,
    custom: Option<Arc<dyn CustomReducer<L>>>,
}

impl<L: Limb> fmt::Debug for ModCfg<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModCfg")
            .field("mbits", &self.mbits)
            .field("k", &self.k)
            .field("kind", &self.kind)
            .finish()
    }
}

impl<L: Limb> ModCfg<L> {
    /// Build a configuration for `m` under the given strategy,
    /// precomputing whatever constants it needs.
    ///
    /// `Custom` is accepted here with no reducer attached; call
    /// [`with_custom`](Self::with_custom) before using it, or `reduce`
    /// panics.
    pub fn new(m: Int<L>, kind: ReductionKind) -> Result<Self> {
        if m.is_zero() {
            return Err(Error::DivideByZero);
        }
        debug_assert!(!m.is_negative(), "ModCfg does not support negative moduli");

        let mbits = m.bit_length();
        let blog2 = L::BITS;
        let k = (mbits + blog2 as usize - 1) / blog2 as usize;
        let k = k.max(1);

        let mut cfg = ModCfg {
            m,
            mbits,
            k,
            blog2,
            kind,
            mu: Int::zero(),
            r2: Int::zero(),
            ninv: L::ZERO,
            custom: None,
        };

        match kind {
            ReductionKind::Naive => {}
            ReductionKind::Barrett => {
                let shift = 2 * k * blog2 as usize;
                cfg.mu = Int::one().shl(shift).div_q(&cfg.m, RoundingMode::Floor).expect("m checked nonzero");
                tracing::debug!(mbits, k, "built Barrett ModCfg");
            }
            ReductionKind::Montgomery => {
                if cfg.m.is_even() {
                    return Err(Error::NotInvertible);
                }
                let shift = 2 * k * blog2 as usize;
                cfg.r2 = Int::one().shl(shift).div_r(&cfg.m, RoundingMode::Floor).expect("m checked nonzero");
                let m0 = cfg.m.limbs.first().copied().unwrap_or(L::ZERO);
                let minv = limb::binvert(m0);
                cfg.ninv = L::ZERO.wrapping_sub(minv);
                tracing::debug!(mbits, k, "built Montgomery ModCfg");
            }
            ReductionKind::Custom => {}
        }

        Ok(cfg)
    }

    /// Attach a [`CustomReducer`], switching live reductions over to it
    /// regardless of the `kind` the config was built with (the caller is
    /// expected to have constructed with `ReductionKind::Custom`).
    pub fn with_custom(mut self, reducer: Arc<dyn CustomReducer<L>>) -> Self {
        self.custom = Some(reducer);
        self
    }

    /// Fold `x` into the canonical range `[0, m)` by repeated add/sub of
    /// `m`. Used where the unreduced value is already close to the
    /// modulus (sums and differences of two reduced operands), so a
    /// handful of corrections suffice regardless of `kind`.
    fn fold_positive(&self, x: &Int<L>) -> Int<L> {
        let mut v = x.clone();
        while v.is_negative() {
            v = v.add(&self.m);
        }
        while v.cmp(&self.m) != Ordering::Less {
            v = v.sub(&self.m);
        }
        v
    }

    /// Reduce `x` modulo `m` using the configured strategy. Under
    /// `Montgomery`, this is precisely REDC: `x` is interpreted as a
    /// Montgomery-domain value awaiting its final `R^(-1)` factor, not
    /// an arbitrary integer to take mod `m` — use
    /// [`to_montgomery`](Self::to_montgomery) to enter that domain first.
    pub fn reduce(&self, x: &Int<L>) -> Int<L> {
        match self.kind {
            ReductionKind::Naive => self.naive_reduce(x),
            ReductionKind::Barrett => self.barrett_reduce(x),
            ReductionKind::Montgomery => self.montgomery_redc(x),
            ReductionKind::Custom => self
                .custom
                .as_ref()
                .expect("ReductionKind::Custom requires with_custom")
                .reduce(x, self),
        }
    }

    fn naive_reduce(&self, x: &Int<L>) -> Int<L> {
        x.div_r(&self.m, RoundingMode::Floor).expect("m validated nonzero at construction")
    }

    /// Barrett reduction, following the standard seven-step formulation:
    /// fold negative input, take the top limb estimate of the quotient
    /// via `mu`, subtract `q*m`, then correct with at most two more
    /// subtractions.
    fn barrett_reduce(&self, x: &Int<L>) -> Int<L> {
        let k = self.k;
        let b = self.blog2 as usize;

        let mut v = x.clone();
        if v.is_negative() {
            let a_bits = v.abs().bit_length();
            let shift = a_bits.saturating_sub(self.mbits).saturating_add(1);
            v = v.add(&self.m.shl(shift));
            while v.is_negative() {
                v = v.add(&self.m);
            }
        }

        let q1 = v.shr(b * k.saturating_sub(1));
        let q2 = q1.mul(&self.mu);
        let q3 = q2.shr(b * (k + 1));

        let r1 = v.div_qr_2exp(b * (k + 1), RoundingMode::Floor).1;
        let q3m = q3.mul(&self.m);
        let r2v = q3m.div_qr_2exp(b * (k + 1), RoundingMode::Floor).1;

        let mut r = r1.sub(&r2v);
        if r.is_negative() {
            r = r.add(&(Int::one().shl(b * (k + 1))));
        }
        while r.cmp(&self.m) != Ordering::Less {
            r = r.sub(&self.m);
        }
        r
    }

    /// Montgomery REDC: `t * R^(-1) mod m`, the separated-multiplication
    /// algorithm operating one limb of `t` at a time.
    fn montgomery_redc(&self, x: &Int<L>) -> Int<L> {
        debug_assert!(!x.is_negative(), "REDC operates on the nonnegative product of two residues");
        let k = self.k;
        let mlimbs = &self.m.limbs;

        let mut t: Vec<L> = x.limbs.clone();
        t.resize(2 * k + 2, L::ZERO);

        for i in 0..k {
            let u = t[i].wrapping_mul(self.ninv);
            let mut carry = L::double_zero();
            for j in 0..k {
                let mj = mlimbs.get(j).copied().unwrap_or(L::ZERO);
                let prod = u.to_double() * mj.to_double() + t[i + j].to_double() + carry;
                t[i + j] = L::double_lo(prod);
                carry = prod >> L::BITS;
            }
            let mut idx = i + k;
            while carry != L::double_zero() {
                let sum = t[idx].to_double() + carry;
                t[idx] = L::double_lo(sum);
                carry = sum >> L::BITS;
                idx += 1;
            }
        }

        let result_limbs = t[k..].to_vec();
        let mut result = Int::from_limbs_unsigned(result_limbs);
        while result.cmp(&self.m) != Ordering::Less {
            result = result.sub(&self.m);
        }
        result
    }

    /// `a + b mod m`. Domain-agnostic: valid whether `a`/`b` are plain
    /// residues or both in the same Montgomery form, since addition
    /// distributes over the `R` scaling factor.
    pub fn add_mod(&self, a: &Int<L>, b: &Int<L>) -> Int<L> {
        self.fold_positive(&a.add(b))
    }

    /// `a - b mod m`, same domain-agnostic guarantee as [`add_mod`](Self::add_mod).
    pub fn sub_mod(&self, a: &Int<L>, b: &Int<L>) -> Int<L> {
        self.fold_positive(&a.sub(b))
    }

    /// `a * b mod m`. Under `Montgomery`, `a` and `b` must already be in
    /// Montgomery form; the result is `(a*b)*R^(-1) mod m`, i.e. also in
    /// Montgomery form.
    pub fn mul_mod(&self, a: &Int<L>, b: &Int<L>) -> Int<L> {
        self.reduce(&a.mul(b))
    }

    /// `a^2 mod m`, same domain contract as [`mul_mod`](Self::mul_mod).
    pub fn square_mod(&self, a: &Int<L>) -> Int<L> {
        self.reduce(&a.square())
    }

    /// Map a plain residue into Montgomery form (`x * R mod m`).
    /// A no-op reinterpretation for non-Montgomery strategies.
    pub fn to_montgomery(&self, x: &Int<L>) -> Int<L> {
        match self.kind {
            ReductionKind::Montgomery => self.reduce(&x.mul(&self.r2)),
            _ => self.naive_reduce(x),
        }
    }

    /// Map a Montgomery-form value back to a plain residue (`x * R^(-1) mod m`).
    pub fn from_montgomery(&self, x: &Int<L>) -> Int<L> {
        match self.kind {
            ReductionKind::Montgomery => self.reduce(x),
            _ => self.naive_reduce(x),
        }
    }

    /// `base^exp mod m` by left-to-right square-and-multiply. Under
    /// `Montgomery`, the accumulator and base are converted in once and
    /// the whole ladder runs in Montgomery form, converting out exactly
    /// once at the end.
    pub fn pow_mod(&self, base: &Int<L>, exp: &Int<L>) -> Int<L> {
        let base_internal = match self.kind {
            ReductionKind::Montgomery => self.to_montgomery(base),
            _ => self.fold_positive(base),
        };
        let mut acc = match self.kind {
            ReductionKind::Montgomery => self.to_montgomery(&Int::one()),
            _ => Int::one(),
        };

        let bits = exp.bit_length();
        for i in (0..bits).rev() {
            acc = self.square_mod(&acc);
            if exp.tstbit(i) {
                acc = self.mul_mod(&acc, &base_internal);
            }
        }

        match self.kind {
            ReductionKind::Montgomery => self.from_montgomery(&acc),
            _ => acc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn naive_matches_plain_mod() {
        let m = Int::<u32>::from_i64(97);
        let cfg = ModCfg::new(m.clone(), ReductionKind::Naive).unwrap();
        let a = Int::<u32>::from_i64(250);
        assert_eq!(cfg.reduce(&a), a.div_r(&m, RoundingMode::Floor).unwrap());
    }

    #[test]
    fn barrett_matches_naive() {
        let m = Int::<u32>::from_i64(1_000_003);
        let naive = ModCfg::new(m.clone(), ReductionKind::Naive).unwrap();
        let barrett = ModCfg::new(m.clone(), ReductionKind::Barrett).unwrap();
        let a = Int::<u32>::from_i64(999_999_999);
        let b = Int::<u32>::from_i64(888_888_887);
        assert_eq!(naive.mul_mod(&a, &b), barrett.mul_mod(&a, &b));
    }

    #[test]
    fn montgomery_mul_matches_naive() {
        let m = Int::<u32>::from_i64(1_000_003); // odd
        let naive = ModCfg::new(m.clone(), ReductionKind::Naive).unwrap();
        let mont = ModCfg::new(m.clone(), ReductionKind::Montgomery).unwrap();

        let a = Int::<u32>::from_i64(12345);
        let b = Int::<u32>::from_i64(67890);

        let am = mont.to_montgomery(&a);
        let bm = mont.to_montgomery(&b);
        let prodm = mont.mul_mod(&am, &bm);
        let prod = mont.from_montgomery(&prodm);

        assert_eq!(prod, naive.mul_mod(&a, &b));
    }

    #[test]
    fn pow_mod_textbook() {
        // 4^13 mod 497 = 445.
        let m = Int::<u32>::from_i64(497);
        let cfg = ModCfg::new(m, ReductionKind::Montgomery).unwrap();
        let base = Int::<u32>::from_i64(4);
        let exp = Int::<u32>::from_i64(13);
        assert_eq!(cfg.pow_mod(&base, &exp).cmp_si(445), Ordering::Equal);
    }
}
