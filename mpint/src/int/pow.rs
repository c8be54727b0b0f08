//! Plain and modular exponentiation, integer and modular square roots,
//! the Jacobi/Legendre symbol, and Miller-Rabin primality testing.
//!
//! The modular operations here are thin dispatches onto [`ModCfg`]: this
//! module only ever calls `cfg.pow_mod`/`cfg.mul_mod`/`cfg.square_mod`,
//! never reimplements reduction.

use super::{Int, PrimeStatus, RoundingMode};
use crate::error::{Error, Result};
use crate::modcfg::{ModCfg, ReductionKind};
use core::cmp::Ordering;
use limb::Limb;
use rand_core::RngCore;

const SMALL_PRIMES: &[u64] = &[2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

impl<L: Limb> Int<L> {
    // ---- ergonomic wrappers over ModCfg ----

    /// Reduce `self` modulo `cfg`'s modulus, using its configured strategy.
    pub fn reduce(&self, cfg: &ModCfg<L>) -> Self {
        cfg.reduce(self)
    }

    pub fn add_mod(&self, other: &Self, cfg: &ModCfg<L>) -> Self {
        cfg.add_mod(self, other)
    }

    pub fn sub_mod(&self, other: &Self, cfg: &ModCfg<L>) -> Self {
        cfg.sub_mod(self, other)
    }

    pub fn mul_mod(&self, other: &Self, cfg: &ModCfg<L>) -> Self {
        cfg.mul_mod(self, other)
    }

    pub fn square_mod(&self, cfg: &ModCfg<L>) -> Self {
        cfg.square_mod(self)
    }

    pub fn pow_mod(&self, exp: &Self, cfg: &ModCfg<L>) -> Self {
        cfg.pow_mod(self, exp)
    }

    // ---- plain power and root ----

    /// Non-modular integer power by repeated squaring. `e` must be
    /// nonnegative; `self^0 == 1`.
    pub fn pow(&self, e: &Self) -> Self {
        debug_assert!(!e.is_negative(), "pow requires a nonnegative exponent");
        let mut acc = Self::one();
        let mut base = self.clone();
        for i in 0..e.bit_length() {
            if e.tstbit(i) {
                acc = acc.mul(&base);
            }
            base = base.square();
        }
        acc
    }

    /// Floor integer square root via Newton's method. Negative inputs
    /// return 0; halts when successive iterates stop decreasing.
    pub fn sqrt(&self) -> Self {
        if self.is_negative() || self.is_zero() {
            return Self::zero();
        }
        if *self == Self::one() {
            return Self::one();
        }
        let bits = self.bit_length();
        let mut x = Self::one() << (bits / 2 + 1);
        loop {
            let q = self.div_q(&x, RoundingMode::Floor).expect("x starts positive and stays positive");
            let x_next = x.add(&q).shr(1);
            if x_next.cmp(&x) != Ordering::Less {
                return x;
            }
            x = x_next;
        }
    }

    // ---- Jacobi / Legendre ----

    /// Jacobi symbol `(self / n)` for odd positive `n`.
    pub fn jacobi(&self, n: &Self) -> i32 {
        debug_assert!(n.is_odd() && !n.is_negative());
        if n.cmp(&Self::one()) == Ordering::Equal {
            return 1;
        }
        let a = self.div_r(n, RoundingMode::Floor).expect("n is nonzero");
        if a.is_zero() {
            return 0;
        }
        limb::jacobi_n(&a.limbs, a.limbs.len(), &n.limbs, n.limbs.len())
    }

    /// Legendre symbol `(self / p)`; identical to [`jacobi`](Self::jacobi)
    /// but named for the case where `p` is prime.
    pub fn legendre(&self, p: &Self) -> i32 {
        self.jacobi(p)
    }

    /// Modular square root via Tonelli-Shanks (`p ≡ 3 (mod 4)` takes the
    /// direct `self^((p+1)/4)` shortcut). `cfg.m` must be an odd prime;
    /// returns `SqrtNotFound` if `self` is a non-residue mod `cfg.m`.
    pub fn sqrt_mod(&self, cfg: &ModCfg<L>) -> Result<Self> {
        let p = &cfg.m;
        let a = self.div_r(p, RoundingMode::Floor).expect("p is nonzero");
        if a.is_zero() {
            return Ok(Self::zero());
        }
        if a.legendre(p) != 1 {
            return Err(Error::SqrtNotFound);
        }

        let four = Self::from_u64(4);
        let p_mod4 = p.div_r(&four, RoundingMode::Floor).expect("4 != 0");
        if p_mod4 == Self::from_u64(3) {
            let exp = p.add(&Self::one()).div_q(&four, RoundingMode::Floor).expect("4 != 0");
            return Ok(cfg.pow_mod(&a, &exp));
        }

        // p - 1 = q * 2^s, q odd.
        let mut q = p.sub(&Self::one());
        let mut s = 0usize;
        while q.is_even() {
            q = q.shr(1);
            s += 1;
        }

        let mut z = Self::from_u64(2);
        while z.legendre(p) != -1 {
            z = z.add(&Self::one());
        }

        let mut m = s;
        let mut c = cfg.pow_mod(&z, &q);
        let mut t = cfg.pow_mod(&a, &q);
        let exp_r = q.add(&Self::one()).div_q(&Self::from_u64(2), RoundingMode::Floor).expect("2 != 0");
        let mut r = cfg.pow_mod(&a, &exp_r);

        loop {
            if t == Self::one() {
                return Ok(r);
            }
            let mut i = 1usize;
            let mut t2i = cfg.square_mod(&t);
            while t2i != Self::one() {
                t2i = cfg.square_mod(&t2i);
                i += 1;
                if i >= m {
                    return Err(Error::SqrtNotFound);
                }
            }
            let exp_b = Self::one().shl(m - i - 1);
            let b = cfg.pow_mod(&c, &exp_b);
            m = i;
            c = cfg.square_mod(&b);
            t = cfg.mul_mod(&t, &c);
            r = cfg.mul_mod(&r, &b);
        }
    }

    // ---- primality ----

    /// Miller-Rabin primality test, drawing `rounds` random witnesses in
    /// `[2, self-2]` from `rng`.
    pub fn prime_miller_rabin<R: RngCore>(&self, rounds: usize, rng: &mut R) -> PrimeStatus {
        tracing::debug!(rounds, "running Miller-Rabin primality test");

        if self.cmp_si(2) == Ordering::Less {
            return PrimeStatus::CompositeWithFactor;
        }
        for &small in SMALL_PRIMES {
            let sp = Self::from_u64(small);
            if *self == sp {
                return PrimeStatus::ProbablyPrime;
            }
            if self.div_r(&sp, RoundingMode::Floor).expect("small prime nonzero").is_zero() {
                return PrimeStatus::CompositeWithFactor;
            }
        }

        let n_minus_1 = self.sub(&Self::one());
        let mut d = n_minus_1.clone();
        let mut r = 0usize;
        while d.is_even() {
            d = d.shr(1);
            r += 1;
        }

        // Barrett (not Montgomery) deliberately: pow_mod/square_mod below
        // must operate on plain residues, since x is compared directly
        // against n_minus_1/one rather than their Montgomery images.
        let cfg = match ModCfg::new(self.clone(), ReductionKind::Barrett) {
            Ok(cfg) => cfg,
            Err(_) => match ModCfg::new(self.clone(), ReductionKind::Naive) {
                Ok(cfg) => cfg,
                Err(_) => return PrimeStatus::Error,
            },
        };

        let upper = self.sub(&Self::from_u64(3));
        'witness: for _ in 0..rounds {
            let a = Self::random_below(&upper, rng).add(&Self::from_u64(2));
            let mut x = cfg.pow_mod(&a, &d);
            if x == Self::one() || x == n_minus_1 {
                continue;
            }
            for _ in 0..r.saturating_sub(1) {
                x = cfg.square_mod(&x);
                if x == n_minus_1 {
                    continue 'witness;
                }
            }
            return PrimeStatus::CompositeNotPowerOfPrime;
        }
        PrimeStatus::ProbablyPrime
    }

    /// Small-prime trial division followed by 40 rounds of Miller-Rabin,
    /// the conventional default witness count for cryptographic use.
    pub fn check_prime<R: RngCore>(&self, rng: &mut R) -> PrimeStatus {
        self.prime_miller_rabin(40, rng)
    }

    fn random_below<R: RngCore>(bound: &Self, rng: &mut R) -> Self {
        if bound.cmp_si(0) != Ordering::Greater {
            return Self::zero();
        }
        let bytes = (bound.bit_length().max(1) + 7) / 8;
        loop {
            let mut buf = alloc::vec![0u8; bytes];
            rng.fill_bytes(&mut buf);
            let candidate = Self::from_bytes_be(&buf);
            if candidate.cmp(bound) == Ordering::Less {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_core::RngCore as _;

    struct StepRng(u64);
    impl RngCore for StepRng {
        fn next_u32(&mut self) -> u32 {
            self.next_u64() as u32
        }
        fn next_u64(&mut self) -> u64 {
            self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
            self.0
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for chunk in dest.chunks_mut(8) {
                let v = self.next_u64().to_le_bytes();
                chunk.copy_from_slice(&v[..chunk.len()]);
            }
        }
    }

    #[test]
    fn pow_basic() {
        let a = Int::<u32>::from_i64(3);
        let e = Int::<u32>::from_i64(5);
        assert_eq!(a.pow(&e).cmp_si(243), Ordering::Equal);
    }

    #[test]
    fn sqrt_basic() {
        let a = Int::<u32>::from_i64(9999);
        assert_eq!(a.sqrt().cmp_si(99), Ordering::Equal);
    }

    #[test]
    fn jacobi_matches_limb_reference() {
        let a = Int::<u32>::from_i64(5);
        let n = Int::<u32>::from_i64(21);
        assert_eq!(a.jacobi(&n), 1);
    }

    #[test]
    fn sqrt_mod_p_equiv_3_mod_4() {
        // p = 11 (≡ 3 mod 4), 5 is a QR mod 11 with roots {4, 7}.
        let p = Int::<u32>::from_i64(11);
        let cfg = ModCfg::new(p.clone(), ReductionKind::Naive).unwrap();
        let a = Int::<u32>::from_i64(5);
        let r = a.sqrt_mod(&cfg).unwrap();
        let check = cfg.square_mod(&r);
        assert_eq!(check, a.div_r(&p, RoundingMode::Floor).unwrap());
    }

    #[test]
    fn sqrt_mod_general_tonelli_shanks() {
        // p = 17 (≡ 1 mod 4), 15 is a QR mod 17 (6^2 = 36 = 2*17+2... use 2: 2^2=4).
        let p = Int::<u32>::from_i64(17);
        let cfg = ModCfg::new(p.clone(), ReductionKind::Naive).unwrap();
        let a = Int::<u32>::from_i64(4);
        let r = a.sqrt_mod(&cfg).unwrap();
        let check = cfg.square_mod(&r);
        assert_eq!(check, a.div_r(&p, RoundingMode::Floor).unwrap());
    }

    #[test]
    fn miller_rabin_small_prime() {
        let mut rng = StepRng(12345);
        let n = Int::<u32>::from_i64(104_729); // 10000th prime
        assert_eq!(n.prime_miller_rabin(20, &mut rng), PrimeStatus::ProbablyPrime);
    }

    #[test]
    fn miller_rabin_composite() {
        let mut rng = StepRng(999);
        let n = Int::<u32>::from_i64(104_723 * 3); // composite, not in the small-prime table
        assert_eq!(n.prime_miller_rabin(20, &mut rng), PrimeStatus::CompositeNotPowerOfPrime);
    }

    struct ZeroRng;
    impl RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            0
        }
        fn next_u64(&mut self) -> u64 {
            0
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }
    }

    #[test]
    fn pow_mod_1024_bit_corner_case_result_is_modulus_minus_one() {
        // Published reference values: a^b mod m lands on m - 1.
        let a = Int::<u32>::set_str(
            "129456913135221230419860966727734460014053208378182553276756577678309852349013448496103066242310517272875300811951068692189889731211177164307804606528856274613159947644817865893829742037224143102920111956195006961291567736367049275449407365586908213435938246363046979819697610444530781953044196108094240471122",
            10,
        )
        .unwrap();
        let b = Int::<u32>::set_str(
            "75296123376883313372540145968109024467662600265514720742783961467148548723774362243541710482042316552736836034841967686621000927544316700878456897819924701125333725547191960317838387317974177299106690233961945661398807694262855714692822997394528589488979146582453251794395768873418417854053555201377271475459",
            10,
        )
        .unwrap();
        let m = Int::<u32>::set_str(
            "150592246753766626745080291936218048935325200531029441485567922934297097447548724487083420964084633105473672069683935373242001855088633401756913795639849402250667451094383920635676774635948354598213380467923891322797615388525711429385645994789057178977958293164906503588791537746836835708107110402754542950919",
            10,
        )
        .unwrap();
        let expected = Int::<u32>::set_str(
            "150592246753766626745080291936218048935325200531029441485567922934297097447548724487083420964084633105473672069683935373242001855088633401756913795639849402250667451094383920635676774635948354598213380467923891322797615388525711429385645994789057178977958293164906503588791537746836835708107110402754542950918",
            10,
        )
        .unwrap();

        let cfg = ModCfg::new(m.clone(), ReductionKind::Barrett).unwrap();
        let r = cfg.pow_mod(&a, &b);
        assert_eq!(r, expected);
        assert_eq!(r, m.sub(&Int::<u32>::one()));
    }

    #[test]
    fn miller_rabin_witness_needs_multiple_squarings() {
        // n = 1000081 is prime, n - 1 = d * 2^4 with d odd, and witness
        // a = 2 only reaches n-1 after one squaring past a^d (i.e. at
        // i = 1), not on the initial a^d check. A witness cfg that
        // silently stays in Montgomery form would corrupt this squaring
        // loop and misreport the witness as a non-trivial square root of
        // 1, i.e. composite.
        let mut rng = ZeroRng;
        let n = Int::<u32>::from_i64(1_000_081);
        assert_eq!(n.prime_miller_rabin(1, &mut rng), PrimeStatus::ProbablyPrime);
    }
}
