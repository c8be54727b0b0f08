//! Test-generator macros, mirroring the field-element test harness this
//! crate's modular arithmetic feeds into: each macro expands to a set of
//! `#[test]` functions parameterised over a limb type, so downstream
//! crates can re-check `Int`'s invariants against their own limb width
//! without duplicating the test bodies.

/// Expand the full suite below for limb type `$L`.
#[macro_export]
macro_rules! test_mpint {
    ($L:ty) => {
        $crate::test_mpint_arith!($L);
        $crate::test_mpint_gcd!($L);
        $crate::test_mpint_modcfg!($L);
    };
}

/// Additive/multiplicative identity and rounding-mode invariants.
#[macro_export]
macro_rules! test_mpint_arith {
    ($L:ty) => {
        #[test]
        fn zero_is_additive_identity() {
            let a = $crate::Int::<$L>::from_i64(12345);
            let zero = $crate::Int::<$L>::zero();
            assert_eq!(a.add(&zero), a);
        }

        #[test]
        fn one_is_multiplicative_identity() {
            let a = $crate::Int::<$L>::from_i64(12345);
            let one = $crate::Int::<$L>::one();
            assert_eq!(a.mul(&one), a);
        }

        #[test]
        fn floor_div_remainder_has_divisor_sign() {
            let a = $crate::Int::<$L>::from_i64(-7);
            let b = $crate::Int::<$L>::from_i64(2);
            let (_, r) = a.div_qr(&b, $crate::RoundingMode::Floor).unwrap();
            assert!(!r.is_negative());
        }
    };
}

/// `gcd`/`gcdext`/`invert` Bezout-identity and round-trip invariants.
#[macro_export]
macro_rules! test_mpint_gcd {
    ($L:ty) => {
        #[test]
        fn gcdext_satisfies_bezout_identity() {
            let a = $crate::Int::<$L>::from_i64(1071);
            let b = $crate::Int::<$L>::from_i64(462);
            let (g, s, t) = a.gcdext(&b);
            assert_eq!(s.mul(&a).add(&t.mul(&b)), g);
        }

        #[test]
        fn invert_roundtrips_through_multiplication() {
            let m = $crate::Int::<$L>::from_i64(1_000_003);
            let a = $crate::Int::<$L>::from_i64(12345);
            let inv = a.invert(&m).unwrap();
            let one = $crate::Int::<$L>::one();
            assert_eq!(a.mul(&inv).div_r(&m, $crate::RoundingMode::Floor).unwrap(), one);
        }
    };
}

/// Cross-checks between the three `ModCfg` reduction strategies: they
/// must agree on every modular operation for the same modulus.
#[macro_export]
macro_rules! test_mpint_modcfg {
    ($L:ty) => {
        #[test]
        fn all_strategies_agree_on_mul_mod() {
            let m = $crate::Int::<$L>::from_i64(1_000_003);
            let naive = $crate::ModCfg::new(m.clone(), $crate::ReductionKind::Naive).unwrap();
            let barrett = $crate::ModCfg::new(m.clone(), $crate::ReductionKind::Barrett).unwrap();
            let montgomery = $crate::ModCfg::new(m.clone(), $crate::ReductionKind::Montgomery).unwrap();

            let a = $crate::Int::<$L>::from_i64(987_654);
            let b = $crate::Int::<$L>::from_i64(123_456);

            let via_naive = naive.mul_mod(&a, &b);
            let via_barrett = barrett.mul_mod(&a, &b);

            let am = montgomery.to_montgomery(&a);
            let bm = montgomery.to_montgomery(&b);
            let via_montgomery = montgomery.from_montgomery(&montgomery.mul_mod(&am, &bm));

            assert_eq!(via_naive, via_barrett);
            assert_eq!(via_naive, via_montgomery);
        }

        #[test]
        fn pow_mod_matches_repeated_mul_mod() {
            let m = $crate::Int::<$L>::from_i64(101);
            let cfg = $crate::ModCfg::new(m, $crate::ReductionKind::Montgomery).unwrap();
            let base = $crate::Int::<$L>::from_i64(7);
            let exp = $crate::Int::<$L>::from_i64(5);

            let by_ladder = cfg.pow_mod(&base, &exp);
            let mut by_repeated = $crate::Int::<$L>::one();
            for _ in 0..5 {
                by_repeated = cfg.mul_mod(&by_repeated, &base);
            }
            assert_eq!(by_ladder, by_repeated);
        }
    };
}
