//! Montgomery-curve arithmetic: `B y^2 = x^3 + A x^2 + x`.
//!
//! `curve.b` doubles as the Montgomery coefficient `B` for this
//! family (it carries no meaning for Weierstrass/Edwards points, so
//! the field is reused rather than adding a family-specific struct).

use super::Repr;
use crate::curve::CurveParams;
use crate::error::PointStatus;
use limb::Limb;
use mpint::Int;

pub(super) fn double_affine<L: Limb>(curve: &CurveParams<L>, x: &Int<L>, y: &Int<L>) -> (Repr<L>, PointStatus) {
    let cfg = &curve.cfg;
    if y.is_zero() {
        return (Repr::MontgomeryAffine { x: Int::zero(), y: Int::zero() }, PointStatus::Infinity);
    }
    let three_x2 = x.square_mod(cfg).mul_mod(&Int::from_i64(3), cfg);
    let two_a_x = curve.a.mul_mod(x, cfg).mul_mod(&Int::from_i64(2), cfg);
    let num = three_x2.add_mod(&two_a_x, cfg).add_mod(&Int::one(), cfg);
    let den = curve.b.mul_mod(y, cfg).mul_mod(&Int::from_i64(2), cfg);
    let Ok(den_inv) = den.invert(&cfg.m) else {
        return (Repr::MontgomeryAffine { x: x.clone(), y: y.clone() }, PointStatus::Error);
    };
    let lambda = num.mul_mod(&den_inv, cfg);
    let xr = curve
        .b
        .mul_mod(&lambda.square_mod(cfg), cfg)
        .sub_mod(&curve.a, cfg)
        .sub_mod(x, cfg)
        .sub_mod(x, cfg);
    let yr = lambda.mul_mod(&x.sub_mod(&xr, cfg), cfg).sub_mod(y, cfg);
    (Repr::MontgomeryAffine { x: xr, y: yr }, PointStatus::Ok)
}

pub(super) fn add_affine<L: Limb>(
    curve: &CurveParams<L>,
    x1: &Int<L>,
    y1: &Int<L>,
    x2: &Int<L>,
    y2: &Int<L>,
) -> (Repr<L>, PointStatus) {
    let cfg = &curve.cfg;
    if x1 == x2 {
        if y1 != y2 {
            return (Repr::MontgomeryAffine { x: Int::zero(), y: Int::zero() }, PointStatus::Infinity);
        }
        return double_affine(curve, x1, y1);
    }
    let num = y2.sub_mod(y1, cfg);
    let den = x2.sub_mod(x1, cfg);
    let Ok(den_inv) = den.invert(&cfg.m) else {
        return (Repr::MontgomeryAffine { x: x1.clone(), y: y1.clone() }, PointStatus::Error);
    };
    let lambda = num.mul_mod(&den_inv, cfg);
    let xr = curve
        .b
        .mul_mod(&lambda.square_mod(cfg), cfg)
        .sub_mod(&curve.a, cfg)
        .sub_mod(x1, cfg)
        .sub_mod(x2, cfg);
    let yr = lambda.mul_mod(&x1.sub_mod(&xr, cfg), cfg).sub_mod(y1, cfg);
    (Repr::MontgomeryAffine { x: xr, y: yr }, PointStatus::Ok)
}

/// `XZ`-only doubling: `X' = (X+Z)^2 (X-Z)^2`, `Z' = C*((X-Z)^2 + a24*C)`
/// where `C = (X+Z)^2 - (X-Z)^2`.
pub(super) fn double_xz<L: Limb>(curve: &CurveParams<L>, x: &Int<L>, z: &Int<L>) -> (Int<L>, Int<L>) {
    let cfg = &curve.cfg;
    let sum = x.add_mod(z, cfg).square_mod(cfg);
    let diff = x.sub_mod(z, cfg).square_mod(cfg);
    let c = sum.sub_mod(&diff, cfg);
    let xr = sum.mul_mod(&diff, cfg);
    let zr = c.mul_mod(&diff.add_mod(&curve.a24.mul_mod(&c, cfg), cfg), cfg);
    (xr, zr)
}

/// One constant-work ladder step producing `(2P, P+Q)` from
/// `P = (xp:zp)`, `Q = (xq:zq)`, and the fixed base difference
/// `D = (xd:zd) = Q - P`.
#[allow(clippy::too_many_arguments)]
pub(super) fn ladder_step<L: Limb>(
    curve: &CurveParams<L>,
    xp: &Int<L>,
    zp: &Int<L>,
    xq: &Int<L>,
    zq: &Int<L>,
    xd: &Int<L>,
    zd: &Int<L>,
) -> (Int<L>, Int<L>, Int<L>, Int<L>) {
    let cfg = &curve.cfg;
    let a = xp.sub_mod(zp, cfg);
    let b = xq.add_mod(zq, cfg);
    let c = xp.add_mod(zp, cfg);
    let d = xq.sub_mod(zq, cfg);
    let a = a.mul_mod(&b, cfg);
    let c = c.mul_mod(&d, cfg);
    let sum = a.add_mod(&c, cfg).square_mod(cfg);
    let diff = a.sub_mod(&c, cfg).square_mod(cfg);
    let x3 = zd.mul_mod(&sum, cfg);
    let z3 = xd.mul_mod(&diff, cfg);
    let (x2, z2) = double_xz(curve, xp, zp);
    (x2, z2, x3, z3)
}

/// Okeya–Sakurai recovery of `nP`'s `y` coordinate from the affine base
/// point `(x, y)` and the `XZ` pair `(X1:Z1) = nP`, `(X2:Z2) = (n+1)P`.
/// Returns `nP` as full projective `(X, Y, Z)`.
pub(super) fn y_recovery<L: Limb>(
    curve: &CurveParams<L>,
    x1: &Int<L>,
    z1: &Int<L>,
    x2: &Int<L>,
    z2: &Int<L>,
    base_x: &Int<L>,
    base_y: &Int<L>,
) -> (Int<L>, Int<L>, Int<L>) {
    let cfg = &curve.cfg;
    let two_b_y = curve.b.mul_mod(base_y, cfg).mul_mod(&Int::from_i64(2), cfg);
    let z1_sq = z1.square_mod(cfg);
    let term1 = two_b_y.mul_mod(&z1_sq, cfg).mul_mod(x2, cfg);
    let t2a = x1.mul_mod(base_x, cfg).add_mod(z1, cfg);
    let t2b = x1.add_mod(&base_x.mul_mod(z1, cfg), cfg);
    let t2c = x2.sub_mod(&base_x.mul_mod(z2, cfg), cfg);
    let term2 = t2a.mul_mod(&t2b, cfg).mul_mod(&t2c, cfg);
    let y_num = term1.add_mod(&term2, cfg);
    let y_den = two_b_y.mul_mod(z1, cfg).mul_mod(z2, cfg);

    let x = x1.mul_mod(&y_den, cfg);
    let z = z1.mul_mod(&y_den, cfg);
    (x, y_num, z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{CurveFamily, CurveParams};
    use alloc::sync::Arc;
    use mpint::{ModCfg, ReductionKind};

    /// Curve25519: `y^2 = x^3 + 486662 x^2 + x` over `p = 2^255 - 19`.
    fn curve25519() -> Arc<CurveParams<u64>> {
        let p = Int::<u64>::set_str(
            "7FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFED",
            16,
        )
        .unwrap();
        let cfg = Arc::new(ModCfg::new(p, ReductionKind::Naive).unwrap());
        let a = Int::from_i64(486662);
        let a24 = Int::from_i64((486662 + 2) / 4);
        Arc::new(CurveParams {
            family: CurveFamily::Montgomery,
            cfg,
            a,
            b: Int::one(),
            d: Int::zero(),
            a24,
            gx: Int::from_i64(9),
            gy: Int::zero(),
            order: Int::zero(),
            cofactor: Int::from_i64(8),
            a_is_minus_1: false,
        })
    }

    #[test]
    fn curve25519_xz_doubling_of_base_point() {
        let curve = curve25519();
        let (x2, z2) = double_xz(&curve, &curve.gx, &Int::one());
        let zinv = z2.invert(&curve.cfg.m).unwrap();
        let x2_affine = x2.mul_mod(&zinv, &curve.cfg);
        let expected = Int::<u64>::set_str(
            "20d342d51873f1b7d9750c687d1571148f3f5ced1e350b5c5cae469cdd684efb",
            16,
        )
        .unwrap();
        assert_eq!(x2_affine, expected);
    }
}
