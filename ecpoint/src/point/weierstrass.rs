//! Short-Weierstrass doubling and addition, affine and projective.

use super::Repr;
use crate::curve::CurveParams;
use crate::error::PointStatus;
use limb::Limb;
use mpint::Int;

/// Affine tangent-slope doubling: `y = 0` collapses to infinity.
pub(super) fn double_affine<L: Limb>(curve: &CurveParams<L>, x: &Int<L>, y: &Int<L>) -> (Repr<L>, PointStatus) {
    let cfg = &curve.cfg;
    if y.is_zero() {
        return (Repr::WeierstrassAffine { x: Int::zero(), y: Int::one(), infinity: true }, PointStatus::Infinity);
    }
    let three_x2 = x.square_mod(cfg).mul_mod(&Int::from_i64(3), cfg);
    let num = three_x2.add_mod(&curve.a, cfg);
    let two_y = y.add_mod(y, cfg);
    let Ok(two_y_inv) = two_y.invert(&cfg.m) else {
        return (Repr::WeierstrassAffine { x: x.clone(), y: y.clone(), infinity: false }, PointStatus::Error);
    };
    let lambda = num.mul_mod(&two_y_inv, cfg);
    let x2 = x.add_mod(x, cfg);
    let xr = lambda.square_mod(cfg).sub_mod(&x2, cfg);
    let yr = lambda.mul_mod(&x.sub_mod(&xr, cfg), cfg).sub_mod(y, cfg);
    (Repr::WeierstrassAffine { x: xr, y: yr, infinity: false }, PointStatus::Ok)
}

/// Affine chord-slope addition.
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
            return (Repr::WeierstrassAffine { x: Int::zero(), y: Int::one(), infinity: true }, PointStatus::Infinity);
        }
        return double_affine(curve, x1, y1);
    }
    let num = y2.sub_mod(y1, cfg);
    let den = x2.sub_mod(x1, cfg);
    let Ok(den_inv) = den.invert(&cfg.m) else {
        return (Repr::WeierstrassAffine { x: x1.clone(), y: y1.clone(), infinity: false }, PointStatus::Error);
    };
    let lambda = num.mul_mod(&den_inv, cfg);
    let xr = lambda.square_mod(cfg).sub_mod(x1, cfg).sub_mod(x2, cfg);
    let yr = lambda.mul_mod(&x1.sub_mod(&xr, cfg), cfg).sub_mod(y1, cfg);
    (Repr::WeierstrassAffine { x: xr, y: yr, infinity: false }, PointStatus::Ok)
}

/// Standard (non-unified, branching) projective doubling over
/// `Y^2 Z = X^3 + a X Z^2 + b Z^3`.
pub(super) fn double_projective<L: Limb>(
    curve: &CurveParams<L>,
    x: &Int<L>,
    y: &Int<L>,
    z: &Int<L>,
) -> (Repr<L>, PointStatus) {
    let cfg = &curve.cfg;
    if z.is_zero() || y.is_zero() {
        return (Repr::WeierstrassProjective { x: Int::zero(), y: Int::one(), z: Int::zero() }, PointStatus::Infinity);
    }
    let w = curve.a.mul_mod(&z.square_mod(cfg), cfg).add_mod(&x.square_mod(cfg).mul_mod(&Int::from_i64(3), cfg), cfg);
    let s = y.mul_mod(z, cfg);
    let b = x.mul_mod(y, cfg).mul_mod(&s, cfg);
    let h = w.square_mod(cfg).sub_mod(&b.mul_mod(&Int::from_i64(8), cfg), cfg);
    let xr = h.mul_mod(&s, cfg).mul_mod(&Int::from_i64(2), cfg);
    let s2 = s.square_mod(cfg);
    let eight_y2s2 = y.square_mod(cfg).mul_mod(&s2, cfg).mul_mod(&Int::from_i64(8), cfg);
    let four_b_minus_h = b.mul_mod(&Int::from_i64(4), cfg).sub_mod(&h, cfg);
    let yr = w.mul_mod(&four_b_minus_h, cfg).sub_mod(&eight_y2s2, cfg);
    let zr = s.mul_mod(&s2, cfg).mul_mod(&Int::from_i64(8), cfg);
    (Repr::WeierstrassProjective { x: xr, y: yr, z: zr }, PointStatus::Ok)
}

/// Standard projective addition (GECC Algorithm 3.1.2 generalised to
/// nonzero `a`), branching on the degenerate cases instead of adopting
/// a unified complete formula.
#[allow(clippy::too_many_arguments)]
pub(super) fn add_projective<L: Limb>(
    curve: &CurveParams<L>,
    x1: &Int<L>,
    y1: &Int<L>,
    z1: &Int<L>,
    x2: &Int<L>,
    y2: &Int<L>,
    z2: &Int<L>,
) -> (Repr<L>, PointStatus) {
    let cfg = &curve.cfg;
    if z1.is_zero() {
        return (Repr::WeierstrassProjective { x: x2.clone(), y: y2.clone(), z: z2.clone() }, PointStatus::Ok);
    }
    if z2.is_zero() {
        return (Repr::WeierstrassProjective { x: x1.clone(), y: y1.clone(), z: z1.clone() }, PointStatus::Ok);
    }
    let u1 = y2.mul_mod(z1, cfg);
    let u2 = y1.mul_mod(z2, cfg);
    let v1 = x2.mul_mod(z1, cfg);
    let v2 = x1.mul_mod(z2, cfg);
    if v1 == v2 {
        if u1 != u2 {
            return (Repr::WeierstrassProjective { x: Int::zero(), y: Int::one(), z: Int::zero() }, PointStatus::Infinity);
        }
        return double_projective(curve, x1, y1, z1);
    }
    let u = u1.sub_mod(&u2, cfg);
    let v = v1.sub_mod(&v2, cfg);
    let w = z1.mul_mod(z2, cfg);
    let v2sq = v.square_mod(cfg);
    let v3 = v2sq.mul_mod(&v, cfg);
    let a = u.square_mod(cfg).mul_mod(&w, cfg).sub_mod(&v3, cfg).sub_mod(&v2sq.mul_mod(&v2, cfg).mul_mod(&Int::from_i64(2), cfg), cfg);
    let xr = v.mul_mod(&a, cfg);
    let yr = u.mul_mod(&v2sq.mul_mod(&v2, cfg).sub_mod(&a, cfg), cfg).sub_mod(&v3.mul_mod(&u2, cfg), cfg);
    let zr = v3.mul_mod(&w, cfg);
    (Repr::WeierstrassProjective { x: xr, y: yr, z: zr }, PointStatus::Ok)
}
