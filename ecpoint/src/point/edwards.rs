//! Twisted-Edwards arithmetic in extended `(X, Y, Z, T)` coordinates,
//! `a x^2 + y^2 = 1 + d x^2 y^2` with `T` satisfying `X*Y = T*Z`.

use super::Repr;
use crate::curve::CurveParams;
use crate::error::PointStatus;
use limb::Limb;
use mpint::Int;

/// Recomputes the extended `T` coordinate from `(X, Y, Z)`. This
/// toolkit does not carry a cheap incremental update for `T` through
/// doubling/addition (the published formulas for this curve family
/// return only `X', Y', Z'`), so `T` is restored on demand via a single
/// inversion rather than tracked unconditionally.
fn restore_t<L: Limb>(curve: &CurveParams<L>, x: &Int<L>, y: &Int<L>, z: &Int<L>) -> Result<Int<L>, ()> {
    let cfg = &curve.cfg;
    let zinv = z.invert(&cfg.m).map_err(|_| ())?;
    Ok(x.mul_mod(y, cfg).mul_mod(&zinv, cfg))
}

fn raw_double<L: Limb>(curve: &CurveParams<L>, x: &Int<L>, y: &Int<L>, z: &Int<L>) -> (Int<L>, Int<L>, Int<L>) {
    let cfg = &curve.cfg;
    let a = x.mul_mod(y, cfg);
    let b = z.square_mod(cfg);
    let c = b.square_mod(cfg);
    let d = curve.d.mul_mod(&a.square_mod(cfg), cfg);
    let e = c.sub_mod(&d, cfg);
    let f = c.add_mod(&d, cfg);
    let g = x.square_mod(cfg);
    let y2 = y.square_mod(cfg);
    let gy2 = if curve.a_is_minus_1 { y2.add_mod(&g, cfg) } else { y2.sub_mod(&g, cfg) };
    let xr = a.mul_mod(&b, cfg).mul_mod(&e, cfg).mul_mod(&Int::from_i64(2), cfg);
    let yr = gy2.mul_mod(&b, cfg).mul_mod(&f, cfg);
    let zr = e.mul_mod(&f, cfg);
    (xr, yr, zr)
}

#[allow(clippy::too_many_arguments)]
fn raw_add<L: Limb>(
    curve: &CurveParams<L>,
    x1: &Int<L>,
    y1: &Int<L>,
    z1: &Int<L>,
    x2: &Int<L>,
    y2: &Int<L>,
    z2: &Int<L>,
) -> (Int<L>, Int<L>, Int<L>) {
    let cfg = &curve.cfg;
    let a = x1.mul_mod(y2, cfg);
    let b = x2.mul_mod(y1, cfg);
    let c = z1.mul_mod(z2, cfg);
    let d = curve.d.mul_mod(&a, cfg).mul_mod(&b, cfg);
    let c2 = c.square_mod(cfg);
    let e = c2.sub_mod(&d, cfg);
    let f = c2.add_mod(&d, cfg);
    let y1y2 = y1.mul_mod(y2, cfg);
    let x1x2 = x1.mul_mod(x2, cfg);
    let abx = if curve.a_is_minus_1 { y1y2.add_mod(&x1x2, cfg) } else { y1y2.sub_mod(&x1x2, cfg) };
    let xr = a.add_mod(&b, cfg).mul_mod(&c, cfg).mul_mod(&e, cfg);
    let yr = abx.mul_mod(&c, cfg).mul_mod(&f, cfg);
    let zr = e.mul_mod(&f, cfg);
    (xr, yr, zr)
}

pub(super) fn double_affine<L: Limb>(curve: &CurveParams<L>, x: &Int<L>, y: &Int<L>) -> (Repr<L>, PointStatus) {
    let (x3, y3, z3) = raw_double(curve, x, y, &Int::one());
    match z3.invert(&curve.cfg.m) {
        Ok(zinv) => {
            let cfg = &curve.cfg;
            (Repr::EdwardsAffine { x: x3.mul_mod(&zinv, cfg), y: y3.mul_mod(&zinv, cfg) }, PointStatus::Ok)
        }
        Err(_) => (Repr::EdwardsAffine { x: x.clone(), y: y.clone() }, PointStatus::Error),
    }
}

pub(super) fn add_affine<L: Limb>(
    curve: &CurveParams<L>,
    x1: &Int<L>,
    y1: &Int<L>,
    x2: &Int<L>,
    y2: &Int<L>,
) -> (Repr<L>, PointStatus) {
    let (x3, y3, z3) = raw_add(curve, x1, y1, &Int::one(), x2, y2, &Int::one());
    match z3.invert(&curve.cfg.m) {
        Ok(zinv) => {
            let cfg = &curve.cfg;
            (Repr::EdwardsAffine { x: x3.mul_mod(&zinv, cfg), y: y3.mul_mod(&zinv, cfg) }, PointStatus::Ok)
        }
        Err(_) => (Repr::EdwardsAffine { x: x1.clone(), y: y1.clone() }, PointStatus::Error),
    }
}

pub(super) fn double_projective<L: Limb>(
    curve: &CurveParams<L>,
    x: &Int<L>,
    y: &Int<L>,
    z: &Int<L>,
) -> (Repr<L>, PointStatus) {
    let (x3, y3, z3) = raw_double(curve, x, y, z);
    match restore_t(curve, &x3, &y3, &z3) {
        Ok(t3) => (Repr::EdwardsProjective { x: x3, y: y3, z: z3, t: t3 }, PointStatus::Ok),
        Err(()) => (Repr::EdwardsProjective { x: x.clone(), y: y.clone(), z: z.clone(), t: Int::zero() }, PointStatus::Error),
    }
}

#[allow(clippy::too_many_arguments)]
pub(super) fn add_projective<L: Limb>(
    curve: &CurveParams<L>,
    x1: &Int<L>,
    y1: &Int<L>,
    z1: &Int<L>,
    _t1: &Int<L>,
    x2: &Int<L>,
    y2: &Int<L>,
    z2: &Int<L>,
    _t2: &Int<L>,
) -> (Repr<L>, PointStatus) {
    let (x3, y3, z3) = raw_add(curve, x1, y1, z1, x2, y2, z2);
    match restore_t(curve, &x3, &y3, &z3) {
        Ok(t3) => (Repr::EdwardsProjective { x: x3, y: y3, z: z3, t: t3 }, PointStatus::Ok),
        Err(()) => (Repr::EdwardsProjective { x: x1.clone(), y: y1.clone(), z: z1.clone(), t: _t1.clone() }, PointStatus::Error),
    }
}

#[cfg(test)]
mod tests {
    use crate::curve::{CurveFamily, CurveParams};
    use crate::point::Point;
    use alloc::sync::Arc;
    use mpint::{Int, ModCfg, ReductionKind};

    /// Edwards25519: `-x^2 + y^2 = 1 + d x^2 y^2` over `p = 2^255 - 19`.
    fn edwards25519() -> Arc<CurveParams<u64>> {
        let p = Int::<u64>::set_str(
            "7FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFED",
            16,
        )
        .unwrap();
        let cfg = Arc::new(ModCfg::new(p, ReductionKind::Naive).unwrap());
        let d = Int::<u64>::set_str(
            "52036CEE2B6FFE738CC740797779E89800700A4D4141D8AB75EB4DCA135978A3",
            16,
        )
        .unwrap();
        let gx = Int::<u64>::set_str(
            "216936D3CD6E53FEC0A4E231FDD6DC5C692CC7609525A7B2C9562D608F25D51A",
            16,
        )
        .unwrap();
        let gy = Int::<u64>::set_str(
            "6666666666666666666666666666666666666666666666666666666666666658",
            16,
        )
        .unwrap();
        Arc::new(CurveParams {
            family: CurveFamily::Edwards,
            cfg,
            a: Int::zero(),
            b: Int::zero(),
            d,
            a24: Int::zero(),
            gx,
            gy,
            order: Int::zero(),
            cofactor: Int::from_i64(8),
            a_is_minus_1: true,
        })
    }

    /// `10*G` by doubling-and-adding (`2*(2*(2G)+G)`), matching the
    /// published reference trace for this curve.
    #[test]
    fn edwards25519_ten_times_base_point() {
        let curve = edwards25519();
        let base = Point::convert_to(curve.clone(), curve.gx.clone(), curve.gy.clone(), true);

        let (p2, status) = base.doubling();
        assert_eq!(status, crate::error::PointStatus::Ok);
        let (p4, status) = p2.doubling();
        assert_eq!(status, crate::error::PointStatus::Ok);
        let (p5, status) = p4.addition(&base);
        assert_eq!(status, crate::error::PointStatus::Ok);
        let (p10, status) = p5.doubling();
        assert_eq!(status, crate::error::PointStatus::Ok);

        let (x, y) = p10.convert_from().unwrap();
        let expected_x = Int::<u64>::set_str(
            "602c797e30ca6d754470b60ed2bc8677207e8e4ed836f81444951f224877f94f",
            16,
        )
        .unwrap();
        let expected_y = Int::<u64>::set_str(
            "637ffcaa7a1b2477c8e44d54c898bfcf2576a6853de0e843ba8874b06ae87b2c",
            16,
        )
        .unwrap();
        assert_eq!(x, expected_x);
        assert_eq!(y, expected_y);
    }
}
