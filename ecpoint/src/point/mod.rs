//! Polymorphic elliptic-curve point, tagged by curve family and
//! coordinate system rather than expressed through per-family traits:
//! a sum of six variants sharing one capability surface, matching how
//! this codebase prefers an enum-tagged representation over deep
//! inheritance when the underlying math genuinely branches by case.

mod edwards;
mod montgomery;
mod weierstrass;

use crate::curve::{CurveFamily, CurveParams};
use crate::error::PointStatus;
use alloc::sync::Arc;
use limb::Limb;
use mpint::Int;

/// The live coordinate fields for one of the six (family, coordinate
/// system) combinations this toolkit supports.
#[derive(Clone)]
pub enum Repr<L: Limb> {
    WeierstrassAffine { x: Int<L>, y: Int<L>, infinity: bool },
    WeierstrassProjective { x: Int<L>, y: Int<L>, z: Int<L> },
    MontgomeryAffine { x: Int<L>, y: Int<L> },
    MontgomeryProjective { x: Int<L>, z: Int<L> },
    EdwardsAffine { x: Int<L>, y: Int<L> },
    EdwardsProjective { x: Int<L>, y: Int<L>, z: Int<L>, t: Int<L> },
}

/// An elliptic-curve point bound to a shared, immutable curve context.
#[derive(Clone)]
pub struct Point<L: Limb> {
    pub(crate) repr: Repr<L>,
    pub(crate) curve: Arc<CurveParams<L>>,
}

impl<L: Limb> Point<L> {
    pub fn curve(&self) -> &Arc<CurveParams<L>> {
        &self.curve
    }

    /// Build the identity element for `curve`'s family and the given
    /// projective-ness; affine points are not generally able to
    /// represent infinity without a dedicated flag (Weierstrass) or at
    /// all (Montgomery/Edwards affine, which never hold infinity in
    /// this toolkit's scope).
    pub fn identity(curve: Arc<CurveParams<L>>, projective: bool) -> Self {
        let zero = Int::zero();
        let one = Int::one();
        let repr = match (curve.family, projective) {
            (CurveFamily::Weierstrass, false) => {
                Repr::WeierstrassAffine { x: zero.clone(), y: one, infinity: true }
            }
            (CurveFamily::Weierstrass, true) => {
                Repr::WeierstrassProjective { x: zero.clone(), y: one, z: zero }
            }
            (CurveFamily::Montgomery, false) => Repr::MontgomeryAffine { x: zero.clone(), y: zero },
            (CurveFamily::Montgomery, true) => Repr::MontgomeryProjective { x: one, z: zero },
            (CurveFamily::Edwards, false) => Repr::EdwardsAffine { x: zero.clone(), y: one },
            (CurveFamily::Edwards, true) => {
                Repr::EdwardsProjective { x: zero.clone(), y: one.clone(), z: one, t: zero }
            }
        };
        Point { repr, curve }
    }

    /// The neutral element, checked consistently across coordinate
    /// systems: all live coordinates collapse to the canonical
    /// representative of infinity for that system.
    pub fn is_zero(&self) -> bool {
        match &self.repr {
            Repr::WeierstrassAffine { infinity, .. } => *infinity,
            Repr::WeierstrassProjective { z, .. } => z.is_zero(),
            Repr::MontgomeryProjective { z, .. } => z.is_zero(),
            Repr::MontgomeryAffine { .. } | Repr::EdwardsAffine { .. } => false,
            Repr::EdwardsProjective { x, z, .. } => x.is_zero() && !z.is_zero(),
        }
    }

    /// Map a published affine `(x, y)` into this point's working
    /// representation, setting up whichever redundant coordinates the
    /// system needs (`z = 1`, and for extended Edwards `t = x*y`).
    pub fn convert_to(curve: Arc<CurveParams<L>>, x: Int<L>, y: Int<L>, projective: bool) -> Self {
        tracing::debug!(family = ?curve.family, projective, "mapping affine point into working representation");
        let repr = match (curve.family, projective) {
            (CurveFamily::Weierstrass, false) => Repr::WeierstrassAffine { x, y, infinity: false },
            (CurveFamily::Weierstrass, true) => Repr::WeierstrassProjective { x, y, z: Int::one() },
            (CurveFamily::Montgomery, false) => Repr::MontgomeryAffine { x, y },
            (CurveFamily::Montgomery, true) => Repr::MontgomeryProjective { x, z: Int::one() },
            (CurveFamily::Edwards, false) => Repr::EdwardsAffine { x, y },
            (CurveFamily::Edwards, true) => {
                let t = x.mul_mod(&y, &curve.cfg);
                Repr::EdwardsProjective { x, y, z: Int::one(), t }
            }
        };
        Point { repr, curve }
    }

    /// Recover the affine `(x, y)` pair, normalising out any
    /// projective `z` (and ignoring the extended `t`, which carries no
    /// independent information). Fails with `Error` only if a required
    /// inverse does not exist (`z = 0` reaching a context that did not
    /// already special-case infinity).
    pub fn convert_from(&self) -> Result<(Int<L>, Int<L>), crate::error::Error> {
        tracing::debug!(family = ?self.curve.family, "mapping working representation back to affine");
        let cfg = &self.curve.cfg;
        match &self.repr {
            Repr::WeierstrassAffine { x, y, infinity } => {
                if *infinity {
                    return Err(crate::error::Error::PointInfinity);
                }
                Ok((x.clone(), y.clone()))
            }
            Repr::WeierstrassProjective { x, y, z } | Repr::EdwardsProjective { x, y, z, .. } => {
                if z.is_zero() {
                    return Err(crate::error::Error::PointInfinity);
                }
                let zinv = z.invert(&cfg.m).map_err(|_| crate::error::Error::PointError)?;
                Ok((x.mul_mod(&zinv, cfg), y.mul_mod(&zinv, cfg)))
            }
            Repr::MontgomeryAffine { x, y } => Ok((x.clone(), y.clone())),
            Repr::MontgomeryProjective { x, z } => {
                if z.is_zero() {
                    return Err(crate::error::Error::PointInfinity);
                }
                let zinv = z.invert(&cfg.m).map_err(|_| crate::error::Error::PointError)?;
                Ok((x.mul_mod(&zinv, cfg), Int::zero()))
            }
            Repr::EdwardsAffine { x, y } => Ok((x.clone(), y.clone())),
        }
    }

    /// `-self`: negate `y` (Weierstrass, Montgomery) or `x` (Edwards).
    pub fn negate(&self) -> Self {
        let cfg = &self.curve.cfg;
        let repr = match &self.repr {
            Repr::WeierstrassAffine { x, y, infinity } => Repr::WeierstrassAffine {
                x: x.clone(),
                y: cfg.m.sub(y).reduce(cfg),
                infinity: *infinity,
            },
            Repr::WeierstrassProjective { x, y, z } => Repr::WeierstrassProjective {
                x: x.clone(),
                y: cfg.m.sub(y).reduce(cfg),
                z: z.clone(),
            },
            Repr::MontgomeryAffine { x, y } => {
                Repr::MontgomeryAffine { x: x.clone(), y: cfg.m.sub(y).reduce(cfg) }
            }
            Repr::MontgomeryProjective { x, z } => {
                Repr::MontgomeryProjective { x: x.clone(), z: z.clone() }
            }
            Repr::EdwardsAffine { x, y } => {
                Repr::EdwardsAffine { x: cfg.m.sub(x).reduce(cfg), y: y.clone() }
            }
            Repr::EdwardsProjective { x, y, z, t } => Repr::EdwardsProjective {
                x: cfg.m.sub(x).reduce(cfg),
                y: y.clone(),
                z: z.clone(),
                t: cfg.m.sub(t).reduce(cfg),
            },
        };
        Point { repr, curve: self.curve.clone() }
    }

    /// `2 * self`.
    pub fn doubling(&self) -> (Self, PointStatus) {
        let curve = self.curve.clone();
        let (repr, status) = match &self.repr {
            Repr::WeierstrassAffine { x, y, infinity } => {
                if *infinity {
                    (self.repr.clone(), PointStatus::Infinity)
                } else {
                    weierstrass::double_affine(&curve, x, y)
                }
            }
            Repr::WeierstrassProjective { x, y, z } => weierstrass::double_projective(&curve, x, y, z),
            Repr::MontgomeryAffine { x, y } => montgomery::double_affine(&curve, x, y),
            Repr::MontgomeryProjective { x, z } => {
                let (x3, z3) = montgomery::double_xz(&curve, x, z);
                (Repr::MontgomeryProjective { x: x3, z: z3 }, PointStatus::Ok)
            }
            Repr::EdwardsAffine { x, y } => edwards::double_affine(&curve, x, y),
            Repr::EdwardsProjective { x, y, z, .. } => edwards::double_projective(&curve, x, y, z),
        };
        (Point { repr, curve }, status)
    }

    /// `self + other`, both on the same curve and in the same
    /// coordinate system.
    pub fn addition(&self, other: &Self) -> (Self, PointStatus) {
        let curve = self.curve.clone();
        let (repr, status) = match (&self.repr, &other.repr) {
            (
                Repr::WeierstrassAffine { x: x1, y: y1, infinity: i1 },
                Repr::WeierstrassAffine { x: x2, y: y2, infinity: i2 },
            ) => {
                if *i1 {
                    (other.repr.clone(), PointStatus::Ok)
                } else if *i2 {
                    (self.repr.clone(), PointStatus::Ok)
                } else {
                    weierstrass::add_affine(&curve, x1, y1, x2, y2)
                }
            }
            (
                Repr::WeierstrassProjective { x: x1, y: y1, z: z1 },
                Repr::WeierstrassProjective { x: x2, y: y2, z: z2 },
            ) => weierstrass::add_projective(&curve, x1, y1, z1, x2, y2, z2),
            (Repr::MontgomeryAffine { x: x1, y: y1 }, Repr::MontgomeryAffine { x: x2, y: y2 }) => {
                montgomery::add_affine(&curve, x1, y1, x2, y2)
            }
            (Repr::EdwardsAffine { x: x1, y: y1 }, Repr::EdwardsAffine { x: x2, y: y2 }) => {
                edwards::add_affine(&curve, x1, y1, x2, y2)
            }
            (
                Repr::EdwardsProjective { x: x1, y: y1, z: z1, t: t1 },
                Repr::EdwardsProjective { x: x2, y: y2, z: z2, t: t2 },
            ) => edwards::add_projective(&curve, x1, y1, z1, t1, x2, y2, z2, t2),
            (Repr::MontgomeryProjective { .. }, Repr::MontgomeryProjective { .. }) => {
                // Forbidden: differential addition requires the
                // difference point too. Use `ladder_step` instead.
                (self.repr.clone(), PointStatus::Error)
            }
            _ => (self.repr.clone(), PointStatus::Error),
        };
        (Point { repr, curve }, status)
    }

    /// One Montgomery-ladder step: given `self` = `P` and `other` =
    /// `Q = P + D` for a fixed base difference `D`, returns
    /// `(2P, P+Q)` doing constant work regardless of which scalar bit
    /// drove the call. Montgomery `XZ` projective points only.
    pub fn ladder_step(&self, other: &Self, base: &Self) -> (Self, Self) {
        let (Repr::MontgomeryProjective { x: xp, z: zp }, Repr::MontgomeryProjective { x: xq, z: zq }) =
            (&self.repr, &other.repr)
        else {
            panic!("ladder_step requires Montgomery projective points");
        };
        let Repr::MontgomeryProjective { x: xd, z: zd } = &base.repr else {
            panic!("ladder_step requires a Montgomery projective base difference");
        };
        let (x2, z2, x3, z3) = montgomery::ladder_step(&self.curve, xp, zp, xq, zq, xd, zd);
        (
            Point { repr: Repr::MontgomeryProjective { x: x2, z: z2 }, curve: self.curve.clone() },
            Point { repr: Repr::MontgomeryProjective { x: x3, z: z3 }, curve: self.curve.clone() },
        )
    }

    /// Okeya–Sakurai y-coordinate recovery: given the affine base point
    /// `(x, y)`, `self` = `nP` and `next` = `(n+1)P` in `XZ`
    /// coordinates, returns `nP`'s full projective `(X, Y, Z)` so the
    /// caller can normalise to affine.
    pub fn y_recovery(&self, next: &Self, base_x: &Int<L>, base_y: &Int<L>) -> (Int<L>, Int<L>, Int<L>) {
        let Repr::MontgomeryProjective { x: x1, z: z1 } = &self.repr else {
            panic!("y_recovery requires a Montgomery projective point");
        };
        let Repr::MontgomeryProjective { x: x2, z: z2 } = &next.repr else {
            panic!("y_recovery requires a Montgomery projective next point");
        };
        montgomery::y_recovery(&self.curve, x1, z1, x2, z2, base_x, base_y)
    }
}
