//! Shared, read-only curve parameters.
//!
//! Mirrors the `shared_ptr`-to-curve-constants pattern this codebase
//! already uses for prime-order curve groups, but expressed as an
//! `Arc` handle over a plain struct rather than a generic
//! `PrimeCurveParams` trait: every field this toolkit's curve families
//! need (Weierstrass `a`/`b`, Montgomery `a24`, Edwards `d`) lives
//! side by side, since a single point implementation is chosen at
//! runtime by `family` rather than at compile time by a type parameter.

use alloc::sync::Arc;
use limb::Limb;
use mpint::{Int, ModCfg};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurveFamily {
    Weierstrass,
    Montgomery,
    Edwards,
}

/// Curve constants and the reduction context they were prepared under.
///
/// Construction is the only place curve constants are computed; once
/// built, a `CurveParams` is immutable and safe to share across points
/// and threads via `Arc`.
pub struct CurveParams<L: Limb> {
    pub family: CurveFamily,
    pub cfg: Arc<ModCfg<L>>,
    /// Weierstrass `a`, or Montgomery/Edwards unused (zero).
    pub a: Int<L>,
    /// Weierstrass `b`, or the Montgomery curve coefficient `B` in
    /// `B y^2 = x^3 + A x^2 + x`; unused for Edwards.
    pub b: Int<L>,
    /// Twisted-Edwards `d`; unused elsewhere.
    pub d: Int<L>,
    /// Montgomery `a24 = (a + 2) / 4`, pre-reduced; unused elsewhere.
    pub a24: Int<L>,
    pub gx: Int<L>,
    pub gy: Int<L>,
    pub order: Int<L>,
    pub cofactor: Int<L>,
    /// Edwards-only: true when `a = -1 mod p`, enabling the
    /// sign-optimised extended-coordinate formulas.
    pub a_is_minus_1: bool,
}

impl<L: Limb> CurveParams<L> {
    pub fn modulus(&self) -> &Int<L> {
        &self.cfg.m
    }
}
