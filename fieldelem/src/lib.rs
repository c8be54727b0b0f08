//! A prime-field element whose modulus fits in a single machine word.
//!
//! `FieldElem<W>` is an adapter over a `FieldParams<W>` handle carrying
//! one of three reduction strategies (`Reference`, `BarrettFp`,
//! `Montgomery`); the strategy is a runtime tag rather than a type
//! parameter so curve code can pick the fastest one for a given modulus
//! without a different `FieldElem` type for each.
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod ops;
mod reducer;

pub use reducer::{FieldParams, ReducerKind, ReducerStyle};

use alloc::sync::Arc;
use limb::Limb;

/// An element of `Z/qZ` for a single-limb modulus `q`, tagged with the
/// reduction strategy it was constructed under. Under `Montgomery`, the
/// stored `value` is the Montgomery-domain representative `x * R mod q`;
/// under `Reference`/`BarrettFp` it is the plain residue.
#[derive(Clone, Debug)]
pub struct FieldElem<W: Limb> {
    pub(crate) value: W,
    pub(crate) params: Arc<FieldParams<W>>,
}

impl<W: Limb> FieldElem<W> {
    /// The modulus this element lives under.
    pub fn get_q(&self) -> W {
        self.params.q
    }

    /// Map a plain integer `x` (already reduced or not — taken mod `q`
    /// either way) into this field, entering whatever domain `params`'s
    /// strategy uses internally.
    pub fn convert_to(params: Arc<FieldParams<W>>, x: W) -> Self {
        let plain = W::from_double(x.to_double() % params.q.to_double());
        let value = match &params.kind {
            ReducerKind::Reference | ReducerKind::BarrettFp { .. } => plain,
            ReducerKind::Montgomery { r2, ninv } => reducer::mont_mul(plain, *r2, params.q, *ninv),
        };
        FieldElem { value, params }
    }

    /// Map back out to a plain integer in `[0, q)`.
    pub fn convert_from(&self) -> W {
        match &self.params.kind {
            ReducerKind::Reference | ReducerKind::BarrettFp { .. } => self.value,
            ReducerKind::Montgomery { ninv, .. } => reducer::mont_redc(self.value, self.params.q, *ninv),
        }
    }

    /// Reduce a double-wide value modulo `q` using the configured
    /// strategy. Exposed so callers assembling their own wide products
    /// (e.g. a curve constant precomputation) can reuse the same
    /// reduction the field element methods use internally.
    pub fn reduce(&self, x: W::Double) -> W {
        reducer::reduce(x, &self.params)
    }
}

impl<W: Limb> PartialEq for FieldElem<W> {
    fn eq(&self, other: &Self) -> bool {
        debug_assert_eq!(self.params.q, other.params.q, "comparing field elements of different moduli");
        self.value == other.value
    }
}
impl<W: Limb> Eq for FieldElem<W> {}

impl<W: Limb> zeroize::Zeroize for FieldElem<W> {
    fn zeroize(&mut self) {
        self.value = W::ZERO;
    }
}

impl<W: Limb> subtle::ConstantTimeEq for FieldElem<W> {
    fn ct_eq(&self, other: &Self) -> subtle::Choice {
        debug_assert_eq!(self.params.q, other.params.q, "comparing field elements of different moduli");
        let a = self.value.as_u64();
        let b = other.value.as_u64();
        subtle::Choice::from((a == b) as u8)
    }
}

impl<W: Limb> subtle::ConditionallySelectable for FieldElem<W> {
    fn conditional_select(a: &Self, b: &Self, choice: subtle::Choice) -> Self {
        debug_assert_eq!(a.params.q, b.params.q, "selecting between field elements of different moduli");
        let mask = (choice.unwrap_u8() as u64).wrapping_neg();
        let selected = (a.value.as_u64() & !mask) | (b.value.as_u64() & mask);
        FieldElem { value: W::from_u64(selected), params: a.params.clone() }
    }
}
