//! The three single-limb reduction strategies and the `FieldParams`
//! handle that selects between them.

use limb::Limb;

/// Which reduction strategy a [`FieldParams`] applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReducerStyle {
    /// Plain `% q` via the double-width remainder. Always correct.
    Reference,
    /// Barrett reduction using a precomputed `f64` reciprocal of `q`.
    /// Appropriate when `2*q*q` fits comfortably in `Double` (narrow
    /// moduli); the float estimate is corrected by a bounded loop
    /// rather than trusted outright.
    BarrettFp,
    /// Single-limb Montgomery REDC (`R = 2^W::BITS`).
    Montgomery,
}

/// Precomputed constants for one reduction strategy over one modulus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReducerKind<W: Limb> {
    Reference,
    BarrettFp { inv_q: DoubleF64 },
    Montgomery { r2: W, ninv: W },
}

/// Wraps `f64` so `ReducerKind` can derive `PartialEq`/`Eq` (`f64`
/// itself only has `PartialEq`); equality here is bit-for-bit, which is
/// exactly right for a value that is never produced by arithmetic after
/// construction.
#[derive(Clone, Copy, Debug)]
pub struct DoubleF64(pub f64);
impl PartialEq for DoubleF64 {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}
impl Eq for DoubleF64 {}

/// A modulus plus its reduction strategy's precomputed constants.
#[derive(Clone, Debug)]
pub struct FieldParams<W: Limb> {
    pub q: W,
    pub kind: ReducerKind<W>,
}

impl<W: Limb> FieldParams<W> {
    /// Build parameters for modulus `q` under the given strategy.
    /// `Montgomery` requires `q` odd.
    pub fn new(q: W, style: ReducerStyle) -> Self {
        let kind = match style {
            ReducerStyle::Reference => ReducerKind::Reference,
            ReducerStyle::BarrettFp => {
                let inv_q = 1.0 / (q.as_u64() as f64);
                ReducerKind::BarrettFp { inv_q: DoubleF64(inv_q) }
            }
            ReducerStyle::Montgomery => {
                debug_assert!(q.is_odd(), "Montgomery single-limb reduction requires an odd modulus");
                let ninv = W::ZERO.wrapping_sub(limb::binvert(q));
                let r2 = pow2_mod_single(2 * W::BITS, q);
                ReducerKind::Montgomery { r2, ninv }
            }
        };
        tracing::debug!(bits = W::BITS, ?style, "built single-limb FieldParams");
        FieldParams { q, kind }
    }
}

/// `2^exponent mod q`, via repeated doubling-and-reduce starting from 1.
/// Used to compute Montgomery's `R^2 mod q` without ever materialising
/// `2^(2*BITS)` itself (one bit beyond `Double`'s range).
fn pow2_mod_single<W: Limb>(exponent: u32, q: W) -> W {
    let qd = q.to_double();
    let mut v = W::ONE.to_double() % qd;
    for _ in 0..exponent {
        v = v << 1;
        if v >= qd {
            v = v - qd;
        }
    }
    W::from_double(v)
}

/// Single-limb interleaved Montgomery multiply: `a * b * R^(-1) mod q`.
pub(crate) fn mont_mul<W: Limb>(a: W, b: W, q: W, ninv: W) -> W {
    let prod = a.to_double() * b.to_double();
    let t0 = W::double_lo(prod);
    let t1 = W::double_hi(prod);

    let u = t0.wrapping_mul(ninv);
    let uq = u.to_double() * q.to_double();
    let uq0 = W::double_lo(uq);
    let uq1 = W::double_hi(uq);

    let (_, carry0) = t0.overflowing_add(uq0);
    let (sum1a, carry1a) = t1.overflowing_add(uq1);
    let (sum1, carry1b) = sum1a.overflowing_add(if carry0 { W::ONE } else { W::ZERO });
    let carry_out = carry1a || carry1b;

    let mut result = sum1.to_double();
    if carry_out {
        result = result + (W::ONE.to_double() << W::BITS);
    }
    let qd = q.to_double();
    while result >= qd {
        result = result - qd;
    }
    W::from_double(result)
}

/// `reduce_mont`: `x * R^(-1) mod q` for a Montgomery-domain `x`.
/// Equivalent to `mont_mul(x, 1, q, ninv)`.
pub(crate) fn mont_redc<W: Limb>(x: W, q: W, ninv: W) -> W {
    mont_mul(x, W::ONE, q, ninv)
}

/// Barrett reduction of a double-wide value via a float reciprocal,
/// with a correction loop guaranteeing `0 <= result < q` regardless of
/// the estimate's rounding direction.
fn barrett_reduce<W: Limb>(x: W::Double, q: W, inv_q: f64) -> W {
    let est = (W::double_as_f64(x) * inv_q).floor();
    let mut qt = W::double_from_f64(est);
    let qd = q.to_double();
    let mut prod = qd * qt;
    while prod > x {
        qt = qt - W::double_from_u32(1);
        prod = prod - qd;
    }
    let mut r = x - prod;
    while r >= qd {
        r = r - qd;
    }
    W::from_double(r)
}

/// Reduce `x` (a double-wide value) modulo `params.q` using its
/// configured strategy.
pub(crate) fn reduce<W: Limb>(x: W::Double, params: &FieldParams<W>) -> W {
    match &params.kind {
        ReducerKind::Reference => W::from_double(x % params.q.to_double()),
        ReducerKind::BarrettFp { inv_q } => barrett_reduce(x, params.q, inv_q.0),
        ReducerKind::Montgomery { ninv, .. } => {
            // Treat x as the product of two Montgomery-domain operands
            // awaiting REDC: split it into its constituent limbs and
            // run the same interleaved reduction `mont_mul` uses.
            let t0 = W::double_lo(x);
            let t1 = W::double_hi(x);
            let q = params.q;
            let u = t0.wrapping_mul(*ninv);
            let uq = u.to_double() * q.to_double();
            let uq0 = W::double_lo(uq);
            let uq1 = W::double_hi(uq);
            let (_, carry0) = t0.overflowing_add(uq0);
            let (sum1a, carry1a) = t1.overflowing_add(uq1);
            let (sum1, carry1b) = sum1a.overflowing_add(if carry0 { W::ONE } else { W::ZERO });
            let carry_out = carry1a || carry1b;
            let mut result = sum1.to_double();
            if carry_out {
                result = result + (W::ONE.to_double() << W::BITS);
            }
            let qd = q.to_double();
            while result >= qd {
                result = result - qd;
            }
            W::from_double(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pow2_mod_matches_reference() {
        let q: u32 = 97;
        let r2 = pow2_mod_single(64, q);
        // R^2 mod q where R = 2^32, computed by the obvious (slow) method.
        let expected = ((1u128 << 64) % 97u128) as u32;
        assert_eq!(r2, expected);
    }

    #[test]
    fn mont_mul_matches_plain_mod() {
        let q: u32 = 1_000_003;
        let ninv = u32::ZERO.wrapping_sub(limb::binvert(q));
        let r2 = pow2_mod_single(64, q);
        let a: u32 = 12345;
        let b: u32 = 67890;
        let am = mont_mul(a, r2, q, ninv);
        let bm = mont_mul(b, r2, q, ninv);
        let prodm = mont_mul(am, bm, q, ninv);
        let prod = mont_redc(prodm, q, ninv);
        assert_eq!(prod as u64, (a as u64 * b as u64) % q as u64);
    }

    #[test]
    fn barrett_matches_plain_mod() {
        let q: u32 = 1_000_003;
        let inv_q = 1.0 / (q as f64);
        let a: u64 = 999_999_999;
        let b: u64 = 888_888_887;
        let x = a * b;
        let r = barrett_reduce::<u32>(x as u64, q, inv_q);
        assert_eq!(r as u64, x % q as u64);
    }
}
