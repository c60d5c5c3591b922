//! Shallue–van de Woestijne–Ulas mapping onto the curve.
//!
//! For `p ≡ 3 (mod 4)` the element `ξ = −1` is a non-residue, which makes
//! the simplified SWU construction total: one of the two candidate
//! abscissae always carries a square ordinate. Square roots are
//! `g^{(p+1)/4}` powers. The mapping is deterministic; degenerate inputs
//! (`u⁴ = u²`) collapse to the first candidate with the `1 + 1/t` term
//! dropped.

use crate::curve::Curve;
use crate::point::Affine;
use stb_types::Word;

/// Evaluate `g(x) = x³ + Ax + B` into `g`.
fn eval_rhs(curve: &Curve, g: &mut [Word], x: &[Word], stack: &mut [Word]) {
    let f = curve.ring();
    let n = curve.words();
    let (t, stack) = stack.split_at_mut(n);
    f.sqr(g, x, stack);
    f.mul_assign(g, x, stack);
    f.mul(t, curve.a_coeff(), x, stack);
    f.add_assign(g, t);
    f.add_assign(g, curve.b_coeff());
}

/// Map a field element (internal representation) to a curve point.
///
/// Always returns a point on the curve; the caller provides
/// [`Curve::deep`] scratch.
pub fn swu_map(curve: &Curve, u: &[Word], stack: &mut [Word]) -> Affine {
    let f = curve.ring();
    let n = curve.words();
    let (t1, stack) = stack.split_at_mut(n);
    let (t2, stack) = stack.split_at_mut(n);
    let (x, stack) = stack.split_at_mut(n);
    let (g, stack) = stack.split_at_mut(n);
    let (y, stack) = stack.split_at_mut(n);
    let (t, stack) = stack.split_at_mut(n);

    // t1 = ξ·u² = −u², t2 = t1² + t1 = u⁴ − u²
    f.sqr(t1, u, stack);
    f.neg_assign(t1);
    f.sqr(t2, t1, stack);
    f.add_assign(t2, t1);

    // x₁ = (−B/A)·(1 + 1/t2), or −B/A for the degenerate t2 = 0
    if f.is_zero_elem(curve.a_coeff()) {
        // the construction needs A ≠ 0; j-invariant-0 curves are outside
        // the supported parameter families
        return curve.base().clone();
    }
    f.inv(t, curve.a_coeff(), stack)
        .expect("nonzero element is invertible");
    f.mul(x, curve.b_coeff(), t, stack);
    f.neg_assign(x);
    if !f.is_zero_elem(t2) {
        f.inv(t, t2, stack).expect("nonzero element is invertible");
        f.add_assign(t, f.unity());
        f.mul_assign(x, t, stack);
    }

    // first candidate
    eval_rhs(curve, g, x, stack);
    f.power(y, g, curve.sqrt_exp(), stack);
    f.sqr(t, y, stack);
    if f.equal(t, g) {
        return Affine::new(x.to_vec(), y.to_vec());
    }

    // second candidate x₂ = ξu²·x₁
    f.mul_assign(x, t1, stack);
    eval_rhs(curve, g, x, stack);
    f.power(y, g, curve.sqrt_exp(), stack);
    f.sqr(t, y, stack);
    if f.equal(t, g) {
        return Affine::new(x.to_vec(), y.to_vec());
    }

    // unreachable for p ≡ 3 (mod 4); keep the map total regardless
    curve.base().clone()
}
