//! Exception-free addition in homogeneous coordinates.
//!
//! Algorithms 1 and 2 of Renes–Costello–Batina (eprint 2015/1060) for a
//! general coefficient `A`. These close the corner cases the signed-window
//! ladder cannot exclude on its final accumulation: the identity on either
//! side, opposite inputs and coinciding inputs all produce the correct
//! result through the same straight-line sequence.
//!
//! A homogeneous point is a `3n`-word slice `[X | Y | Z]` with affine
//! image `(X/Z, Y/Z)`; the identity is `(0 : Y : 0)`, `Y ≠ 0`.

use crate::curve::Curve;
use crate::jacobian::coords;
use crate::point::{Affine, AffineOrInf};
use stb_types::Word;

/// Promote a Jacobian point to homogeneous coordinates:
/// `(X, Y, Z)_J → (X·Z, Y, Z³)`. The Jacobian identity `(1, 1, 0)` maps
/// to `(0, 1, 0)`.
pub(crate) fn j_to_h(curve: &Curve, out: &mut [Word], p: &[Word], stack: &mut [Word]) {
    let f = curve.ring();
    let n = curve.words();
    let (x, y, z) = coords(p, n);
    let (t, stack) = stack.split_at_mut(n);
    let (hx, rest) = out.split_at_mut(n);
    let (hy, hz) = rest.split_at_mut(n);
    f.mul(hx, x, z, stack);
    hy.copy_from_slice(y);
    f.sqr(t, z, stack);
    f.mul(hz, t, z, stack);
}

/// Complete homogeneous addition (RCB Algorithm 1, arbitrary `A`).
/// `out` must be distinct from both inputs.
pub(crate) fn add_h(curve: &Curve, out: &mut [Word], p: &[Word], q: &[Word], stack: &mut [Word]) {
    let f = curve.ring();
    let n = curve.words();
    let a = curve.a_coeff();
    let b3 = curve.b3_coeff();
    let (x1, y1, z1) = coords(p, n);
    let (x2, y2, z2) = coords(q, n);
    let (t0, stack) = stack.split_at_mut(n);
    let (t1, stack) = stack.split_at_mut(n);
    let (t2, stack) = stack.split_at_mut(n);
    let (t3, stack) = stack.split_at_mut(n);
    let (t4, stack) = stack.split_at_mut(n);
    let (t5, stack) = stack.split_at_mut(n);
    let (x3, rest) = out.split_at_mut(n);
    let (y3, z3) = rest.split_at_mut(n);

    f.mul(t0, x1, x2, stack);
    f.mul(t1, y1, y2, stack);
    f.mul(t2, z1, z2, stack);
    f.add(t3, x1, y1);
    f.add(t4, x2, y2);
    f.mul_assign(t3, t4, stack);
    f.add(t4, t0, t1);
    f.sub_assign(t3, t4);
    f.add(t4, x1, z1);
    f.add(t5, x2, z2);
    f.mul_assign(t4, t5, stack);
    f.add(t5, t0, t2);
    f.sub_assign(t4, t5);
    f.add(t5, y1, z1);
    f.add(x3, y2, z2);
    f.mul_assign(t5, x3, stack);
    f.add(x3, t1, t2);
    f.sub_assign(t5, x3);
    f.mul(z3, a, t4, stack);
    f.mul(x3, b3, t2, stack);
    f.add_assign(z3, x3);
    f.sub(x3, t1, z3);
    f.add_assign(z3, t1);
    f.mul(y3, x3, z3, stack);
    f.double(t1, t0);
    f.add_assign(t1, t0);
    f.mul_assign(t2, a, stack);
    f.mul_assign(t4, b3, stack);
    f.add_assign(t1, t2);
    f.sub_from(t2, t0);
    f.mul_assign(t2, a, stack);
    f.add_assign(t4, t2);
    f.mul(t0, t1, t4, stack);
    f.add_assign(y3, t0);
    f.mul(t0, t5, t4, stack);
    f.mul_assign(x3, t3, stack);
    f.sub_assign(x3, t0);
    f.mul(t0, t3, t1, stack);
    f.mul_assign(z3, t5, stack);
    f.add_assign(z3, t0);
}

/// Complete mixed addition (RCB Algorithm 2, arbitrary `A`): the second
/// summand is affine. `out` must be distinct from the inputs.
pub(crate) fn madd_h(
    curve: &Curve,
    out: &mut [Word],
    p: &[Word],
    q: &Affine,
    stack: &mut [Word],
) {
    let f = curve.ring();
    let n = curve.words();
    let a = curve.a_coeff();
    let b3 = curve.b3_coeff();
    let (x1, y1, z1) = coords(p, n);
    let (x2, y2) = (&q.x[..], &q.y[..]);
    let (t0, stack) = stack.split_at_mut(n);
    let (t1, stack) = stack.split_at_mut(n);
    let (t2, stack) = stack.split_at_mut(n);
    let (t3, stack) = stack.split_at_mut(n);
    let (t4, stack) = stack.split_at_mut(n);
    let (t5, stack) = stack.split_at_mut(n);
    let (x3, rest) = out.split_at_mut(n);
    let (y3, z3) = rest.split_at_mut(n);

    f.mul(t0, x1, x2, stack);
    f.mul(t1, y1, y2, stack);
    f.add(t3, x2, y2);
    f.add(t4, x1, y1);
    f.mul_assign(t3, t4, stack);
    f.add(t4, t0, t1);
    f.sub_assign(t3, t4);
    f.mul(t4, x2, z1, stack);
    f.add_assign(t4, x1);
    f.mul(t5, y2, z1, stack);
    f.add_assign(t5, y1);
    f.mul(z3, a, t4, stack);
    f.mul(x3, b3, z1, stack);
    f.add_assign(z3, x3);
    f.sub(x3, t1, z3);
    f.add_assign(z3, t1);
    f.mul(y3, x3, z3, stack);
    f.double(t1, t0);
    f.add_assign(t1, t0);
    f.mul(t2, a, z1, stack);
    f.mul_assign(t4, b3, stack);
    f.add_assign(t1, t2);
    f.sub_from(t2, t0);
    f.mul_assign(t2, a, stack);
    f.add_assign(t4, t2);
    f.mul(t0, t1, t4, stack);
    f.add_assign(y3, t0);
    f.mul(t0, t5, t4, stack);
    f.mul_assign(x3, t3, stack);
    f.sub_assign(x3, t0);
    f.mul(t0, t3, t1, stack);
    f.mul_assign(z3, t5, stack);
    f.add_assign(z3, t0);
}

/// Convert a homogeneous point to affine: `(X/Z, Y/Z)`, or the identity
/// when `Z = 0`.
pub(crate) fn h_to_affine(curve: &Curve, p: &[Word], stack: &mut [Word]) -> AffineOrInf {
    let f = curve.ring();
    let n = curve.words();
    let (x1, y1, z1) = coords(p, n);
    if stb_zz::is_zero(z1) {
        return AffineOrInf::Infinity;
    }
    let (zi, stack) = stack.split_at_mut(n);
    f.inv(zi, z1, stack).expect("nonzero Z is invertible");
    let mut x = vec![0; n];
    let mut y = vec![0; n];
    f.mul(&mut x, x1, zi, stack);
    f.mul(&mut y, y1, zi, stack);
    AffineOrInf::Point(Affine::new(x, y))
}
