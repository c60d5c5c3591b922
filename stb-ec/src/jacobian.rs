//! Jacobian-coordinate arithmetic.
//!
//! A Jacobian point is a `3n`-word slice `[X | Y | Z]` with affine image
//! `(X/Z², Y/Z³)`; `Z = 0` encodes the identity inside this module only —
//! the encoding never crosses a public boundary. The general-`A` formulas
//! are used; nothing assumes `A = −3`.

use crate::curve::Curve;
use crate::point::{Affine, AffineOrInf};
use stb_types::Word;

/// Split a Jacobian slice into coordinates.
pub(crate) fn coords(p: &[Word], n: usize) -> (&[Word], &[Word], &[Word]) {
    let (x, rest) = p.split_at(n);
    let (y, z) = rest.split_at(n);
    (x, y, z)
}

pub(crate) fn coords_mut(p: &mut [Word], n: usize) -> (&mut [Word], &mut [Word], &mut [Word]) {
    let (x, rest) = p.split_at_mut(n);
    let (y, z) = rest.split_at_mut(n);
    (x, y, z)
}

/// Write the canonical identity `(1, 1, 0)` (field unity coordinates).
pub(crate) fn set_infinity(curve: &Curve, p: &mut [Word]) {
    let n = curve.words();
    let (x, y, z) = coords_mut(p, n);
    x.copy_from_slice(curve.ring().unity());
    y.copy_from_slice(curve.ring().unity());
    z.fill(0);
}

/// `true` iff the slice encodes the identity. Variable-time.
pub(crate) fn is_infinity(p: &[Word], n: usize) -> bool {
    stb_zz::is_zero(&p[2 * n..])
}

/// Lift an affine point to Jacobian with `Z = 1`.
pub(crate) fn lift_affine(curve: &Curve, out: &mut [Word], p: &Affine) {
    let n = curve.words();
    let (x, y, z) = coords_mut(out, n);
    x.copy_from_slice(&p.x);
    y.copy_from_slice(&p.y);
    z.copy_from_slice(curve.ring().unity());
}

/// Jacobian doubling, branch-free. The identity passes through (`Z = 0`
/// begets `Z3 = 0`), and `Y = 0` cannot occur on odd-order curves.
/// `out` must be distinct from `p`.
pub(crate) fn dbl_j(curve: &Curve, out: &mut [Word], p: &[Word], stack: &mut [Word]) {
    let f = curve.ring();
    let n = curve.words();
    let (x1, y1, z1) = coords(p, n);
    let (x3, y3, z3) = coords_mut(out, n);
    let (xx, stack) = stack.split_at_mut(n);
    let (yy, stack) = stack.split_at_mut(n);
    let (yyyy, stack) = stack.split_at_mut(n);
    let (zz, stack) = stack.split_at_mut(n);
    let (s, stack) = stack.split_at_mut(n);
    let (m, stack) = stack.split_at_mut(n);
    let (t, stack) = stack.split_at_mut(n);

    f.sqr(xx, x1, stack);
    f.sqr(yy, y1, stack);
    f.sqr(yyyy, yy, stack);
    f.sqr(zz, z1, stack);
    // S = 2·((X + YY)² − XX − YYYY)
    f.add(t, x1, yy);
    f.sqr(s, t, stack);
    f.sub_assign(s, xx);
    f.sub_assign(s, yyyy);
    f.double_assign(s);
    // M = 3·XX + A·ZZ²
    f.sqr(t, zz, stack);
    f.mul(m, curve.a_coeff(), t, stack);
    f.double(t, xx);
    f.add_assign(t, xx);
    f.add_assign(m, t);
    // Z3 = (Y + Z)² − YY − ZZ
    f.add(t, y1, z1);
    f.sqr(z3, t, stack);
    f.sub_assign(z3, yy);
    f.sub_assign(z3, zz);
    // X3 = M² − 2S
    f.sqr(x3, m, stack);
    f.sub_assign(x3, s);
    f.sub_assign(x3, s);
    // Y3 = M·(S − X3) − 8·YYYY
    f.sub(t, s, x3);
    f.mul(y3, m, t, stack);
    f.double(t, yyyy);
    f.double_assign(t);
    f.double_assign(t);
    f.sub_assign(y3, t);
}

/// Shared tail of the two addition flavours: everything after `H` and `R`
/// are known to be usable. Writes `out` from `(U1, S1, H, R, Z1, Z2)`.
fn add_j_tail(
    curve: &Curve,
    out: &mut [Word],
    z1: &[Word],
    z2: &[Word],
    u1: &[Word],
    s1: &[Word],
    h: &[Word],
    r: &[Word],
    stack: &mut [Word],
) {
    let f = curve.ring();
    let n = curve.words();
    let (x3, y3, z3) = coords_mut(out, n);
    let (hh, stack) = stack.split_at_mut(n);
    let (hhh, stack) = stack.split_at_mut(n);
    let (v, stack) = stack.split_at_mut(n);
    let (t, stack) = stack.split_at_mut(n);
    f.sqr(hh, h, stack);
    f.mul(hhh, h, hh, stack);
    f.mul(v, u1, hh, stack);
    // X3 = R² − HHH − 2V
    f.sqr(x3, r, stack);
    f.sub_assign(x3, hhh);
    f.sub_assign(x3, v);
    f.sub_assign(x3, v);
    // Y3 = R·(V − X3) − S1·HHH
    f.sub(t, v, x3);
    f.mul(y3, r, t, stack);
    f.mul(t, s1, hhh, stack);
    f.sub_assign(y3, t);
    // Z3 = Z1·Z2·H
    f.mul(t, z1, z2, stack);
    f.mul(z3, t, h, stack);
}

/// General Jacobian addition, variable-time: identities pass through, the
/// equality case short-circuits to a doubling and opposition to the
/// identity. `out` must be distinct from both inputs.
pub(crate) fn add_j(curve: &Curve, out: &mut [Word], p: &[Word], q: &[Word], stack: &mut [Word]) {
    let n = curve.words();
    if is_infinity(p, n) {
        out.copy_from_slice(q);
        return;
    }
    if is_infinity(q, n) {
        out.copy_from_slice(p);
        return;
    }
    let f = curve.ring();
    let (x1, y1, z1) = coords(p, n);
    let (x2, y2, z2) = coords(q, n);
    let (z1z1, stack) = stack.split_at_mut(n);
    let (z2z2, stack) = stack.split_at_mut(n);
    let (u1, stack) = stack.split_at_mut(n);
    let (u2, stack) = stack.split_at_mut(n);
    let (s1, stack) = stack.split_at_mut(n);
    let (s2, stack) = stack.split_at_mut(n);
    let (t, stack) = stack.split_at_mut(n);

    f.sqr(z1z1, z1, stack);
    f.sqr(z2z2, z2, stack);
    f.mul(u1, x1, z2z2, stack);
    f.mul(u2, x2, z1z1, stack);
    f.mul(t, z2, z2z2, stack);
    f.mul(s1, y1, t, stack);
    f.mul(t, z1, z1z1, stack);
    f.mul(s2, y2, t, stack);

    f.sub_assign(u2, u1); // H
    f.sub_assign(s2, s1); // R
    if f.is_zero_elem(u2) {
        if f.is_zero_elem(s2) {
            dbl_j(curve, out, p, stack);
        } else {
            set_infinity(curve, out);
        }
        return;
    }
    add_j_tail(curve, out, z1, z2, u1, s1, u2, s2, stack);
}

/// Straight-line Jacobian addition for the constant-time ladder: no
/// identity or degeneracy checks, so the caller must guarantee distinct,
/// non-opposite, finite inputs. `out` must be distinct from both inputs.
pub(crate) fn add_j_ct(
    curve: &Curve,
    out: &mut [Word],
    p: &[Word],
    q: &[Word],
    stack: &mut [Word],
) {
    let f = curve.ring();
    let n = curve.words();
    let (x1, y1, z1) = coords(p, n);
    let (x2, y2, z2) = coords(q, n);
    let (z1z1, stack) = stack.split_at_mut(n);
    let (z2z2, stack) = stack.split_at_mut(n);
    let (u1, stack) = stack.split_at_mut(n);
    let (u2, stack) = stack.split_at_mut(n);
    let (s1, stack) = stack.split_at_mut(n);
    let (s2, stack) = stack.split_at_mut(n);

    f.sqr(z1z1, z1, stack);
    f.sqr(z2z2, z2, stack);
    f.mul(u1, x1, z2z2, stack);
    f.mul(u2, x2, z1z1, stack);
    f.mul_assign(z2z2, z2, stack);
    f.mul(s1, y1, z2z2, stack);
    f.mul_assign(z1z1, z1, stack);
    f.mul(s2, y2, z1z1, stack);
    f.sub_assign(u2, u1); // H
    f.sub_assign(s2, s1); // R
    add_j_tail(curve, out, z1, z2, u1, s1, u2, s2, stack);
}

/// Convert a Jacobian point to affine: `(X/Z², Y/Z³)`, or the identity
/// when `Z = 0`.
pub(crate) fn j_to_affine(curve: &Curve, p: &[Word], stack: &mut [Word]) -> AffineOrInf {
    let f = curve.ring();
    let n = curve.words();
    let (x1, y1, z1) = coords(p, n);
    if stb_zz::is_zero(z1) {
        return AffineOrInf::Infinity;
    }
    let (zi, stack) = stack.split_at_mut(n);
    let (zi2, stack) = stack.split_at_mut(n);
    let (t, stack) = stack.split_at_mut(n);
    f.inv(zi, z1, stack).expect("nonzero Z is invertible");
    f.sqr(zi2, zi, stack);
    let mut x = vec![0; n];
    let mut y = vec![0; n];
    f.mul(&mut x, x1, zi2, stack);
    f.mul(t, zi2, zi, stack);
    f.mul(&mut y, y1, t, stack);
    AffineOrInf::Point(Affine::new(x, y))
}
