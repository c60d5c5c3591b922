//! Key derivation and the MQV scalar algebra shared by the protocols.

use rand_core::CryptoRngCore;
use stb_ec::{Affine, AffineOrInf, Curve};
use stb_types::{words_from_octets, Error, Result, Word, WORD_BITS};
use zeroize::Zeroize;

/// The KRP level anchor `1^96`.
pub(crate) const LEVEL: [u8; 12] = [0xff; 12];

/// An all-zero cipher block, the body of A's confirmation tag.
pub(crate) const ZERO_BLOCK: [u8; 16] = [0x00; 16];

/// An all-ones cipher block, the body of B's confirmation tag.
pub(crate) const ONES_BLOCK: [u8; 16] = [0xff; 16];

/// The KRP selector block: the subkey number, padded with ones.
fn selector(num: u8) -> [u8; 16] {
    let mut h = [0xff; 16];
    h[0] = num;
    h
}

/// Subkey `num` of the raw shared secret.
pub(crate) fn subkey(kraw: &[u8; 32], num: u8) -> [u8; 32] {
    stb_belt::krp(kraw, &LEVEL, &selector(num))
}

/// Draw a uniform scalar in `{1, …, q−1}` by rejection sampling.
pub(crate) fn draw_scalar(curve: &Curve, rng: &mut dyn CryptoRngCore) -> Result<Vec<Word>> {
    let mut oct = vec![0u8; curve.octets()];
    let mut d = vec![0 as Word; curve.words()];
    loop {
        rng.try_fill_bytes(&mut oct).map_err(|_| Error::BadRng)?;
        words_from_octets(&mut d, &oct);
        if !stb_zz::is_zero(&d) && stb_zz::cmp(&d, curve.order()) == core::cmp::Ordering::Less {
            break;
        }
    }
    oct.zeroize();
    Ok(d)
}

/// The challenge scalar `2^l + t`, where `t` is the low `l` bits of
/// `belt-hash(⟨Va⟩ ‖ ⟨Vb⟩)` over the ephemerals' abscissae.
pub(crate) fn challenge(curve: &Curve, va_x: &[u8], vb_x: &[u8]) -> Vec<Word> {
    let l = curve.octets() * 4;
    let h = stb_belt::hash_parts(&[va_x, vb_x]);
    let mut t = vec![0 as Word; curve.words()];
    let t_octets = l / 8;
    let mut words = vec![0 as Word; stb_types::words_for_octets(t_octets)];
    words_from_octets(&mut words, &h[..t_octets]);
    t[..words.len()].copy_from_slice(&words);
    t[l / WORD_BITS] |= 1 << (l % WORD_BITS);
    t
}

/// `(u − w·d) mod q`: the party's signature-like response scalar.
pub(crate) fn response_scalar(
    curve: &Curve,
    u: &[Word],
    w: &[Word],
    d: &[Word],
) -> Vec<Word> {
    let n = curve.words();
    let q = curve.order();
    let mut prod = vec![0 as Word; 2 * n];
    stb_zz::mul(&mut prod, w, d);
    let mut wd = vec![0 as Word; n];
    let mut stack = vec![0 as Word; stb_zz::rem_deep(2 * n, n)];
    stb_zz::rem(&mut wd, &prod, q, &mut stack);
    prod.zeroize();
    let mut s = vec![0 as Word; n];
    stb_zz::sub_mod(&mut s, u, &wd, q);
    wd.zeroize();
    s
}

/// `V − w·Q`, the MQV combination point. A vanishing combination is
/// replaced by the base point so the shared point is always defined.
pub(crate) fn mqv_point(curve: &Curve, v: &Affine, w: &[Word], q_pub: &Affine) -> Affine {
    let n = curve.words();
    let mut stack = curve.alloc_stack();
    let mut one = vec![0 as Word; n];
    one[0] = 1;
    let mut neg_w = vec![0 as Word; n];
    let borrow = stb_zz::sub(&mut neg_w, curve.order(), w);
    debug_assert_eq!(borrow, 0);
    match curve.mul_add2(&one, v, &neg_w, q_pub, &mut stack) {
        AffineOrInf::Point(p) => p,
        AffineOrInf::Infinity => curve.base().clone(),
    }
}

/// `s·R` with the vanishing case again pinned to the base point.
pub(crate) fn shared_point(curve: &Curve, s: &[Word], r: &Affine) -> Affine {
    let mut stack = curve.alloc_stack();
    match curve.mul_safe(r, s, &mut stack) {
        AffineOrInf::Point(p) => p,
        AffineOrInf::Infinity => curve.base().clone(),
    }
}

/// Check the algebraic identity `s·G + w·Q = V` (BSTS authentication).
pub(crate) fn check_identity(
    curve: &Curve,
    s: &[Word],
    w: &[Word],
    q_pub: &Affine,
    v: &Affine,
) -> Result<()> {
    let mut stack = curve.alloc_stack();
    match curve.mul_add2(s, curve.base(), w, q_pub, &mut stack) {
        AffineOrInf::Point(p) if &p == v => Ok(()),
        _ => Err(Error::Auth),
    }
}

/// Encode the abscissa of a point.
pub(crate) fn x_octets(curve: &Curve, p: &Affine) -> Vec<u8> {
    let mut out = vec![0u8; curve.octets()];
    let mut stack = curve.alloc_stack();
    curve.encode_point_x(&mut out, p, &mut stack);
    out
}

/// Encode a full point.
pub(crate) fn point_octets(curve: &Curve, p: &Affine) -> Vec<u8> {
    let mut out = vec![0u8; 2 * curve.octets()];
    let mut stack = curve.alloc_stack();
    curve.encode_point(&mut out, p, &mut stack);
    out
}
