//! Euclidean tier: binary gcd, extended gcd, Jacobi symbol.
//!
//! Nothing here is constant-time; these algorithms serve parameter
//! validation and inversion over public moduli.

use crate::basic::{
    add_assign_mixed, cmp, copy_extend, is_zero, shl_assign, shr_assign, sub_assign,
    sub_assign_mixed, trim_len,
};
use crate::div::div_mod;
use crate::mul::mul;
use core::cmp::Ordering;
use stb_types::{trailing_zeros_fast, Word, WORD_BITS};

fn trailing_zero_bits(a: &[Word]) -> usize {
    for (i, &w) in a.iter().enumerate() {
        if w != 0 {
            return i * WORD_BITS + trailing_zeros_fast(w) as usize;
        }
    }
    a.len() * WORD_BITS
}

/// Halve `x` and its coefficient pair, making the pair even first.
///
/// The paired `+b0/+a0` fix-up leaves `a0·ca − b0·cb` unchanged because
/// `a0·b0 − b0·a0 = 0`.
fn halve(x: &mut [Word], ca: &mut [Word], cb: &mut [Word], a0: &[Word], b0: &[Word]) {
    shr_assign(x, 1);
    if ca[0] & 1 == 1 || cb[0] & 1 == 1 {
        let c1 = add_assign_mixed(ca, b0);
        let c2 = add_assign_mixed(cb, a0);
        debug_assert!(c1 == 0 && c2 == 0);
    }
    shr_assign(ca, 1);
    shr_assign(cb, 1);
}

/// Keep a coefficient pair a word short of its capacity by paired
/// subtractions, which also leave `a0·ca − b0·cb` unchanged.
fn normalize(ca: &mut [Word], cb: &mut [Word], a0: &[Word], b0: &[Word]) {
    while cmp(ca, b0) != Ordering::Less && cmp(cb, a0) != Ordering::Less {
        sub_assign_mixed(ca, b0);
        sub_assign_mixed(cb, a0);
    }
}

const fn umax(a: usize, b: usize) -> usize {
    if a > b {
        a
    } else {
        b
    }
}

const fn umin(a: usize, b: usize) -> usize {
    if a < b {
        a
    } else {
        b
    }
}

/// Scratch words for [`gcd`].
pub const fn gcd_deep(na: usize, nb: usize) -> usize {
    2 * umax(na, nb)
}

/// `d ← gcd(a, b)` for nonzero `a`, `b`; `d.len()` must cover the shorter
/// operand. `stack` provides [`gcd_deep`] words.
///
/// Binary algorithm: the common power of two is set aside, then powers of
/// two are stripped from each operand and the larger is replaced by the
/// difference.
pub fn gcd(d: &mut [Word], a: &[Word], b: &[Word], stack: &mut [Word]) {
    debug_assert!(!is_zero(a) && !is_zero(b));
    let n = umax(a.len(), b.len());
    let (u, stack) = stack.split_at_mut(n);
    let v = &mut stack[..n];
    copy_extend(u, a);
    copy_extend(v, b);
    let s = trailing_zero_bits(u).min(trailing_zero_bits(v));
    shr_assign(u, trailing_zero_bits(u));
    shr_assign(v, trailing_zero_bits(v));
    // both odd from here on; the difference of two odds sheds at least one
    // bit per round
    while !is_zero(u) {
        match cmp(u, v) {
            Ordering::Less => {
                sub_assign(v, u);
                shr_assign(v, trailing_zero_bits(v));
            }
            _ => {
                sub_assign(u, v);
                if !is_zero(u) {
                    shr_assign(u, trailing_zero_bits(u));
                }
            }
        }
    }
    let vl = trim_len(v).max(1);
    copy_extend(d, &v[..vl]);
    shl_assign(d, s);
}

/// Scratch words for [`xgcd`].
pub const fn xgcd_deep(na: usize, nb: usize) -> usize {
    2 * umax(na, nb) + na + nb + 2 * (na + 1) + 2 * (nb + 1)
}

/// Extended binary gcd: `d = gcd(a, b)` together with nonnegative
/// coefficients satisfying `a·da − b·db = d`, `da ≤ b/2^s`, `db ≤ a/2^s`
/// (`2^s` the common power of two).
///
/// `a`, `b` must be nonzero; `d.len()` covers the shorter operand,
/// `da.len() == b.len()`, `db.len() == a.len()`. The accumulators are kept
/// in range by paired `+b₀/+a₀` fix-ups on every halving step, which leave
/// the combination `a₀·da − b₀·db` untouched. `stack` provides
/// [`xgcd_deep`] words.
pub fn xgcd(
    d: &mut [Word],
    da: &mut [Word],
    db: &mut [Word],
    a: &[Word],
    b: &[Word],
    stack: &mut [Word],
) {
    debug_assert!(!is_zero(a) && !is_zero(b));
    debug_assert_eq!(da.len(), b.len());
    debug_assert_eq!(db.len(), a.len());
    let n = umax(a.len(), b.len());
    let (u, stack) = stack.split_at_mut(n);
    let (v, stack) = stack.split_at_mut(n);
    let (a0, stack) = stack.split_at_mut(a.len());
    let (b0, stack) = stack.split_at_mut(b.len());
    let (da0, stack) = stack.split_at_mut(b.len() + 1);
    let (db0, stack) = stack.split_at_mut(a.len() + 1);
    let (da1, stack) = stack.split_at_mut(b.len() + 1);
    let db1 = &mut stack[..a.len() + 1];

    copy_extend(u, a);
    copy_extend(v, b);
    // only the common power of two is set aside: the halving fix-ups need
    // at least one of a0, b0 odd
    let s = trailing_zero_bits(u).min(trailing_zero_bits(v));
    shr_assign(u, s);
    shr_assign(v, s);
    copy_extend(a0, &u[..trim_len(u).max(1).min(a.len())]);
    copy_extend(b0, &v[..trim_len(v).max(1).min(b.len())]);

    da0.fill(0);
    da0[0] = 1; // u = a0·1 − b0·0
    db0.fill(0);
    da1.fill(0);
    db1.fill(0);
    db1[0] = 1; // v = b0·1 − a0·0

    loop {
        if is_zero(u) || is_zero(v) {
            break;
        }
        while u[0] & 1 == 0 {
            halve(u, da0, db0, a0, b0);
        }
        while v[0] & 1 == 0 {
            halve(v, da1, db1, a0, b0);
        }
        if cmp(u, v) != Ordering::Less {
            sub_assign(u, v);
            add_assign_mixed(da0, &da1[..b0.len()]);
            add_assign_mixed(db0, &db1[..a0.len()]);
            normalize(da0, db0, a0, b0);
        } else {
            sub_assign(v, u);
            add_assign_mixed(da1, &da0[..b0.len()]);
            add_assign_mixed(db1, &db0[..a0.len()]);
            normalize(da1, db1, a0, b0);
        }
    }

    if is_zero(v) {
        // d = u·2^s, a0·da0 − b0·db0 = u
        normalize(da0, db0, a0, b0);
        let ul = trim_len(u).max(1);
        copy_extend(d, &u[..ul.min(d.len())]);
        shl_assign(d, s);
        debug_assert_eq!(da0[b0.len()], 0);
        debug_assert_eq!(db0[a0.len()], 0);
        da.copy_from_slice(&da0[..b0.len()]);
        db.copy_from_slice(&db0[..a0.len()]);
    } else {
        // d = v·2^s, b0·db1 − a0·da1 = v, so (b0 − da1, a0 − db1) works
        normalize(da1, db1, a0, b0);
        let vl = trim_len(v).max(1);
        copy_extend(d, &v[..vl.min(d.len())]);
        shl_assign(d, s);
        da.copy_from_slice(b0);
        let borrow = sub_assign_mixed(da, &da1[..b0.len()]);
        debug_assert_eq!(borrow, 0);
        db.copy_from_slice(a0);
        let borrow = sub_assign_mixed(db, &db1[..a0.len()]);
        debug_assert_eq!(borrow, 0);
    }
}

/// Scratch words for [`is_coprime`].
pub const fn is_coprime_deep(na: usize, nb: usize) -> usize {
    umin(na, nb) + gcd_deep(na, nb)
}

/// `gcd(a, b) == 1`. `stack` provides [`is_coprime_deep`] words.
pub fn is_coprime(a: &[Word], b: &[Word], stack: &mut [Word]) -> bool {
    let m = umin(a.len(), b.len());
    let (g, rest) = stack.split_at_mut(m);
    gcd(g, a, b, rest);
    trim_len(g) == 1 && g[0] == 1
}

/// Scratch words for [`lcm`].
pub const fn lcm_deep(na: usize, nb: usize) -> usize {
    umin(na, nb) + umax(gcd_deep(na, nb), 3 * (na + nb) + 2 * umin(na, nb) + 1)
}

/// `c ← lcm(a, b) = a·b / gcd(a, b)` for nonzero operands;
/// `c.len() == a.len() + b.len()`. `stack` provides [`lcm_deep`] words.
pub fn lcm(c: &mut [Word], a: &[Word], b: &[Word], stack: &mut [Word]) {
    debug_assert_eq!(c.len(), a.len() + b.len());
    let m = umin(a.len(), b.len());
    let (g, stack) = stack.split_at_mut(m);
    gcd(g, a, b, stack);
    let gl = trim_len(g).max(1);
    let np = a.len() + b.len();
    let (prod, stack) = stack.split_at_mut(np);
    mul(prod, a, b);
    let (q, stack) = stack.split_at_mut(np - gl + 1);
    let (r, stack) = stack.split_at_mut(gl);
    div_mod(q, r, prod, &g[..gl], stack);
    debug_assert!(is_zero(r));
    copy_extend(c, q);
}

/// Scratch words for [`jacobi`].
pub const fn jacobi_deep(na: usize, nn: usize) -> usize {
    5 * umax(na, nn) + 2
}

/// Jacobi symbol `(a/n)` for odd `n > 1`; returns −1, 0 or 1.
/// `stack` provides [`jacobi_deep`] words.
pub fn jacobi(a: &[Word], n: &[Word], stack: &mut [Word]) -> i32 {
    debug_assert!(!is_zero(n) && n[0] & 1 == 1);
    let cap = umax(a.len(), n.len());
    let (u, stack) = stack.split_at_mut(cap);
    let (v, stack) = stack.split_at_mut(cap);
    let (t, stack) = stack.split_at_mut(cap);
    copy_extend(v, n);
    copy_extend(u, a);
    // u ← u mod v
    {
        let vl = trim_len(v);
        let (q, rest) = stack.split_at_mut(cap - vl + 1);
        div_mod(q, &mut t[..vl], u, &v[..vl], rest);
        copy_extend(u, &t[..vl]);
    }
    let mut r = 1i32;
    while !is_zero(u) {
        // strip twos; each pair cancels, an odd count flips for n ≡ ±3 (8)
        let tz = trailing_zero_bits(u);
        if tz & 1 == 1 {
            let low = v[0] & 7;
            if low == 3 || low == 5 {
                r = -r;
            }
        }
        shr_assign(u, tz);
        // quadratic reciprocity
        if u[0] & 3 == 3 && v[0] & 3 == 3 {
            r = -r;
        }
        u.swap_with_slice(&mut v[..]);
        let vl = trim_len(v);
        let (q, rest) = stack.split_at_mut(cap - vl + 1);
        div_mod(q, &mut t[..vl], u, &v[..vl], rest);
        copy_extend(u, &t[..vl]);
    }
    if trim_len(v) == 1 && v[0] == 1 {
        r
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn gcd_u128(mut a: u128, mut b: u128) -> u128 {
        while b != 0 {
            let t = a % b;
            a = b;
            b = t;
        }
        a
    }

    fn words2(x: u128) -> [Word; 2] {
        [x as Word, (x >> WORD_BITS) as Word]
    }

    #[test]
    fn gcd_against_euclid_on_double_words() {
        let mut rng = StdRng::seed_from_u64(0x6cd);
        for _ in 0..300 {
            let x: u128 = ((rng.gen::<u64>() as u128) << 64 | rng.gen::<u64>() as u128) | 1;
            let y: u128 = (rng.gen::<u64>() as u128) << rng.gen_range(0..32);
            let y = y.max(1);
            let mut d = [0 as Word; 2];
            let mut stack = vec![0; gcd_deep(2, 2)];
            gcd(&mut d, &words2(x), &words2(y), &mut stack);
            let expect = gcd_u128(x, y);
            assert_eq!(d, words2(expect));
        }
    }

    #[test]
    fn xgcd_satisfies_the_bezout_contract() {
        let mut rng = StdRng::seed_from_u64(0x9e2);
        for _ in 0..300 {
            let na = rng.gen_range(1..4usize);
            let nb = rng.gen_range(1..4usize);
            let mut a: Vec<Word> = (0..na).map(|_| rng.gen()).collect();
            let mut b: Vec<Word> = (0..nb).map(|_| rng.gen()).collect();
            if crate::basic::is_zero(&a) {
                a[0] = 1;
            }
            if crate::basic::is_zero(&b) {
                b[0] = 1;
            }
            let m = na.min(nb);
            let mut d = vec![0; m];
            let mut da = vec![0; nb];
            let mut db = vec![0; na];
            let mut stack = vec![0; xgcd_deep(na, nb)];
            xgcd(&mut d, &mut da, &mut db, &a, &b, &mut stack);

            // a·da − b·db == d
            let mut lhs = vec![0; na + nb];
            mul(&mut lhs, &a, &da);
            let mut rhs = vec![0; na + nb];
            mul(&mut rhs, &b, &db);
            let borrow = sub_assign(&mut lhs, &rhs);
            assert_eq!(borrow, 0, "coefficient signs flipped");
            let mut dd = vec![0; na + nb];
            copy_extend(&mut dd, &d);
            assert_eq!(lhs, dd);
        }
    }

    #[test]
    fn xgcd_of_coprime_pair_gives_inverse() {
        // 17·da − 40·db = 1, so da = 17^{-1} mod 40 = 33
        let mut d = [0 as Word; 1];
        let mut da = [0 as Word; 1];
        let mut db = [0 as Word; 1];
        let mut stack = vec![0; xgcd_deep(1, 1)];
        xgcd(&mut d, &mut da, &mut db, &[17], &[40], &mut stack);
        assert_eq!(d, [1]);
        assert_eq!((17 * da[0] as u128) % 40, 1);
    }

    #[test]
    fn lcm_small() {
        let mut c = [0 as Word; 2];
        let mut stack = vec![0; lcm_deep(1, 1)];
        lcm(&mut c, &[12], &[18], &mut stack);
        assert_eq!(c, [36, 0]);
    }

    #[test]
    fn coprime_small() {
        let mut stack = vec![0; is_coprime_deep(1, 1)];
        assert!(is_coprime(&[35], &[64], &mut stack));
        assert!(!is_coprime(&[36], &[64], &mut stack));
    }

    #[test]
    fn jacobi_fixed_vectors() {
        // checked against an independent implementation over
        // p = 2^256 − 189
        let mut p = [Word::MAX; 4];
        p[0] = p[0] - 188;
        let mut stack = vec![0; jacobi_deep(4, 4)];
        assert_eq!(jacobi(&[2, 0, 0, 0], &p, &mut stack), -1);
        assert_eq!(jacobi(&[3, 0, 0, 0], &p, &mut stack), -1);
        assert_eq!(jacobi(&[5, 0, 0, 0], &p, &mut stack), -1);
        assert_eq!(jacobi(&[189, 0, 0, 0], &p, &mut stack), 1);
        assert_eq!(jacobi(&[0, 0, 0, 0], &p, &mut stack), 0);
    }

    #[test]
    fn jacobi_squares_are_residues() {
        let mut rng = StdRng::seed_from_u64(0x1ac0b1);
        let n = [0x8f1d_3c55_0a77_21b3u64 as Word | 1, 0, 0, 0];
        let mut stack = vec![0; jacobi_deep(4, 4)];
        for _ in 0..100 {
            let x = [rng.gen::<Word>()];
            let mut sq = [0 as Word; 2];
            crate::mul::sqr(&mut sq, &x);
            let arg = [sq[0], sq[1], 0, 0];
            let j = jacobi(&arg, &n, &mut stack);
            assert!(j == 1 || j == 0);
        }
    }
}
