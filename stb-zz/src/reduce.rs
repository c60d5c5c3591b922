//! The four modular reduction strategies.
//!
//! Each reduction takes a `2n`-word input in place and leaves the canonical
//! residue in the low `n` words. The strategies trade preconditions on the
//! modulus shape for per-call cost; the quotient-ring layer owns the
//! selection logic.

use crate::basic::{ge_mask, sub_assign_mixed, sub_borrow_masked};
use crate::div::{div_mod, div_mod_deep, rem, rem_deep};
use crate::mul::{add_mul_word, mul};
use core::cmp::Ordering;
use stb_types::{DWord, Mask, Word, WORD_BITS};

/// Number of words of the Barrett parameter for an `n`-word modulus:
/// `⌊B^{2n}/mod⌋` never exceeds `n + 2` words.
pub const fn barrett_words(n: usize) -> usize {
    n + 2
}

/// Scratch words for [`red_plain`].
pub const fn red_plain_deep(n: usize) -> usize {
    n + rem_deep(2 * n, n)
}

/// Plain reduction: one Knuth-D pass. Works for any modulus with a nonzero
/// top word. `stack` provides [`red_plain_deep`] words.
pub fn red_plain(a: &mut [Word], m: &[Word], stack: &mut [Word]) {
    let n = m.len();
    debug_assert_eq!(a.len(), 2 * n);
    debug_assert!(m[n - 1] != 0);
    let (r, rest) = stack.split_at_mut(n);
    rem(r, a, m, rest);
    a[..n].copy_from_slice(r);
    a[n..].fill(0);
}

/// `Some(c)` iff the modulus has the Crandall shape `B^n − c`,
/// `0 < c < B`, `n ≥ 2`.
pub fn crandall_c(m: &[Word]) -> Option<Word> {
    let n = m.len();
    if n < 2 || m[0] == 0 {
        return None;
    }
    if m[1..].iter().all(|&w| w == Word::MAX) {
        Some(m[0].wrapping_neg())
    } else {
        None
    }
}

/// Crandall reduction for `m = B^n − c`: two multiply-and-fold passes and
/// one masked subtraction. No scratch.
pub fn red_crandall(a: &mut [Word], m: &[Word]) {
    let n = m.len();
    debug_assert_eq!(a.len(), 2 * n);
    let c = crandall_c(m).expect("modulus must have the Crandall shape");
    let (lo, hi) = a.split_at_mut(n);
    // value = lo + hi·B^n ≡ lo + hi·c
    let carry = add_mul_word(lo, hi, c);
    hi.fill(0);
    // fold carry·c into the two low words, then ripple
    let t = carry as DWord * c as DWord;
    let s0 = lo[0] as DWord + (t as Word) as DWord;
    lo[0] = s0 as Word;
    let s1 = lo[1] as DWord + ((t >> WORD_BITS) as Word) as DWord + (s0 >> WORD_BITS);
    lo[1] = s1 as Word;
    let mut cc = (s1 >> WORD_BITS) as Word;
    for w in lo[2..].iter_mut() {
        let s = *w as DWord + cc as DWord;
        *w = s as Word;
        cc = (s >> WORD_BITS) as Word;
    }
    // a second wrap past B^n contributes one more c
    let fold = c & Mask::from_bit(cc).word();
    let mut cc = fold;
    for w in lo.iter_mut() {
        let s = *w as DWord + cc as DWord;
        *w = s as Word;
        cc = (s >> WORD_BITS) as Word;
    }
    debug_assert_eq!(cc, 0);
    sub_borrow_masked(lo, m, ge_mask(lo, m));
}

/// Scratch words for [`red_barrett`].
pub const fn red_barrett_deep(n: usize) -> usize {
    (2 * n + 3) + (2 * n + 2) + (n + 1)
}

/// Barrett reduction with the precomputed parameter
/// `mu = ⌊B^{2n}/m⌋` of [`barrett_words`] length.
/// `stack` provides [`red_barrett_deep`] words.
pub fn red_barrett(a: &mut [Word], m: &[Word], mu: &[Word], stack: &mut [Word]) {
    let n = m.len();
    debug_assert_eq!(a.len(), 2 * n);
    debug_assert_eq!(mu.len(), barrett_words(n));
    let (q2, stack) = stack.split_at_mut(2 * n + 3);
    let (r2, stack) = stack.split_at_mut(2 * n + 2);
    let r = &mut stack[..n + 1];
    // q3 = ⌊⌊a/B^{n−1}⌋·mu / B^{n+1}⌋
    mul(q2, &a[n - 1..], mu);
    let q3 = &q2[n + 1..];
    // r = (a − q3·m) mod B^{n+1}
    mul(r2, q3, m);
    r.copy_from_slice(&a[..n + 1]);
    sub_assign_mixed(r, &r2[..n + 1]);
    // at most two corrections
    let mut guard = 0;
    while r[n] != 0 || crate::basic::cmp(&r[..n], m) != Ordering::Less {
        sub_assign_mixed(r, m);
        guard += 1;
        debug_assert!(guard <= 2);
    }
    a[..n].copy_from_slice(&r[..n]);
    a[n..].fill(0);
}

/// Scratch words for [`barrett_param`].
pub const fn barrett_param_deep(n: usize) -> usize {
    (2 * n + 1) + n + div_mod_deep(2 * n + 1, n)
}

/// Compute the Barrett parameter `mu ← ⌊B^{2n}/m⌋` into a buffer of
/// [`barrett_words`] length. `stack` provides [`barrett_param_deep`] words.
pub fn barrett_param(mu: &mut [Word], m: &[Word], stack: &mut [Word]) {
    let n = m.len();
    debug_assert_eq!(mu.len(), barrett_words(n));
    debug_assert!(m[n - 1] != 0);
    let (num, stack) = stack.split_at_mut(2 * n + 1);
    let (r, stack) = stack.split_at_mut(n);
    num.fill(0);
    num[2 * n] = 1;
    div_mod(mu, r, num, m, stack);
}

/// `−m[0]^{−1} mod B` for an odd modulus, by Newton lifting.
pub fn mont_word_inv(m0: Word) -> Word {
    debug_assert!(m0 & 1 == 1);
    // each step doubles the number of correct low bits, starting from 3
    let mut x = m0;
    for _ in 0..6 {
        x = x.wrapping_mul((2 as Word).wrapping_sub(m0.wrapping_mul(x)));
    }
    debug_assert!(m0.wrapping_mul(x) == 1);
    x.wrapping_neg()
}

/// Montgomery reduction: for odd `m` and `a < m·B^n`, replaces `a` by
/// `a·B^{−n} mod m` in the low `n` words. `m0_inv` is [`mont_word_inv`]
/// of `m[0]`. No scratch; every word row is walked in full.
pub fn red_mont(a: &mut [Word], m: &[Word], m0_inv: Word) {
    let n = m.len();
    debug_assert_eq!(a.len(), 2 * n);
    debug_assert!(m[0] & 1 == 1);
    let mut top: Word = 0;
    for i in 0..n {
        let u = a[i].wrapping_mul(m0_inv);
        let mut cc = add_mul_word(&mut a[i..i + n], m, u);
        debug_assert_eq!(a[i], 0);
        for w in a[i + n..].iter_mut() {
            let s = *w as DWord + cc as DWord;
            *w = s as Word;
            cc = (s >> WORD_BITS) as Word;
        }
        top += cc;
    }
    debug_assert!(top <= 1);
    let (lo, hi) = a.split_at_mut(n);
    let need = Mask::from_bit(top).or(ge_mask(hi, m));
    sub_borrow_masked(hi, m, need);
    lo.copy_from_slice(hi);
    hi.fill(0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic::{cmp, shl_assign};
    use crate::mul::mul;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    const N: usize = 4;

    fn p256() -> [Word; N] {
        let mut p = [Word::MAX; N];
        p[0] -= 188;
        p
    }

    fn rand_mod(rng: &mut StdRng, m: &[Word]) -> Vec<Word> {
        loop {
            let v: Vec<Word> = (0..m.len()).map(|_| rng.gen()).collect();
            if cmp(&v, m) == Ordering::Less {
                return v;
            }
        }
    }

    #[test]
    fn crandall_shape_detection() {
        assert_eq!(crandall_c(&p256()), Some(189));
        assert_eq!(crandall_c(&[Word::MAX; 4]), Some(1));
        assert_eq!(crandall_c(&[0, Word::MAX]), None);
        assert_eq!(crandall_c(&[5]), None);
        assert_eq!(crandall_c(&[5, 7]), None);
    }

    #[test]
    fn mont_word_inv_of_the_standard_prime() {
        // −(2^64 − 189)^{−1} mod 2^64, checked independently
        assert_eq!(mont_word_inv(p256()[0]), 0xa53f_a94f_ea53_fa95);
    }

    #[test]
    fn reductions_agree() {
        let m = p256();
        let mut mu = [0 as Word; N + 2];
        let mut stack = vec![0 as Word; barrett_param_deep(N)];
        barrett_param(&mut mu, &m, &mut stack);
        let m0_inv = mont_word_inv(m[0]);

        let mut rng = StdRng::seed_from_u64(0x8ed);
        let mut stack =
            vec![0 as Word; red_plain_deep(N).max(red_barrett_deep(N)).max(rem_deep(2 * N, N))];
        for _ in 0..200 {
            let x = rand_mod(&mut rng, &m);
            let y = rand_mod(&mut rng, &m);
            let mut prod = vec![0 as Word; 2 * N];
            mul(&mut prod, &x, &y);

            let mut plain = prod.clone();
            red_plain(&mut plain, &m, &mut stack);

            let mut crand = prod.clone();
            red_crandall(&mut crand, &m);
            assert_eq!(plain, crand);

            let mut barrett = prod.clone();
            red_barrett(&mut barrett, &m, &mu, &mut stack);
            assert_eq!(plain, barrett);

            // Montgomery: fold x and y into Montgomery form first, then
            // strip the radix twice
            let mut xr = vec![0 as Word; 2 * N];
            xr[N..].copy_from_slice(&x);
            red_plain(&mut xr, &m, &mut stack);
            let mut yr = vec![0 as Word; 2 * N];
            yr[N..].copy_from_slice(&y);
            red_plain(&mut yr, &m, &mut stack);
            let mut t = vec![0 as Word; 2 * N];
            mul(&mut t, &xr[..N], &yr[..N]);
            red_mont(&mut t, &m, m0_inv);
            // t = x·y·R mod m; one more pass strips the radix
            red_mont(&mut t, &m, m0_inv);
            assert_eq!(&t[..N], &plain[..N]);
        }
    }

    #[test]
    fn montgomery_identity_on_shifted_inputs() {
        // R·x reduced once is x again
        let m = p256();
        let m0_inv = mont_word_inv(m[0]);
        let mut rng = StdRng::seed_from_u64(0x9a7);
        for _ in 0..50 {
            let x = rand_mod(&mut rng, &m);
            let mut a = vec![0 as Word; 2 * N];
            a[..N].copy_from_slice(&x);
            shl_assign(&mut a, N * WORD_BITS);
            red_mont(&mut a, &m, m0_inv);
            assert_eq!(&a[..N], &x[..]);
        }
    }
}
