//! Division by a word and Knuth algorithm D.

use crate::basic::{add_assign, shl_assign, shr_assign};
use crate::mul::sub_mul_word;
use stb_types::{leading_zeros_fast, DWord, Word, WORD_BITS};

/// `q ← ⌊a / w⌋`; returns the remainder. `q` may alias `a`; `w != 0`.
pub fn div_word(q: &mut [Word], a: &[Word], w: Word) -> Word {
    debug_assert_eq!(q.len(), a.len());
    debug_assert!(w != 0);
    let mut r: Word = 0;
    for i in (0..a.len()).rev() {
        let t = ((r as DWord) << WORD_BITS) | a[i] as DWord;
        q[i] = (t / w as DWord) as Word;
        r = (t % w as DWord) as Word;
    }
    r
}

/// `a mod w` for `w != 0`.
pub fn mod_word(a: &[Word], w: Word) -> Word {
    debug_assert!(w != 0);
    let mut r: Word = 0;
    for i in (0..a.len()).rev() {
        let t = ((r as DWord) << WORD_BITS) | a[i] as DWord;
        r = (t % w as DWord) as Word;
    }
    r
}

/// Scratch words for [`div_mod`] with an `n`-word dividend and an `m`-word
/// divisor.
pub const fn div_mod_deep(n: usize, m: usize) -> usize {
    m + n + 1
}

/// Scratch words for [`rem`].
pub const fn rem_deep(n: usize, m: usize) -> usize {
    (n - m + 1) + div_mod_deep(n, m)
}

/// Knuth algorithm D: `q ← ⌊a / d⌋`, `r ← a mod d`.
///
/// Requirements: `d` is trimmed (`d[m−1] != 0`), `a.len() ≥ d.len()`,
/// `q.len() == a.len() − d.len() + 1`, `r.len() == d.len()`; no aliasing;
/// `stack` provides [`div_mod_deep`] words.
///
/// The quotient digit is estimated from the top two dividend words against
/// the top divisor word, corrected at most twice against the three-word
/// product, and repaired by a single add-back when the multiply-subtract
/// under-runs.
pub fn div_mod(q: &mut [Word], r: &mut [Word], a: &[Word], d: &[Word], stack: &mut [Word]) {
    let n = a.len();
    let m = d.len();
    debug_assert!(m > 0 && d[m - 1] != 0);
    debug_assert!(n >= m);
    debug_assert_eq!(q.len(), n - m + 1);
    debug_assert_eq!(r.len(), m);
    if m == 1 {
        r[0] = div_word(q, a, d[0]);
        return;
    }
    let (dd, rest) = stack.split_at_mut(m);
    let ad = &mut rest[..n + 1];

    // normalise so that the top divisor bit is set
    let shift = leading_zeros_fast(d[m - 1]) as usize;
    dd.copy_from_slice(d);
    shl_assign(dd, shift);
    ad[..n].copy_from_slice(a);
    ad[n] = 0;
    shl_assign(ad, shift);

    let d1 = dd[m - 1] as DWord;
    let d2 = dd[m - 2] as DWord;
    for i in (0..=n - m).rev() {
        let num = ((ad[i + m] as DWord) << WORD_BITS) | ad[i + m - 1] as DWord;
        let mut qhat = num / d1;
        let mut rhat = num % d1;
        if (qhat >> WORD_BITS) != 0 {
            qhat = Word::MAX as DWord;
            rhat = num - qhat * d1;
        }
        while (rhat >> WORD_BITS) == 0
            && qhat * d2 > ((rhat << WORD_BITS) | ad[i + m - 2] as DWord)
        {
            qhat -= 1;
            rhat += d1;
        }
        let borrow = sub_mul_word(&mut ad[i..i + m], dd, qhat as Word);
        let (t, under) = ad[i + m].overflowing_sub(borrow);
        ad[i + m] = t;
        let mut qw = qhat as Word;
        if under {
            qw -= 1;
            let carry = add_assign(&mut ad[i..i + m], dd);
            ad[i + m] = ad[i + m].wrapping_add(carry);
        }
        q[i] = qw;
    }
    r.copy_from_slice(&ad[..m]);
    shr_assign(r, shift);
}

/// `r ← a mod d`, discarding the quotient. Same requirements as
/// [`div_mod`]; `stack` provides [`rem_deep`] words.
pub fn rem(r: &mut [Word], a: &[Word], d: &[Word], stack: &mut [Word]) {
    let (q, rest) = stack.split_at_mut(a.len() - d.len() + 1);
    div_mod(q, r, a, d, rest);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mul::mul;
    use crate::basic::{add_assign_mixed, cmp};
    use core::cmp::Ordering;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn divide_by_word() {
        let a = [7, 9];
        let mut q = [0; 2];
        let r = div_word(&mut q, &a, 4);
        // 9·B + 7 = 4·(2·B + (B + B/2 ... )) — verify by reconstruction
        let mut back = [0; 3];
        mul(&mut back, &q, &[4]);
        let carry = add_assign_mixed(&mut back, &[r]);
        assert_eq!(carry, 0);
        assert_eq!(&back[..2], &a);
        assert_eq!(back[2], 0);
    }

    #[test]
    fn knuth_reconstructs_randomised() {
        let mut rng = StdRng::seed_from_u64(0xd1f);
        for _ in 0..500 {
            let n = rng.gen_range(2..9usize);
            let m = rng.gen_range(2..=n);
            let mut a: Vec<Word> = (0..n).map(|_| rng.gen()).collect();
            let mut d: Vec<Word> = (0..m).map(|_| rng.gen()).collect();
            if d[m - 1] == 0 {
                d[m - 1] = 1;
            }
            // exercise thin top digits now and then
            if rng.gen_bool(0.25) {
                a[n - 1] &= 0xff;
                d[m - 1] &= 0xff;
                d[m - 1] |= 1;
            }
            let mut q = vec![0; n - m + 1];
            let mut r = vec![0; m];
            let mut stack = vec![0; div_mod_deep(n, m)];
            div_mod(&mut q, &mut r, &a, &d, &mut stack);
            assert_eq!(cmp(&r, &d), Ordering::Less);
            // a == q·d + r
            let mut back = vec![0; n + 1];
            mul(&mut back, &q, &d);
            let carry = add_assign_mixed(&mut back, &r);
            assert_eq!(carry, 0);
            assert_eq!(&back[..n], &a[..]);
            assert_eq!(back[n], 0);
        }
    }

    #[test]
    fn dividend_smaller_than_divisor() {
        let a = [5, 1];
        let d = [0, 2];
        let mut q = [0; 1];
        let mut r = [0; 2];
        let mut stack = [0; div_mod_deep(2, 2)];
        div_mod(&mut q, &mut r, &a, &d, &mut stack);
        assert_eq!(q, [0]);
        assert_eq!(r, a);
    }
}
