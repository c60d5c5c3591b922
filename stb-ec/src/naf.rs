//! Scalar recodings: width-w NAF for the fast path, all-odd signed
//! windows for the constant-time path.

use stb_types::{Mask, Word};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// NAF window width by scalar bit length.
pub(crate) fn naf_width(bits: usize) -> u32 {
    if bits >= 336 {
        6
    } else if bits >= 120 {
        5
    } else if bits >= 40 {
        4
    } else {
        3
    }
}

/// Signed-window width for the constant-time ladder, by order bit length.
pub(crate) fn safe_width(bits: usize) -> u32 {
    if bits > 256 {
        6
    } else {
        5
    }
}

/// Width-`w` non-adjacent form, least significant digit first.
/// Digits are zero or odd with `|z| < 2^{w−1}`. Variable-time; fast-path
/// scalars are public.
pub(crate) fn wnaf(d: &[Word], w: u32) -> Vec<i32> {
    debug_assert!((2..=8).contains(&w));
    let mut v = vec![0 as Word; d.len() + 1];
    v[..d.len()].copy_from_slice(d);
    let mut digits = Vec::with_capacity(stb_zz::bit_len(d) + 1);
    let mask: Word = (1 << w) - 1;
    let half: Word = 1 << (w - 1);
    while !stb_zz::is_zero(&v) {
        if v[0] & 1 == 1 {
            let z = v[0] & mask;
            if z >= half {
                let zn = (1 << w) - z;
                stb_zz::add_word(&mut v, zn);
                digits.push(-(zn as i32));
            } else {
                stb_zz::sub_word(&mut v, z);
                digits.push(z as i32);
            }
        } else {
            digits.push(0);
        }
        stb_zz::shr_assign(&mut v, 1);
    }
    digits
}

/// The all-odd signed-window digits of an odd scalar, least significant
/// first, as table indices plus sign masks. Wiped on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub(crate) struct SignedDigits {
    /// `(|e| − 1)/2` per digit.
    pub idx: Vec<Word>,
    /// All-ones word when the digit is negative.
    pub sign: Vec<Word>,
}

/// Recode an odd scalar `d` into `⌈(order_bits + 1)/w⌉` signed digits,
/// every digit odd in `±{1, 3, …, 2^w − 1}`, most significant digit
/// always positive. Branch-free in the scalar.
///
/// The digit count depends on the public order, not on `d`.
pub(crate) fn signed_window(d: &[Word], order_bits: usize, w: u32) -> SignedDigits {
    debug_assert!(d[0] & 1 == 1);
    let w = w as usize;
    let t = (order_bits + w) / w; // ⌈(order_bits + 1)/w⌉
    debug_assert!(t >= 2);
    let mut v = d.to_vec();
    let mut idx = vec![0 as Word; t];
    let mut sign = vec![0 as Word; t];
    let full: Word = 1 << w;
    let mask21: Word = (1 << (w + 1)) - 1;
    for i in 0..t - 1 {
        // e = (v mod 2^{w+1}) − 2^w: odd, and v − e is divisible by 2^w
        // with an odd quotient, which keeps the recursion going
        let raw = v[0] & mask21;
        let neg = Mask::from_bit((raw >> w) & 1).not();
        let abs = neg.select(full.wrapping_sub(raw), raw.wrapping_sub(full));
        idx[i] = (abs - 1) >> 1;
        sign[i] = neg.word();
        // v ← (v − e)/2^w = 2·⌊v/2^{w+1}⌋ + 1
        stb_zz::shr_assign(&mut v, w + 1);
        stb_zz::shl_assign(&mut v, 1);
        v[0] |= 1;
    }
    debug_assert!(v[0] < full && v[0] & 1 == 1);
    debug_assert!(stb_zz::bit_len(&v) <= w);
    idx[t - 1] = (v[0] - 1) >> 1;
    v.zeroize();
    SignedDigits { idx, sign }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval_naf(digits: &[i32]) -> i128 {
        let mut v: i128 = 0;
        for &z in digits.iter().rev() {
            v = 2 * v + z as i128;
        }
        v
    }

    #[test]
    fn wnaf_reconstructs_and_is_sparse() {
        for (d, w) in [(1u64, 3u32), (2, 3), (0xdead_beef, 4), (u64::MAX, 5), (12345, 5)] {
            let digits = wnaf(&[d as Word], w);
            assert_eq!(eval_naf(&digits), d as i128);
            for &z in &digits {
                assert!(z == 0 || (z % 2 != 0 && (z.unsigned_abs() as u64) < (1 << (w - 1))));
            }
        }
    }

    #[test]
    fn signed_window_reconstructs_odd_scalars() {
        for d in [1u64, 3, 5, 0xffff_ffff_ffff_fff1, 0x1234_5678_9abc_def1] {
            let w = 5u32;
            let digits = signed_window(&[d as Word], 64, w);
            let mut v: i128 = 0;
            for i in (0..digits.idx.len()).rev() {
                let abs = (2 * digits.idx[i] + 1) as i128;
                let e = if digits.sign[i] != 0 { -abs } else { abs };
                v = (v << w) + e;
            }
            assert_eq!(v, d as i128);
            // every digit odd and in range
            for &ix in &digits.idx {
                assert!(2 * ix + 1 < (1 << w));
            }
            // top digit positive
            assert_eq!(*digits.sign.last().unwrap(), 0);
        }
    }
}
