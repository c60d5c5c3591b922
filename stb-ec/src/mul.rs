//! Scalar multiplication: fast (wNAF) and constant-time (signed
//! fixed-window with a complete-formula finish), plus the two-term
//! multi-scalar form used by signature-style verification.

use crate::complete::{add_h, h_to_affine, j_to_h};
use crate::curve::Curve;
use crate::jacobian::{add_j, add_j_ct, dbl_j, j_to_affine, lift_affine, set_infinity};
use crate::naf::{naf_width, safe_width, signed_window, wnaf};
use crate::point::{Affine, AffineOrInf};
use core::mem;
use stb_types::{Mask, Word};
use zeroize::Zeroize;

impl Curve {
    /// Precompute the odd multiples `{1, 3, …, 2·count − 1}·P` in
    /// Jacobian coordinates, laid out contiguously.
    fn odd_multiples(&self, p: &Affine, count: usize, stack: &mut [Word]) -> Vec<Word> {
        let n = self.words();
        let mut table = vec![0 as Word; count * 3 * n];
        lift_affine(self, &mut table[..3 * n], p);
        if count > 1 {
            let mut p2 = vec![0 as Word; 3 * n];
            dbl_j(self, &mut p2, &table[..3 * n], stack);
            for i in 1..count {
                let (done, cur) = table.split_at_mut(i * 3 * n);
                // (2i−1)P + 2P: distinct odd multiples on the standard
                // groups; the checking addition also keeps the table
                // right for low-order points met during validation
                add_j(
                    self,
                    &mut cur[..3 * n],
                    &done[(i - 1) * 3 * n..],
                    &p2,
                    stack,
                );
            }
            p2.zeroize();
        }
        table
    }

    /// Add the signed table entry to the accumulator (fast path).
    fn add_signed(
        &self,
        acc: &mut Vec<Word>,
        tmp: &mut Vec<Word>,
        table: &[Word],
        digit: i32,
        stack: &mut [Word],
    ) {
        let n = self.words();
        let idx = (digit.unsigned_abs() as usize - 1) / 2;
        let entry = &table[idx * 3 * n..(idx + 1) * 3 * n];
        if digit < 0 {
            let mut e = entry.to_vec();
            self.ring().neg_assign(&mut e[n..2 * n]);
            add_j(self, tmp, acc, &e, stack);
        } else {
            add_j(self, tmp, acc, entry, stack);
        }
        mem::swap(acc, tmp);
    }

    /// Variable-time scalar multiplication: width-w NAF over a table of
    /// odd multiples. Returns the identity exactly when `d ≡ 0` or the
    /// scalar is a multiple of the point's order.
    pub fn mul_fast(&self, p: &Affine, d: &[Word], stack: &mut [Word]) -> AffineOrInf {
        let n = self.words();
        if stb_zz::is_zero(d) {
            return AffineOrInf::Infinity;
        }
        let w = naf_width(stb_zz::bit_len(d));
        let digits = wnaf(d, w);
        let table = self.odd_multiples(p, 1 << (w - 2), stack);
        let mut acc = vec![0 as Word; 3 * n];
        let mut tmp = vec![0 as Word; 3 * n];
        set_infinity(self, &mut acc);
        for i in (0..digits.len()).rev() {
            dbl_j(self, &mut tmp, &acc, stack);
            mem::swap(&mut acc, &mut tmp);
            if digits[i] != 0 {
                self.add_signed(&mut acc, &mut tmp, &table, digits[i], stack);
            }
        }
        j_to_affine(self, &acc, stack)
    }

    /// Constant-time table lookup: touch every entry, select by mask,
    /// then negate the ordinate under the sign mask.
    fn lookup_ct(&self, out: &mut [Word], table: &[Word], idx: Word, sign: Word, stack: &mut [Word]) {
        let n = self.words();
        let count = table.len() / (3 * n);
        out.fill(0);
        for j in 0..count {
            let m = Mask::eq(j as Word, idx);
            m.select_assign(out, &table[j * 3 * n..(j + 1) * 3 * n]);
        }
        let (neg_y, _) = stack.split_at_mut(n);
        let f = self.ring();
        f.neg(neg_y, &out[n..2 * n]);
        Mask::from_bit(sign & 1).select_assign(&mut out[n..2 * n], neg_y);
    }

    /// Constant-time scalar multiplication for `0 ≤ d < q`: the scalar is
    /// normalised to odd (`q − d` with a remembered sign when even),
    /// recoded in all-odd signed windows, and driven through `w` doublings
    /// plus one addition per digit with full-table-scan lookups. The final
    /// accumulation runs through the complete formulas, so the ladder's
    /// residual corner cases fold into the arithmetic instead of
    /// branching. Returns the identity exactly when `d = 0`.
    pub fn mul_safe(&self, p: &Affine, d: &[Word], stack: &mut [Word]) -> AffineOrInf {
        let n = self.words();
        debug_assert_eq!(d.len(), n);
        debug_assert!(stb_zz::cmp(d, self.order()) == core::cmp::Ordering::Less);
        if stb_zz::is_zero(d) {
            return AffineOrInf::Infinity;
        }
        let qbits = stb_zz::bit_len(self.order());
        let w = safe_width(qbits);

        // d' ← d odd ? d : q − d
        let mut dd = d.to_vec();
        let mut alt = vec![0 as Word; n];
        let borrow = stb_zz::sub(&mut alt, self.order(), d);
        debug_assert_eq!(borrow, 0);
        let flip = Mask::from_bit((d[0] & 1) ^ 1);
        flip.select_assign(&mut dd, &alt);
        alt.zeroize();

        let digits = signed_window(&dd, qbits, w);
        dd.zeroize();
        let table = self.odd_multiples(p, 1 << (w - 1), stack);

        let t = digits.idx.len();
        let mut acc = vec![0 as Word; 3 * n];
        let mut tmp = vec![0 as Word; 3 * n];
        let mut entry = vec![0 as Word; 3 * n];
        self.lookup_ct(&mut acc, &table, digits.idx[t - 1], digits.sign[t - 1], stack);
        for i in (1..t - 1).rev() {
            for _ in 0..w {
                dbl_j(self, &mut tmp, &acc, stack);
                mem::swap(&mut acc, &mut tmp);
            }
            self.lookup_ct(&mut entry, &table, digits.idx[i], digits.sign[i], stack);
            add_j_ct(self, &mut tmp, &acc, &entry, stack);
            mem::swap(&mut acc, &mut tmp);
        }
        // last digit: w doublings, then the exception-free addition
        for _ in 0..w {
            dbl_j(self, &mut tmp, &acc, stack);
            mem::swap(&mut acc, &mut tmp);
        }
        self.lookup_ct(&mut entry, &table, digits.idx[0], digits.sign[0], stack);
        let result = {
            let (h1, stack) = stack.split_at_mut(3 * n);
            let (h2, stack) = stack.split_at_mut(3 * n);
            let (hs, stack) = stack.split_at_mut(3 * n);
            j_to_h(self, h1, &acc, stack);
            j_to_h(self, h2, &entry, stack);
            add_h(self, hs, h1, h2, stack);
            let r = h_to_affine(self, hs, stack);
            h1.zeroize();
            h2.zeroize();
            hs.zeroize();
            r
        };
        acc.zeroize();
        tmp.zeroize();
        entry.zeroize();

        match result {
            AffineOrInf::Point(mut point) => {
                // undo the parity normalisation
                let neg_y = &mut stack[..n];
                self.ring().neg(neg_y, &point.y);
                flip.select_assign(&mut point.y, neg_y);
                neg_y.zeroize();
                AffineOrInf::Point(point)
            }
            AffineOrInf::Infinity => AffineOrInf::Infinity,
        }
    }

    /// Interleaved-NAF core of the multi-scalar forms: every term gets
    /// its own window width, one shared doubling per round.
    fn mul_add_terms(&self, terms: &[(&[Word], &Affine)], stack: &mut [Word]) -> AffineOrInf {
        let n = self.words();
        let mut digits = Vec::with_capacity(terms.len());
        let mut tables = Vec::with_capacity(terms.len());
        for (d, p) in terms {
            let w = naf_width(stb_zz::bit_len(d));
            digits.push(wnaf(d, w));
            tables.push(self.odd_multiples(p, 1 << (w - 2), stack));
        }
        let len = digits.iter().map(Vec::len).max().unwrap_or(0);
        let mut acc = vec![0 as Word; 3 * n];
        let mut tmp = vec![0 as Word; 3 * n];
        set_infinity(self, &mut acc);
        for i in (0..len).rev() {
            dbl_j(self, &mut tmp, &acc, stack);
            mem::swap(&mut acc, &mut tmp);
            for (ds, table) in digits.iter().zip(&tables) {
                if i < ds.len() && ds[i] != 0 {
                    self.add_signed(&mut acc, &mut tmp, table, ds[i], stack);
                }
            }
        }
        j_to_affine(self, &acc, stack)
    }

    /// Variable-time `d1·P1 + d2·P2`.
    pub fn mul_add2(
        &self,
        d1: &[Word],
        p1: &Affine,
        d2: &[Word],
        p2: &Affine,
        stack: &mut [Word],
    ) -> AffineOrInf {
        self.mul_add_terms(&[(d1, p1), (d2, p2)], stack)
    }

    /// Variable-time `d1·P1 + d2·P2 + d3·P3`.
    #[allow(clippy::too_many_arguments)]
    pub fn mul_add3(
        &self,
        d1: &[Word],
        p1: &Affine,
        d2: &[Word],
        p2: &Affine,
        d3: &[Word],
        p3: &Affine,
        stack: &mut [Word],
    ) -> AffineOrInf {
        self.mul_add_terms(&[(d1, p1), (d2, p2), (d3, p3)], stack)
    }
}
