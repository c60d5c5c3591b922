use core::cmp::Ordering;
use core::mem;
use stb_types::{words_for_octets, words_from_octets, words_into_octets, Error, Result, Word,
    WORD_BITS, WORD_OCTETS};

/// Reduction strategy; one variant per supported reduction, with its
/// precomputed parameter where the strategy has one.
#[derive(Clone, Debug)]
pub enum Reducer {
    /// One Knuth-D pass per product; no precondition, no parameter.
    Plain,
    /// Two multiply-and-fold passes for a modulus `B^n − c`, `0 < c < B`.
    Crandall {
        /// The Crandall constant `c`.
        c: Word,
    },
    /// Two partial products against `⌊B^{2n}/mod⌋`.
    Barrett {
        /// The precomputed quotient, [`stb_zz::barrett_words`] long.
        mu: Vec<Word>,
    },
    /// Word-wise multiply-accumulate rows for an odd modulus; elements
    /// live in Montgomery form.
    Montgomery {
        /// `−mod[0]^{−1} mod B`.
        m0_inv: Word,
    },
}

/// An immutable quotient-ring descriptor.
#[derive(Clone, Debug)]
pub struct Ring {
    modulus: Vec<Word>,
    octets: usize,
    unity: Vec<Word>,
    reducer: Reducer,
}

impl Ring {
    /// Build a ring over the little-endian `modulus` octets, selecting the
    /// best reduction for the modulus shape:
    ///
    /// 1. short moduli (≤ 2 words) — plain;
    /// 2. `B^n − c` — Crandall;
    /// 3. odd — Montgomery;
    /// 4. long even (≥ 4 words) — Barrett;
    /// 5. otherwise — plain.
    ///
    /// The top modulus octet must be nonzero and the value at least 2.
    pub fn new(modulus: &[u8]) -> Result<Ring> {
        let words = Self::decode_modulus(modulus)?;
        let no = modulus.len();
        let reducer = if no <= 2 * WORD_OCTETS {
            Reducer::Plain
        } else if let Some(c) = stb_zz::crandall_c(&words) {
            Reducer::Crandall { c }
        } else if words[0] & 1 == 1 {
            Reducer::Montgomery {
                m0_inv: stb_zz::mont_word_inv(words[0]),
            }
        } else if no >= 4 * WORD_OCTETS {
            let mut mu = vec![0; stb_zz::barrett_words(words.len())];
            let mut stack = vec![0; stb_zz::barrett_param_deep(words.len())];
            stb_zz::barrett_param(&mut mu, &words, &mut stack);
            Reducer::Barrett { mu }
        } else {
            Reducer::Plain
        };
        Ok(Self::assemble(words, no, reducer))
    }

    /// Build a Montgomery ring regardless of the selection rules; the
    /// modulus must be odd.
    pub fn new_montgomery(modulus: &[u8]) -> Result<Ring> {
        let words = Self::decode_modulus(modulus)?;
        if words[0] & 1 == 0 {
            return Err(Error::BadParams);
        }
        let reducer = Reducer::Montgomery {
            m0_inv: stb_zz::mont_word_inv(words[0]),
        };
        Ok(Self::assemble(words, modulus.len(), reducer))
    }

    fn decode_modulus(modulus: &[u8]) -> Result<Vec<Word>> {
        if modulus.is_empty() || modulus[modulus.len() - 1] == 0 {
            return Err(Error::BadInput);
        }
        if modulus.len() == 1 && modulus[0] < 2 {
            return Err(Error::BadInput);
        }
        let mut words = vec![0; words_for_octets(modulus.len())];
        words_from_octets(&mut words, modulus);
        Ok(words)
    }

    fn assemble(modulus: Vec<Word>, octets: usize, reducer: Reducer) -> Ring {
        let n = modulus.len();
        let mut unity = vec![0; n];
        match reducer {
            Reducer::Montgomery { .. } => {
                // unity is R mod mod
                let mut t = vec![0; 2 * n];
                t[n] = 1;
                let mut stack = vec![0; stb_zz::red_plain_deep(n)];
                stb_zz::red_plain(&mut t, &modulus, &mut stack);
                unity.copy_from_slice(&t[..n]);
            }
            _ => unity[0] = 1,
        }
        Ring {
            modulus,
            octets,
            unity,
            reducer,
        }
    }

    /// Element length in words.
    pub fn words(&self) -> usize {
        self.modulus.len()
    }

    /// Element length in octets.
    pub fn octets(&self) -> usize {
        self.octets
    }

    /// The modulus words.
    pub fn modulus(&self) -> &[Word] {
        &self.modulus
    }

    /// The ring's unity in internal representation.
    pub fn unity(&self) -> &[Word] {
        &self.unity
    }

    /// The active reduction strategy.
    pub fn reducer(&self) -> &Reducer {
        &self.reducer
    }

    /// Total footprint of the descriptor in octets, the `keep` of the
    /// construction contract.
    pub fn keep(&self) -> usize {
        let param = match &self.reducer {
            Reducer::Barrett { mu } => mu.len(),
            _ => 0,
        };
        (self.modulus.len() + self.unity.len() + param) * WORD_OCTETS
    }

    /// Maximum scratch words any single ring operation may require.
    pub fn deep(&self) -> usize {
        let n = self.words();
        let red = match &self.reducer {
            Reducer::Plain => stb_zz::red_plain_deep(n),
            Reducer::Crandall { .. } => 0,
            Reducer::Barrett { .. } => stb_zz::red_barrett_deep(n),
            Reducer::Montgomery { .. } => 0,
        };
        let mul = 2 * n + red;
        let inv = match &self.reducer {
            Reducer::Montgomery { .. } => 2 * n + stb_zz::almost_inv_mod_deep(n),
            _ => stb_zz::inv_mod_deep(n),
        };
        // encode always runs a plain pass and the octet codec stacks a
        // residue buffer on top of it; power stacks two elements on top
        // of a multiplication; div stacks one on top of inv or mul
        let codec = n + 2 * n + stb_zz::red_plain_deep(n);
        let power = 2 * n + mul;
        let div = n + if inv > mul { inv } else { mul };
        mul.max(inv).max(codec).max(power).max(div)
    }

    /// A zeroed element buffer.
    pub fn alloc_elem(&self) -> Vec<Word> {
        vec![0; self.words()]
    }

    /// A scratch buffer covering [`Ring::deep`].
    pub fn alloc_stack(&self) -> Vec<Word> {
        vec![0; self.deep()]
    }

    fn reduce(&self, t: &mut [Word], stack: &mut [Word]) {
        match &self.reducer {
            Reducer::Plain => stb_zz::red_plain(t, &self.modulus, stack),
            Reducer::Crandall { .. } => stb_zz::red_crandall(t, &self.modulus),
            Reducer::Barrett { mu } => stb_zz::red_barrett(t, &self.modulus, mu, stack),
            Reducer::Montgomery { m0_inv } => stb_zz::red_mont(t, &self.modulus, *m0_inv),
        }
    }

    /// Bring a plain residue `x < mod` into the internal representation.
    pub fn encode(&self, out: &mut [Word], residue: &[Word], stack: &mut [Word]) {
        let n = self.words();
        debug_assert!(stb_zz::cmp(residue, &self.modulus) == Ordering::Less);
        match &self.reducer {
            Reducer::Montgomery { .. } => {
                let (t, rest) = stack.split_at_mut(2 * n);
                t[..n].fill(0);
                t[n..].copy_from_slice(residue);
                stb_zz::red_plain(t, &self.modulus, rest);
                out.copy_from_slice(&t[..n]);
            }
            _ => out.copy_from_slice(residue),
        }
    }

    /// Recover the plain residue from the internal representation.
    pub fn decode(&self, out: &mut [Word], a: &[Word], stack: &mut [Word]) {
        let n = self.words();
        match &self.reducer {
            Reducer::Montgomery { m0_inv } => {
                let t = &mut stack[..2 * n];
                t[..n].copy_from_slice(a);
                t[n..].fill(0);
                stb_zz::red_mont(t, &self.modulus, *m0_inv);
                out.copy_from_slice(&t[..n]);
            }
            _ => out.copy_from_slice(a),
        }
    }

    /// Decode an octet string into a ring element; the length must be
    /// exactly [`Ring::octets`] and the value below the modulus.
    pub fn from_octets(&self, out: &mut [Word], octets: &[u8], stack: &mut [Word]) -> Result<()> {
        if octets.len() != self.octets {
            return Err(Error::BadInput);
        }
        let n = self.words();
        let (r, rest) = stack.split_at_mut(n);
        words_from_octets(r, octets);
        if stb_zz::cmp(r, &self.modulus) != Ordering::Less {
            return Err(Error::BadInput);
        }
        self.encode(out, r, rest);
        Ok(())
    }

    /// Encode a ring element into [`Ring::octets`] little-endian octets.
    pub fn to_octets(&self, out: &mut [u8], a: &[Word], stack: &mut [Word]) {
        debug_assert_eq!(out.len(), self.octets);
        let n = self.words();
        let (r, rest) = stack.split_at_mut(n);
        self.decode(r, a, rest);
        words_into_octets(out, r);
    }

    /// `c ← a + b`.
    pub fn add(&self, c: &mut [Word], a: &[Word], b: &[Word]) {
        stb_zz::add_mod(c, a, b, &self.modulus);
    }

    /// `c ← a − b`.
    pub fn sub(&self, c: &mut [Word], a: &[Word], b: &[Word]) {
        stb_zz::sub_mod(c, a, b, &self.modulus);
    }

    /// `c ← −a`.
    pub fn neg(&self, c: &mut [Word], a: &[Word]) {
        stb_zz::neg_mod(c, a, &self.modulus);
    }

    /// `c ← 2a`.
    pub fn double(&self, c: &mut [Word], a: &[Word]) {
        stb_zz::double_mod(c, a, &self.modulus);
    }

    /// `c ← a/2` (the modulus is odd for every strategy that reaches
    /// half; Montgomery moduli always are).
    pub fn half(&self, c: &mut [Word], a: &[Word]) {
        stb_zz::half_mod(c, a, &self.modulus);
    }

    /// `c ← c + b`, in place.
    pub fn add_assign(&self, c: &mut [Word], b: &[Word]) {
        let carry = stb_zz::add_assign(c, b);
        let need = stb_types::Mask::from_bit(carry).or(stb_zz::ge_mask(c, &self.modulus));
        let borrow = stb_zz::sub_borrow_masked(c, &self.modulus, need);
        debug_assert_eq!(borrow, carry);
    }

    /// `c ← c − b`, in place.
    pub fn sub_assign(&self, c: &mut [Word], b: &[Word]) {
        let borrow = stb_zz::sub_assign(c, b);
        let carry = stb_zz::add_assign_masked(c, &self.modulus, stb_types::Mask::from_bit(borrow));
        debug_assert_eq!(carry, borrow);
    }

    /// `c ← a − c`, in place.
    pub fn sub_from(&self, c: &mut [Word], a: &[Word]) {
        let borrow = stb_zz::sub_from_assign(c, a);
        let carry = stb_zz::add_assign_masked(c, &self.modulus, stb_types::Mask::from_bit(borrow));
        debug_assert_eq!(carry, borrow);
    }

    /// `c ← 2c`, in place.
    pub fn double_assign(&self, c: &mut [Word]) {
        let top = c[c.len() - 1] >> (WORD_BITS - 1);
        stb_zz::shl_assign(c, 1);
        let need = stb_types::Mask::from_bit(top).or(stb_zz::ge_mask(c, &self.modulus));
        let borrow = stb_zz::sub_borrow_masked(c, &self.modulus, need);
        debug_assert_eq!(borrow, top);
    }

    /// `c ← −c`, in place.
    pub fn neg_assign(&self, c: &mut [Word]) {
        let keep = stb_zz::zero_mask(c).not().word();
        let borrow = stb_zz::sub_from_assign(c, &self.modulus);
        debug_assert_eq!(borrow, 0);
        for w in c.iter_mut() {
            *w &= keep;
        }
    }

    /// `c ← c·b`, in place. `stack` provides [`Ring::deep`] words.
    pub fn mul_assign(&self, c: &mut [Word], b: &[Word], stack: &mut [Word]) {
        let n = self.words();
        let (t, rest) = stack.split_at_mut(2 * n);
        stb_zz::mul(t, c, b);
        self.reduce(t, rest);
        c.copy_from_slice(&t[..n]);
    }

    /// `c ← c²`, in place. `stack` provides [`Ring::deep`] words.
    pub fn sqr_assign(&self, c: &mut [Word], stack: &mut [Word]) {
        let n = self.words();
        let (t, rest) = stack.split_at_mut(2 * n);
        stb_zz::sqr(t, c);
        self.reduce(t, rest);
        c.copy_from_slice(&t[..n]);
    }

    /// `c ← a·b`. `stack` provides [`Ring::deep`] words.
    pub fn mul(&self, c: &mut [Word], a: &[Word], b: &[Word], stack: &mut [Word]) {
        let n = self.words();
        let (t, rest) = stack.split_at_mut(2 * n);
        stb_zz::mul(t, a, b);
        self.reduce(t, rest);
        c.copy_from_slice(&t[..n]);
    }

    /// `c ← a²`. `stack` provides [`Ring::deep`] words.
    pub fn sqr(&self, c: &mut [Word], a: &[Word], stack: &mut [Word]) {
        let n = self.words();
        let (t, rest) = stack.split_at_mut(2 * n);
        stb_zz::sqr(t, a);
        self.reduce(t, rest);
        c.copy_from_slice(&t[..n]);
    }

    /// `c ← a^{−1}`; `Err(BadInput)` for zero or a non-invertible element.
    /// `stack` provides [`Ring::deep`] words.
    ///
    /// In a Montgomery ring this runs the almost-inverse and then lands on
    /// `a^{−1}·R` with `2nb − k` modular doublings.
    pub fn inv(&self, c: &mut [Word], a: &[Word], stack: &mut [Word]) -> Result<()> {
        let n = self.words();
        if stb_zz::is_zero(a) {
            return Err(Error::BadInput);
        }
        match &self.reducer {
            Reducer::Montgomery { .. } => {
                let (t, rest) = stack.split_at_mut(n);
                let (u, rest) = rest.split_at_mut(n);
                let k = stb_zz::almost_inv_mod(t, a, &self.modulus, rest);
                let mut cur: &mut [Word] = t;
                let mut other: &mut [Word] = u;
                for _ in 0..2 * n * WORD_BITS - k {
                    stb_zz::double_mod(other, cur, &self.modulus);
                    mem::swap(&mut cur, &mut other);
                }
                c.copy_from_slice(cur);
                Ok(())
            }
            _ => {
                if stb_zz::inv_mod(c, a, &self.modulus, stack) {
                    Ok(())
                } else {
                    Err(Error::BadInput)
                }
            }
        }
    }

    /// `c ← a/b`. `stack` provides [`Ring::deep`] words.
    pub fn div(&self, c: &mut [Word], a: &[Word], b: &[Word], stack: &mut [Word]) -> Result<()> {
        let n = self.words();
        let (t, rest) = stack.split_at_mut(n);
        self.inv(t, b, rest)?;
        self.mul(c, a, t, rest);
        Ok(())
    }

    /// `c ← a^e` for a public little-endian exponent, square-and-multiply.
    /// `stack` provides [`Ring::deep`] words.
    pub fn power(&self, c: &mut [Word], a: &[Word], e: &[Word], stack: &mut [Word]) {
        let n = self.words();
        let (base, rest) = stack.split_at_mut(n);
        let (t, rest) = rest.split_at_mut(n);
        base.copy_from_slice(a);
        c.copy_from_slice(&self.unity);
        for i in (0..stb_zz::bit_len(e)).rev() {
            self.sqr(t, c, rest);
            if e[i / WORD_BITS] >> (i % WORD_BITS) & 1 == 1 {
                self.mul(c, t, base, rest);
            } else {
                c.copy_from_slice(t);
            }
        }
    }

    /// `true` iff `a` is the ring's zero.
    pub fn is_zero_elem(&self, a: &[Word]) -> bool {
        stb_zz::is_zero(a)
    }

    /// `true` iff `a` is the ring's unity.
    pub fn is_unity(&self, a: &[Word]) -> bool {
        a == &self.unity[..]
    }

    /// Bitwise element equality (internal representations are canonical).
    pub fn equal(&self, a: &[Word], b: &[Word]) -> bool {
        a == b
    }
}
