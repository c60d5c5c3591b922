//! The machine-word model and bit-counting primitives.
//!
//! Multi-precision values throughout the workspace are little-endian arrays
//! of `Word`; a `DWord` holds the full product of two words. The counting
//! functions come in two flavours: the plain ones are branch-free and touch
//! no secret-dependent memory, the `_fast` ones may compile to hardware
//! intrinsics and are reserved for public data.

/// Machine word. All multi-precision arithmetic is radix `2^WORD_BITS`.
#[cfg(target_pointer_width = "64")]
pub type Word = u64;
/// Machine word. All multi-precision arithmetic is radix `2^WORD_BITS`.
#[cfg(target_pointer_width = "32")]
pub type Word = u32;

/// Double word: wide enough for the product of two [`Word`]s plus a carry.
#[cfg(target_pointer_width = "64")]
pub type DWord = u128;
/// Double word: wide enough for the product of two [`Word`]s plus a carry.
#[cfg(target_pointer_width = "32")]
pub type DWord = u64;

/// Bit width of [`Word`].
pub const WORD_BITS: usize = Word::BITS as usize;

/// Octet width of [`Word`].
pub const WORD_OCTETS: usize = WORD_BITS / 8;

#[cfg(target_pointer_width = "64")]
const POP_M1: Word = 0x5555_5555_5555_5555;
#[cfg(target_pointer_width = "64")]
const POP_M2: Word = 0x3333_3333_3333_3333;
#[cfg(target_pointer_width = "64")]
const POP_M4: Word = 0x0f0f_0f0f_0f0f_0f0f;
#[cfg(target_pointer_width = "64")]
const POP_H: Word = 0x0101_0101_0101_0101;

#[cfg(target_pointer_width = "32")]
const POP_M1: Word = 0x5555_5555;
#[cfg(target_pointer_width = "32")]
const POP_M2: Word = 0x3333_3333;
#[cfg(target_pointer_width = "32")]
const POP_M4: Word = 0x0f0f_0f0f;
#[cfg(target_pointer_width = "32")]
const POP_H: Word = 0x0101_0101;

/// Population count without secret-dependent branches.
#[inline]
pub const fn pop_count(w: Word) -> u32 {
    let w = w - ((w >> 1) & POP_M1);
    let w = (w & POP_M2) + ((w >> 2) & POP_M2);
    let w = (w + (w >> 4)) & POP_M4;
    (w.wrapping_mul(POP_H) >> (WORD_BITS - 8)) as u32
}

/// Population count; may branch.
#[inline]
pub const fn pop_count_fast(w: Word) -> u32 {
    w.count_ones()
}

/// Parity (lowest bit of the population count), branch-free.
#[inline]
pub const fn parity(w: Word) -> u32 {
    pop_count(w) & 1
}

/// Number of leading zero bits, branch-free.
///
/// Returns `WORD_BITS` for zero.
#[inline]
pub const fn leading_zeros(w: Word) -> u32 {
    // Smear the highest set bit downwards, then count what is left unset.
    let mut w = w;
    let mut shift = 1usize;
    while shift < WORD_BITS {
        w |= w >> shift;
        shift <<= 1;
    }
    WORD_BITS as u32 - pop_count(w)
}

/// Number of leading zero bits; may branch.
#[inline]
pub const fn leading_zeros_fast(w: Word) -> u32 {
    w.leading_zeros()
}

/// Number of trailing zero bits, branch-free.
///
/// Returns `WORD_BITS` for zero.
#[inline]
pub const fn trailing_zeros(w: Word) -> u32 {
    // w & -w isolates the lowest set bit; subtracting one turns it into a
    // mask of the zeros below it. Zero input yields an all-ones mask.
    pop_count((w & w.wrapping_neg()).wrapping_sub(1))
}

/// Number of trailing zero bits; may branch.
#[inline]
pub const fn trailing_zeros_fast(w: Word) -> u32 {
    w.trailing_zeros()
}
