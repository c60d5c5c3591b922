//! Multi-precision nonnegative integers in little-endian word arrays.
//!
//! A value is `Σ a[i]·B^i` with `B = 2^WORD_BITS`; the slice length is the
//! declared capacity, leading zero words are permitted, the empty slice is
//! zero. Operations are free functions over `&[Word]`/`&mut [Word]`; callers
//! state lengths explicitly and own every buffer, including the scratch
//! passed to the algorithms that need one. Scratch requirements are
//! advertised by the `*_deep` size functions next to each consumer, so
//! allocations can be computed without running the algorithm.
//!
//! Aliasing: unless a function documents otherwise, its output must not
//! overlap its inputs. The `*_assign` forms are the sanctioned overlaps.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(missing_docs)]
#![deny(unsafe_code)]

mod basic;
mod div;
mod gcd;
mod modular;
mod mul;
mod reduce;

pub use basic::{
    add, add_assign, add_assign_masked, add_assign_mixed, add_word, bit_len, cmp, copy_extend,
    ge_mask, is_even, is_odd, is_zero, neg, set_zero, shl_assign, shr_assign, sub, sub_assign,
    sub_assign_mixed, sub_borrow_masked, sub_from_assign, sub_word, trim_len, zero_mask,
};
pub use div::{div_mod, div_mod_deep, div_word, mod_word, rem, rem_deep};
pub use gcd::{
    gcd, gcd_deep, is_coprime, is_coprime_deep, jacobi, jacobi_deep, lcm, lcm_deep, xgcd,
    xgcd_deep,
};
pub use modular::{
    add_mod, almost_inv_mod, almost_inv_mod_deep, double_mod, half_mod, inv_mod, inv_mod_deep,
    mod_div, mod_div_deep, mul_mod, mul_mod_deep, neg_mod, sqr_mod, sqr_mod_deep, sub_mod,
};
pub use mul::{add_mul_word, mul, mul_word, sqr, sub_mul_word};
pub use reduce::{
    barrett_param, barrett_param_deep, barrett_words, crandall_c, mont_word_inv, red_barrett,
    red_barrett_deep, red_crandall, red_mont, red_plain, red_plain_deep,
};
