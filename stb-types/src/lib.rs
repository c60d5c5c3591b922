//! Atomic types of the STB 34.101 core.
//!
//! Everything above this crate works on little-endian arrays of [`Word`]s.
//! This crate pins down the word model, provides the constant-time word
//! primitives used pervasively by the arithmetic layers, and defines the
//! single error taxonomy shared by every public interface of the workspace.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(missing_docs)]
#![deny(unsafe_code)]

mod error;
mod mask;
mod octets;
mod word;

pub use error::{Error, Result};
pub use mask::Mask;
pub use octets::{octets_eq_ct, words_from_octets, words_into_octets, words_for_octets};
pub use word::{
    leading_zeros, leading_zeros_fast, parity, pop_count, pop_count_fast, trailing_zeros,
    trailing_zeros_fast, DWord, Word, WORD_BITS, WORD_OCTETS,
};
