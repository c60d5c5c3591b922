//! The belt symmetric primitives as the protocol core consumes them.
//!
//! The cipher core and the hash come from the ecosystem crates
//! (`belt-block`, `belt-hash`, `belt-mac`, `cfb-mode`); this crate fixes
//! the key/tag array types, wires the modes the key-agreement layer needs
//! (ECB with ciphertext stealing, full-block CFB, the σ₂-based key
//! repacking, wide-block encipherment and the key-wrap built on it) and
//! keeps every comparison that guards authenticity constant-time.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(missing_docs)]
#![deny(unsafe_code)]

mod block;
mod cfb;
mod ecb;
mod hash;
mod krp;
mod mac;
mod wbl;

pub use cfb::{cfb_decrypt, cfb_encrypt};
pub use ecb::{ecb_decrypt, ecb_encrypt};
pub use hash::{hash, hash_parts};
pub use krp::krp;
pub use mac::{mac, mac_parts, mac_verify};
pub use wbl::{kwp_unwrap, kwp_wrap, wbl_decrypt, wbl_encrypt};

/// Belt block size in octets.
pub const BLOCK_OCTETS: usize = 16;

/// Belt key size in octets.
pub const KEY_OCTETS: usize = 32;

/// Belt MAC tag size in octets.
pub const MAC_OCTETS: usize = 8;

/// Belt hash output size in octets.
pub const HASH_OCTETS: usize = 32;
