//! The bake authenticated key-agreement suite: BMQV, BSTS and BPACE.
//!
//! Each protocol is a per-party session value whose numbered step methods
//! consume the peer's wire message and emit the next one; `key` exports
//! the agreed 256-bit secret after the terminal step. Sessions enforce
//! step order, poison themselves on the first failure and wipe every
//! secret on drop. The [`Transport`] trait and the `run_*` drivers layer
//! chunked message framing on top for callers that just want a session
//! key out of a byte pipe.
//!
//! Point encodings are `(x ‖ y)` little-endian, tags are 8 octets,
//! derived subkeys are 32 octets throughout.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(missing_docs)]
#![deny(unsafe_code)]

mod bmqv;
mod bpace;
mod bsts;
mod kdf;
mod run;
mod session;
mod swu;
mod transport;

pub use bmqv::{BmqvA, BmqvB};
pub use bpace::{BpaceA, BpaceB};
pub use bsts::{BstsA, BstsB};
pub use run::{run_bmqv_a, run_bmqv_b, run_bpace_a, run_bpace_b, run_bsts_a, run_bsts_b};
pub use session::{Cert, CertVal, Settings};
pub use swu::bake_swu;
pub use transport::{Chunk, Transport, CHUNK_OCTETS, MSG_CAP};

/// Agreed session keys are 32 octets.
pub const KEY_OCTETS: usize = 32;

/// Key-confirmation tags are 8 octets.
pub const TAG_OCTETS: usize = 8;
