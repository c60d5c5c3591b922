//! Standard curve parameters and key plumbing for the bign suite.
//!
//! [`StdCurve`] names the published parameter blocks by OID;
//! [`val_params`] runs the full mathematical validation of a block and
//! [`val_params_binding`] additionally replays the hash derivation that
//! ties the coefficient `B` to the published 64-bit seed. [`bign_start`]
//! turns a validated block into a live [`stb_ec::Curve`].

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(missing_docs)]
#![deny(unsafe_code)]

mod keys;
mod params;

pub use keys::{gen_keypair, public_key, val_pubkey, PrivateKey, PublicKey};
pub use params::{bign_start, val_params, val_params_binding, Params, StdCurve};
