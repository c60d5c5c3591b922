//! Quotient rings `Z/(mod)` with a pluggable reduction strategy.
//!
//! A [`Ring`] packages the modulus, the reduction, the unity element and
//! the scratch advertisement behind a uniform operation surface. The set of
//! reductions is closed, so the strategy is an enum, not a trait object;
//! every operation dispatches on the [`Reducer`] variant.
//!
//! Elements are word slices of the ring's length in the ring's *internal*
//! representation: the identity for the plain, Crandall and Barrett rings,
//! the Montgomery form `x·R mod mod` (with `R = B^n`) for Montgomery
//! rings. [`Ring::from_octets`]/[`Ring::to_octets`] translate at the
//! boundary and validate ranges on ingress.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(missing_docs)]
#![deny(unsafe_code)]

mod ring;

pub use ring::{Reducer, Ring};
