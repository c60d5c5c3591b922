//! Elliptic curves `y² = x³ + Ax + B` over prime fields `p ≡ 3 (mod 4)`.
//!
//! The field lives in a Montgomery [`stb_qr::Ring`]; curve coefficients and
//! point coordinates stay in the ring's internal representation throughout.
//! Three coordinate systems are in play: affine for the public surface,
//! Jacobian for the workhorse formulas, and homogeneous inside the complete
//! (exception-free) additions that finish the constant-time ladder.
//!
//! Algorithm selection is frozen per curve instance through [`EcPolicy`];
//! there are no process-wide switches.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(missing_docs)]
#![deny(unsafe_code)]

mod complete;
mod curve;
mod jacobian;
mod mul;
mod naf;
mod point;
mod swu;

pub use curve::{Curve, CurveParams};
pub use point::{Affine, AffineOrInf};
pub use swu::swu_map;

/// Which scalar-multiplication path [`Curve::mul`] takes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MulPolicy {
    /// Width-w NAF with a windowed table; variable time. For
    /// verification-style callers whose scalars are public.
    Fast,
    /// Signed fixed-window ladder with complete-formula finish; no
    /// secret-dependent branches or table indices.
    Safe,
}

/// Per-curve algorithm policy, fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EcPolicy {
    /// Scalar-multiplication path for [`Curve::mul`].
    pub mul: MulPolicy,
}

impl Default for EcPolicy {
    fn default() -> Self {
        EcPolicy {
            mul: MulPolicy::Safe,
        }
    }
}
