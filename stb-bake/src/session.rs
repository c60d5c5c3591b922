//! Shared session plumbing: settings, certificates, step ordering.

use stb_ec::{Affine, Curve};
use stb_types::Result;

/// Protocol settings shared by both parties.
///
/// The hello strings bind application context into the key derivation;
/// `kca`/`kcb` request the explicit key-confirmation tags.
#[derive(Clone, Copy, Debug, Default)]
pub struct Settings<'a> {
    /// Party A's hello string (may be empty).
    pub hello_a: &'a [u8],
    /// Party B's hello string (may be empty).
    pub hello_b: &'a [u8],
    /// Request A's key-confirmation tag.
    pub kca: bool,
    /// Request B's key-confirmation tag.
    pub kcb: bool,
}

/// Extracts the long-term public point committed to by a certificate.
///
/// The library does not prescribe a certificate format; whatever `val`
/// accepts is a certificate.
pub trait CertVal {
    /// Validate `cert` against the curve and return the public point;
    /// any failure maps to [`stb_types::Error::BadCert`].
    fn validate(&self, curve: &Curve, cert: &[u8]) -> Result<Affine>;
}

/// A certificate blob together with its validation hook.
#[derive(Clone, Copy)]
pub struct Cert<'a> {
    /// The opaque certificate octets, carried into the key derivation.
    pub data: &'a [u8],
    /// The validation hook.
    pub val: &'a dyn CertVal,
}

/// Session progress; any failure moves to `Poisoned` permanently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Stage {
    /// Waiting for the step of the given number.
    Await(u8),
    /// The terminal step has run; the key is exportable.
    Done,
    /// A step failed; the session is unusable.
    Poisoned,
}

impl Stage {
    pub(crate) fn expect(&self, step: u8) -> Result<()> {
        match self {
            Stage::Await(s) if *s == step => Ok(()),
            _ => Err(stb_types::Error::BadLogic),
        }
    }
}
