//! The error taxonomy shared by every public interface of the workspace.

/// Result alias over the library error taxonomy.
pub type Result<T> = core::result::Result<T, Error>;

/// Error kinds returned by the STB 34.101 core.
///
/// Errors never carry recovery hints: once a protocol step fails, the
/// session is dead and must be restarted from scratch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Error {
    /// Impossible length, out-of-range enum value, malformed input buffer.
    #[display(fmt = "malformed input")]
    BadInput,

    /// Parameter set fails mathematical validation.
    #[display(fmt = "invalid domain parameters")]
    BadParams,

    /// The randomness callback refused to produce output.
    #[display(fmt = "randomness source failure")]
    BadRng,

    /// Private key does not decode or is out of range.
    #[display(fmt = "invalid private key")]
    BadPrivkey,

    /// Public key does not decode or is out of range.
    #[display(fmt = "invalid public key")]
    BadPubkey,

    /// Decoded curve point does not lie on the curve.
    #[display(fmt = "point not on curve")]
    BadPoint,

    /// Certificate validation hook failed.
    #[display(fmt = "certificate rejected")]
    BadCert,

    /// A MAC or an algebraic identity check failed.
    #[display(fmt = "authentication failure")]
    Auth,

    /// A step was invoked out of order or after a failure.
    #[display(fmt = "protocol step out of order")]
    BadLogic,

    /// A buffer bound was exceeded.
    #[display(fmt = "out of memory")]
    OutOfMemory,
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_human_readable() {
        assert_eq!(Error::Auth.to_string(), "authentication failure");
        assert_eq!(Error::BadPoint.to_string(), "point not on curve");
    }
}
