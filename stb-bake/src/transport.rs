//! The byte transport the drivers run over.

use stb_types::{Error, Result};

/// Read chunk granularity of the drivers.
pub const CHUNK_OCTETS: usize = 512;

/// Upper bound on a reassembled variable-length message (the certificate
/// trailers of BSTS); longer messages are malformed.
pub const MSG_CAP: usize = 64 * 1024;

/// Outcome of one transport read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Chunk {
    /// `n` octets delivered, more of the message follows.
    More(usize),
    /// `n` octets delivered and the message ends here.
    Last(usize),
}

/// A duplex byte pipe supplied by the caller. Reads and writes are the
/// session's only suspension points; any error aborts the session.
pub trait Transport {
    /// Deliver up to `buf.len()` octets of the current inbound message.
    fn read(&mut self, buf: &mut [u8]) -> Result<Chunk>;
    /// Send one complete outbound message.
    fn write(&mut self, msg: &[u8]) -> Result<()>;
}

/// Fill `buf` exactly; a message that ends early or runs past the
/// expected length is malformed.
pub(crate) fn read_exact(t: &mut dyn Transport, buf: &mut [u8]) -> Result<()> {
    let mut filled = 0;
    while filled < buf.len() {
        match t.read(&mut buf[filled..])? {
            Chunk::More(k) => {
                if k == 0 || filled + k > buf.len() {
                    return Err(Error::BadInput);
                }
                filled += k;
            }
            Chunk::Last(k) => {
                filled += k;
                if filled != buf.len() {
                    return Err(Error::BadInput);
                }
            }
        }
    }
    Ok(())
}

/// Accumulate a variable-length message in [`CHUNK_OCTETS`] reads until
/// the transport marks the last chunk; the reassembly buffer is bounded
/// by [`MSG_CAP`].
pub(crate) fn read_chunked(t: &mut dyn Transport) -> Result<Vec<u8>> {
    let mut blob = Vec::new();
    let mut chunk = [0u8; CHUNK_OCTETS];
    loop {
        let status = t.read(&mut chunk)?;
        let (k, last) = match status {
            Chunk::More(k) => (k, false),
            Chunk::Last(k) => (k, true),
        };
        if k > CHUNK_OCTETS {
            return Err(Error::BadInput);
        }
        if blob.len() + k > MSG_CAP {
            return Err(Error::BadInput);
        }
        blob.extend_from_slice(&chunk[..k]);
        if last {
            return Ok(blob);
        }
    }
}
