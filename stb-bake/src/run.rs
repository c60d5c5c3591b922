//! Drivers: loop the step functions over a [`Transport`].
//!
//! Each driver owns the whole session on one side; the return value is
//! the agreed `K0`. Any failure is final — the session state is dropped
//! (and thereby wiped) and the error propagates to the caller.

use crate::bmqv::{BmqvA, BmqvB};
use crate::bpace::{BpaceA, BpaceB};
use crate::bsts::{BstsA, BstsB};
use crate::session::{Cert, CertVal, Settings};
use crate::transport::{read_chunked, read_exact, Transport};
use crate::TAG_OCTETS;
use rand_core::CryptoRngCore;
use stb_bign::PrivateKey;
use stb_ec::Curve;
use stb_types::Result;
use tracing::debug;

/// Run BMQV as party A.
pub fn run_bmqv_a(
    transport: &mut dyn Transport,
    curve: &Curve,
    settings: Settings<'_>,
    privkey: &PrivateKey,
    cert_a: Cert<'_>,
    cert_b: Cert<'_>,
    rng: &mut dyn CryptoRngCore,
) -> Result<[u8; 32]> {
    let mut a = BmqvA::new(curve, settings, privkey, cert_a, cert_b)?;
    let mut m1 = vec![0u8; 2 * curve.octets()];
    read_exact(transport, &mut m1)?;
    let m2 = a.step3(&m1, rng)?;
    transport.write(&m2)?;
    debug!(protocol = "bmqv", side = "a", "ephemeral exchanged");
    if settings.kcb {
        let mut m3 = [0u8; TAG_OCTETS];
        read_exact(transport, &mut m3)?;
        a.step5(&m3)?;
    }
    debug!(protocol = "bmqv", side = "a", "session key derived");
    a.key()
}

/// Run BMQV as party B.
pub fn run_bmqv_b(
    transport: &mut dyn Transport,
    curve: &Curve,
    settings: Settings<'_>,
    privkey: &PrivateKey,
    cert_a: Cert<'_>,
    cert_b: Cert<'_>,
    rng: &mut dyn CryptoRngCore,
) -> Result<[u8; 32]> {
    let mut b = BmqvB::new(curve, settings, privkey, cert_a, cert_b)?;
    let m1 = b.step2(rng)?;
    transport.write(&m1)?;
    let mut m2 = vec![0u8; 2 * curve.octets() + if settings.kca { TAG_OCTETS } else { 0 }];
    read_exact(transport, &mut m2)?;
    let m3 = b.step4(&m2)?;
    if settings.kcb {
        transport.write(&m3)?;
    }
    debug!(protocol = "bmqv", side = "b", "session key derived");
    b.key()
}

/// Run BSTS as party A; `M3` arrives in bounded 512-octet chunks.
pub fn run_bsts_a(
    transport: &mut dyn Transport,
    curve: &Curve,
    settings: Settings<'_>,
    privkey: &PrivateKey,
    cert_a: &[u8],
    peer_val: &dyn CertVal,
    rng: &mut dyn CryptoRngCore,
) -> Result<[u8; 32]> {
    let mut a = BstsA::new(curve, settings, privkey, cert_a, peer_val)?;
    let mut m1 = vec![0u8; 2 * curve.octets()];
    read_exact(transport, &mut m1)?;
    let m2 = a.step3(&m1, rng)?;
    transport.write(&m2)?;
    debug!(protocol = "bsts", side = "a", "trailer sent");
    let m3 = read_chunked(transport)?;
    a.step5(&m3)?;
    debug!(protocol = "bsts", side = "a", "session key derived");
    a.key()
}

/// Run BSTS as party B; `M2` arrives in bounded 512-octet chunks.
pub fn run_bsts_b(
    transport: &mut dyn Transport,
    curve: &Curve,
    settings: Settings<'_>,
    privkey: &PrivateKey,
    cert_b: &[u8],
    peer_val: &dyn CertVal,
    rng: &mut dyn CryptoRngCore,
) -> Result<[u8; 32]> {
    let mut b = BstsB::new(curve, settings, privkey, cert_b, peer_val)?;
    let m1 = b.step2(rng)?;
    transport.write(&m1)?;
    let m2 = read_chunked(transport)?;
    let m3 = b.step4(&m2)?;
    transport.write(&m3)?;
    debug!(protocol = "bsts", side = "b", "session key derived");
    b.key()
}

/// Run BPACE as party A.
pub fn run_bpace_a(
    transport: &mut dyn Transport,
    curve: &Curve,
    settings: Settings<'_>,
    pwd: &[u8],
    rng: &mut dyn CryptoRngCore,
) -> Result<[u8; 32]> {
    let mut a = BpaceA::new(curve, settings, pwd)?;
    let mut m1 = vec![0u8; curve.octets() / 2];
    read_exact(transport, &mut m1)?;
    let m2 = a.step3(&m1, rng)?;
    transport.write(&m2)?;
    let mut m3 =
        vec![0u8; 2 * curve.octets() + if settings.kcb { TAG_OCTETS } else { 0 }];
    read_exact(transport, &mut m3)?;
    let m4 = a.step5(&m3)?;
    if settings.kca {
        transport.write(&m4)?;
    }
    debug!(protocol = "bpace", side = "a", "session key derived");
    a.key()
}

/// Run BPACE as party B.
pub fn run_bpace_b(
    transport: &mut dyn Transport,
    curve: &Curve,
    settings: Settings<'_>,
    pwd: &[u8],
    rng: &mut dyn CryptoRngCore,
) -> Result<[u8; 32]> {
    let mut b = BpaceB::new(curve, settings, pwd)?;
    let m1 = b.step2(rng)?;
    transport.write(&m1)?;
    let mut m2 = vec![0u8; curve.octets() / 2 + 2 * curve.octets()];
    read_exact(transport, &mut m2)?;
    let m3 = b.step4(&m2, rng)?;
    transport.write(&m3)?;
    if settings.kca {
        let mut m4 = [0u8; TAG_OCTETS];
        read_exact(transport, &mut m4)?;
        b.step6(&m4)?;
    }
    debug!(protocol = "bpace", side = "b", "session key derived");
    b.key()
}
