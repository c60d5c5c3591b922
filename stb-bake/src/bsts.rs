//! BSTS: station-to-station with encrypted certificate trailers.
//!
//! Key confirmation is not optional here; the construction authenticates
//! through MAC-then-decrypt trailers and the algebraic identity
//! `s·G + (2^l + t)·Q = V` on both sides. Wire shape:
//! `M1 (B→A) = Vb`, `M2 (A→B) = Va ‖ E(sa ‖ certA) ‖ Ta`,
//! `M3 (B→A) = E(sb ‖ certB) ‖ Tb`.

use crate::kdf::{
    challenge, check_identity, draw_scalar, point_octets, response_scalar, subkey, x_octets,
    ONES_BLOCK, ZERO_BLOCK,
};
use crate::session::{CertVal, Settings, Stage};
use crate::TAG_OCTETS;
use rand_core::CryptoRngCore;
use stb_bign::PrivateKey;
use stb_ec::{Affine, AffineOrInf, Curve};
use stb_types::{words_from_octets, words_into_octets, Error, Result, Word};
use zeroize::{Zeroize, ZeroizeOnDrop};

const CFB_IV: [u8; 16] = [0u8; 16];

fn reject_settings(settings: &Settings<'_>) -> Result<()> {
    if settings.kca && settings.kcb {
        Ok(())
    } else {
        Err(Error::BadInput)
    }
}

/// Build the encrypted trailer `E_{K2}(s ‖ cert)` plus its tag.
fn seal_trailer(
    curve: &Curve,
    k1: &[u8; 32],
    k2: &[u8; 32],
    s: &[Word],
    cert: &[u8],
    tag_body: &[u8; 16],
) -> Vec<u8> {
    let no = curve.octets();
    let mut blob = vec![0u8; no + cert.len()];
    words_into_octets(&mut blob[..no], s);
    blob[no..].copy_from_slice(cert);
    stb_belt::cfb_encrypt(k2, &CFB_IV, &mut blob);
    let tag = stb_belt::mac_parts(k1, &[&blob, tag_body]);
    blob.extend_from_slice(&tag);
    blob
}

/// Verify and open a peer trailer: MAC first, then decrypt, range-check
/// the response scalar, validate the embedded certificate and check the
/// algebraic identity against the peer's ephemeral.
fn open_trailer(
    curve: &Curve,
    k1: &[u8; 32],
    k2: &[u8; 32],
    trailer: &[u8],
    tag_body: &[u8; 16],
    peer_val: &dyn CertVal,
    w: &[Word],
    v_peer: &Affine,
) -> Result<()> {
    let no = curve.octets();
    if trailer.len() < no + TAG_OCTETS {
        return Err(Error::BadInput);
    }
    let (enc, tag) = trailer.split_at(trailer.len() - TAG_OCTETS);
    let mut tag8 = [0u8; TAG_OCTETS];
    tag8.copy_from_slice(tag);
    let expect = stb_belt::mac_parts(k1, &[enc, tag_body]);
    if !stb_types::octets_eq_ct(&expect, &tag8) {
        return Err(Error::Auth);
    }
    let mut blob = enc.to_vec();
    stb_belt::cfb_decrypt(k2, &CFB_IV, &mut blob);
    let mut s = vec![0 as Word; curve.words()];
    words_from_octets(&mut s, &blob[..no]);
    // the response scalar travels in the clear once decrypted and is not
    // secret; the range check runs on public data
    if stb_zz::cmp(&s, curve.order()) != core::cmp::Ordering::Less {
        return Err(Error::Auth);
    }
    let q_peer = peer_val
        .validate(curve, &blob[no..])
        .map_err(|_| Error::BadCert)?;
    check_identity(curve, &s, w, &q_peer, v_peer)
}

/// Derive `K0, K1, K2` from the Diffie–Hellman point and the hellos.
fn derive(
    curve: &Curve,
    settings: &Settings<'_>,
    k_point: &Affine,
) -> ([u8; 32], [u8; 32], [u8; 32]) {
    let kraw = stb_belt::hash_parts(&[
        &x_octets(curve, k_point),
        settings.hello_a,
        settings.hello_b,
    ]);
    (subkey(&kraw, 0), subkey(&kraw, 1), subkey(&kraw, 2))
}

/// Party A of a BSTS session.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct BstsA<'a> {
    #[zeroize(skip)]
    curve: &'a Curve,
    #[zeroize(skip)]
    settings: Settings<'a>,
    #[zeroize(skip)]
    cert_a: &'a [u8],
    #[zeroize(skip)]
    peer_val: &'a dyn CertVal,
    d: Vec<Word>,
    w: Vec<Word>,
    vb: Vec<u8>,
    k0: [u8; 32],
    k1: [u8; 32],
    k2: [u8; 32],
    #[zeroize(skip)]
    stage: Stage,
}

impl<'a> BstsA<'a> {
    /// Start a session; BSTS runs with both confirmation flags set, any
    /// other request is malformed.
    pub fn new(
        curve: &'a Curve,
        settings: Settings<'a>,
        privkey: &PrivateKey,
        cert_a: &'a [u8],
        peer_val: &'a dyn CertVal,
    ) -> Result<Self> {
        reject_settings(&settings)?;
        let d = privkey.to_scalar(curve)?;
        Ok(BstsA {
            curve,
            settings,
            cert_a,
            peer_val,
            d,
            w: Vec::new(),
            vb: Vec::new(),
            k0: [0; 32],
            k1: [0; 32],
            k2: [0; 32],
            stage: Stage::Await(3),
        })
    }

    /// Consume `M1 = Vb`, emit `M2`.
    pub fn step3(&mut self, msg: &[u8], rng: &mut dyn CryptoRngCore) -> Result<Vec<u8>> {
        let out = self.step3_inner(msg, rng);
        if out.is_err() {
            self.stage = Stage::Poisoned;
        }
        out
    }

    fn step3_inner(&mut self, msg: &[u8], rng: &mut dyn CryptoRngCore) -> Result<Vec<u8>> {
        self.stage.expect(3)?;
        let no = self.curve.octets();
        let mut stack = self.curve.alloc_stack();
        let vb = self.curve.decode_point(msg, &mut stack)?;
        let mut u = draw_scalar(self.curve, rng)?;
        let va = match self.curve.mul_safe(self.curve.base(), &u, &mut stack) {
            AffineOrInf::Point(p) => p,
            AffineOrInf::Infinity => return Err(Error::BadRng),
        };
        // K = ua·Vb
        let k_point = match self.curve.mul_safe(&vb, &u, &mut stack) {
            AffineOrInf::Point(p) => p,
            AffineOrInf::Infinity => return Err(Error::Auth),
        };
        let (k0, k1, k2) = derive(self.curve, &self.settings, &k_point);
        self.k0 = k0;
        self.k1 = k1;
        self.k2 = k2;
        let va_oct = point_octets(self.curve, &va);
        self.w = challenge(self.curve, &va_oct[..no], &msg[..no]);
        self.vb = msg.to_vec();
        let mut s = response_scalar(self.curve, &u, &self.w, &self.d);
        u.zeroize();
        let trailer = seal_trailer(self.curve, &self.k1, &self.k2, &s, self.cert_a, &ZERO_BLOCK);
        s.zeroize();
        let mut out = va_oct;
        out.extend_from_slice(&trailer);
        self.stage = Stage::Await(5);
        Ok(out)
    }

    /// Consume `M3`, closing the session.
    pub fn step5(&mut self, msg: &[u8]) -> Result<()> {
        let out = self.step5_inner(msg);
        if out.is_err() {
            self.stage = Stage::Poisoned;
        }
        out
    }

    fn step5_inner(&mut self, msg: &[u8]) -> Result<()> {
        self.stage.expect(5)?;
        let mut stack = self.curve.alloc_stack();
        let vb = self.curve.decode_point(&self.vb, &mut stack)?;
        open_trailer(
            self.curve,
            &self.k1,
            &self.k2,
            msg,
            &ONES_BLOCK,
            self.peer_val,
            &self.w,
            &vb,
        )?;
        self.stage = Stage::Done;
        Ok(())
    }

    /// Export `K0` after the terminal step.
    pub fn key(&self) -> Result<[u8; 32]> {
        match self.stage {
            Stage::Done => Ok(self.k0),
            _ => Err(Error::BadLogic),
        }
    }
}

/// Party B of a BSTS session.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct BstsB<'a> {
    #[zeroize(skip)]
    curve: &'a Curve,
    #[zeroize(skip)]
    settings: Settings<'a>,
    #[zeroize(skip)]
    cert_b: &'a [u8],
    #[zeroize(skip)]
    peer_val: &'a dyn CertVal,
    d: Vec<Word>,
    u: Vec<Word>,
    vb: Vec<u8>,
    k0: [u8; 32],
    k1: [u8; 32],
    k2: [u8; 32],
    #[zeroize(skip)]
    stage: Stage,
}

impl<'a> BstsB<'a> {
    /// Start a session on B's side.
    pub fn new(
        curve: &'a Curve,
        settings: Settings<'a>,
        privkey: &PrivateKey,
        cert_b: &'a [u8],
        peer_val: &'a dyn CertVal,
    ) -> Result<Self> {
        reject_settings(&settings)?;
        let d = privkey.to_scalar(curve)?;
        Ok(BstsB {
            curve,
            settings,
            cert_b,
            peer_val,
            d,
            u: Vec::new(),
            vb: Vec::new(),
            k0: [0; 32],
            k1: [0; 32],
            k2: [0; 32],
            stage: Stage::Await(2),
        })
    }

    /// Emit `M1 = Vb`.
    pub fn step2(&mut self, rng: &mut dyn CryptoRngCore) -> Result<Vec<u8>> {
        let out = self.step2_inner(rng);
        if out.is_err() {
            self.stage = Stage::Poisoned;
        }
        out
    }

    fn step2_inner(&mut self, rng: &mut dyn CryptoRngCore) -> Result<Vec<u8>> {
        self.stage.expect(2)?;
        let mut stack = self.curve.alloc_stack();
        self.u = draw_scalar(self.curve, rng)?;
        let vb = match self.curve.mul_safe(self.curve.base(), &self.u, &mut stack) {
            AffineOrInf::Point(p) => p,
            AffineOrInf::Infinity => return Err(Error::BadRng),
        };
        self.vb = point_octets(self.curve, &vb);
        self.stage = Stage::Await(4);
        Ok(self.vb.clone())
    }

    /// Consume `M2`, emit `M3`.
    pub fn step4(&mut self, msg: &[u8]) -> Result<Vec<u8>> {
        let out = self.step4_inner(msg);
        if out.is_err() {
            self.stage = Stage::Poisoned;
        }
        out
    }

    fn step4_inner(&mut self, msg: &[u8]) -> Result<Vec<u8>> {
        self.stage.expect(4)?;
        let no = self.curve.octets();
        if msg.len() < 3 * no + TAG_OCTETS {
            return Err(Error::BadInput);
        }
        let mut stack = self.curve.alloc_stack();
        let va = self.curve.decode_point(&msg[..2 * no], &mut stack)?;
        // K = ub·Va
        let k_point = match self.curve.mul_safe(&va, &self.u, &mut stack) {
            AffineOrInf::Point(p) => p,
            AffineOrInf::Infinity => return Err(Error::Auth),
        };
        let (k0, k1, k2) = derive(self.curve, &self.settings, &k_point);
        self.k0 = k0;
        self.k1 = k1;
        self.k2 = k2;
        let w = challenge(self.curve, &msg[..no], &self.vb[..no]);
        open_trailer(
            self.curve,
            &self.k1,
            &self.k2,
            &msg[2 * no..],
            &ZERO_BLOCK,
            self.peer_val,
            &w,
            &va,
        )?;
        let mut s = response_scalar(self.curve, &self.u, &w, &self.d);
        self.u.zeroize();
        let out = seal_trailer(self.curve, &self.k1, &self.k2, &s, self.cert_b, &ONES_BLOCK);
        s.zeroize();
        self.stage = Stage::Done;
        Ok(out)
    }

    /// Export `K0` after the terminal step.
    pub fn key(&self) -> Result<[u8; 32]> {
        match self.stage {
            Stage::Done => Ok(self.k0),
            _ => Err(Error::BadLogic),
        }
    }
}
