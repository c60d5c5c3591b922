//! BMQV: ephemeral-static MQV with certificate-bound long-term keys.
//!
//! Wire shape: `M1 (B→A) = Vb`, `M2 (A→B) = Va ‖ [Ta]`,
//! `M3 (B→A) = [Tb]`, the tags present when the corresponding
//! confirmation flag is set.

use crate::kdf::{
    challenge, draw_scalar, mqv_point, point_octets, response_scalar, shared_point, subkey,
    x_octets, ONES_BLOCK, ZERO_BLOCK,
};
use crate::session::{Cert, Settings, Stage};
use crate::TAG_OCTETS;
use rand_core::CryptoRngCore;
use stb_bign::PrivateKey;
use stb_ec::Curve;
use stb_types::{Error, Result, Word};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Derive the session keys of one BMQV party.
///
/// `v_mine`/`v_peer` are this party's and the peer's ephemerals; the
/// challenge hash always orders A's ephemeral first.
#[allow(clippy::too_many_arguments)]
fn derive(
    curve: &Curve,
    settings: &Settings<'_>,
    cert_a: &Cert<'_>,
    cert_b: &Cert<'_>,
    va_x: &[u8],
    vb_x: &[u8],
    u_mine: &[Word],
    d_mine: &[Word],
    v_peer: &stb_ec::Affine,
    peer_cert: &Cert<'_>,
) -> Result<([u8; 32], [u8; 32])> {
    let w = challenge(curve, va_x, vb_x);
    let q_peer = peer_cert
        .val
        .validate(curve, peer_cert.data)
        .map_err(|_| Error::BadCert)?;
    let mut s = response_scalar(curve, u_mine, &w, d_mine);
    let r = mqv_point(curve, v_peer, &w, &q_peer);
    let k = shared_point(curve, &s, &r);
    s.zeroize();
    let kraw = stb_belt::hash_parts(&[
        &x_octets(curve, &k),
        cert_a.data,
        cert_b.data,
        settings.hello_a,
        settings.hello_b,
    ]);
    let k0 = subkey(&kraw, 0);
    let k1 = if settings.kca || settings.kcb {
        subkey(&kraw, 1)
    } else {
        [0u8; 32]
    };
    Ok((k0, k1))
}

/// Party A of a BMQV session.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct BmqvA<'a> {
    #[zeroize(skip)]
    curve: &'a Curve,
    #[zeroize(skip)]
    settings: Settings<'a>,
    #[zeroize(skip)]
    cert_a: Cert<'a>,
    #[zeroize(skip)]
    cert_b: Cert<'a>,
    d: Vec<Word>,
    k0: [u8; 32],
    k1: [u8; 32],
    #[zeroize(skip)]
    stage: Stage,
}

impl<'a> BmqvA<'a> {
    /// Start a session: bind the curve, the settings, both certificates
    /// and A's long-term key.
    pub fn new(
        curve: &'a Curve,
        settings: Settings<'a>,
        privkey: &PrivateKey,
        cert_a: Cert<'a>,
        cert_b: Cert<'a>,
    ) -> Result<Self> {
        let d = privkey.to_scalar(curve)?;
        Ok(BmqvA {
            curve,
            settings,
            cert_a,
            cert_b,
            d,
            k0: [0; 32],
            k1: [0; 32],
            stage: Stage::Await(3),
        })
    }

    /// Consume `M1 = Vb`, emit `M2 = Va ‖ [Ta]`.
    pub fn step3(&mut self, msg: &[u8], rng: &mut dyn CryptoRngCore) -> Result<Vec<u8>> {
        let out = self.step3_inner(msg, rng);
        if out.is_err() {
            self.stage = Stage::Poisoned;
        }
        out
    }

    fn step3_inner(&mut self, msg: &[u8], rng: &mut dyn CryptoRngCore) -> Result<Vec<u8>> {
        self.stage.expect(3)?;
        let mut stack = self.curve.alloc_stack();
        let vb = self.curve.decode_point(msg, &mut stack)?;
        let mut u = draw_scalar(self.curve, rng)?;
        let va = match self.curve.mul_safe(self.curve.base(), &u, &mut stack) {
            stb_ec::AffineOrInf::Point(p) => p,
            stb_ec::AffineOrInf::Infinity => return Err(Error::BadRng),
        };
        let va_oct = point_octets(self.curve, &va);
        let (k0, k1) = derive(
            self.curve,
            &self.settings,
            &self.cert_a,
            &self.cert_b,
            &va_oct[..self.curve.octets()],
            &msg[..self.curve.octets()],
            &u,
            &self.d,
            &vb,
            &self.cert_b,
        )?;
        u.zeroize();
        self.k0 = k0;
        self.k1 = k1;
        let mut out = va_oct;
        if self.settings.kca {
            out.extend_from_slice(&stb_belt::mac(&self.k1, &ZERO_BLOCK));
        }
        self.stage = if self.settings.kcb {
            Stage::Await(5)
        } else {
            Stage::Done
        };
        Ok(out)
    }

    /// Consume `M3 = Tb` (present only with `kcb`).
    pub fn step5(&mut self, msg: &[u8]) -> Result<()> {
        let out = self.step5_inner(msg);
        if out.is_err() {
            self.stage = Stage::Poisoned;
        }
        out
    }

    fn step5_inner(&mut self, msg: &[u8]) -> Result<()> {
        self.stage.expect(5)?;
        if msg.len() != TAG_OCTETS {
            return Err(Error::BadInput);
        }
        let mut tag = [0u8; TAG_OCTETS];
        tag.copy_from_slice(msg);
        if !stb_belt::mac_verify(&self.k1, &ONES_BLOCK, &tag) {
            return Err(Error::Auth);
        }
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

/// Party B of a BMQV session.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct BmqvB<'a> {
    #[zeroize(skip)]
    curve: &'a Curve,
    #[zeroize(skip)]
    settings: Settings<'a>,
    #[zeroize(skip)]
    cert_a: Cert<'a>,
    #[zeroize(skip)]
    cert_b: Cert<'a>,
    d: Vec<Word>,
    u: Vec<Word>,
    vb_x: Vec<u8>,
    k0: [u8; 32],
    k1: [u8; 32],
    #[zeroize(skip)]
    stage: Stage,
}

impl<'a> BmqvB<'a> {
    /// Start a session on B's side.
    pub fn new(
        curve: &'a Curve,
        settings: Settings<'a>,
        privkey: &PrivateKey,
        cert_a: Cert<'a>,
        cert_b: Cert<'a>,
    ) -> Result<Self> {
        let d = privkey.to_scalar(curve)?;
        Ok(BmqvB {
            curve,
            settings,
            cert_a,
            cert_b,
            d,
            u: Vec::new(),
            vb_x: Vec::new(),
            k0: [0; 32],
            k1: [0; 32],
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
            stb_ec::AffineOrInf::Point(p) => p,
            stb_ec::AffineOrInf::Infinity => return Err(Error::BadRng),
        };
        let out = point_octets(self.curve, &vb);
        self.vb_x = out[..self.curve.octets()].to_vec();
        self.stage = Stage::Await(4);
        Ok(out)
    }

    /// Consume `M2 = Va ‖ [Ta]`, emit `M3 = [Tb]`.
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
        let expected = 2 * no + if self.settings.kca { TAG_OCTETS } else { 0 };
        if msg.len() != expected {
            return Err(Error::BadInput);
        }
        let mut stack = self.curve.alloc_stack();
        let va = self.curve.decode_point(&msg[..2 * no], &mut stack)?;
        let (k0, k1) = derive(
            self.curve,
            &self.settings,
            &self.cert_a,
            &self.cert_b,
            &msg[..no],
            &self.vb_x,
            &self.u,
            &self.d,
            &va,
            &self.cert_a,
        )?;
        self.u.zeroize();
        self.k0 = k0;
        self.k1 = k1;
        if self.settings.kca {
            let mut tag = [0u8; TAG_OCTETS];
            tag.copy_from_slice(&msg[2 * no..]);
            if !stb_belt::mac_verify(&self.k1, &ZERO_BLOCK, &tag) {
                return Err(Error::Auth);
            }
        }
        let out = if self.settings.kcb {
            stb_belt::mac(&self.k1, &ONES_BLOCK).to_vec()
        } else {
            Vec::new()
        };
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
