//! BPACE: password-authenticated key agreement over an ephemeral
//! hash-derived generator.
//!
//! Both parties expand the password into `K2 = belt-hash(pwd)` at start,
//! exchange ECB-wrapped nonces, map the joint nonce to the curve with
//! [`crate::bake_swu`], and run a plain Diffie–Hellman over the mapped
//! generator. Wire shape: `M1 (B→A) = Yb`, `M2 (A→B) = Ya ‖ Va`,
//! `M3 (B→A) = Vb ‖ [Tb]`, `M4 (A→B) = [Ta]`.

use crate::kdf::{draw_scalar, point_octets, subkey, x_octets, ONES_BLOCK, ZERO_BLOCK};
use crate::session::{Settings, Stage};
use crate::swu::bake_swu;
use crate::TAG_OCTETS;
use rand_core::CryptoRngCore;
use stb_ec::{Affine, AffineOrInf, Curve};
use stb_types::{Error, Result, Word};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Nonce length: `l/8` octets.
fn nonce_octets(curve: &Curve) -> usize {
    curve.octets() / 2
}

/// Derive `K0` (and `K1` when confirmation is on) from the shared point
/// and the transcript.
fn derive(
    curve: &Curve,
    settings: &Settings<'_>,
    k_point: &Affine,
    va: &[u8],
    vb: &[u8],
) -> ([u8; 32], [u8; 32]) {
    let kraw = stb_belt::hash_parts(&[
        &x_octets(curve, k_point),
        va,
        vb,
        settings.hello_a,
        settings.hello_b,
    ]);
    let k0 = subkey(&kraw, 0);
    let k1 = if settings.kca || settings.kcb {
        subkey(&kraw, 1)
    } else {
        [0u8; 32]
    };
    (k0, k1)
}

/// Party A of a BPACE session.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct BpaceA<'a> {
    #[zeroize(skip)]
    curve: &'a Curve,
    #[zeroize(skip)]
    settings: Settings<'a>,
    k2: [u8; 32],
    u: Vec<Word>,
    va: Vec<u8>,
    k0: [u8; 32],
    k1: [u8; 32],
    #[zeroize(skip)]
    stage: Stage,
}

impl<'a> BpaceA<'a> {
    /// Start a session: the password collapses into `K2` immediately and
    /// is not retained.
    pub fn new(curve: &'a Curve, settings: Settings<'a>, pwd: &[u8]) -> Result<Self> {
        Ok(BpaceA {
            curve,
            settings,
            k2: stb_belt::hash(pwd),
            u: Vec::new(),
            va: Vec::new(),
            k0: [0; 32],
            k1: [0; 32],
            stage: Stage::Await(3),
        })
    }

    /// Consume `M1 = Yb`, emit `M2 = Ya ‖ Va`.
    pub fn step3(&mut self, msg: &[u8], rng: &mut dyn CryptoRngCore) -> Result<Vec<u8>> {
        let out = self.step3_inner(msg, rng);
        if out.is_err() {
            self.stage = Stage::Poisoned;
        }
        out
    }

    fn step3_inner(&mut self, msg: &[u8], rng: &mut dyn CryptoRngCore) -> Result<Vec<u8>> {
        self.stage.expect(3)?;
        let nl = nonce_octets(self.curve);
        if msg.len() != nl {
            return Err(Error::BadInput);
        }
        let mut rb = msg.to_vec();
        stb_belt::ecb_decrypt(&self.k2, &mut rb)?;
        let mut ra = vec![0u8; nl];
        rng.try_fill_bytes(&mut ra).map_err(|_| Error::BadRng)?;
        let mut seed = ra.clone();
        seed.extend_from_slice(&rb);
        let gen = bake_swu(self.curve, &seed)?;
        seed.zeroize();
        rb.zeroize();
        self.u = draw_scalar(self.curve, rng)?;
        let mut stack = self.curve.alloc_stack();
        let va = match self.curve.mul_safe(&gen, &self.u, &mut stack) {
            AffineOrInf::Point(p) => p,
            AffineOrInf::Infinity => return Err(Error::BadRng),
        };
        self.va = point_octets(self.curve, &va);
        let mut ya = ra;
        stb_belt::ecb_encrypt(&self.k2, &mut ya)?;
        let mut out = ya;
        out.extend_from_slice(&self.va);
        self.stage = Stage::Await(5);
        Ok(out)
    }

    /// Consume `M3 = Vb ‖ [Tb]`, emit `M4 = [Ta]`.
    pub fn step5(&mut self, msg: &[u8]) -> Result<Vec<u8>> {
        let out = self.step5_inner(msg);
        if out.is_err() {
            self.stage = Stage::Poisoned;
        }
        out
    }

    fn step5_inner(&mut self, msg: &[u8]) -> Result<Vec<u8>> {
        self.stage.expect(5)?;
        let no = self.curve.octets();
        let expected = 2 * no + if self.settings.kcb { TAG_OCTETS } else { 0 };
        if msg.len() != expected {
            return Err(Error::BadInput);
        }
        let mut stack = self.curve.alloc_stack();
        let vb = self.curve.decode_point(&msg[..2 * no], &mut stack)?;
        let k_point = match self.curve.mul_safe(&vb, &self.u, &mut stack) {
            AffineOrInf::Point(p) => p,
            AffineOrInf::Infinity => return Err(Error::Auth),
        };
        self.u.zeroize();
        let (k0, k1) = derive(self.curve, &self.settings, &k_point, &self.va, &msg[..2 * no]);
        self.k0 = k0;
        self.k1 = k1;
        if self.settings.kcb {
            let mut tag = [0u8; TAG_OCTETS];
            tag.copy_from_slice(&msg[2 * no..]);
            if !stb_belt::mac_verify(&self.k1, &ONES_BLOCK, &tag) {
                return Err(Error::Auth);
            }
        }
        let out = if self.settings.kca {
            stb_belt::mac(&self.k1, &ZERO_BLOCK).to_vec()
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

/// Party B of a BPACE session.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct BpaceB<'a> {
    #[zeroize(skip)]
    curve: &'a Curve,
    #[zeroize(skip)]
    settings: Settings<'a>,
    k2: [u8; 32],
    rb: Vec<u8>,
    u: Vec<Word>,
    k0: [u8; 32],
    k1: [u8; 32],
    #[zeroize(skip)]
    stage: Stage,
}

impl<'a> BpaceB<'a> {
    /// Start a session on B's side.
    pub fn new(curve: &'a Curve, settings: Settings<'a>, pwd: &[u8]) -> Result<Self> {
        Ok(BpaceB {
            curve,
            settings,
            k2: stb_belt::hash(pwd),
            rb: Vec::new(),
            u: Vec::new(),
            k0: [0; 32],
            k1: [0; 32],
            stage: Stage::Await(2),
        })
    }

    /// Emit `M1 = Yb`.
    pub fn step2(&mut self, rng: &mut dyn CryptoRngCore) -> Result<Vec<u8>> {
        let out = self.step2_inner(rng);
        if out.is_err() {
            self.stage = Stage::Poisoned;
        }
        out
    }

    fn step2_inner(&mut self, rng: &mut dyn CryptoRngCore) -> Result<Vec<u8>> {
        self.stage.expect(2)?;
        let nl = nonce_octets(self.curve);
        self.rb = vec![0u8; nl];
        rng.try_fill_bytes(&mut self.rb).map_err(|_| Error::BadRng)?;
        let mut yb = self.rb.clone();
        stb_belt::ecb_encrypt(&self.k2, &mut yb)?;
        self.stage = Stage::Await(4);
        Ok(yb)
    }

    /// Consume `M2 = Ya ‖ Va`, emit `M3 = Vb ‖ [Tb]`.
    pub fn step4(&mut self, msg: &[u8], rng: &mut dyn CryptoRngCore) -> Result<Vec<u8>> {
        let out = self.step4_inner(msg, rng);
        if out.is_err() {
            self.stage = Stage::Poisoned;
        }
        out
    }

    fn step4_inner(&mut self, msg: &[u8], rng: &mut dyn CryptoRngCore) -> Result<Vec<u8>> {
        self.stage.expect(4)?;
        let nl = nonce_octets(self.curve);
        let no = self.curve.octets();
        if msg.len() != nl + 2 * no {
            return Err(Error::BadInput);
        }
        let mut ra = msg[..nl].to_vec();
        stb_belt::ecb_decrypt(&self.k2, &mut ra)?;
        let mut seed = ra;
        seed.extend_from_slice(&self.rb);
        let gen = bake_swu(self.curve, &seed)?;
        seed.zeroize();
        let mut stack = self.curve.alloc_stack();
        let va = self.curve.decode_point(&msg[nl..], &mut stack)?;
        self.u = draw_scalar(self.curve, rng)?;
        let vb = match self.curve.mul_safe(&gen, &self.u, &mut stack) {
            AffineOrInf::Point(p) => p,
            AffineOrInf::Infinity => return Err(Error::BadRng),
        };
        let vb_oct = point_octets(self.curve, &vb);
        let k_point = match self.curve.mul_safe(&va, &self.u, &mut stack) {
            AffineOrInf::Point(p) => p,
            AffineOrInf::Infinity => return Err(Error::Auth),
        };
        self.u.zeroize();
        let (k0, k1) = derive(self.curve, &self.settings, &k_point, &msg[nl..], &vb_oct);
        self.k0 = k0;
        self.k1 = k1;
        let mut out = vb_oct;
        if self.settings.kcb {
            out.extend_from_slice(&stb_belt::mac(&self.k1, &ONES_BLOCK));
        }
        self.stage = if self.settings.kca {
            Stage::Await(6)
        } else {
            Stage::Done
        };
        Ok(out)
    }

    /// Consume `M4 = Ta` (present only with `kca`).
    pub fn step6(&mut self, msg: &[u8]) -> Result<()> {
        let out = self.step6_inner(msg);
        if out.is_err() {
            self.stage = Stage::Poisoned;
        }
        out
    }

    fn step6_inner(&mut self, msg: &[u8]) -> Result<()> {
        self.stage.expect(6)?;
        if msg.len() != TAG_OCTETS {
            return Err(Error::BadInput);
        }
        let mut tag = [0u8; TAG_OCTETS];
        tag.copy_from_slice(msg);
        if !stb_belt::mac_verify(&self.k1, &ZERO_BLOCK, &tag) {
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
