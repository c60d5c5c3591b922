use core::cmp::Ordering;
use stb_ec::{Curve, CurveParams, EcPolicy};
use stb_types::{words_for_octets, words_from_octets, Error, Result, Word};

/// The standard 128-bit-security curve, `p = 2^256 − 189`.
/// All strings little-endian.
mod curve256v1 {
    pub const P: [u8; 32] = [
        0x43, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff,
    ];
    pub const A: [u8; 32] = [
        0x40, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff,
    ];
    pub const B: [u8; 32] = [
        0xf1, 0x03, 0x9c, 0xd6, 0x6b, 0x7d, 0x2e, 0xb2, 0x53, 0x92, 0x8b, 0x97, 0x69, 0x50, 0xf5,
        0x4c, 0xbe, 0xfb, 0xd8, 0xe4, 0xab, 0x3a, 0xc1, 0xd2, 0xed, 0xa8, 0xf3, 0x15, 0x15, 0x6c,
        0xce, 0x77,
    ];
    pub const SEED: [u8; 8] = [0x5e, 0x38, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00];
    pub const Q: [u8; 32] = [
        0x07, 0x66, 0x3d, 0x26, 0x99, 0xbf, 0x5a, 0x7e, 0xfc, 0x4d, 0xfb, 0x0d, 0xd6, 0x8e, 0x5c,
        0xd9, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff,
    ];
    pub const YG: [u8; 32] = [
        0x93, 0x6a, 0x51, 0x04, 0x18, 0xcf, 0x29, 0x1e, 0x52, 0xf6, 0x08, 0xc4, 0x66, 0x39, 0x91,
        0x78, 0x5d, 0x83, 0xd6, 0x51, 0xa3, 0xc9, 0xe4, 0x5c, 0x9f, 0xd6, 0x16, 0xfb, 0x3c, 0xfc,
        0xf7, 0x6b,
    ];
}

/// The 192-bit-security curve. All strings little-endian.
mod curve384v1 {
    pub const P: [u8; 48] = [
        0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xff, 0xff,
        0xff, 0xff, 0xfe, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    ];
    pub const A: [u8; 48] = [
        0xfc, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xff, 0xff,
        0xff, 0xff, 0xfe, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    ];
    pub const B: [u8; 48] = [
        0xef, 0x2a, 0xec, 0xd3, 0xed, 0xc8, 0x85, 0x2a, 0x9d, 0xd1, 0x2e, 0x8a, 0x8d, 0x39,
        0x56, 0xc6, 0x5a, 0x87, 0x13, 0x50, 0x8f, 0x08, 0x14, 0x03, 0x12, 0x41, 0x81, 0xfe,
        0x6e, 0x9c, 0x1d, 0x18, 0x19, 0x2d, 0xf8, 0xe3, 0x6b, 0x05, 0x8e, 0x98, 0xe4, 0xe7,
        0x3e, 0xe2, 0xa7, 0x2f, 0x31, 0xb3,
    ];
    pub const SEED: [u8; 8] = [0x23, 0xaf, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00];
    pub const Q: [u8; 48] = [
        0x73, 0x29, 0xc5, 0xcc, 0x6a, 0x19, 0xec, 0xec, 0x7a, 0xa7, 0xb0, 0x48, 0xb2, 0x0d,
        0x1a, 0x58, 0xdf, 0x2d, 0x37, 0xf4, 0x81, 0x4d, 0x63, 0xc7, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    ];
    pub const YG: [u8; 48] = [
        0xe1, 0xad, 0xf1, 0x7a, 0x48, 0xbd, 0x48, 0x90, 0x4f, 0xd5, 0x1a, 0xb9, 0xd2, 0x80,
        0x6d, 0x40, 0x93, 0x07, 0x55, 0x75, 0x4f, 0x4b, 0x2c, 0xea, 0x2d, 0xd4, 0x02, 0xc6,
        0x41, 0x36, 0xeb, 0xc5, 0xa6, 0x22, 0x9f, 0x06, 0x06, 0x5c, 0xf4, 0x9c, 0x15, 0x5a,
        0xae, 0xb0, 0x0f, 0x61, 0x06, 0xc3,
    ];
}

/// The 256-bit-security curve. All strings little-endian.
mod curve512v1 {
    pub const P: [u8; 64] = [
        0x3b, 0x2a, 0x8f, 0xd5, 0x18, 0x01, 0x20, 0xa2, 0x7a, 0xc1, 0xff, 0x37, 0xa1, 0xe2,
        0x32, 0x9f, 0x5b, 0x04, 0x13, 0xeb, 0xe0, 0xe4, 0x1e, 0x40, 0xeb, 0xf3, 0x10, 0x3b,
        0x0b, 0x2a, 0x47, 0xb0, 0xad, 0x1d, 0xb0, 0x7e, 0xc9, 0xf6, 0x0b, 0x94, 0x97, 0xf5,
        0x61, 0xe2, 0x0b, 0x9f, 0x11, 0x7f, 0xfc, 0x13, 0x28, 0x98, 0x96, 0x41, 0xa0, 0xd8,
        0x0f, 0x3d, 0x88, 0x9f, 0x53, 0xaf, 0xf0, 0xc0,
    ];
    pub const A: [u8; 64] = [
        0x38, 0x2a, 0x8f, 0xd5, 0x18, 0x01, 0x20, 0xa2, 0x7a, 0xc1, 0xff, 0x37, 0xa1, 0xe2,
        0x32, 0x9f, 0x5b, 0x04, 0x13, 0xeb, 0xe0, 0xe4, 0x1e, 0x40, 0xeb, 0xf3, 0x10, 0x3b,
        0x0b, 0x2a, 0x47, 0xb0, 0xad, 0x1d, 0xb0, 0x7e, 0xc9, 0xf6, 0x0b, 0x94, 0x97, 0xf5,
        0x61, 0xe2, 0x0b, 0x9f, 0x11, 0x7f, 0xfc, 0x13, 0x28, 0x98, 0x96, 0x41, 0xa0, 0xd8,
        0x0f, 0x3d, 0x88, 0x9f, 0x53, 0xaf, 0xf0, 0xc0,
    ];
    pub const B: [u8; 64] = [
        0x89, 0x88, 0x95, 0x8f, 0x8e, 0xd6, 0x25, 0xe2, 0xab, 0x77, 0xec, 0x60, 0xfb, 0x42,
        0x5d, 0xcd, 0xb6, 0x97, 0x4e, 0x9e, 0x5e, 0xf3, 0x99, 0x5a, 0x45, 0xce, 0x9d, 0x3c,
        0xa6, 0xae, 0xbd, 0xf6, 0xbf, 0x48, 0x15, 0xf8, 0x69, 0xfd, 0xd9, 0x97, 0x2b, 0xaa,
        0x6c, 0xf7, 0xf0, 0xdb, 0xf8, 0x82, 0x67, 0xd4, 0x46, 0x29, 0xd8, 0x74, 0x01, 0xfc,
        0xd7, 0x32, 0x2d, 0xdb, 0xf0, 0x00, 0x9f, 0x63,
    ];
    pub const SEED: [u8; 8] = [0xc8, 0x51, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00];
    pub const Q: [u8; 64] = [
        0xbb, 0xee, 0x77, 0xf8, 0xc5, 0x6b, 0xe2, 0xf9, 0xc6, 0x2d, 0xad, 0x58, 0xfc, 0x77,
        0x36, 0x9c, 0xf7, 0xff, 0xc8, 0x7f, 0xbf, 0x81, 0x72, 0x28, 0xba, 0x16, 0x54, 0x83,
        0xc8, 0xfe, 0x50, 0xc7, 0xad, 0x1d, 0xb0, 0x7e, 0xc9, 0xf6, 0x0b, 0x94, 0x97, 0xf5,
        0x61, 0xe2, 0x0b, 0x9f, 0x11, 0x7f, 0xfc, 0x13, 0x28, 0x98, 0x96, 0x41, 0xa0, 0xd8,
        0x0f, 0x3d, 0x88, 0x9f, 0x53, 0xaf, 0xf0, 0xc0,
    ];
    pub const YG: [u8; 64] = [
        0x3e, 0xb7, 0x24, 0xcc, 0x7d, 0x22, 0xd7, 0xb5, 0x28, 0x58, 0x1d, 0xb8, 0x3a, 0xab,
        0xc7, 0x79, 0xb8, 0xdf, 0xe9, 0x26, 0x4a, 0xb7, 0x2a, 0x43, 0x06, 0x1c, 0x82, 0x45,
        0x77, 0x62, 0xb6, 0x1b, 0xbc, 0x1a, 0xc4, 0x03, 0xc9, 0xfd, 0x21, 0x8b, 0x70, 0x81,
        0xb7, 0x79, 0x73, 0xbd, 0x1e, 0x2e, 0x9b, 0x68, 0xe1, 0xa3, 0x20, 0xae, 0xc1, 0xb0,
        0xe4, 0x69, 0x98, 0x54, 0xd2, 0x2f, 0xee, 0xb4,
    ];
}

/// The standard bign curves by OID.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StdCurve {
    /// `1.2.112.0.2.0.34.101.45.3.1`, 128-bit security level.
    Curve256v1,
    /// `1.2.112.0.2.0.34.101.45.3.2`, 192-bit security level.
    Curve384v1,
    /// `1.2.112.0.2.0.34.101.45.3.3`, 256-bit security level.
    Curve512v1,
}

impl StdCurve {
    /// The curve's object identifier.
    pub fn oid(&self) -> &'static str {
        match self {
            StdCurve::Curve256v1 => "1.2.112.0.2.0.34.101.45.3.1",
            StdCurve::Curve384v1 => "1.2.112.0.2.0.34.101.45.3.2",
            StdCurve::Curve512v1 => "1.2.112.0.2.0.34.101.45.3.3",
        }
    }

    /// Resolve an object identifier.
    pub fn from_oid(oid: &str) -> Result<StdCurve> {
        match oid {
            "1.2.112.0.2.0.34.101.45.3.1" => Ok(StdCurve::Curve256v1),
            "1.2.112.0.2.0.34.101.45.3.2" => Ok(StdCurve::Curve384v1),
            "1.2.112.0.2.0.34.101.45.3.3" => Ok(StdCurve::Curve512v1),
            _ => Err(Error::BadInput),
        }
    }

    /// The security level `l` in bits.
    pub fn level(&self) -> usize {
        match self {
            StdCurve::Curve256v1 => 128,
            StdCurve::Curve384v1 => 192,
            StdCurve::Curve512v1 => 256,
        }
    }

    /// Materialise the curve's registered parameter block.
    pub fn params(&self) -> Result<Params> {
        Ok(match self {
            StdCurve::Curve256v1 => Params {
                l: 128,
                p: curve256v1::P.to_vec(),
                a: curve256v1::A.to_vec(),
                b: curve256v1::B.to_vec(),
                seed: curve256v1::SEED,
                q: curve256v1::Q.to_vec(),
                yg: curve256v1::YG.to_vec(),
            },
            StdCurve::Curve384v1 => Params {
                l: 192,
                p: curve384v1::P.to_vec(),
                a: curve384v1::A.to_vec(),
                b: curve384v1::B.to_vec(),
                seed: curve384v1::SEED,
                q: curve384v1::Q.to_vec(),
                yg: curve384v1::YG.to_vec(),
            },
            StdCurve::Curve512v1 => Params {
                l: 256,
                p: curve512v1::P.to_vec(),
                a: curve512v1::A.to_vec(),
                b: curve512v1::B.to_vec(),
                seed: curve512v1::SEED,
                q: curve512v1::Q.to_vec(),
                yg: curve512v1::YG.to_vec(),
            },
        })
    }
}

/// A bign parameter block; every field string little-endian, `l/4` octets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Params {
    /// Security level `l ∈ {128, 192, 256}`.
    pub l: usize,
    /// Field prime.
    pub p: Vec<u8>,
    /// Coefficient `A`.
    pub a: Vec<u8>,
    /// Coefficient `B`.
    pub b: Vec<u8>,
    /// The 64-bit generation seed behind `B`.
    pub seed: [u8; 8],
    /// Subgroup order.
    pub q: Vec<u8>,
    /// Ordinate of the base point `(0, y_G)`.
    pub yg: Vec<u8>,
}

impl Params {
    /// Field element length in octets.
    pub fn octets(&self) -> usize {
        self.l / 4
    }
}

fn shape_check(params: &Params) -> Result<()> {
    if !matches!(params.l, 128 | 192 | 256) {
        return Err(Error::BadParams);
    }
    let no = params.octets();
    if params.p.len() != no
        || params.a.len() != no
        || params.b.len() != no
        || params.q.len() != no
        || params.yg.len() != no
    {
        return Err(Error::BadParams);
    }
    Ok(())
}

/// The checks beyond what the curve bootstrap itself enforces: exact bit
/// lengths, the MOV condition and the quadratic-residuosity of `B`.
fn arithmetic_checks(params: &Params) -> Result<()> {
    let no = params.octets();
    let n = words_for_octets(no);
    let mut p = vec![0 as Word; n];
    let mut q = vec![0 as Word; n];
    let mut b = vec![0 as Word; n];
    words_from_octets(&mut p, &params.p);
    words_from_octets(&mut q, &params.q);
    words_from_octets(&mut b, &params.b);
    if stb_zz::bit_len(&p) != 2 * params.l || stb_zz::bit_len(&q) != 2 * params.l {
        return Err(Error::BadParams);
    }
    // p^i ≢ 1 (mod q) for i = 1…50 guards against MOV-style embeddings
    let mut t = vec![0 as Word; n];
    if stb_zz::cmp(&p, &q) == Ordering::Less {
        t.copy_from_slice(&p);
    } else {
        let borrow = stb_zz::sub(&mut t, &p, &q);
        debug_assert_eq!(borrow, 0);
    }
    let mut r = t.clone();
    let mut stack = vec![0 as Word; stb_zz::mul_mod_deep(n)];
    for _ in 0..50 {
        if stb_zz::trim_len(&r) == 1 && r[0] == 1 {
            return Err(Error::BadParams);
        }
        let prev = r.clone();
        stb_zz::mul_mod(&mut r, &prev, &t, &q, &mut stack);
    }
    // (B/p) = 1: B must be a quadratic residue so that G = (0, √B) exists
    let mut stack = vec![0 as Word; stb_zz::jacobi_deep(n, n)];
    if stb_zz::jacobi(&b, &p, &mut stack) != 1 {
        return Err(Error::BadParams);
    }
    Ok(())
}

/// Full mathematical validation of a parameter block: shape, bit lengths,
/// MOV indices, residuosity, and the whole curve bootstrap (discriminant,
/// base-point consistency, order annihilation) through a trial
/// construction.
pub fn val_params(params: &Params) -> Result<()> {
    shape_check(params)?;
    arithmetic_checks(params)?;
    bign_start(params).map(|_| ())
}

/// [`val_params`] plus the seed binding: recompute
/// `B ≡ belt-hash(p ‖ a ‖ seed) ‖ belt-hash(p ‖ a ‖ seed + 1) (mod p)`
/// and compare against the published coefficient.
pub fn val_params_binding(params: &Params) -> Result<()> {
    val_params(params)?;
    let h1 = stb_belt::hash_parts(&[&params.p, &params.a, &params.seed]);
    let next = u64::from_le_bytes(params.seed).wrapping_add(1).to_le_bytes();
    let h2 = stb_belt::hash_parts(&[&params.p, &params.a, &next]);
    let mut cat = [0u8; 64];
    cat[..32].copy_from_slice(&h1);
    cat[32..].copy_from_slice(&h2);

    let no = params.octets();
    let n = words_for_octets(no);
    let mut wide = vec![0 as Word; 8.max(2 * n)];
    words_from_octets(&mut wide[..8], &cat);
    let mut p = vec![0 as Word; n];
    words_from_octets(&mut p, &params.p);
    let mut derived = vec![0 as Word; n];
    let mut stack = vec![0 as Word; stb_zz::rem_deep(wide.len(), n)];
    stb_zz::rem(&mut derived, &wide, &p, &mut stack);
    let mut b = vec![0 as Word; n];
    words_from_octets(&mut b, &params.b);
    if b != derived {
        return Err(Error::BadParams);
    }
    Ok(())
}

/// Bootstrap a live curve from a parameter block; the constant-time
/// multiplication policy is the default for key-bearing callers.
pub fn bign_start(params: &Params) -> Result<Curve> {
    shape_check(params)?;
    let cp = CurveParams {
        p: &params.p,
        a: &params.a,
        b: &params.b,
        yg: &params.yg,
        q: &params.q,
        cofactor: 1,
    };
    Curve::new(&cp, EcPolicy::default())
}
