//! The hash-to-curve composition: wide-block expansion, reduction into
//! the field, then the SWU map.

use stb_ec::{swu_map, Affine, Curve};
use stb_types::{words_from_octets, Error, Result, Word};

/// Map an `l/4`-octet seed (the concatenated nonces in BPACE) to a curve
/// point: belt-WBL under the zero key expands `seed ‖ 0^128` to
/// `no + 16` octets, the result is reduced modulo `p` and pushed through
/// the SWU map. Deterministic, and never the identity.
pub fn bake_swu(curve: &Curve, seed: &[u8]) -> Result<Affine> {
    let no = curve.octets();
    if seed.len() != no {
        return Err(Error::BadInput);
    }
    let mut buf = vec![0u8; no + 16];
    buf[..no].copy_from_slice(seed);
    stb_belt::wbl_encrypt(&[0u8; 32], &mut buf)?;

    let n = curve.words();
    let mut wide = vec![0 as Word; n + 2];
    words_from_octets(&mut wide, &buf);
    let mut residue = vec![0 as Word; n];
    let mut stack = vec![0 as Word; stb_zz::rem_deep(n + 2, n)];
    stb_zz::rem(&mut residue, &wide, curve.ring().modulus(), &mut stack);

    let mut stack = curve.alloc_stack();
    let mut u = vec![0 as Word; n];
    curve.ring().encode(&mut u, &residue, &mut stack);
    Ok(swu_map(curve, &u, &mut stack))
}
