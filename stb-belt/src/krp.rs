//! Key repacking through the σ₂ compression.

use crate::block::{cipher, encrypt_block, xor16};

/// σ₂ over a 64-octet block `u1 ‖ u2 ‖ u3 ‖ u4`:
/// `E_{σ₁‖u4}(u1) ⊕ u1` followed by `E_{(σ₁⊕1^128)‖u3}(u2) ⊕ u2`,
/// with `σ₁ = E_{u3‖u4}(u1 ⊕ u2) ⊕ u1 ⊕ u2`.
fn sigma2(x: &[u8; 64]) -> [u8; 32] {
    let (u1, u2, u3, u4) = (&x[..16], &x[16..32], &x[32..48], &x[48..64]);
    let mut key = [0u8; 32];
    key[..16].copy_from_slice(u3);
    key[16..].copy_from_slice(u4);
    let mut s = [0u8; 16];
    s.copy_from_slice(u1);
    xor16(&mut s, u2);
    let folded = s;
    encrypt_block(&cipher(&key), &mut s);
    xor16(&mut s, &folded);

    let mut out = [0u8; 32];
    key[..16].copy_from_slice(&s);
    key[16..].copy_from_slice(u4);
    out[..16].copy_from_slice(u1);
    let mut lo = [0u8; 16];
    lo.copy_from_slice(u1);
    encrypt_block(&cipher(&key), &mut lo);
    xor16(&mut out[..16], &lo);

    for b in s.iter_mut() {
        *b ^= 0xff;
    }
    key[..16].copy_from_slice(&s);
    key[16..].copy_from_slice(u3);
    out[16..].copy_from_slice(u2);
    let mut hi = [0u8; 16];
    hi.copy_from_slice(u2);
    encrypt_block(&cipher(&key), &mut hi);
    xor16(&mut out[16..], &hi);
    out
}

/// Derive a 32-octet key from `key` bound to a 12-octet `level` and a
/// 16-octet `header`: `σ₂(⟨256⟩₃₂ ‖ level ‖ header ‖ key)`.
pub fn krp(key: &[u8; 32], level: &[u8; 12], header: &[u8; 16]) -> [u8; 32] {
    let mut x = [0u8; 64];
    x[..4].copy_from_slice(&(8 * key.len() as u32).to_le_bytes());
    x[4..16].copy_from_slice(level);
    x[16..32].copy_from_slice(header);
    x[32..].copy_from_slice(key);
    sigma2(&x)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONES: [u8; 12] = [0xff; 12];

    fn header(n: u8) -> [u8; 16] {
        let mut h = [0xffu8; 16];
        h[0] = n;
        h
    }

    #[test]
    fn headers_separate_keys() {
        let key = [0x33u8; 32];
        let k0 = krp(&key, &ONES, &header(0));
        let k1 = krp(&key, &ONES, &header(1));
        let k2 = krp(&key, &ONES, &header(2));
        assert_ne!(k0, k1);
        assert_ne!(k1, k2);
        assert_ne!(k0, k2);
        // deterministic
        assert_eq!(k0, krp(&key, &ONES, &header(0)));
    }

    #[test]
    fn level_and_key_separate_keys() {
        let key = [0x33u8; 32];
        let k = krp(&key, &ONES, &header(0));
        let mut level = ONES;
        level[0] = 0;
        assert_ne!(k, krp(&key, &level, &header(0)));
        let mut key2 = key;
        key2[31] ^= 0x80;
        assert_ne!(k, krp(&key2, &ONES, &header(0)));
    }
}
