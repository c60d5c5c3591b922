//! belt-ECB with ciphertext stealing for ragged tails.

use crate::block::{cipher, decrypt_block, encrypt_block};
use crate::BLOCK_OCTETS;
use stb_types::{Error, Result};

/// Encrypt in place. The buffer must be at least one block long; a ragged
/// tail of `r` octets is handled by stealing from the last full block.
pub fn ecb_encrypt(key: &[u8; 32], buf: &mut [u8]) -> Result<()> {
    if buf.len() < BLOCK_OCTETS {
        return Err(Error::BadInput);
    }
    let c = cipher(key);
    let full = buf.len() / BLOCK_OCTETS;
    let r = buf.len() % BLOCK_OCTETS;
    let whole = if r == 0 { full } else { full - 1 };
    for i in 0..whole {
        let mut b = [0u8; BLOCK_OCTETS];
        b.copy_from_slice(&buf[i * BLOCK_OCTETS..(i + 1) * BLOCK_OCTETS]);
        encrypt_block(&c, &mut b);
        buf[i * BLOCK_OCTETS..(i + 1) * BLOCK_OCTETS].copy_from_slice(&b);
    }
    if r != 0 {
        // steal the tail of E(X_{n−1}) to pad X_n, emit the leading r
        // octets as the ragged block
        let base = (full - 1) * BLOCK_OCTETS;
        let mut t = [0u8; BLOCK_OCTETS];
        t.copy_from_slice(&buf[base..base + BLOCK_OCTETS]);
        encrypt_block(&c, &mut t);
        let mut u = [0u8; BLOCK_OCTETS];
        u[..r].copy_from_slice(&buf[base + BLOCK_OCTETS..]);
        u[r..].copy_from_slice(&t[r..]);
        encrypt_block(&c, &mut u);
        buf[base..base + BLOCK_OCTETS].copy_from_slice(&u);
        buf[base + BLOCK_OCTETS..].copy_from_slice(&t[..r]);
    }
    Ok(())
}

/// Decrypt in place; the exact inverse of [`ecb_encrypt`].
pub fn ecb_decrypt(key: &[u8; 32], buf: &mut [u8]) -> Result<()> {
    if buf.len() < BLOCK_OCTETS {
        return Err(Error::BadInput);
    }
    let c = cipher(key);
    let full = buf.len() / BLOCK_OCTETS;
    let r = buf.len() % BLOCK_OCTETS;
    let whole = if r == 0 { full } else { full - 1 };
    for i in 0..whole {
        let mut b = [0u8; BLOCK_OCTETS];
        b.copy_from_slice(&buf[i * BLOCK_OCTETS..(i + 1) * BLOCK_OCTETS]);
        decrypt_block(&c, &mut b);
        buf[i * BLOCK_OCTETS..(i + 1) * BLOCK_OCTETS].copy_from_slice(&b);
    }
    if r != 0 {
        let base = (full - 1) * BLOCK_OCTETS;
        let mut u = [0u8; BLOCK_OCTETS];
        u.copy_from_slice(&buf[base..base + BLOCK_OCTETS]);
        decrypt_block(&c, &mut u);
        let mut t = [0u8; BLOCK_OCTETS];
        t[..r].copy_from_slice(&buf[base + BLOCK_OCTETS..]);
        t[r..].copy_from_slice(&u[r..]);
        decrypt_block(&c, &mut t);
        buf[base..base + BLOCK_OCTETS].copy_from_slice(&t);
        buf[base + BLOCK_OCTETS..].copy_from_slice(&u[..r]);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn round_trips_for_every_tail_length() {
        let mut rng = StdRng::seed_from_u64(0xecb);
        let key: [u8; 32] = rng.gen();
        for len in [16usize, 17, 24, 31, 32, 33, 48, 64, 65] {
            let mut buf: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
            let orig = buf.clone();
            ecb_encrypt(&key, &mut buf).unwrap();
            assert_ne!(buf, orig);
            ecb_decrypt(&key, &mut buf).unwrap();
            assert_eq!(buf, orig);
        }
    }

    #[test]
    fn short_buffers_are_rejected() {
        let key = [0u8; 32];
        let mut b = [0u8; 15];
        assert!(ecb_encrypt(&key, &mut b).is_err());
        assert!(ecb_decrypt(&key, &mut b).is_err());
    }

    #[test]
    fn whole_block_mode_is_per_block() {
        let key = [7u8; 32];
        let mut one = [0x11u8; 16];
        let mut two = [0x11u8; 32];
        ecb_encrypt(&key, &mut one).unwrap();
        ecb_encrypt(&key, &mut two).unwrap();
        assert_eq!(&two[..16], &one);
        assert_eq!(&two[16..], &one);
    }
}
