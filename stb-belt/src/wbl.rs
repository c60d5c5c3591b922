//! Wide-block encipherment and the key wrap built on it.
//!
//! Each round folds every block but the last into a running sum, passes
//! it through the cipher, mixes in the last block and the round counter,
//! then rotates the buffer one block left with the mix appended. `2n`
//! rounds diffuse every octet into every other.

use crate::block::{cipher, decrypt_block, encrypt_block, xor16};
use crate::BLOCK_OCTETS;
use stb_types::{octets_eq_ct, Error, Result};

fn check_len(len: usize) -> Result<usize> {
    if len < 2 * BLOCK_OCTETS || len % BLOCK_OCTETS != 0 {
        return Err(Error::BadInput);
    }
    Ok(len / BLOCK_OCTETS)
}

/// Encrypt in place: at least two whole blocks.
pub fn wbl_encrypt(key: &[u8; 32], buf: &mut [u8]) -> Result<()> {
    let n = check_len(buf.len())?;
    let c = cipher(key);
    let len = buf.len();
    for round in 1..=(2 * n as u64) {
        let mut s = [0u8; BLOCK_OCTETS];
        for block in buf[..len - BLOCK_OCTETS].chunks_exact(BLOCK_OCTETS) {
            xor16(&mut s, block);
        }
        encrypt_block(&c, &mut s);
        xor16(&mut s, &buf[len - BLOCK_OCTETS..]);
        for (i, b) in round.to_le_bytes().iter().enumerate() {
            s[i] ^= *b;
        }
        buf.copy_within(BLOCK_OCTETS.., 0);
        buf[len - BLOCK_OCTETS..].copy_from_slice(&s);
    }
    Ok(())
}

/// Decrypt in place; the exact inverse of [`wbl_encrypt`].
pub fn wbl_decrypt(key: &[u8; 32], buf: &mut [u8]) -> Result<()> {
    let n = check_len(buf.len())?;
    let c = cipher(key);
    let len = buf.len();
    for round in (1..=(2 * n as u64)).rev() {
        let mut s = [0u8; BLOCK_OCTETS];
        s.copy_from_slice(&buf[len - BLOCK_OCTETS..]);
        buf.copy_within(..len - BLOCK_OCTETS, BLOCK_OCTETS);
        // buf[len−16..] now holds the round's last input block
        for (i, b) in round.to_le_bytes().iter().enumerate() {
            s[i] ^= *b;
        }
        xor16(&mut s, &buf[len - BLOCK_OCTETS..]);
        decrypt_block(&c, &mut s);
        // s is the sum of all blocks but the last; peel the known ones
        for block in buf[BLOCK_OCTETS..len - BLOCK_OCTETS].chunks_exact(BLOCK_OCTETS) {
            xor16(&mut s, block);
        }
        buf[..BLOCK_OCTETS].copy_from_slice(&s);
    }
    Ok(())
}

/// Wrap `body` under `key`, binding it to a 16-octet `header`:
/// the wide-block encipherment of `body ‖ header`. `body` must be at
/// least one block.
pub fn kwp_wrap(key: &[u8; 32], header: &[u8; 16], body: &[u8]) -> Result<Vec<u8>> {
    if body.len() < BLOCK_OCTETS || body.len() % BLOCK_OCTETS != 0 {
        return Err(Error::BadInput);
    }
    let mut out = Vec::with_capacity(body.len() + BLOCK_OCTETS);
    out.extend_from_slice(body);
    out.extend_from_slice(header);
    wbl_encrypt(key, &mut out)?;
    Ok(out)
}

/// Unwrap and authenticate: the trailing block must reproduce `header`
/// (constant-time comparison), otherwise [`Error::Auth`].
pub fn kwp_unwrap(key: &[u8; 32], header: &[u8; 16], wrapped: &[u8]) -> Result<Vec<u8>> {
    if wrapped.len() < 2 * BLOCK_OCTETS || wrapped.len() % BLOCK_OCTETS != 0 {
        return Err(Error::BadInput);
    }
    let mut buf = wrapped.to_vec();
    wbl_decrypt(key, &mut buf)?;
    let body_len = buf.len() - BLOCK_OCTETS;
    if !octets_eq_ct(&buf[body_len..], header) {
        return Err(Error::Auth);
    }
    buf.truncate(body_len);
    Ok(buf)
}
