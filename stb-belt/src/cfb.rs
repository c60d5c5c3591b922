//! belt-CFB (full-block feedback) over the ecosystem mode.

use belt_block::BeltBlock;
use cfb_mode::{Decryptor, Encryptor};
use cipher::generic_array::GenericArray;
use cipher::{AsyncStreamCipher, KeyIvInit};

/// Encrypt in place; any length, 16-octet IV.
pub fn cfb_encrypt(key: &[u8; 32], iv: &[u8; 16], buf: &mut [u8]) {
    Encryptor::<BeltBlock>::new(GenericArray::from_slice(key), GenericArray::from_slice(iv))
        .encrypt(buf);
}

/// Decrypt in place; the inverse of [`cfb_encrypt`].
pub fn cfb_decrypt(key: &[u8; 32], iv: &[u8; 16], buf: &mut [u8]) {
    Decryptor::<BeltBlock>::new(GenericArray::from_slice(key), GenericArray::from_slice(iv))
        .decrypt(buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn round_trips_at_any_length() {
        let mut rng = StdRng::seed_from_u64(0xcfb);
        let key: [u8; 32] = rng.gen();
        let iv: [u8; 16] = rng.gen();
        for len in [0usize, 1, 15, 16, 17, 40, 64, 100] {
            let mut buf: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
            let orig = buf.clone();
            cfb_encrypt(&key, &iv, &mut buf);
            cfb_decrypt(&key, &iv, &mut buf);
            assert_eq!(buf, orig);
        }
    }

    #[test]
    fn iv_matters() {
        let key = [1u8; 32];
        let mut a = [0x5au8; 32];
        let mut b = [0x5au8; 32];
        cfb_encrypt(&key, &[0u8; 16], &mut a);
        cfb_encrypt(&key, &[1u8; 16], &mut b);
        assert_ne!(a, b);
    }
}
