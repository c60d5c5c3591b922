//! Raw block access shared by the hand-wired modes.

use belt_block::BeltBlock;
use cipher::generic_array::GenericArray;
use cipher::{BlockDecrypt, BlockEncrypt, KeyInit};

pub(crate) fn cipher(key: &[u8; 32]) -> BeltBlock {
    BeltBlock::new(GenericArray::from_slice(key))
}

pub(crate) fn encrypt_block(c: &BeltBlock, block: &mut [u8; 16]) {
    c.encrypt_block(GenericArray::from_mut_slice(block));
}

pub(crate) fn decrypt_block(c: &BeltBlock, block: &mut [u8; 16]) {
    c.decrypt_block(GenericArray::from_mut_slice(block));
}

pub(crate) fn xor16(dst: &mut [u8], src: &[u8]) {
    debug_assert!(dst.len() >= 16 && src.len() >= 16);
    for i in 0..16 {
        dst[i] ^= src[i];
    }
}
