//! belt-hash one-shots.

use belt_hash::{BeltHash, Digest};

/// 256-bit belt hash of one buffer.
pub fn hash(data: &[u8]) -> [u8; 32] {
    let mut h = BeltHash::new();
    h.update(data);
    h.finalize().into()
}

/// 256-bit belt hash of a concatenation, without materialising it.
pub fn hash_parts(parts: &[&[u8]]) -> [u8; 32] {
    let mut h = BeltHash::new();
    for p in parts {
        h.update(p);
    }
    h.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parts_match_concatenation() {
        let whole = hash(b"belt hashing, split or not");
        let split = hash_parts(&[b"belt hashing", b", ", b"split or not"]);
        assert_eq!(whole, split);
        assert_ne!(hash(b""), hash(b"x"));
    }
}
