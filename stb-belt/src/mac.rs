//! belt-MAC one-shots with constant-time verification.

use belt_mac::BeltMac;
use digest::Mac;

fn keyed(key: &[u8; 32]) -> BeltMac {
    <BeltMac as Mac>::new_from_slice(key).expect("belt-mac accepts 256-bit keys")
}

/// 64-bit tag over one buffer.
pub fn mac(key: &[u8; 32], data: &[u8]) -> [u8; 8] {
    let mut m = keyed(key);
    m.update(data);
    let full = m.finalize().into_bytes();
    let mut tag = [0u8; 8];
    tag.copy_from_slice(&full[..8]);
    tag
}

/// 64-bit tag over a concatenation, without materialising it.
pub fn mac_parts(key: &[u8; 32], parts: &[&[u8]]) -> [u8; 8] {
    let mut m = keyed(key);
    for p in parts {
        m.update(p);
    }
    let full = m.finalize().into_bytes();
    let mut tag = [0u8; 8];
    tag.copy_from_slice(&full[..8]);
    tag
}

/// Constant-time verification of a 64-bit tag.
pub fn mac_verify(key: &[u8; 32], data: &[u8], tag: &[u8; 8]) -> bool {
    let mut m = keyed(key);
    m.update(data);
    let full = m.finalize().into_bytes();
    let mut diff = 0u8;
    for i in 0..8 {
        diff |= full[i] ^ tag[i];
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_accepts_and_rejects() {
        let key = [0x42u8; 32];
        let tag = mac(&key, b"message");
        assert!(mac_verify(&key, b"message", &tag));
        assert!(!mac_verify(&key, b"messagf", &tag));
        let mut bad = tag;
        bad[0] ^= 1;
        assert!(!mac_verify(&key, b"message", &bad));
        let other = [0x43u8; 32];
        assert!(!mac_verify(&other, b"message", &tag));
    }

    #[test]
    fn parts_match_concatenation() {
        let key = [9u8; 32];
        assert_eq!(mac(&key, b"ab cd"), mac_parts(&key, &[b"ab", b" ", b"cd"]));
    }
}
