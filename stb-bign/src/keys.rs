use core::fmt;
use core::str;
use rand_core::CryptoRngCore;
use stb_ec::{AffineOrInf, Curve};
use stb_types::{words_from_octets, Error, Result, Word};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A long-term private key: `l/4` little-endian octets of a scalar in
/// `{1, …, q−1}`. Wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    octets: Vec<u8>,
}

impl PrivateKey {
    /// The raw little-endian octets.
    pub fn as_octets(&self) -> &[u8] {
        &self.octets
    }

    /// Decode and range-check against a live curve: `0 < d < q`.
    pub fn to_scalar(&self, curve: &Curve) -> Result<Vec<Word>> {
        if self.octets.len() != curve.octets() {
            return Err(Error::BadPrivkey);
        }
        let mut d = vec![0 as Word; curve.words()];
        words_from_octets(&mut d, &self.octets);
        if stb_zz::is_zero(&d) || stb_zz::cmp(&d, curve.order()) != core::cmp::Ordering::Less {
            d.zeroize();
            return Err(Error::BadPrivkey);
        }
        Ok(d)
    }
}

impl TryFrom<&[u8]> for PrivateKey {
    type Error = Error;

    fn try_from(octets: &[u8]) -> Result<PrivateKey> {
        if !matches!(octets.len(), 32 | 48 | 64) {
            return Err(Error::BadPrivkey);
        }
        Ok(PrivateKey {
            octets: octets.to_vec(),
        })
    }
}

impl str::FromStr for PrivateKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<PrivateKey> {
        let octets = hex::decode(s).map_err(|_| Error::BadPrivkey)?;
        PrivateKey::try_from(&octets[..])
    }
}

impl fmt::LowerHex for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.octets))
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey({:x})", self)
    }
}

/// A public key: the `(x ‖ y)` encoding of `Q = d·G`, `2·(l/4)` octets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    octets: Vec<u8>,
}

impl PublicKey {
    /// The raw point encoding.
    pub fn as_octets(&self) -> &[u8] {
        &self.octets
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = Error;

    fn try_from(octets: &[u8]) -> Result<PublicKey> {
        if !matches!(octets.len(), 64 | 96 | 128) {
            return Err(Error::BadPubkey);
        }
        Ok(PublicKey {
            octets: octets.to_vec(),
        })
    }
}

impl str::FromStr for PublicKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<PublicKey> {
        let octets = hex::decode(s).map_err(|_| Error::BadPubkey)?;
        PublicKey::try_from(&octets[..])
    }
}

impl fmt::LowerHex for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.octets))
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

/// Draw `d ∈ {1, …, q−1}` by rejection sampling and derive `Q = d·G`
/// through the constant-time ladder.
pub fn gen_keypair(
    curve: &Curve,
    rng: &mut dyn CryptoRngCore,
) -> Result<(PrivateKey, PublicKey)> {
    let no = curve.octets();
    let mut octets = vec![0u8; no];
    let mut d = vec![0 as Word; curve.words()];
    loop {
        rng.try_fill_bytes(&mut octets).map_err(|_| Error::BadRng)?;
        words_from_octets(&mut d, &octets);
        if !stb_zz::is_zero(&d) && stb_zz::cmp(&d, curve.order()) == core::cmp::Ordering::Less {
            break;
        }
    }
    let private = PrivateKey {
        octets: octets.clone(),
    };
    octets.zeroize();
    let public = public_key(curve, &private)?;
    d.zeroize();
    Ok((private, public))
}

/// Derive the public key of a private key.
pub fn public_key(curve: &Curve, private: &PrivateKey) -> Result<PublicKey> {
    let mut d = private.to_scalar(curve)?;
    let mut stack = curve.alloc_stack();
    let q = match curve.mul_safe(curve.base(), &d, &mut stack) {
        AffineOrInf::Point(p) => p,
        AffineOrInf::Infinity => {
            d.zeroize();
            return Err(Error::BadPrivkey);
        }
    };
    d.zeroize();
    let mut octets = vec![0u8; 2 * curve.octets()];
    curve.encode_point(&mut octets, &q, &mut stack);
    Ok(PublicKey { octets })
}

/// Validate a public key against a live curve: decode and require curve
/// membership (subgroup membership follows from the cofactor-one groups).
pub fn val_pubkey(curve: &Curve, public: &PublicKey) -> Result<()> {
    if public.octets.len() != 2 * curve.octets() {
        return Err(Error::BadPubkey);
    }
    let mut stack = curve.alloc_stack();
    curve
        .decode_point(&public.octets, &mut stack)
        .map(|_| ())
        .map_err(|_| Error::BadPubkey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StdCurve;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn generated_keys_validate_and_round_trip() {
        let curve = crate::bign_start(&StdCurve::Curve256v1.params().unwrap()).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let (private, public) = gen_keypair(&curve, &mut rng).unwrap();
        val_pubkey(&curve, &public).unwrap();
        assert_eq!(public, public_key(&curve, &private).unwrap());

        let hex_form = format!("{:x}", private);
        let back: PrivateKey = hex_form.parse().unwrap();
        assert_eq!(back, private);

        // corrupting the point drops it off the curve
        let mut bad = public.as_octets().to_vec();
        bad[1] ^= 4;
        let bad = PublicKey::try_from(&bad[..]).unwrap();
        assert!(val_pubkey(&curve, &bad).is_err());
    }

    #[test]
    fn out_of_range_private_keys_are_rejected() {
        let curve = crate::bign_start(&StdCurve::Curve256v1.params().unwrap()).unwrap();
        let zero = PrivateKey::try_from(&[0u8; 32][..]).unwrap();
        assert_eq!(zero.to_scalar(&curve), Err(Error::BadPrivkey));
        let huge = PrivateKey::try_from(&[0xffu8; 32][..]).unwrap();
        assert_eq!(huge.to_scalar(&curve), Err(Error::BadPrivkey));
    }
}
