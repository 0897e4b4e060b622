use std::fmt;
use std::str::FromStr;

use super::{
    base58check_decode, encode, ED25519_PREFIX, ED25519_SEED_PREFIX, FAMILY_SEED_LENGTH,
    FAMILY_SEED_PREFIX,
};
use crate::error::{CodecError, Result};

/// Signing algorithm families.
///
/// The discriminants are the families' prefix bytes rather than small
/// ordinals, so a tag can be compared directly against a key or seed prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CryptoAlgorithm {
    Ed25519 = ED25519_PREFIX,
    Secp256k1 = FAMILY_SEED_PREFIX,
}

impl CryptoAlgorithm {
    pub fn from_tag(tag: u8) -> Result<CryptoAlgorithm> {
        match tag {
            ED25519_PREFIX => Ok(CryptoAlgorithm::Ed25519),
            FAMILY_SEED_PREFIX => Ok(CryptoAlgorithm::Secp256k1),
            other => Err(CodecError::UnsupportedAlgorithm(format!(
                "tag 0x{other:02X}; encoding type must be `ed25519` or `secp256k1`"
            ))),
        }
    }

    pub fn tag(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CryptoAlgorithm::Ed25519 => "ed25519",
            CryptoAlgorithm::Secp256k1 => "secp256k1",
        }
    }

    /// Version bytes written in front of a seed of this family
    pub fn seed_prefix(self) -> &'static [u8] {
        match self {
            CryptoAlgorithm::Ed25519 => &ED25519_SEED_PREFIX,
            CryptoAlgorithm::Secp256k1 => &[FAMILY_SEED_PREFIX],
        }
    }
}

impl fmt::Display for CryptoAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CryptoAlgorithm {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ed25519" => Ok(CryptoAlgorithm::Ed25519),
            "secp256k1" => Ok(CryptoAlgorithm::Secp256k1),
            _ => Err(CodecError::UnsupportedAlgorithm(format!(
                "{s}; encoding type must be `ed25519` or `secp256k1`"
            ))),
        }
    }
}

/// Encode 16 bytes of entropy as a family seed of the given algorithm
pub fn encode_seed(entropy: &[u8], algorithm: CryptoAlgorithm) -> Result<String> {
    if entropy.len() != FAMILY_SEED_LENGTH {
        return Err(CodecError::EncodeLength {
            instance: "Entropy".to_string(),
            expected: FAMILY_SEED_LENGTH,
            actual: entropy.len(),
        });
    }
    encode(entropy, algorithm.seed_prefix(), FAMILY_SEED_LENGTH)
}

/// Decode a family seed into its entropy and algorithm. Base58 and checksum
/// failures surface as such; a well-formed payload with neither family's
/// prefix is `UnknownSeedAlgorithm`.
pub fn decode_seed(seed: &str) -> Result<(Vec<u8>, CryptoAlgorithm)> {
    let data = base58check_decode(seed)?;

    for algorithm in [CryptoAlgorithm::Ed25519, CryptoAlgorithm::Secp256k1] {
        let prefix = algorithm.seed_prefix();
        if data.len() == prefix.len() + FAMILY_SEED_LENGTH && data.starts_with(prefix) {
            return Ok((data[prefix.len()..].to_vec(), algorithm));
        }
    }
    Err(CodecError::UnknownSeedAlgorithm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_tags_alias_prefixes() {
        assert_eq!(CryptoAlgorithm::Ed25519.tag(), 0xED);
        assert_eq!(CryptoAlgorithm::Secp256k1.tag(), 0x21);
        assert_eq!(
            CryptoAlgorithm::from_tag(0xED).unwrap(),
            CryptoAlgorithm::Ed25519
        );
        assert!(matches!(
            CryptoAlgorithm::from_tag(0),
            Err(CodecError::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn test_encode_seed_vectors() {
        assert_eq!(
            encode_seed(b"fakeRandomString", CryptoAlgorithm::Ed25519).unwrap(),
            "sEdTjrdnJaPE2NNjmavQqXQdrf71NiH"
        );
        assert_eq!(
            encode_seed(b"fakeRandomString", CryptoAlgorithm::Secp256k1).unwrap(),
            "sh3pdwcaoo7vt5rtrEZJ7a75LnDo3"
        );
    }

    #[test]
    fn test_encode_seed_wrong_length() {
        let err = encode_seed(b"short", CryptoAlgorithm::Ed25519).unwrap_err();
        assert_eq!(
            err,
            CodecError::EncodeLength {
                instance: "Entropy".to_string(),
                expected: 16,
                actual: 5
            }
        );
    }

    #[test]
    fn test_decode_seed_detects_algorithm() {
        let (entropy, algorithm) = decode_seed("sEdTuXdrgQobjDidph2oMDN36jGZX2U").unwrap();
        assert_eq!(entropy, b"setPasswordOverL");
        assert_eq!(algorithm, CryptoAlgorithm::Ed25519);

        let (entropy, algorithm) = decode_seed("shJYdazRN9dvWbGqCehzHcBKWBaFR").unwrap();
        assert_eq!(entropy, b"setPasswordOverL");
        assert_eq!(algorithm, CryptoAlgorithm::Secp256k1);
    }

    #[test]
    fn test_decode_seed_rejects_other_payloads() {
        assert_eq!(
            decode_seed("rMBzp8CgpE441cp5PVyA9rpVV7oT8hP3ys").unwrap_err(),
            CodecError::UnknownSeedAlgorithm
        );
    }

    #[test]
    fn test_decode_seed_keeps_encoding_errors() {
        assert_eq!(
            decode_seed("sEdTjrdnJaPE2NNjmavQqXQdrf71Nix").unwrap_err(),
            CodecError::ChecksumMismatch
        );
        assert!(matches!(
            decode_seed("sEdTjrdnJaPE2NNjmavQqXQdrf71Ni0"),
            Err(CodecError::InvalidBase58(_))
        ));
    }

    #[test]
    fn test_algorithm_from_str() {
        assert_eq!(
            "SECP256K1".parse::<CryptoAlgorithm>().unwrap(),
            CryptoAlgorithm::Secp256k1
        );
        assert!("rsa".parse::<CryptoAlgorithm>().is_err());
    }
}
