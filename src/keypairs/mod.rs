//! Seed generation, key derivation and signing
//!
//! Two algorithm families sit behind [`CryptoImplementation`]. Seeds carry
//! their family in the version prefix and keys carry it in their first byte,
//! so every entry point here dispatches on an explicit [`CryptoAlgorithm`]
//! rather than trying each family in turn.

pub mod ed25519;
pub mod secp256k1;

pub use ed25519::Ed25519Crypto;
pub use secp256k1::Secp256k1Crypto;

use std::fmt;

use log::debug;
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::address_codec::{
    decode_seed, encode_classic_address_from_public_key_hex, encode_node_public_key, encode_seed,
    CryptoAlgorithm, ED25519_PREFIX, FAMILY_SEED_LENGTH,
};
use crate::error::{CodecError, Result};
use crate::utils::{decode_hex, sha512_half};

const VERIFICATION_MESSAGE: &[u8] = b"This test message should verify.";

/// Operations one signing algorithm family provides. Keys cross this
/// boundary as uppercase hex strings.
pub trait CryptoImplementation {
    /// Expand 16 bytes of seed entropy into `(private_key, public_key)`
    fn derive_keypair(&self, decoded_seed: &[u8], validator: bool) -> Result<(String, String)>;

    fn sign(&self, message: &[u8], private_key: &str) -> Result<String>;

    fn validate(&self, message: &[u8], public_key: &str, signature: &str) -> Result<bool>;
}

/// Implementation for an algorithm family
pub fn implementation(algorithm: CryptoAlgorithm) -> &'static dyn CryptoImplementation {
    match algorithm {
        CryptoAlgorithm::Ed25519 => &Ed25519Crypto,
        CryptoAlgorithm::Secp256k1 => &Secp256k1Crypto,
    }
}

/// Source of seed entropy when the caller supplies none
pub trait RandomSource {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()>;
}

/// Operating system CSPRNG
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| CodecError::Crypto(format!("Failed to read secure random bytes: {e}")))
    }
}

/// Derived key material. The private key is wiped when the pair is dropped.
#[derive(Clone, ZeroizeOnDrop)]
pub struct Keypair {
    private_key: String,
    #[zeroize(skip)]
    public_key: String,
    #[zeroize(skip)]
    algorithm: CryptoAlgorithm,
}

impl Keypair {
    pub fn private_key(&self) -> &str {
        &self.private_key
    }

    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    pub fn algorithm(&self) -> CryptoAlgorithm {
        self.algorithm
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("private_key", &"<redacted>")
            .field("public_key", &self.public_key)
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

/// Encode a new family seed.
///
/// Non-empty entropy is used deterministically: its first 16 bytes become
/// the seed, after extending shorter input with its own SHA-512-half. Empty
/// entropy is replaced by 16 bytes from the operating system CSPRNG.
pub fn generate_seed(entropy: &str, algorithm: CryptoAlgorithm) -> Result<String> {
    generate_seed_with(entropy, algorithm, &mut OsRandom)
}

pub fn generate_seed_with(
    entropy: &str,
    algorithm: CryptoAlgorithm,
    rng: &mut dyn RandomSource,
) -> Result<String> {
    let mut bytes = if entropy.is_empty() {
        let mut random = vec![0u8; FAMILY_SEED_LENGTH];
        rng.fill_bytes(&mut random)?;
        random
    } else {
        let mut expanded = entropy.as_bytes().to_vec();
        if expanded.len() < FAMILY_SEED_LENGTH {
            let digest = sha512_half(entropy.as_bytes());
            expanded.extend_from_slice(&digest);
        }
        expanded.truncate(FAMILY_SEED_LENGTH);
        expanded
    };

    let seed = encode_seed(&bytes, algorithm);
    bytes.zeroize();
    seed
}

/// Derive the key pair a seed stands for and check that it signs
pub fn derive_keypair(seed: &str, validator: bool) -> Result<Keypair> {
    let (mut entropy, algorithm) = decode_seed(seed)?;
    let derived = implementation(algorithm).derive_keypair(&entropy, validator);
    entropy.zeroize();
    let (private_key, public_key) = derived?;

    let keypair = Keypair {
        private_key,
        public_key,
        algorithm,
    };
    let signature = sign(VERIFICATION_MESSAGE, keypair.private_key())?;
    if !validate(VERIFICATION_MESSAGE, keypair.public_key(), &signature)? {
        return Err(CodecError::Crypto(
            "derived keypair did not generate a verifiable signature".to_string(),
        ));
    }
    debug!("Derived {} keypair {}", algorithm, keypair.public_key());
    Ok(keypair)
}

/// Algorithm family a hex-encoded key belongs to
pub fn algorithm_from_key(key: &str) -> Result<CryptoAlgorithm> {
    let bytes = decode_hex("Key", key)?;
    match (bytes.len(), bytes.first()) {
        (33, Some(&ED25519_PREFIX)) => Ok(CryptoAlgorithm::Ed25519),
        (33, Some(0x00 | 0x02 | 0x03)) | (32, _) => Ok(CryptoAlgorithm::Secp256k1),
        (len, _) => Err(CodecError::UnsupportedAlgorithm(format!(
            "cannot tell the algorithm of a {len} byte key"
        ))),
    }
}

pub fn sign(message: &[u8], private_key: &str) -> Result<String> {
    implementation(algorithm_from_key(private_key)?).sign(message, private_key)
}

pub fn validate(message: &[u8], public_key: &str, signature: &str) -> Result<bool> {
    implementation(algorithm_from_key(public_key)?).validate(message, public_key, signature)
}

pub fn derive_classic_address(public_key: &str) -> Result<String> {
    encode_classic_address_from_public_key_hex(public_key)
}

/// Node public key (`n...`) of the validator key pair a seed stands for
pub fn derive_node_public_key(seed: &str) -> Result<String> {
    let keypair = derive_keypair(seed, true)?;
    encode_node_public_key(&decode_hex("PublicKey", keypair.public_key())?)
}
