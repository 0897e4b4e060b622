use ring::digest::{digest, SHA256, SHA512};
use ripemd::{Digest as RipemdDigest, Ripemd160};

use crate::error::{CodecError, Result};

pub fn sha256_digest(data: &[u8]) -> Vec<u8> {
    digest(&SHA256, data).as_ref().to_vec()
}

/// First 32 bytes of SHA-512, the ledger's standard 256-bit hash
pub fn sha512_half(data: &[u8]) -> [u8; 32] {
    let full = digest(&SHA512, data);
    let mut half = [0u8; 32];
    half.copy_from_slice(&full.as_ref()[..32]);
    half
}

pub fn ripemd160_digest(data: &[u8]) -> Vec<u8> {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    hasher.finalize().to_vec()
}

/// RIPEMD160(SHA256(data)), used to turn a public key into an account id
pub fn hash160(data: &[u8]) -> Vec<u8> {
    ripemd160_digest(&sha256_digest(data))
}

pub fn base58_encode(data: &[u8]) -> String {
    bs58::encode(data)
        .with_alphabet(bs58::Alphabet::RIPPLE)
        .into_string()
}

pub fn base58_decode(data: &str) -> Result<Vec<u8>> {
    bs58::decode(data)
        .with_alphabet(bs58::Alphabet::RIPPLE)
        .into_vec()
        .map_err(CodecError::from)
}
