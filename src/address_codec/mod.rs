//! Base58Check address codec
//!
//! Payloads are written as `prefix ‖ payload ‖ checksum` in the ledger's
//! base58 alphabet, where the checksum is the first four bytes of
//! SHA256(SHA256(prefix ‖ payload)). Classic addresses, seeds and public keys
//! are all built on the two functions in this file.

pub mod address;
pub mod seed;

pub use address::{
    decode_account_public_key, decode_classic_address_to_account_id, decode_node_public_key,
    encode_account_id, encode_account_public_key, encode_classic_address_from_public_key_hex,
    encode_node_public_key, is_valid_classic_address,
};
pub use seed::{decode_seed, encode_seed, CryptoAlgorithm};

use crate::error::{CodecError, Result};
use crate::utils::{base58_decode, base58_encode, sha256_digest};

pub const ACCOUNT_ADDRESS_LENGTH: usize = 20;
pub const ACCOUNT_PUBLIC_KEY_LENGTH: usize = 33;
pub const FAMILY_SEED_LENGTH: usize = 16;
pub const NODE_PUBLIC_KEY_LENGTH: usize = 33;
pub const CHECKSUM_LENGTH: usize = 4;

/// Classic address version byte, renders as a leading `r`
pub const ACCOUNT_ADDRESS_PREFIX: u8 = 0x00;
/// Account public key version byte, renders as a leading `a`
pub const ACCOUNT_PUBLIC_KEY_PREFIX: u8 = 0x23;
/// SECP256K1 family seed version byte, renders as a leading `s`
pub const FAMILY_SEED_PREFIX: u8 = 0x21;
/// Node (validator) public key version byte, renders as a leading `n`
pub const NODE_PUBLIC_KEY_PREFIX: u8 = 0x1C;
/// Marker byte that prefixes ED25519 keys
pub const ED25519_PREFIX: u8 = 0xED;
/// Version bytes of an ED25519 family seed, renders as a leading `sEd`
pub const ED25519_SEED_PREFIX: [u8; 3] = [0x01, 0xE1, 0x4B];

fn checksum(data: &[u8]) -> [u8; CHECKSUM_LENGTH] {
    let first_sha = sha256_digest(data);
    let second_sha = sha256_digest(first_sha.as_slice());
    let mut out = [0u8; CHECKSUM_LENGTH];
    out.copy_from_slice(&second_sha[..CHECKSUM_LENGTH]);
    out
}

/// Base58Check-encode `payload` under `prefix`, requiring `payload` to be
/// exactly `expected_length` bytes
pub fn encode(payload: &[u8], prefix: &[u8], expected_length: usize) -> Result<String> {
    if payload.len() != expected_length {
        return Err(CodecError::EncodeLength {
            instance: "Payload".to_string(),
            expected: expected_length,
            actual: payload.len(),
        });
    }
    Ok(base58check_encode(payload, prefix))
}

pub fn base58check_encode(payload: &[u8], prefix: &[u8]) -> String {
    let mut data = Vec::with_capacity(prefix.len() + payload.len() + CHECKSUM_LENGTH);
    data.extend_from_slice(prefix);
    data.extend_from_slice(payload);
    let checksum = checksum(&data);
    data.extend_from_slice(&checksum);
    base58_encode(&data)
}

/// Base58-decode and verify the checksum, returning `prefix ‖ payload`
pub fn base58check_decode(encoded: &str) -> Result<Vec<u8>> {
    let mut data = base58_decode(encoded)?;
    if data.len() < CHECKSUM_LENGTH + 1 {
        return Err(CodecError::Malformed(format!(
            "`{encoded}` is too short to carry a version and checksum"
        )));
    }
    let split = data.len() - CHECKSUM_LENGTH;
    if checksum(&data[..split]) != data[split..] {
        return Err(CodecError::ChecksumMismatch);
    }
    data.truncate(split);
    Ok(data)
}

/// Decode a Base58Check string whose leading bytes must equal `expected_prefix`,
/// returning the payload with the prefix stripped
pub fn decode(encoded: &str, expected_prefix: &[u8]) -> Result<Vec<u8>> {
    let data = base58check_decode(encoded)?;
    if data.len() < expected_prefix.len() || !data.starts_with(expected_prefix) {
        let shown = data.len().min(expected_prefix.len());
        return Err(CodecError::PrefixMismatch {
            expected: expected_prefix.to_vec(),
            actual: data[..shown].to_vec(),
        });
    }
    Ok(data[expected_prefix.len()..].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    #[test]
    fn test_round_trip_random_payloads() {
        let mut rng = rand::thread_rng();
        for len in [1usize, 16, 20, 32, 33] {
            let mut payload = vec![0u8; len];
            rng.fill_bytes(&mut payload);
            for prefix in [[ACCOUNT_ADDRESS_PREFIX], [NODE_PUBLIC_KEY_PREFIX]] {
                let encoded = encode(&payload, &prefix, len).unwrap();
                assert_eq!(decode(&encoded, &prefix).unwrap(), payload);
            }
        }
    }

    #[test]
    fn test_encode_length_mismatch() {
        let err = encode(&[1, 2, 3], &[ACCOUNT_ADDRESS_PREFIX], 20).unwrap_err();
        assert_eq!(
            err,
            CodecError::EncodeLength {
                instance: "Payload".to_string(),
                expected: 20,
                actual: 3
            }
        );
    }

    #[test]
    fn test_decode_prefix_mismatch() {
        let encoded = encode(&[7u8; 20], &[ACCOUNT_ADDRESS_PREFIX], 20).unwrap();
        let err = decode(&encoded, &[NODE_PUBLIC_KEY_PREFIX]).unwrap_err();
        assert!(matches!(err, CodecError::PrefixMismatch { .. }));
    }

    #[test]
    fn test_single_character_change_fails_checksum() {
        let encoded = encode(&[42u8; 20], &[ACCOUNT_ADDRESS_PREFIX], 20).unwrap();
        let alphabet = "rpshnaf39wBUDNEGHJKLM4PQRST7VWXYZ2bcdeCg65jkm8oFqi1tuvAxyz";
        for (i, original) in encoded.char_indices().skip(1) {
            let replacement = alphabet.chars().find(|c| *c != original).unwrap();
            let mut tampered = encoded.clone();
            tampered.replace_range(i..i + 1, &replacement.to_string());
            assert!(
                base58check_decode(&tampered).is_err(),
                "tampering position {i} was not detected"
            );
        }
    }

    #[test]
    fn test_decode_too_short() {
        assert!(matches!(
            base58check_decode("rr"),
            Err(CodecError::Malformed(_))
        ));
    }
}
