use super::{
    base58check_decode, decode, encode, ACCOUNT_ADDRESS_LENGTH, ACCOUNT_ADDRESS_PREFIX,
    ACCOUNT_PUBLIC_KEY_LENGTH, ACCOUNT_PUBLIC_KEY_PREFIX, ED25519_PREFIX, NODE_PUBLIC_KEY_LENGTH,
    NODE_PUBLIC_KEY_PREFIX,
};
use crate::error::{CodecError, Result};
use crate::utils::{decode_hex, hash160};

/// Length of a decoded classic address: version byte, account id and checksum
const CLASSIC_ADDRESS_DECODED_LENGTH: usize = 1 + ACCOUNT_ADDRESS_LENGTH + 4;

/// Derive the classic address of a hex-encoded public key.
///
/// Keys shorter than a full 33-byte compressed key are assumed to be raw
/// ED25519 points and get the `0xED` marker prepended before hashing.
pub fn encode_classic_address_from_public_key_hex(public_key_hex: &str) -> Result<String> {
    let mut public_key = decode_hex("PublicKey", public_key_hex)?;
    if public_key.len() < ACCOUNT_PUBLIC_KEY_LENGTH {
        public_key.insert(0, ED25519_PREFIX);
    }
    if public_key.len() != ACCOUNT_PUBLIC_KEY_LENGTH {
        return Err(CodecError::EncodeLength {
            instance: "PublicKey".to_string(),
            expected: ACCOUNT_PUBLIC_KEY_LENGTH,
            actual: public_key.len(),
        });
    }

    let account_id = hash160(&public_key);
    let address = encode_account_id(&account_id)?;

    // Round-trip the result before handing it out
    if !is_valid_classic_address(&address) {
        return Err(CodecError::InvalidClassicAddress(address));
    }
    Ok(address)
}

/// Classic address of a raw 20-byte account id
pub fn encode_account_id(account_id: &[u8]) -> Result<String> {
    if account_id.len() != ACCOUNT_ADDRESS_LENGTH {
        return Err(CodecError::EncodeLength {
            instance: "AccountID".to_string(),
            expected: ACCOUNT_ADDRESS_LENGTH,
            actual: account_id.len(),
        });
    }
    encode(account_id, &[ACCOUNT_ADDRESS_PREFIX], ACCOUNT_ADDRESS_LENGTH)
}

/// Split a classic address into its version byte and 20-byte account id
pub fn decode_classic_address_to_account_id(
    classic_address: &str,
) -> Result<(u8, [u8; ACCOUNT_ADDRESS_LENGTH])> {
    let invalid = || CodecError::InvalidClassicAddress(classic_address.to_string());

    let raw = crate::utils::base58_decode(classic_address).map_err(|_| invalid())?;
    if raw.len() != CLASSIC_ADDRESS_DECODED_LENGTH {
        return Err(invalid());
    }
    let data = base58check_decode(classic_address).map_err(|_| invalid())?;
    if data[0] != ACCOUNT_ADDRESS_PREFIX {
        return Err(invalid());
    }

    let mut account_id = [0u8; ACCOUNT_ADDRESS_LENGTH];
    account_id.copy_from_slice(&data[1..]);
    Ok((data[0], account_id))
}

pub fn is_valid_classic_address(classic_address: &str) -> bool {
    decode_classic_address_to_account_id(classic_address).is_ok()
}

/// Base58Check form of a 33-byte node (validator) public key
pub fn encode_node_public_key(public_key: &[u8]) -> Result<String> {
    encode(public_key, &[NODE_PUBLIC_KEY_PREFIX], NODE_PUBLIC_KEY_LENGTH).map_err(|e| {
        rename_instance(e, "NodePublicKey")
    })
}

pub fn decode_node_public_key(encoded: &str) -> Result<Vec<u8>> {
    let key = decode(encoded, &[NODE_PUBLIC_KEY_PREFIX])?;
    check_decoded_length("NodePublicKey", &key, NODE_PUBLIC_KEY_LENGTH)?;
    Ok(key)
}

/// Base58Check form of a 33-byte account public key
pub fn encode_account_public_key(public_key: &[u8]) -> Result<String> {
    encode(
        public_key,
        &[ACCOUNT_PUBLIC_KEY_PREFIX],
        ACCOUNT_PUBLIC_KEY_LENGTH,
    )
    .map_err(|e| rename_instance(e, "AccountPublicKey"))
}

pub fn decode_account_public_key(encoded: &str) -> Result<Vec<u8>> {
    let key = decode(encoded, &[ACCOUNT_PUBLIC_KEY_PREFIX])?;
    check_decoded_length("AccountPublicKey", &key, ACCOUNT_PUBLIC_KEY_LENGTH)?;
    Ok(key)
}

fn check_decoded_length(instance: &str, data: &[u8], expected: usize) -> Result<()> {
    if data.len() != expected {
        return Err(CodecError::EncodeLength {
            instance: instance.to_string(),
            expected,
            actual: data.len(),
        });
    }
    Ok(())
}

fn rename_instance(err: CodecError, instance: &str) -> CodecError {
    match err {
        CodecError::EncodeLength {
            expected, actual, ..
        } => CodecError::EncodeLength {
            instance: instance.to_string(),
            expected,
            actual,
        },
        other => other,
    }
}
