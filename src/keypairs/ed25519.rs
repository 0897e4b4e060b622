use ring::signature::{Ed25519KeyPair, KeyPair, UnparsedPublicKey, ED25519};
use zeroize::Zeroize;

use super::CryptoImplementation;
use crate::address_codec::ED25519_PREFIX;
use crate::error::{CodecError, Result};
use crate::utils::{decode_hex, encode_hex, sha512_half};

const RAW_KEY_LENGTH: usize = 32;

/// ED25519 family: the private key is SHA-512-half of the seed entropy and
/// both keys carry the `ED` marker byte
#[derive(Debug, Default, Clone, Copy)]
pub struct Ed25519Crypto;

/// Strip the `ED` marker from a hex key, returning the raw 32 bytes
fn raw_key(instance: &str, key_hex: &str) -> Result<Vec<u8>> {
    let mut key = decode_hex(instance, key_hex)?;
    if key.len() != RAW_KEY_LENGTH + 1 || key[0] != ED25519_PREFIX {
        return Err(CodecError::EncodeLength {
            instance: instance.to_string(),
            expected: RAW_KEY_LENGTH + 1,
            actual: key.len(),
        });
    }
    key.remove(0);
    Ok(key)
}

fn key_pair(raw_private: &[u8]) -> Result<Ed25519KeyPair> {
    Ed25519KeyPair::from_seed_unchecked(raw_private)
        .map_err(|e| CodecError::Crypto(format!("Failed to build ed25519 key pair: {e}")))
}

impl CryptoImplementation for Ed25519Crypto {
    fn derive_keypair(&self, decoded_seed: &[u8], validator: bool) -> Result<(String, String)> {
        if validator {
            return Err(CodecError::UnsupportedAlgorithm(
                "validator keys cannot be derived from an ed25519 seed".to_string(),
            ));
        }
        let mut raw_private = sha512_half(decoded_seed);
        let public_key = key_pair(&raw_private)?.public_key().as_ref().to_vec();

        let private_hex = format!("ED{}", encode_hex(&raw_private));
        raw_private.zeroize();
        Ok((private_hex, format!("ED{}", encode_hex(&public_key))))
    }

    fn sign(&self, message: &[u8], private_key: &str) -> Result<String> {
        let mut raw_private = raw_key("PrivateKey", private_key)?;
        let signature = key_pair(&raw_private)?.sign(message);
        raw_private.zeroize();
        Ok(encode_hex(signature.as_ref()))
    }

    fn validate(&self, message: &[u8], public_key: &str, signature: &str) -> Result<bool> {
        let raw_public = raw_key("PublicKey", public_key)?;
        let signature = decode_hex("Signature", signature)?;
        Ok(UnparsedPublicKey::new(&ED25519, &raw_public)
            .verify(message, &signature)
            .is_ok())
    }
}
