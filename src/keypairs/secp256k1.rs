use ::secp256k1::ecdsa::Signature;
use ::secp256k1::{Message, PublicKey, Scalar, Secp256k1, SecretKey};
use log::debug;

use super::CryptoImplementation;
use crate::error::{CodecError, Result};
use crate::utils::{decode_hex, encode_hex, sha512_half};

const RAW_KEY_LENGTH: usize = 32;

/// SECP256K1 family: root and account keys derived by iterated
/// SHA-512-half, ECDSA over SHA-512-half of the message
#[derive(Debug, Default, Clone, Copy)]
pub struct Secp256k1Crypto;

fn crypto_error(context: &str, err: ::secp256k1::Error) -> CodecError {
    CodecError::Crypto(format!("{context}: {err}"))
}

/// First SHA-512-half of `bytes ‖ [discriminator] ‖ counter` that is a
/// valid secret scalar
fn derive_scalar(bytes: &[u8], discriminator: Option<u32>) -> Result<SecretKey> {
    for counter in 0..=u32::MAX {
        let mut data = bytes.to_vec();
        if let Some(discriminator) = discriminator {
            data.extend_from_slice(&discriminator.to_be_bytes());
        }
        data.extend_from_slice(&counter.to_be_bytes());

        if let Ok(key) = SecretKey::from_slice(&sha512_half(&data)) {
            return Ok(key);
        }
        debug!("Scalar candidate {counter} out of range, retrying");
    }
    Err(CodecError::Crypto(
        "exhausted scalar candidates during key derivation".to_string(),
    ))
}

/// Accepts 32 raw bytes or the 33-byte `00`-prefixed form
fn secret_key(private_key: &str) -> Result<SecretKey> {
    let bytes = decode_hex("PrivateKey", private_key)?;
    let raw = match bytes.len() {
        RAW_KEY_LENGTH => &bytes[..],
        len if len == RAW_KEY_LENGTH + 1 && bytes[0] == 0 => &bytes[1..],
        actual => {
            return Err(CodecError::EncodeLength {
                instance: "PrivateKey".to_string(),
                expected: RAW_KEY_LENGTH + 1,
                actual,
            })
        }
    };
    SecretKey::from_slice(raw).map_err(|e| crypto_error("Invalid private key", e))
}

fn message_digest(message: &[u8]) -> Result<Message> {
    Message::from_digest_slice(&sha512_half(message))
        .map_err(|e| crypto_error("Invalid message digest", e))
}

impl CryptoImplementation for Secp256k1Crypto {
    fn derive_keypair(&self, decoded_seed: &[u8], validator: bool) -> Result<(String, String)> {
        let secp = Secp256k1::new();
        let root = derive_scalar(decoded_seed, None)?;

        let private = if validator {
            root
        } else {
            let root_public = PublicKey::from_secret_key(&secp, &root);
            let intermediate = derive_scalar(&root_public.serialize(), Some(0))?;
            let tweak = Scalar::from_be_bytes(intermediate.secret_bytes())
                .map_err(|_| CodecError::Crypto("intermediate scalar out of range".to_string()))?;
            root.add_tweak(&tweak)
                .map_err(|e| crypto_error("Failed to derive account key", e))?
        };
        let public = PublicKey::from_secret_key(&secp, &private);

        Ok((
            format!("00{}", encode_hex(&private.secret_bytes())),
            encode_hex(&public.serialize()),
        ))
    }

    fn sign(&self, message: &[u8], private_key: &str) -> Result<String> {
        let secp = Secp256k1::signing_only();
        let key = secret_key(private_key)?;
        let signature = secp.sign_ecdsa(&message_digest(message)?, &key);
        Ok(encode_hex(&signature.serialize_der()))
    }

    fn validate(&self, message: &[u8], public_key: &str, signature: &str) -> Result<bool> {
        let secp = Secp256k1::verification_only();
        let public_key = PublicKey::from_slice(&decode_hex("PublicKey", public_key)?)
            .map_err(|e| crypto_error("Invalid public key", e))?;
        let mut signature = match Signature::from_der(&decode_hex("Signature", signature)?) {
            Ok(signature) => signature,
            Err(_) => return Ok(false),
        };
        signature.normalize_s();
        Ok(secp
            .verify_ecdsa(&message_digest(message)?, &signature, &public_key)
            .is_ok())
    }
}
