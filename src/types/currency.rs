use crate::error::{CodecError, Result};
use crate::utils::{decode_hex_exact, encode_hex};

pub const CURRENCY_LENGTH: usize = 20;

const NATIVE_CURRENCY: &str = "XRP";
const ISO_CODE_OFFSET: usize = 12;
const ISO_CODE_LENGTH: usize = 3;

fn is_iso_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "?!@#$%^&*<>(){}[]|".contains(c)
}

fn is_iso_code(code: &str) -> bool {
    code.len() == ISO_CODE_LENGTH && code.chars().all(is_iso_char)
}

/// 20-byte wire form of a currency code.
///
/// `XRP` is all zeros, a three character code sits at bytes 12..15 and a
/// 40 digit hex string is taken as the raw bytes.
pub fn currency_to_bytes(code: &str) -> Result<[u8; CURRENCY_LENGTH]> {
    let mut bytes = [0u8; CURRENCY_LENGTH];
    if code == NATIVE_CURRENCY {
        return Ok(bytes);
    }
    if is_iso_code(code) {
        bytes[ISO_CODE_OFFSET..ISO_CODE_OFFSET + ISO_CODE_LENGTH].copy_from_slice(code.as_bytes());
        return Ok(bytes);
    }
    if code.len() == CURRENCY_LENGTH * 2 {
        bytes.copy_from_slice(&decode_hex_exact("Currency", code, CURRENCY_LENGTH)?);
        return Ok(bytes);
    }
    Err(CodecError::InvalidAmount(format!(
        "`{code}` is not a valid currency code"
    )))
}

pub fn currency_from_bytes(bytes: &[u8]) -> Result<String> {
    if bytes.len() != CURRENCY_LENGTH {
        return Err(CodecError::EncodeLength {
            instance: "Currency".to_string(),
            expected: CURRENCY_LENGTH,
            actual: bytes.len(),
        });
    }
    if bytes.iter().all(|b| *b == 0) {
        return Ok(NATIVE_CURRENCY.to_string());
    }

    let iso = &bytes[ISO_CODE_OFFSET..ISO_CODE_OFFSET + ISO_CODE_LENGTH];
    let padding_is_zero = bytes[..ISO_CODE_OFFSET]
        .iter()
        .chain(&bytes[ISO_CODE_OFFSET + ISO_CODE_LENGTH..])
        .all(|b| *b == 0);
    if padding_is_zero {
        if let Ok(code) = std::str::from_utf8(iso) {
            if is_iso_code(code) && code != NATIVE_CURRENCY {
                return Ok(code.to_string());
            }
        }
    }
    Ok(encode_hex(bytes))
}
