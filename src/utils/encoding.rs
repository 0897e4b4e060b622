use crate::error::{CodecError, Result};

/// Decode a hex string (either case), naming the value in the error
pub fn decode_hex(instance: &str, value: &str) -> Result<Vec<u8>> {
    hex::decode(value).map_err(|e| CodecError::InvalidHex(format!("{instance}: {e}")))
}

/// Decode a hex string that must produce exactly `expected` bytes
pub fn decode_hex_exact(instance: &str, value: &str, expected: usize) -> Result<Vec<u8>> {
    let bytes = decode_hex(instance, value)?;
    if bytes.len() != expected {
        return Err(CodecError::EncodeLength {
            instance: instance.to_string(),
            expected,
            actual: bytes.len(),
        });
    }
    Ok(bytes)
}

pub fn encode_hex(data: &[u8]) -> String {
    hex::encode_upper(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_hex_is_case_insensitive() {
        assert_eq!(decode_hex("x", "abCD").unwrap(), vec![0xAB, 0xCD]);
    }

    #[test]
    fn test_decode_hex_exact_length_mismatch() {
        let err = decode_hex_exact("Hash256", "ABCD", 32).unwrap_err();
        assert_eq!(
            err,
            CodecError::EncodeLength {
                instance: "Hash256".to_string(),
                expected: 32,
                actual: 2
            }
        );
    }

    #[test]
    fn test_encode_hex_is_uppercase() {
        assert_eq!(encode_hex(&[0xab, 0x01]), "AB01");
    }
}
