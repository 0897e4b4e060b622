use serde_json::Value;

use super::{expect_str, WireType};
use crate::binary::BinaryParser;
use crate::error::{CodecError, Result};
use crate::utils::{decode_hex_exact, encode_hex};

/// Width in bytes of a fixed-size hash type
pub fn width(wire_type: WireType) -> Result<usize> {
    match wire_type {
        WireType::Hash128 => Ok(16),
        WireType::Hash160 => Ok(20),
        WireType::Hash256 => Ok(32),
        other => Err(CodecError::Malformed(format!(
            "{} is not a hash type",
            other.type_name()
        ))),
    }
}

pub fn from_json(wire_type: WireType, value: &Value) -> Result<Vec<u8>> {
    let hex = expect_str(wire_type, value)?;
    decode_hex_exact(wire_type.type_name(), hex, width(wire_type)?)
}

pub fn to_json(wire_type: WireType, parser: &mut BinaryParser<'_>) -> Result<Value> {
    let bytes = parser.read_bytes(width(wire_type)?)?;
    Ok(Value::String(encode_hex(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const CHANNEL: &str = "C1AE6DDDEEC05CF2978C0BAD6FE302948E9533691DC749DCDD3B9E5992CA6198";

    #[test]
    fn test_hash256_exact_width() {
        let bytes = from_json(WireType::Hash256, &json!(CHANNEL)).unwrap();
        assert_eq!(bytes.len(), 32);

        let mut parser = BinaryParser::new(&bytes);
        assert_eq!(to_json(WireType::Hash256, &mut parser).unwrap(), json!(CHANNEL));
    }

    #[test]
    fn test_hash_accepts_lowercase_and_emits_uppercase() {
        let bytes = from_json(WireType::Hash128, &json!("00000000000000000000000000000abc")).unwrap();
        let mut parser = BinaryParser::new(&bytes);
        assert_eq!(
            to_json(WireType::Hash128, &mut parser).unwrap(),
            json!("00000000000000000000000000000ABC")
        );
    }

    #[test]
    fn test_hash_wrong_width() {
        let err = from_json(WireType::Hash160, &json!(CHANNEL)).unwrap_err();
        assert_eq!(
            err,
            CodecError::EncodeLength {
                instance: "Hash160".to_string(),
                expected: 20,
                actual: 32
            }
        );
    }

    #[test]
    fn test_hash_truncated_input() {
        let mut parser = BinaryParser::new(&[0u8; 10]);
        assert!(matches!(
            to_json(WireType::Hash256, &mut parser),
            Err(CodecError::OutOfBounds { .. })
        ));
    }
}
