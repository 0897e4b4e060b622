use serde_json::Value;

use super::{expect_str, WireType};
use crate::binary::BinaryParser;
use crate::error::{CodecError, Result};
use crate::utils::{decode_hex, encode_hex};

pub fn from_json(value: &Value) -> Result<Vec<u8>> {
    decode_hex("Blob", expect_str(WireType::Blob, value)?)
}

pub fn to_json(parser: &mut BinaryParser<'_>, length: Option<usize>) -> Result<Value> {
    let length = length.ok_or_else(|| {
        CodecError::Malformed("Blob values must be length-prefixed".to_string())
    })?;
    Ok(Value::String(encode_hex(parser.read_bytes(length)?)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blob_any_length() {
        assert_eq!(from_json(&json!("")).unwrap(), Vec::<u8>::new());
        assert_eq!(
            from_json(&json!("7274312e312e31")).unwrap(),
            b"rt1.1.1".to_vec()
        );
    }

    #[test]
    fn test_blob_rejects_non_hex() {
        assert!(matches!(
            from_json(&json!("memo text")),
            Err(CodecError::InvalidHex(_))
        ));
        assert!(matches!(
            from_json(&json!(12)),
            Err(CodecError::UnsupportedValue { .. })
        ));
    }

    #[test]
    fn test_blob_reads_prefixed_length() {
        let data = b"client";
        let mut parser = BinaryParser::new(data);
        assert_eq!(
            to_json(&mut parser, Some(data.len())).unwrap(),
            json!("636C69656E74")
        );
        assert!(to_json(&mut BinaryParser::new(data), None).is_err());
    }
}
