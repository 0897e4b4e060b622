use serde_json::Value;

use super::{expect_str, unsupported, WireType};
use crate::binary::BinaryParser;
use crate::error::{CodecError, Result};
use crate::utils::{decode_hex_exact, encode_hex};

const HASH_LENGTH: usize = 32;

pub fn from_json(value: &Value) -> Result<Vec<u8>> {
    let items = value
        .as_array()
        .ok_or_else(|| unsupported(WireType::Vector256, value))?;
    let mut bytes = Vec::with_capacity(items.len() * HASH_LENGTH);
    for item in items {
        let hex = expect_str(WireType::Vector256, item)?;
        bytes.extend(decode_hex_exact("Vector256", hex, HASH_LENGTH)?);
    }
    Ok(bytes)
}

pub fn to_json(parser: &mut BinaryParser<'_>, length: Option<usize>) -> Result<Value> {
    let length = length.ok_or_else(|| {
        CodecError::Malformed("Vector256 values must be length-prefixed".to_string())
    })?;
    if length % HASH_LENGTH != 0 {
        return Err(CodecError::Malformed(format!(
            "Vector256 length {length} is not a multiple of {HASH_LENGTH}"
        )));
    }
    let hashes = parser
        .read_bytes(length)?
        .chunks(HASH_LENGTH)
        .map(|chunk| Value::String(encode_hex(chunk)))
        .collect();
    Ok(Value::Array(hashes))
}
