use serde_json::Value;

use super::{expect_str, WireType};
use crate::address_codec::{
    decode_classic_address_to_account_id, encode_account_id, ACCOUNT_ADDRESS_LENGTH,
};
use crate::binary::BinaryParser;
use crate::error::{CodecError, Result};
use crate::utils::decode_hex;

/// Raw 20-byte account id of a classic address, or of a 40-digit hex id
pub fn account_id_bytes(address: &str) -> Result<[u8; ACCOUNT_ADDRESS_LENGTH]> {
    if address.len() == ACCOUNT_ADDRESS_LENGTH * 2 && address.chars().all(|c| c.is_ascii_hexdigit()) {
        let bytes = decode_hex("AccountID", address)?;
        let mut account_id = [0u8; ACCOUNT_ADDRESS_LENGTH];
        account_id.copy_from_slice(&bytes);
        return Ok(account_id);
    }
    let (_, account_id) = decode_classic_address_to_account_id(address)?;
    Ok(account_id)
}

pub fn from_json(value: &Value) -> Result<Vec<u8>> {
    let address = expect_str(WireType::AccountId, value)?;
    Ok(account_id_bytes(address)?.to_vec())
}

/// Read a raw account id and render it as a classic address
pub fn read_address(parser: &mut BinaryParser<'_>) -> Result<String> {
    encode_account_id(parser.read_bytes(ACCOUNT_ADDRESS_LENGTH)?)
}

pub fn to_json(parser: &mut BinaryParser<'_>, length: Option<usize>) -> Result<Value> {
    if let Some(length) = length {
        if length != ACCOUNT_ADDRESS_LENGTH {
            return Err(CodecError::EncodeLength {
                instance: "AccountID".to_string(),
                expected: ACCOUNT_ADDRESS_LENGTH,
                actual: length,
            });
        }
    }
    Ok(Value::String(read_address(parser)?))
}
