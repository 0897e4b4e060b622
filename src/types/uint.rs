use serde_json::Value;

use super::{unsupported, WireType};
use crate::binary::BinaryParser;
use crate::codec::DecodeOptions;
use crate::definitions::{Definitions, FieldInstance};
use crate::error::{CodecError, Result};
use crate::utils::{decode_hex, encode_hex};

fn out_of_range(wire_type: WireType, value: impl std::fmt::Display) -> CodecError {
    CodecError::Malformed(format!(
        "{value} does not fit in {}",
        wire_type.type_name()
    ))
}

/// Unsigned integer from a JSON number or decimal string
fn json_to_u64(wire_type: WireType, value: &Value) -> Result<u64> {
    match value {
        Value::Number(n) => n.as_u64().ok_or_else(|| unsupported(wire_type, value)),
        Value::String(s) => s
            .parse::<u64>()
            .map_err(|_| CodecError::Malformed(format!("`{s}` is not a valid {}", wire_type.type_name()))),
        other => Err(unsupported(wire_type, other)),
    }
}

fn code_to_u64(wire_type: WireType, code: i32) -> Result<u64> {
    u64::try_from(code).map_err(|_| out_of_range(wire_type, code))
}

pub fn uint8_from_json(defs: &Definitions, value: &Value) -> Result<Vec<u8>> {
    let n = match value {
        Value::String(s) if !s.chars().all(|c| c.is_ascii_digit()) => {
            code_to_u64(WireType::UInt8, defs.get_transaction_result_code_by_name(s)?)?
        }
        other => json_to_u64(WireType::UInt8, other)?,
    };
    let n = u8::try_from(n).map_err(|_| out_of_range(WireType::UInt8, n))?;
    Ok(vec![n])
}

/// 16-bit values also accept transaction type and ledger entry type names
pub fn uint16_from_json(defs: &Definitions, field: &FieldInstance, value: &Value) -> Result<Vec<u8>> {
    let n = match value {
        Value::String(s) if !s.chars().all(|c| c.is_ascii_digit()) => {
            let code = if field.name == "LedgerEntryType" {
                defs.get_ledger_entry_type_code_by_name(s)
                    .or_else(|_| defs.get_transaction_type_code_by_name(s))
            } else {
                defs.get_transaction_type_code_by_name(s)
                    .or_else(|_| defs.get_ledger_entry_type_code_by_name(s))
            };
            let kind = if field.name == "LedgerEntryType" {
                "LedgerEntryType"
            } else {
                "TransactionType"
            };
            let code = code.map_err(|_| CodecError::NotFound {
                kind,
                key: s.clone(),
            })?;
            code_to_u64(WireType::UInt16, code)?
        }
        other => json_to_u64(WireType::UInt16, other)?,
    };
    let n = u16::try_from(n).map_err(|_| out_of_range(WireType::UInt16, n))?;
    Ok(n.to_be_bytes().to_vec())
}

pub fn uint32_from_json(value: &Value) -> Result<Vec<u8>> {
    let n = json_to_u64(WireType::UInt32, value)?;
    let n = u32::try_from(n).map_err(|_| out_of_range(WireType::UInt32, n))?;
    Ok(n.to_be_bytes().to_vec())
}

/// 64-bit values are hex strings in JSON; plain integers are accepted too
pub fn uint64_from_json(value: &Value) -> Result<Vec<u8>> {
    let n = match value {
        Value::String(s) => {
            if s.is_empty() || s.len() > 16 {
                return Err(CodecError::Malformed(format!(
                    "`{s}` is not a 1 to 16 digit hex UInt64"
                )));
            }
            let padded = format!("{s:0>16}");
            let bytes = decode_hex("UInt64", &padded)?;
            let mut buf = [0u8; 8];
            buf.copy_from_slice(&bytes);
            u64::from_be_bytes(buf)
        }
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| unsupported(WireType::UInt64, value))?,
        other => return Err(unsupported(WireType::UInt64, other)),
    };
    Ok(n.to_be_bytes().to_vec())
}

pub fn uint8_to_json(
    defs: &Definitions,
    field: &FieldInstance,
    parser: &mut BinaryParser<'_>,
    options: &DecodeOptions,
) -> Result<Value> {
    let n = parser.read_u8()?;
    if options.symbolic_names && field.name == "TransactionResult" {
        if let Ok(name) = defs.get_transaction_result_name_by_code(i32::from(n)) {
            return Ok(Value::String(name.to_string()));
        }
    }
    Ok(Value::from(n))
}

pub fn uint16_to_json(
    defs: &Definitions,
    field: &FieldInstance,
    parser: &mut BinaryParser<'_>,
    options: &DecodeOptions,
) -> Result<Value> {
    let n = parser.read_u16()?;
    if options.symbolic_names {
        let name = match field.name.as_str() {
            "TransactionType" => defs.get_transaction_type_name_by_code(i32::from(n)).ok(),
            "LedgerEntryType" => defs.get_ledger_entry_type_name_by_code(i32::from(n)).ok(),
            _ => None,
        };
        if let Some(name) = name {
            return Ok(Value::String(name.to_string()));
        }
    }
    Ok(Value::from(n))
}

pub fn uint32_to_json(parser: &mut BinaryParser<'_>) -> Result<Value> {
    Ok(Value::from(parser.read_u32()?))
}

pub fn uint64_to_json(parser: &mut BinaryParser<'_>) -> Result<Value> {
    Ok(Value::String(encode_hex(parser.read_bytes(8)?)))
}
