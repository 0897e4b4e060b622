use serde_json::{Map, Value};

use super::account_id::{account_id_bytes, read_address};
use super::currency::{currency_from_bytes, currency_to_bytes, CURRENCY_LENGTH};
use super::{expect_str, unsupported, WireType};
use crate::binary::BinaryParser;
use crate::error::{CodecError, Result};

const TYPE_ACCOUNT: u8 = 0x01;
const TYPE_CURRENCY: u8 = 0x10;
const TYPE_ISSUER: u8 = 0x20;

const PATH_SEPARATOR: u8 = 0xFF;
const PATH_SET_END: u8 = 0x00;

fn write_step(step: &Value, bytes: &mut Vec<u8>) -> Result<()> {
    let step = step
        .as_object()
        .ok_or_else(|| unsupported(WireType::PathSet, step))?;

    let account = step
        .get("account")
        .map(|v| expect_str(WireType::PathSet, v))
        .transpose()?;
    let currency = step
        .get("currency")
        .map(|v| expect_str(WireType::PathSet, v))
        .transpose()?;
    let issuer = step
        .get("issuer")
        .map(|v| expect_str(WireType::PathSet, v))
        .transpose()?;

    let mut step_type = 0u8;
    if account.is_some() {
        step_type |= TYPE_ACCOUNT;
    }
    if currency.is_some() {
        step_type |= TYPE_CURRENCY;
    }
    if issuer.is_some() {
        step_type |= TYPE_ISSUER;
    }
    if step_type == 0 {
        return Err(CodecError::Malformed(
            "path step has no account, currency or issuer".to_string(),
        ));
    }

    bytes.push(step_type);
    if let Some(account) = account {
        bytes.extend_from_slice(&account_id_bytes(account)?);
    }
    if let Some(currency) = currency {
        bytes.extend_from_slice(&currency_to_bytes(currency)?);
    }
    if let Some(issuer) = issuer {
        bytes.extend_from_slice(&account_id_bytes(issuer)?);
    }
    Ok(())
}

fn empty_path() -> CodecError {
    CodecError::Malformed("path sets and their paths must not be empty".to_string())
}

/// Paths are arrays of steps. Informational keys such as `type` and
/// `type_hex` are ignored; the step type is derived from the keys present.
/// The set and every path in it hold at least one entry.
pub fn from_json(value: &Value) -> Result<Vec<u8>> {
    let paths = value
        .as_array()
        .ok_or_else(|| unsupported(WireType::PathSet, value))?;
    if paths.is_empty() {
        return Err(empty_path());
    }

    let mut bytes = Vec::new();
    for (i, path) in paths.iter().enumerate() {
        if i > 0 {
            bytes.push(PATH_SEPARATOR);
        }
        let steps = path
            .as_array()
            .ok_or_else(|| unsupported(WireType::PathSet, path))?;
        if steps.is_empty() {
            return Err(empty_path());
        }
        for step in steps {
            write_step(step, &mut bytes)?;
        }
    }
    bytes.push(PATH_SET_END);
    Ok(bytes)
}

fn read_step(step_type: u8, parser: &mut BinaryParser<'_>) -> Result<Value> {
    if step_type & !(TYPE_ACCOUNT | TYPE_CURRENCY | TYPE_ISSUER) != 0 {
        return Err(CodecError::Malformed(format!(
            "unknown path step type 0x{step_type:02X}"
        )));
    }
    let mut step = Map::new();
    if step_type & TYPE_ACCOUNT != 0 {
        step.insert("account".to_string(), Value::String(read_address(parser)?));
    }
    if step_type & TYPE_CURRENCY != 0 {
        let currency = currency_from_bytes(parser.read_bytes(CURRENCY_LENGTH)?)?;
        step.insert("currency".to_string(), Value::String(currency));
    }
    if step_type & TYPE_ISSUER != 0 {
        step.insert("issuer".to_string(), Value::String(read_address(parser)?));
    }
    Ok(Value::Object(step))
}

pub fn to_json(parser: &mut BinaryParser<'_>) -> Result<Value> {
    let mut paths = Vec::new();
    let mut current = Vec::new();
    loop {
        if parser.is_end() {
            return Err(CodecError::Malformed(
                "path set ended without a terminator".to_string(),
            ));
        }
        match parser.read_u8()? {
            PATH_SET_END | PATH_SEPARATOR if current.is_empty() => return Err(empty_path()),
            PATH_SET_END => {
                paths.push(Value::Array(current));
                return Ok(Value::Array(paths));
            }
            PATH_SEPARATOR => paths.push(Value::Array(std::mem::take(&mut current))),
            step_type => current.push(read_step(step_type, parser)?),
        }
    }
}
