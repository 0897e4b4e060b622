//! Typed field codecs
//!
//! One file per wire type. Leaf types convert a JSON value into bytes and
//! read bytes back into a JSON value; `STObject` and `STArray` recurse into
//! the field-level encoder in [`st_object`].

pub mod account_id;
pub mod amount;
pub mod blob;
pub mod currency;
pub mod hash;
pub mod path_set;
pub mod st_array;
pub mod st_object;
pub mod uint;
pub mod vector256;

pub use st_array::ARRAY_END_MARKER;
pub use st_object::OBJECT_END_MARKER;

use serde_json::Value;

use crate::binary::BinaryParser;
use crate::codec::DecodeOptions;
use crate::definitions::{Definitions, FieldInstance};
use crate::error::{CodecError, Result};

/// Wire types the codec knows how to read and write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireType {
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Hash128,
    Hash160,
    Hash256,
    Blob,
    AccountId,
    Amount,
    Vector256,
    PathSet,
    StObject,
    StArray,
}

impl WireType {
    pub fn from_type_name(name: &str) -> Option<WireType> {
        let wire_type = match name {
            "UInt8" => WireType::UInt8,
            "UInt16" => WireType::UInt16,
            "UInt32" => WireType::UInt32,
            "UInt64" => WireType::UInt64,
            "Hash128" => WireType::Hash128,
            "Hash160" => WireType::Hash160,
            "Hash256" => WireType::Hash256,
            "Blob" => WireType::Blob,
            "AccountID" => WireType::AccountId,
            "Amount" => WireType::Amount,
            "Vector256" => WireType::Vector256,
            "PathSet" => WireType::PathSet,
            "STObject" => WireType::StObject,
            "STArray" => WireType::StArray,
            _ => return None,
        };
        Some(wire_type)
    }

    pub fn type_name(self) -> &'static str {
        match self {
            WireType::UInt8 => "UInt8",
            WireType::UInt16 => "UInt16",
            WireType::UInt32 => "UInt32",
            WireType::UInt64 => "UInt64",
            WireType::Hash128 => "Hash128",
            WireType::Hash160 => "Hash160",
            WireType::Hash256 => "Hash256",
            WireType::Blob => "Blob",
            WireType::AccountId => "AccountID",
            WireType::Amount => "Amount",
            WireType::Vector256 => "Vector256",
            WireType::PathSet => "PathSet",
            WireType::StObject => "STObject",
            WireType::StArray => "STArray",
        }
    }
}

/// Name of a JSON value's runtime type, as reported in errors
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(n) if n.is_i64() && n.as_u64().is_none() => "negative integer",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub(crate) fn unsupported(wire_type: WireType, value: &Value) -> CodecError {
    CodecError::UnsupportedValue {
        wire_type: wire_type.type_name().to_string(),
        found: json_kind(value),
    }
}

pub(crate) fn expect_str(wire_type: WireType, value: &Value) -> Result<&str> {
    value
        .as_str()
        .ok_or_else(|| unsupported(wire_type, value))
}

/// Encode the value of a non-container field, without header or length prefix
pub(crate) fn leaf_from_json(
    defs: &Definitions,
    field: &FieldInstance,
    wire_type: WireType,
    value: &Value,
) -> Result<Vec<u8>> {
    match wire_type {
        WireType::UInt8 => uint::uint8_from_json(defs, value),
        WireType::UInt16 => uint::uint16_from_json(defs, field, value),
        WireType::UInt32 => uint::uint32_from_json(value),
        WireType::UInt64 => uint::uint64_from_json(value),
        WireType::Hash128 | WireType::Hash160 | WireType::Hash256 => {
            hash::from_json(wire_type, value)
        }
        WireType::Blob => blob::from_json(value),
        WireType::AccountId => account_id::from_json(value),
        WireType::Amount => amount::from_json(value),
        WireType::Vector256 => vector256::from_json(value),
        WireType::PathSet => path_set::from_json(value),
        WireType::StObject | WireType::StArray => Err(CodecError::Malformed(format!(
            "{} is a container type",
            wire_type.type_name()
        ))),
    }
}

/// Read the value of a non-container field. `length` is set when the field
/// was length-prefixed and `parser` covers exactly the prefixed bytes.
pub(crate) fn leaf_to_json(
    defs: &Definitions,
    field: &FieldInstance,
    wire_type: WireType,
    parser: &mut BinaryParser<'_>,
    length: Option<usize>,
    options: &DecodeOptions,
) -> Result<Value> {
    match wire_type {
        WireType::UInt8 => uint::uint8_to_json(defs, field, parser, options),
        WireType::UInt16 => uint::uint16_to_json(defs, field, parser, options),
        WireType::UInt32 => uint::uint32_to_json(parser),
        WireType::UInt64 => uint::uint64_to_json(parser),
        WireType::Hash128 | WireType::Hash160 | WireType::Hash256 => {
            hash::to_json(wire_type, parser)
        }
        WireType::Blob => blob::to_json(parser, length),
        WireType::AccountId => account_id::to_json(parser, length),
        WireType::Amount => amount::to_json(parser),
        WireType::Vector256 => vector256::to_json(parser, length),
        WireType::PathSet => path_set::to_json(parser),
        WireType::StObject | WireType::StArray => Err(CodecError::Malformed(format!(
            "{} is a container type",
            wire_type.type_name()
        ))),
    }
}
