use crate::error::{CodecError, Result};
use crate::types::WireType;

/// Compact (type code, field code) pair that prefixes every serialized field.
///
/// The derived ordering is the canonical field order: ascending type code,
/// then ascending field code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldHeader {
    pub type_code: u8,
    pub field_code: u8,
}

impl FieldHeader {
    pub fn new(type_code: u8, field_code: u8) -> FieldHeader {
        FieldHeader {
            type_code,
            field_code,
        }
    }

    /// Header bytes: one byte when both codes fit a nibble, otherwise the
    /// two- and three-byte extended forms
    pub fn to_bytes(&self) -> Vec<u8> {
        let (type_code, field_code) = (self.type_code, self.field_code);
        match (type_code < 16, field_code < 16) {
            (true, true) => vec![(type_code << 4) | field_code],
            (true, false) => vec![type_code << 4, field_code],
            (false, true) => vec![field_code, type_code],
            (false, false) => vec![0, type_code, field_code],
        }
    }
}

/// Encoding metadata of one named field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInstance {
    pub name: String,
    pub nth: i32,
    pub type_name: String,
    pub type_code: i32,
    pub is_vl_encoded: bool,
    pub is_serialized: bool,
    pub is_signing_field: bool,
    /// Present for every serialized field whose codes fit the header scheme
    pub header: Option<FieldHeader>,
    /// Codec used for the field's value, if the crate implements its type
    pub wire_type: Option<WireType>,
}

impl FieldInstance {
    pub(crate) fn new(
        name: String,
        nth: i32,
        type_name: String,
        type_code: i32,
        is_vl_encoded: bool,
        is_serialized: bool,
        is_signing_field: bool,
    ) -> FieldInstance {
        let header = match (u8::try_from(type_code), u8::try_from(nth)) {
            (Ok(t), Ok(f)) if is_serialized && t > 0 && f > 0 => Some(FieldHeader::new(t, f)),
            _ => None,
        };
        let wire_type = WireType::from_type_name(&type_name);
        FieldInstance {
            name,
            nth,
            type_name,
            type_code,
            is_vl_encoded,
            is_serialized,
            is_signing_field,
            header,
            wire_type,
        }
    }

    /// Header of a field that is about to be written
    pub fn serialized_header(&self) -> Result<FieldHeader> {
        self.header.ok_or_else(|| {
            CodecError::MalformedHeader(format!(
                "field {} (type {}, nth {}) has no wire header",
                self.name, self.type_code, self.nth
            ))
        })
    }

    /// Codec for a field that is about to be written or read
    pub fn serialized_wire_type(&self) -> Result<WireType> {
        self.wire_type.ok_or_else(|| CodecError::NotFound {
            kind: "TypeName",
            key: self.type_name.clone(),
        })
    }

    /// Sort key for canonical ordering
    pub fn ordinal(&self) -> (i32, i32) {
        (self.type_code, self.nth)
    }
}
