use serde_json::{Map, Value};

use super::{leaf_from_json, leaf_to_json, st_array, unsupported, WireType};
use crate::binary::{BinaryParser, BinarySerializer};
use crate::codec::DecodeOptions;
use crate::definitions::{Definitions, FieldHeader, FieldInstance};
use crate::error::{CodecError, Result};

/// Header that closes a nested object (`E1`)
pub const OBJECT_END_MARKER: FieldHeader = FieldHeader {
    type_code: 14,
    field_code: 1,
};

/// Write every field of `object` in canonical order.
///
/// Registry fields that are never serialized are skipped. With
/// `signing_only` set, fields excluded from signatures are skipped too.
pub(crate) fn write_fields(
    defs: &Definitions,
    object: &Map<String, Value>,
    serializer: &mut BinarySerializer,
    signing_only: bool,
) -> Result<()> {
    let mut fields: Vec<(&FieldInstance, &Value)> = Vec::with_capacity(object.len());
    for (name, value) in object {
        let field = defs.get_field_instance_by_field_name(name)?;
        if !field.is_serialized || (signing_only && !field.is_signing_field) {
            continue;
        }
        fields.push((field, value));
    }
    fields.sort_by_key(|(field, _)| field.ordinal());

    for (field, value) in fields {
        write_field(defs, field, value, serializer)?;
    }
    Ok(())
}

/// Write one field: header, then its value in the form its type requires
pub(crate) fn write_field(
    defs: &Definitions,
    field: &FieldInstance,
    value: &Value,
    serializer: &mut BinarySerializer,
) -> Result<()> {
    let header = field.serialized_header()?;
    let wire_type = field.serialized_wire_type()?;
    serializer.write_field_header(header);

    match wire_type {
        WireType::StObject => {
            let object = value
                .as_object()
                .ok_or_else(|| unsupported(wire_type, value))?;
            write_fields(defs, object, serializer, false)?;
            serializer.write_field_header(OBJECT_END_MARKER);
        }
        WireType::StArray => st_array::write(defs, value, serializer)?,
        _ => {
            let bytes = leaf_from_json(defs, field, wire_type, value)?;
            if field.is_vl_encoded {
                serializer.write_length_prefixed(&bytes)?;
            } else {
                serializer.put(&bytes);
            }
        }
    }
    Ok(())
}

/// Read fields until the buffer ends (top level) or an object end marker
/// is reached (`nested`)
pub(crate) fn read_fields(
    defs: &Definitions,
    parser: &mut BinaryParser<'_>,
    options: &DecodeOptions,
    nested: bool,
) -> Result<Map<String, Value>> {
    let mut object = Map::new();
    loop {
        if parser.is_end() {
            if nested {
                return Err(CodecError::Malformed(
                    "object ended without an end marker".to_string(),
                ));
            }
            return Ok(object);
        }

        let header = parser.read_field_header()?;
        if header == OBJECT_END_MARKER {
            if nested {
                return Ok(object);
            }
            return Err(CodecError::Malformed(format!(
                "unexpected object end marker at offset {}",
                parser.position()
            )));
        }
        if header == st_array::ARRAY_END_MARKER {
            return Err(CodecError::Malformed(format!(
                "unexpected array end marker at offset {}",
                parser.position()
            )));
        }

        let field = defs.get_field_instance_by_header(header)?;
        let value = read_field(defs, field, parser, options)?;
        if object.insert(field.name.clone(), value).is_some() {
            return Err(CodecError::Malformed(format!(
                "field {} appears twice",
                field.name
            )));
        }
    }
}

/// Read the value of one field whose header has already been consumed
pub(crate) fn read_field(
    defs: &Definitions,
    field: &FieldInstance,
    parser: &mut BinaryParser<'_>,
    options: &DecodeOptions,
) -> Result<Value> {
    let wire_type = field.serialized_wire_type()?;
    match wire_type {
        WireType::StObject => {
            parser.enter_nested()?;
            let object = read_fields(defs, parser, options, true)?;
            parser.leave_nested();
            Ok(Value::Object(object))
        }
        WireType::StArray => st_array::read(defs, parser, options),
        _ if field.is_vl_encoded => {
            let bytes = parser.read_length_prefixed()?;
            let mut inner = BinaryParser::new(bytes);
            let value = leaf_to_json(defs, field, wire_type, &mut inner, Some(bytes.len()), options)?;
            if !inner.is_end() {
                return Err(CodecError::Malformed(format!(
                    "{} trailing bytes in {}",
                    inner.remaining(),
                    field.name
                )));
            }
            Ok(value)
        }
        _ => leaf_to_json(defs, field, wire_type, parser, None, options),
    }
}
