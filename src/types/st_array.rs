use serde_json::{Map, Value};

use super::st_object::{read_field, write_field};
use super::{unsupported, WireType};
use crate::binary::{BinaryParser, BinarySerializer};
use crate::codec::DecodeOptions;
use crate::definitions::{Definitions, FieldHeader};
use crate::error::{CodecError, Result};

/// Header that closes an array (`F1`)
pub const ARRAY_END_MARKER: FieldHeader = FieldHeader {
    type_code: 15,
    field_code: 1,
};

/// Each element is a single-key object naming the wrapped field, e.g.
/// `{"Memo": {...}}`
pub(crate) fn write(
    defs: &Definitions,
    value: &Value,
    serializer: &mut BinarySerializer,
) -> Result<()> {
    let items = value
        .as_array()
        .ok_or_else(|| unsupported(WireType::StArray, value))?;

    for item in items {
        let wrapper = item
            .as_object()
            .ok_or_else(|| unsupported(WireType::StArray, item))?;
        let mut entries = wrapper.iter();
        let (name, inner) = match (entries.next(), entries.next()) {
            (Some(entry), None) => entry,
            _ => {
                return Err(CodecError::Malformed(format!(
                    "array elements must wrap exactly one field, found {}",
                    wrapper.len()
                )))
            }
        };
        let field = defs.get_field_instance_by_field_name(name)?;
        write_field(defs, field, inner, serializer)?;
    }
    serializer.write_field_header(ARRAY_END_MARKER);
    Ok(())
}

pub(crate) fn read(
    defs: &Definitions,
    parser: &mut BinaryParser<'_>,
    options: &DecodeOptions,
) -> Result<Value> {
    parser.enter_nested()?;
    let mut items = Vec::new();
    loop {
        if parser.is_end() {
            return Err(CodecError::Malformed(
                "array ended without an end marker".to_string(),
            ));
        }
        let header = parser.read_field_header()?;
        if header == ARRAY_END_MARKER {
            break;
        }
        let field = defs.get_field_instance_by_header(header)?;
        let value = read_field(defs, field, parser, options)?;

        let mut wrapper = Map::new();
        wrapper.insert(field.name.clone(), value);
        items.push(Value::Object(wrapper));
    }
    parser.leave_nested();
    Ok(Value::Array(items))
}
