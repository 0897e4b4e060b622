use log::debug;

use super::FieldMap;
use crate::binary::{BinaryParser, DEFAULT_MAX_NESTING_DEPTH};
use crate::definitions::definitions;
use crate::error::Result;
use crate::types::st_object::read_fields;
use crate::utils::decode_hex;

/// Knobs for [`decode_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Deepest allowed nesting of objects and arrays
    pub max_nesting_depth: usize,
    /// Render `TransactionType`, `LedgerEntryType` and `TransactionResult`
    /// as names instead of raw codes
    pub symbolic_names: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            symbolic_names: false,
        }
    }
}

/// Decode a hex blob into its field map, with raw integer codes
pub fn decode(hex: &str) -> Result<FieldMap> {
    decode_with(hex, &DecodeOptions::default())
}

pub fn decode_with(hex: &str, options: &DecodeOptions) -> Result<FieldMap> {
    let bytes = decode_hex("Blob", hex)?;
    decode_bytes(&bytes, options)
}

pub fn decode_bytes(bytes: &[u8], options: &DecodeOptions) -> Result<FieldMap> {
    let defs = definitions()?;
    let mut parser = BinaryParser::with_max_depth(bytes, options.max_nesting_depth);
    let fields = read_fields(defs, &mut parser, options, false)?;
    debug!("Decoded {} fields from {} bytes", fields.len(), bytes.len());
    Ok(fields)
}
