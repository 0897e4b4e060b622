//! Low-level byte cursor and byte sink for the canonical binary format
//!
//! [`BinaryParser`] walks an input buffer field by field with bounds and
//! nesting checks. [`BinarySerializer`] accumulates output and knows how to
//! write field headers and variable-length prefixes.

pub mod parser;
pub mod serializer;

pub use parser::{BinaryParser, DEFAULT_MAX_NESTING_DEPTH};
pub use serializer::{encode_length_prefix, BinarySerializer, MAX_LENGTH_PREFIXED};
