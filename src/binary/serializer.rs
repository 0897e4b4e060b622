use crate::definitions::FieldHeader;
use crate::error::{CodecError, Result};

/// Largest payload a variable-length prefix can describe
pub const MAX_LENGTH_PREFIXED: usize = 918_744;

const MAX_SINGLE_BYTE_LENGTH: usize = 192;
const MAX_DOUBLE_BYTE_LENGTH: usize = 12_480;

/// Length prefix of a variable-length field: one, two or three bytes
/// depending on the payload size
pub fn encode_length_prefix(length: usize) -> Result<Vec<u8>> {
    if length <= MAX_SINGLE_BYTE_LENGTH {
        return Ok(vec![length as u8]);
    }
    if length <= MAX_DOUBLE_BYTE_LENGTH {
        let length = length - (MAX_SINGLE_BYTE_LENGTH + 1);
        return Ok(vec![193 + (length >> 8) as u8, (length & 0xFF) as u8]);
    }
    if length <= MAX_LENGTH_PREFIXED {
        let length = length - (MAX_DOUBLE_BYTE_LENGTH + 1);
        return Ok(vec![
            241 + (length >> 16) as u8,
            ((length >> 8) & 0xFF) as u8,
            (length & 0xFF) as u8,
        ]);
    }
    Err(CodecError::Malformed(format!(
        "length {length} exceeds the {MAX_LENGTH_PREFIXED} byte limit of a length prefix"
    )))
}

/// Growable output buffer for encoded fields
#[derive(Debug, Default, Clone)]
pub struct BinarySerializer {
    buffer: Vec<u8>,
}

impl BinarySerializer {
    pub fn new() -> BinarySerializer {
        BinarySerializer::default()
    }

    pub fn put(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    pub fn put_u8(&mut self, byte: u8) {
        self.buffer.push(byte);
    }

    pub fn write_field_header(&mut self, header: FieldHeader) {
        self.buffer.extend_from_slice(&header.to_bytes());
    }

    /// Write `bytes` preceded by their length prefix
    pub fn write_length_prefixed(&mut self, bytes: &[u8]) -> Result<()> {
        let prefix = encode_length_prefix(bytes.len())?;
        self.buffer.extend_from_slice(&prefix);
        self.buffer.extend_from_slice(bytes);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }
}
