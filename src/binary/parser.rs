use crate::definitions::FieldHeader;
use crate::error::{CodecError, Result};

/// Nesting limit for objects and arrays when none is configured
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 32;

/// Forward-only cursor over an encoded buffer
#[derive(Debug, Clone)]
pub struct BinaryParser<'a> {
    data: &'a [u8],
    position: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> BinaryParser<'a> {
    pub fn new(data: &'a [u8]) -> BinaryParser<'a> {
        BinaryParser::with_max_depth(data, DEFAULT_MAX_NESTING_DEPTH)
    }

    pub fn with_max_depth(data: &'a [u8], max_depth: usize) -> BinaryParser<'a> {
        BinaryParser {
            data,
            position: 0,
            depth: 0,
            max_depth,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    pub fn is_end(&self) -> bool {
        self.position >= self.data.len()
    }

    pub fn peek(&self) -> Option<u8> {
        self.data.get(self.position).copied()
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(CodecError::OutOfBounds {
                requested: n,
                remaining: self.remaining(),
            });
        }
        let bytes = &self.data[self.position..self.position + n];
        self.position += n;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let mut buf = [0u8; 2];
        buf.copy_from_slice(self.read_bytes(2)?);
        Ok(u16::from_be_bytes(buf))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(self.read_bytes(4)?);
        Ok(u32::from_be_bytes(buf))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(self.read_bytes(8)?);
        Ok(u64::from_be_bytes(buf))
    }

    /// Read a one, two or three byte variable-length prefix
    pub fn read_length_prefix(&mut self) -> Result<usize> {
        let b1 = self.read_u8()? as usize;
        match b1 {
            0..=192 => Ok(b1),
            193..=240 => {
                let b2 = self.read_u8()? as usize;
                Ok(193 + (b1 - 193) * 256 + b2)
            }
            241..=254 => {
                let b2 = self.read_u8()? as usize;
                let b3 = self.read_u8()? as usize;
                Ok(12_481 + (b1 - 241) * 65_536 + b2 * 256 + b3)
            }
            _ => Err(CodecError::Malformed(format!(
                "invalid length prefix byte 0x{b1:02X}"
            ))),
        }
    }

    /// Read a length prefix and the payload it describes
    pub fn read_length_prefixed(&mut self) -> Result<&'a [u8]> {
        let length = self.read_length_prefix()?;
        self.read_bytes(length)
    }

    pub fn read_field_header(&mut self) -> Result<FieldHeader> {
        let first = self.read_u8()?;
        let mut type_code = first >> 4;
        let mut field_code = first & 0x0F;

        if type_code == 0 {
            type_code = self.read_u8()?;
            if type_code < 16 {
                return Err(CodecError::MalformedHeader(format!(
                    "extended type code {type_code} should have used the short form"
                )));
            }
        }
        if field_code == 0 {
            field_code = self.read_u8()?;
            if field_code < 16 {
                return Err(CodecError::MalformedHeader(format!(
                    "extended field code {field_code} should have used the short form"
                )));
            }
        }
        Ok(FieldHeader::new(type_code, field_code))
    }

    /// Step into a nested object or array
    pub fn enter_nested(&mut self) -> Result<()> {
        if self.depth >= self.max_depth {
            return Err(CodecError::Malformed(format!(
                "nesting deeper than {} levels",
                self.max_depth
            )));
        }
        self.depth += 1;
        Ok(())
    }

    pub fn leave_nested(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}
