use std::convert::TryFrom;

use byteorder::{BigEndian, ByteOrder};

use crate::{
    error::{Error, Result},
    Tag,
};

/// Cursor over the input buffer. Every consume is bounds checked, and the
/// current offset is kept for error reporting.
pub(crate) struct Slice<'de> {
    data: &'de [u8],
    pos: usize,
}

impl<'de> Slice<'de> {
    pub fn new(data: &'de [u8]) -> Self {
        Slice { data, pos: 0 }
    }

    /// Offset of the next unread byte.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Bytes left in the buffer.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn consume(&mut self, n: usize) -> Result<&'de [u8]> {
        match self.data.len().checked_sub(n) {
            Some(avail) if self.pos <= avail => {
                let ret = &self.data[self.pos..self.pos + n];
                self.pos += n;
                Ok(ret)
            }
            _ => Err(Error::truncated(self.pos)),
        }
    }

    pub fn consume_byte(&mut self) -> Result<u8> {
        Ok(self.consume(1)?[0])
    }

    pub fn consume_tag(&mut self) -> Result<Tag> {
        let tag = self.consume_byte()?;
        Tag::try_from(tag).map_err(|_| Error::unknown_tag(tag, self.pos - 1))
    }

    pub fn consume_i8(&mut self) -> Result<i8> {
        Ok(self.consume_byte()? as i8)
    }

    pub fn consume_i16(&mut self) -> Result<i16> {
        Ok(BigEndian::read_i16(self.consume(2)?))
    }

    pub fn consume_i32(&mut self) -> Result<i32> {
        Ok(BigEndian::read_i32(self.consume(4)?))
    }

    pub fn consume_i64(&mut self) -> Result<i64> {
        Ok(BigEndian::read_i64(self.consume(8)?))
    }

    pub fn consume_f32(&mut self) -> Result<f32> {
        Ok(BigEndian::read_f32(self.consume(4)?))
    }

    pub fn consume_f64(&mut self) -> Result<f64> {
        Ok(BigEndian::read_f64(self.consume(8)?))
    }

    /// A length-prefixed string. The length prefix is *unsigned* 16 bit, so
    /// payloads up to 65535 bytes are representable. The payload is Java's
    /// modified UTF-8, of which plain UTF-8 is a subset.
    pub fn consume_str(&mut self) -> Result<String> {
        let len = self.consume(2)?;
        let len = BigEndian::read_u16(len) as usize;
        let start = self.pos;
        let bytes = self.consume(len)?;
        let str = cesu8::from_java_cesu8(bytes).map_err(|_| Error::nonunicode(bytes, start))?;
        Ok(str.into_owned())
    }
}
