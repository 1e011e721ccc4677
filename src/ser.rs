//! The tree encoder. Mirrors the decoder's layout exactly: same widths,
//! same ordering, big endian throughout.
//!
//! Output goes to a plain `Vec<u8>`, which doubles its capacity as needed
//! and whose length is exactly the bytes written, so the result never
//! carries trailing garbage.

use std::convert::TryInto;

use crate::{
    compression,
    error::{Error, Result},
    Compound, Tag, Value,
};

/// Encode a named compound to NBT bytes.
///
/// Compound entries are written in insertion order, so a tree produced by
/// [`crate::from_bytes`] re-encodes to the original layout.
pub fn to_bytes(name: &str, root: &Compound) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(256);
    out.write_tag(Tag::Compound);
    out.write_str(name)?;
    out.write_compound(root)?;
    Ok(out)
}

/// Encode a named compound and wrap the result in gzip, for callers whose
/// original input was compressed and who want to preserve that shape.
pub fn to_gzip_bytes(name: &str, root: &Compound) -> Result<Vec<u8>> {
    let raw = to_bytes(name, root)?;
    compression::compress(&raw)
}

/// Byte-level writers for each piece of the format. Implemented on the
/// output buffer itself; only structural checks can fail.
trait WriteNbt {
    fn write_tag(&mut self, tag: Tag);
    fn write_str(&mut self, s: &str) -> Result<()>;
    fn write_len(&mut self, len: usize) -> Result<()>;
    fn write_value(&mut self, value: &Value) -> Result<()>;
    fn write_compound(&mut self, compound: &Compound) -> Result<()>;
    fn write_list(&mut self, items: &[Value]) -> Result<()>;
}

impl WriteNbt for Vec<u8> {
    fn write_tag(&mut self, tag: Tag) {
        self.push(tag as u8);
    }

    /// Length-prefixed string, unsigned 16 bit prefix, modified UTF-8
    /// payload. Symmetric with the decoder's string read.
    fn write_str(&mut self, s: &str) -> Result<()> {
        let data = cesu8::to_java_cesu8(s);
        let len: u16 = data
            .len()
            .try_into()
            .map_err(|_| Error::malformed(format!("string of {} bytes too long", data.len())))?;
        self.extend_from_slice(&len.to_be_bytes());
        self.extend_from_slice(&data);
        Ok(())
    }

    /// Signed 32 bit length prefix for arrays and lists.
    fn write_len(&mut self, len: usize) -> Result<()> {
        let len: i32 = len
            .try_into()
            .map_err(|_| Error::malformed(format!("sequence of {} items too long", len)))?;
        self.extend_from_slice(&len.to_be_bytes());
        Ok(())
    }

    fn write_value(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Byte(v) => self.push(*v as u8),
            Value::Short(v) => self.extend_from_slice(&v.to_be_bytes()),
            Value::Int(v) => self.extend_from_slice(&v.to_be_bytes()),
            Value::Long(v) => self.extend_from_slice(&v.to_be_bytes()),
            Value::Float(v) => self.extend_from_slice(&v.to_be_bytes()),
            Value::Double(v) => self.extend_from_slice(&v.to_be_bytes()),
            Value::String(v) => self.write_str(v)?,
            Value::ByteArray(v) => {
                self.write_len(v.len())?;
                self.extend(v.iter().map(|&b| b as u8));
            }
            Value::IntArray(v) => {
                self.write_len(v.len())?;
                for i in v {
                    self.extend_from_slice(&i.to_be_bytes());
                }
            }
            Value::LongArray(v) => {
                self.write_len(v.len())?;
                for i in v {
                    self.extend_from_slice(&i.to_be_bytes());
                }
            }
            Value::List(v) => self.write_list(v)?,
            Value::Compound(v) => self.write_compound(v)?,
        }
        Ok(())
    }

    fn write_compound(&mut self, compound: &Compound) -> Result<()> {
        for (key, value) in compound {
            self.write_tag(value.tag());
            self.write_str(key)?;
            self.write_value(value)?;
        }
        self.write_tag(Tag::End);
        Ok(())
    }

    fn write_list(&mut self, items: &[Value]) -> Result<()> {
        // The element kind comes from the first item. Empty lists get End,
        // which is how vanilla writes them.
        let element_tag = items.first().map_or(Tag::End, Value::tag);

        self.write_tag(element_tag);
        self.write_len(items.len())?;

        for item in items {
            if item.tag() != element_tag {
                return Err(Error::malformed(format!(
                    "list declared {:?} but contains {:?}",
                    element_tag,
                    item.tag()
                )));
            }
            self.write_value(item)?;
        }

        Ok(())
    }
}
