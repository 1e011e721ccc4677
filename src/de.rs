//! The tree decoder. Walks the input buffer depth first, building an owned
//! [`Value`] for every tag it meets.
//!
//! The input is untrusted: every read goes through the bounds-checked
//! cursor in [`crate::input`], declared lengths are checked against the
//! bytes actually remaining before anything is allocated, and nesting depth
//! is capped by [`DeOpts::max_depth`].

use byteorder::{BigEndian, ByteOrder};
use log::trace;

use crate::{
    compression::maybe_decompress,
    error::{Error, Result},
    input::Slice,
    Compound, DeOpts, Tag, Value,
};

/// Decode a buffer of NBT data into its root name and compound.
///
/// The buffer may be gzip compressed (the usual state of `.dat` files on
/// disk); this is detected by magic number and inflated before decoding.
///
/// ```
/// use nbtree::from_bytes;
///
/// let data = [0x0a, 0x00, 0x00, 0x00]; // empty, unnamed compound
/// let (name, root) = from_bytes(&data).unwrap();
/// assert_eq!(name, "");
/// assert!(root.is_empty());
/// ```
pub fn from_bytes(input: &[u8]) -> Result<(String, Compound)> {
    from_bytes_with_opts(input, DeOpts::default())
}

/// Same as [`from_bytes`] but with explicit options.
pub fn from_bytes_with_opts(input: &[u8], opts: DeOpts) -> Result<(String, Compound)> {
    let (data, was_compressed) = maybe_decompress(input)?;
    if was_compressed {
        trace!(
            "inflated gzip input: {} -> {} bytes",
            input.len(),
            data.len()
        );
    }

    let mut decoder = Decoder {
        input: Slice::new(&data),
        opts,
        depth: 0,
    };
    decoder.read_root()
}

struct Decoder<'de> {
    input: Slice<'de>,
    opts: DeOpts,
    depth: usize,
}

impl<'de> Decoder<'de> {
    fn read_root(&mut self) -> Result<(String, Compound)> {
        let tag = self.input.consume_byte()?;
        if tag != Tag::Compound as u8 {
            return Err(Error::invalid_root(tag, self.input.pos() - 1));
        }

        let name = self.input.consume_str()?;
        let root = self.read_compound()?;
        trace!("decoded root compound {:?}: {} entries", name, root.len());

        // Trailing bytes after the root compound are ignored.
        Ok((name, root))
    }

    /// One level of compound or list nesting. The decoder recurses with the
    /// input, so untrusted data gets a hard ceiling rather than a stack
    /// overflow.
    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.opts.max_depth {
            return Err(Error::too_deep(self.opts.max_depth, self.input.pos()));
        }
        Ok(())
    }

    fn exit(&mut self) {
        self.depth -= 1;
    }

    fn read_value(&mut self, tag: Tag) -> Result<Value> {
        Ok(match tag {
            // End never reaches here: the compound reader consumes it as the
            // terminator, and the list reader rejects non-empty End lists.
            Tag::End => unreachable!("end tag has no payload"),
            Tag::Byte => Value::Byte(self.input.consume_i8()?),
            Tag::Short => Value::Short(self.input.consume_i16()?),
            Tag::Int => Value::Int(self.input.consume_i32()?),
            Tag::Long => Value::Long(self.input.consume_i64()?),
            Tag::Float => Value::Float(self.input.consume_f32()?),
            Tag::Double => Value::Double(self.input.consume_f64()?),
            Tag::String => Value::String(self.input.consume_str()?),
            Tag::ByteArray => Value::ByteArray(self.read_byte_array()?),
            Tag::IntArray => Value::IntArray(self.read_int_array()?),
            Tag::LongArray => Value::LongArray(self.read_long_array()?),
            Tag::List => {
                self.enter()?;
                let list = self.read_list()?;
                self.exit();
                Value::List(list)
            }
            Tag::Compound => {
                self.enter()?;
                let compound = self.read_compound()?;
                self.exit();
                Value::Compound(compound)
            }
        })
    }

    fn read_compound(&mut self) -> Result<Compound> {
        let mut compound = Compound::new();

        loop {
            let tag = self.input.consume_tag()?;
            if tag == Tag::End {
                break;
            }

            let key = self.input.consume_str()?;
            let value = self.read_value(tag)?;

            // Duplicate keys overwrite the earlier value, keeping the first
            // occurrence's position.
            compound.insert(key, value);
        }

        Ok(compound)
    }

    fn read_list(&mut self) -> Result<Vec<Value>> {
        let element_tag = self.input.consume_tag()?;
        let len = self.read_len()?;

        if element_tag == Tag::End && len > 0 {
            // End elements occupy no bytes, so a non-empty End list can
            // never be satisfied.
            return Err(Error::invalid_length_msg(
                format!("list of {} end tags", len),
                self.input.pos(),
            ));
        }

        // Elements are at least one byte each, so the remaining input bounds
        // a sane capacity even when the declared count is hostile.
        let mut list = Vec::with_capacity(len.min(self.input.remaining()));
        for _ in 0..len {
            list.push(self.read_value(element_tag)?);
        }

        Ok(list)
    }

    fn read_byte_array(&mut self) -> Result<Vec<i8>> {
        let len = self.read_len()?;
        let bytes = self.input.consume(len)?;
        Ok(bytes.iter().map(|&b| b as i8).collect())
    }

    fn read_int_array(&mut self) -> Result<Vec<i32>> {
        let len = self.read_len()?;
        let width = self.checked_width(len, 4)?;
        let bytes = self.input.consume(width)?;
        Ok(bytes.chunks_exact(4).map(BigEndian::read_i32).collect())
    }

    fn read_long_array(&mut self) -> Result<Vec<i64>> {
        let len = self.read_len()?;
        let width = self.checked_width(len, 8)?;
        let bytes = self.input.consume(width)?;
        Ok(bytes.chunks_exact(8).map(BigEndian::read_i64).collect())
    }

    /// A signed 32 bit length prefix. Negative is always an error.
    fn read_len(&mut self) -> Result<usize> {
        let len = self.input.consume_i32()?;
        usize::try_from(len).map_err(|_| Error::invalid_length(len as i64, self.input.pos() - 4))
    }

    fn checked_width(&self, len: usize, width: usize) -> Result<usize> {
        len.checked_mul(width)
            .ok_or_else(|| Error::invalid_length_msg("length overflows", self.input.pos()))
    }
}
