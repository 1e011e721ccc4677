//! nbtree decodes NBT data from *Minecraft: Java Edition* into an owned tag
//! tree, and encodes such a tree back to the identical binary layout. This
//! format is used by the game to store things like world data and player
//! inventories.
//!
//! * For the tree type see [`Value`] and [`Compound`].
//! * For decoding see [`from_bytes`]; gzip-wrapped input (the usual state of
//!   `.dat` files) is detected and inflated transparently.
//! * For encoding see [`to_bytes`] and [`to_gzip_bytes`].
//!
//! # Quick example
//!
//! ```no_run
//! use nbtree::{from_bytes, Value};
//!
//! fn main() {
//!     let args: Vec<_> = std::env::args().skip(1).collect();
//!     let data = std::fs::read(&args[0]).unwrap();
//!
//!     // Works whether or not the file is gzip compressed.
//!     let (name, player) = from_bytes(&data).unwrap();
//!
//!     println!("{}: {:#?}", name, player);
//! }
//! ```
//!
//! # Safety on untrusted input
//!
//! Every read is bounds checked against the input buffer, declared lengths
//! are validated before use, and nesting depth is capped (see
//! [`DeOpts::max_depth`]). Malformed input produces an [`error::Error`]
//! carrying the offending byte offset, never a panic.

pub mod compression;
pub mod error;

mod de;
mod input;
mod ser;
mod value;

pub use de::{from_bytes, from_bytes_with_opts};
pub use ser::{to_bytes, to_gzip_bytes};
pub use value::*;

#[cfg(test)]
mod test;

use std::convert::TryFrom;

/// An NBT tag. This does not carry the value or the name of the data.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[repr(u8)]
pub enum Tag {
    /// Represents the end of a Compound object.
    End = 0,
    /// Equivalent to i8.
    Byte = 1,
    /// Equivalent to i16.
    Short = 2,
    /// Equivalent to i32.
    Int = 3,
    /// Equivalent to i64.
    Long = 4,
    /// Equivalent to f32.
    Float = 5,
    /// Equivalent to f64.
    Double = 6,
    /// Represents an array of Byte (i8).
    ByteArray = 7,
    /// Represents a Unicode string.
    String = 8,
    /// Represents a list of other values, all of the same tag.
    List = 9,
    /// Represents a struct-like structure.
    Compound = 10,
    /// Represents an array of Int (i32).
    IntArray = 11,
    /// Represents an array of Long (i64).
    LongArray = 12,
}

// Crates exist to generate this code for us, but would add to our compile
// times. The tags will very rarely change so writing it out is not a big
// burden.
impl TryFrom<u8> for Tag {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        use Tag::*;
        Ok(match value {
            0 => End,
            1 => Byte,
            2 => Short,
            3 => Int,
            4 => Long,
            5 => Float,
            6 => Double,
            7 => ByteArray,
            8 => String,
            9 => List,
            10 => Compound,
            11 => IntArray,
            12 => LongArray,
            13..=u8::MAX => return Err(()),
        })
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> Self {
        tag as u8
    }
}

/// Options for decoding.
///
/// ```
/// use nbtree::{from_bytes_with_opts, DeOpts};
/// # let data = [10u8, 0, 0, 0];
/// let res = from_bytes_with_opts(&data, DeOpts::new().max_depth(32));
/// assert!(res.is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct DeOpts {
    pub(crate) max_depth: usize,
}

impl DeOpts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum nesting depth of compounds and lists before decoding fails
    /// with [`error::ErrorKind::TooDeeplyNested`]. Guards against stack
    /// exhaustion from adversarial input. Defaults to 512.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

impl Default for DeOpts {
    fn default() -> Self {
        Self { max_depth: 512 }
    }
}
