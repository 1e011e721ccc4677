use std::convert::TryInto;

use crate::Tag;

/// Builder for raw NBT data. This exists to create test input. It
/// specifically does *not* guarantee the result is valid NBT; creating
/// invalid NBT is useful for testing.
pub struct Builder {
    payload: Vec<u8>,
}

impl Builder {
    pub fn new() -> Self {
        Builder {
            payload: Vec::new(),
        }
    }

    pub fn tag(mut self, t: Tag) -> Self {
        self.payload.push(t as u8);
        self
    }

    /// A length-prefixed string, used for names, keys and string payloads.
    pub fn name(mut self, name: &str) -> Self {
        let name = cesu8::to_java_cesu8(name);
        let len: u16 = name.len().try_into().expect("test string fits u16");
        self.payload.extend_from_slice(&len.to_be_bytes());
        self.payload.extend_from_slice(&name);
        self
    }

    pub fn start_compound(self, name: &str) -> Self {
        self.tag(Tag::Compound).name(name)
    }

    pub fn end_compound(self) -> Self {
        self.tag(Tag::End)
    }

    pub fn start_list(self, name: &str, element_tag: Tag, size: i32) -> Self {
        self.tag(Tag::List)
            .name(name)
            .tag(element_tag)
            .int_payload(size)
    }

    pub fn byte(self, name: &str, b: i8) -> Self {
        self.tag(Tag::Byte).name(name).byte_payload(b)
    }

    pub fn short(self, name: &str, i: i16) -> Self {
        self.tag(Tag::Short).name(name).short_payload(i)
    }

    pub fn int(self, name: &str, i: i32) -> Self {
        self.tag(Tag::Int).name(name).int_payload(i)
    }

    pub fn long(self, name: &str, i: i64) -> Self {
        self.tag(Tag::Long).name(name).long_payload(i)
    }

    pub fn float(self, name: &str, f: f32) -> Self {
        self.tag(Tag::Float).name(name).float_payload(f)
    }

    pub fn double(self, name: &str, f: f64) -> Self {
        self.tag(Tag::Double).name(name).double_payload(f)
    }

    pub fn string(self, name: &str, s: &str) -> Self {
        self.tag(Tag::String).name(name).string_payload(s)
    }

    pub fn byte_array(self, name: &str, bs: &[i8]) -> Self {
        self.tag(Tag::ByteArray)
            .name(name)
            .int_payload(bs.len().try_into().unwrap())
            .byte_array_payload(bs)
    }

    pub fn int_array(self, name: &str, arr: &[i32]) -> Self {
        let mut b = self
            .tag(Tag::IntArray)
            .name(name)
            .int_payload(arr.len().try_into().unwrap());
        for i in arr {
            b = b.int_payload(*i);
        }
        b
    }

    pub fn long_array(self, name: &str, arr: &[i64]) -> Self {
        let mut b = self
            .tag(Tag::LongArray)
            .name(name)
            .int_payload(arr.len().try_into().unwrap());
        for i in arr {
            b = b.long_payload(*i);
        }
        b
    }

    pub fn string_payload(self, s: &str) -> Self {
        self.name(s)
    }

    pub fn byte_payload(mut self, b: i8) -> Self {
        self.payload.push(b as u8);
        self
    }

    pub fn byte_array_payload(mut self, bs: &[i8]) -> Self {
        for b in bs {
            self.payload.push(*b as u8);
        }
        self
    }

    pub fn short_payload(mut self, i: i16) -> Self {
        self.payload.extend_from_slice(&i.to_be_bytes());
        self
    }

    pub fn int_payload(mut self, i: i32) -> Self {
        self.payload.extend_from_slice(&i.to_be_bytes());
        self
    }

    pub fn long_payload(mut self, i: i64) -> Self {
        self.payload.extend_from_slice(&i.to_be_bytes());
        self
    }

    pub fn float_payload(mut self, f: f32) -> Self {
        self.payload.extend_from_slice(&f.to_be_bytes());
        self
    }

    pub fn double_payload(mut self, f: f64) -> Self {
        self.payload.extend_from_slice(&f.to_be_bytes());
        self
    }

    /// Straight up add some bytes to the payload. For corner-case tests that
    /// are not worth a specific builder method.
    pub fn raw_bytes(mut self, bs: &[u8]) -> Self {
        self.payload.extend_from_slice(bs);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.payload
    }
}
