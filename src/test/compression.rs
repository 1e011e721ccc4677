use std::borrow::Cow;

use crate::{
    compression::{compress, is_gzip, maybe_decompress},
    error::ErrorKind,
    from_bytes, to_bytes, to_gzip_bytes, Compound, Value,
};

use super::builder::Builder;

fn sample() -> Vec<u8> {
    Builder::new()
        .start_compound("data")
        .int("x", 7)
        .string("s", "payload")
        .end_compound()
        .build()
}

#[test]
fn decode_sees_through_gzip() {
    let raw = sample();
    let wrapped = compress(&raw).unwrap();
    assert!(is_gzip(&wrapped));

    assert_eq!(from_bytes(&wrapped).unwrap(), from_bytes(&raw).unwrap());
}

#[test]
fn non_gzip_passes_through_unchanged() {
    let raw = sample();
    let (data, was_compressed) = maybe_decompress(&raw).unwrap();
    assert!(!was_compressed);
    assert!(matches!(data, Cow::Borrowed(_)));
    assert_eq!(&*data, raw.as_slice());
}

#[test]
fn gzip_detected_and_inflated() {
    let raw = sample();
    let wrapped = compress(&raw).unwrap();

    let (data, was_compressed) = maybe_decompress(&wrapped).unwrap();
    assert!(was_compressed);
    assert_eq!(&*data, raw.as_slice());
}

#[test]
fn corrupt_gzip_reported() {
    // Magic number followed by junk.
    let bogus = [0x1f, 0x8b, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff];
    let e = from_bytes(&bogus).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::DecompressionFailure);
}

#[test]
fn gzip_output_roundtrips() {
    let mut root = Compound::new();
    root.insert("answer".to_owned(), Value::Int(42));

    let wrapped = to_gzip_bytes("root", &root).unwrap();
    assert!(is_gzip(&wrapped));

    let (name, redecoded) = from_bytes(&wrapped).unwrap();
    assert_eq!(name, "root");
    assert_eq!(redecoded, root);

    // The unwrapped bytes are exactly what to_bytes produces.
    let (raw, was_compressed) = maybe_decompress(&wrapped).unwrap();
    assert!(was_compressed);
    assert_eq!(raw.into_owned(), to_bytes("root", &root).unwrap());
}

#[test]
fn short_input_is_not_gzip() {
    assert!(!is_gzip(&[]));
    assert!(!is_gzip(&[0x1f]));
    // Decoding still fails, but as NBT, not as gzip.
    let e = from_bytes(&[0x1f]).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::InvalidRootTag);
}
