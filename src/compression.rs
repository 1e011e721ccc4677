//! The compression gate. NBT files are often stored gzip compressed; this
//! module detects the wrapper by magic number and removes or re-applies it.
//! The inflate/deflate work itself is delegated to `flate2`.

use std::borrow::Cow;
use std::io::{Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use log::debug;

use crate::error::{Error, Result};

/// First two bytes of any gzip stream.
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Whether the buffer starts with the gzip magic number.
pub fn is_gzip(data: &[u8]) -> bool {
    data.len() >= 2 && data[..2] == GZIP_MAGIC
}

/// Inflate the buffer if it is gzip wrapped, otherwise hand it back
/// untouched. The flag reports which happened, so callers can reproduce the
/// original shape on output.
pub fn maybe_decompress(data: &[u8]) -> Result<(Cow<'_, [u8]>, bool)> {
    if !is_gzip(data) {
        return Ok((Cow::Borrowed(data), false));
    }

    debug!("gzip magic found, inflating {} bytes", data.len());

    let mut decoder = GzDecoder::new(data);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(Error::decompression)?;

    Ok((Cow::Owned(out), true))
}

/// Gzip-wrap a buffer, the inverse of [`maybe_decompress`] for input that
/// was compressed.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).map_err(Error::decompression)?;
    encoder.finish().map_err(Error::decompression)
}
