//! Contains the Error and Result types used by the decoder and encoder.

/// Convenience type for Result.
pub type Result<T> = std::result::Result<T, Error>;

/// An error produced while decoding or encoding NBT data.
///
/// Decode-side errors record the byte offset at which the violation was
/// detected, relative to the start of the (decompressed) input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    offset: Option<usize>,
    msg: String,
}

/// The category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A read would have consumed bytes past the end of the input.
    TruncatedInput,

    /// A declared length or count can never be satisfied, for example a
    /// negative array length.
    InvalidLength,

    /// A byte read as a tag did not name one of the 13 known tags.
    UnknownTagId,

    /// The outermost tag of the input was not a compound.
    InvalidRootTag,

    /// The input carried the gzip magic but could not be inflated, or a
    /// requested gzip wrap failed.
    DecompressionFailure,

    /// A string payload was not valid modified UTF-8.
    NonUnicodeString,

    /// The tree handed to the encoder broke a structural rule of NBT, such
    /// as a list with mixed element kinds.
    MalformedTree,

    /// Compound/list nesting exceeded the configured depth limit.
    TooDeeplyNested,
}

impl Error {
    /// The category of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Byte offset into the input at which the error was detected. Absent
    /// for encode-side errors, which have no input buffer.
    pub fn offset(&self) -> Option<usize> {
        self.offset
    }

    fn new(kind: ErrorKind, offset: Option<usize>, msg: String) -> Self {
        Error { kind, offset, msg }
    }

    pub(crate) fn truncated(offset: usize) -> Self {
        Self::new(
            ErrorKind::TruncatedInput,
            Some(offset),
            "unexpectedly ran out of input".to_owned(),
        )
    }

    pub(crate) fn invalid_length(len: i64, offset: usize) -> Self {
        Self::new(
            ErrorKind::InvalidLength,
            Some(offset),
            format!("invalid length: {}", len),
        )
    }

    pub(crate) fn invalid_length_msg(msg: impl Into<String>, offset: usize) -> Self {
        Self::new(ErrorKind::InvalidLength, Some(offset), msg.into())
    }

    pub(crate) fn unknown_tag(tag: u8, offset: usize) -> Self {
        Self::new(
            ErrorKind::UnknownTagId,
            Some(offset),
            format!("unknown nbt tag: {}", tag),
        )
    }

    pub(crate) fn invalid_root(tag: u8, offset: usize) -> Self {
        Self::new(
            ErrorKind::InvalidRootTag,
            Some(offset),
            format!("root tag must be a compound, got tag {}", tag),
        )
    }

    pub(crate) fn decompression(e: std::io::Error) -> Self {
        Self::new(
            ErrorKind::DecompressionFailure,
            None,
            format!("gzip failure: {}", e),
        )
    }

    pub(crate) fn nonunicode(data: &[u8], offset: usize) -> Self {
        Self::new(
            ErrorKind::NonUnicodeString,
            Some(offset),
            format!(
                "invalid nbt string: {}",
                String::from_utf8_lossy(data)
            ),
        )
    }

    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedTree, None, msg.into())
    }

    pub(crate) fn too_deep(limit: usize, offset: usize) -> Self {
        Self::new(
            ErrorKind::TooDeeplyNested,
            Some(offset),
            format!("nesting exceeded depth limit of {}", limit),
        )
    }
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.offset {
            Some(offset) => write!(f, "{} at byte {}", self.msg, offset),
            None => f.write_str(&self.msg),
        }
    }
}
