//! Contains the Error and Result types used throughout the crate.

use crate::Tag;
use std::fmt::Display;

/// Errors that can occur while decoding, parsing, or serializing NBT data.
///
/// Malformed wire input always surfaces as one of these rather than a panic,
/// since input data is untrusted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// File open/read/write failure.
    Io(String),
    /// Malformed compressed stream, checksum mismatch, or premature end.
    Compression(String),
    /// Ran out of input part way through a value.
    UnexpectedEof,
    /// A type byte that is not a known tag.
    InvalidTag(u8),
    /// Expected unicode string data but it was not valid.
    NonUnicode,
    /// The input did not start with a named, non-End tag.
    NoRootTag,
    /// Tried to add an element to a list of a different declared type.
    ListElementMismatch { expected: Tag, actual: Tag },
    /// Any other error.
    Message(String),
}

/// Convenience type for Result.
pub type Result<T> = std::result::Result<T, Error>;

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(msg) => write!(f, "io error: {}", msg),
            Error::Compression(msg) => write!(f, "compression error: {}", msg),
            Error::UnexpectedEof => f.write_str("unexpectedly ran out of input"),
            Error::InvalidTag(tag) => write!(f, "invalid nbt tag value: {}", tag),
            Error::NonUnicode => f.write_str("invalid nbt string: nonunicode"),
            Error::NoRootTag => f.write_str("invalid nbt: no root tag"),
            Error::ListElementMismatch { expected, actual } => write!(
                f,
                "list of {} cannot hold {}",
                expected.name(),
                actual.name()
            ),
            Error::Message(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::UnexpectedEof => Error::UnexpectedEof,
            _ => Error::Io(e.to_string()),
        }
    }
}

impl Error {
    pub(crate) fn bespoke(msg: impl Into<String>) -> Error {
        Error::Message(msg.into())
    }
}
