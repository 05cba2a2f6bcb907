//! Error types for schematic decoding, conversion and file I/O.

use std::fmt::{self, Display};

/// Alias for a `Result` with the error type [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// This type represents all possible errors that can occur when reading,
/// converting or writing schematic data.
#[derive(Debug)]
pub enum Error {
    /// An I/O error occurred.
    ///
    /// Raised for file access failures and for gzip streams that fail to
    /// decompress or compress.
    IO(std::io::Error),

    /// The input ended unexpectedly.
    ///
    /// This error occurs when the NBT data is truncated or incomplete.
    /// For example, if a compound tag declares a string field but the data
    /// ends before the string content.
    EndOfFile,

    /// Extra bytes remain after parsing the NBT data.
    ///
    /// A schematic body holds exactly one document. If there are remaining
    /// bytes after the root tag ends, this error is returned with the count
    /// of remaining bytes.
    TrailingData(usize),

    /// An invalid NBT tag type was encountered.
    ///
    /// NBT defines tag types 0-12. If a byte outside this range is found
    /// where a tag type is expected, this error is returned with the
    /// invalid byte value. Also raised for tag type 0 in a position that
    /// requires a payload (0 only terminates compounds).
    InvalidTagType(u8),

    /// The root tag was not of the expected type.
    ///
    /// A schematic document's root payload is a compound. The two values
    /// are the expected and the actual kind byte.
    TagMismatch(u8, u8),

    /// Compound/list nesting exceeded the decoder's recursion bound.
    DepthLimitExceeded,
}

impl Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::IO(error) => formatter.write_str(&error.to_string()),
            Error::EndOfFile => formatter.write_str("unexpected end of input"),
            Error::TrailingData(remaining_bytes) => formatter.write_str(&format!(
                "trailing data after end of input: {remaining_bytes} bytes remaining"
            )),
            Error::InvalidTagType(tag) => {
                formatter.write_str(&format!("invalid NBT tag type: {tag:#04x}"))
            }
            Error::TagMismatch(expected, actual) => formatter.write_str(&format!(
                "root tag mismatch: expected {expected:#04x}, got {actual:#04x}"
            )),
            Error::DepthLimitExceeded => formatter.write_str("nesting depth limit exceeded"),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::IO(error)
    }
}

impl std::error::Error for Error {}
