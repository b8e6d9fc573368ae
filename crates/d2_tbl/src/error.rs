//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent wrapper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// stream ended before the byte count promised by the header
    #[error("file is truncated: expected {expected} bytes, got {actual}")]
    TruncatedFile {
        /// bytes the header claims should be present
        expected: u64,
        /// bytes actually available
        actual: u64,
    },

    /// header fields are inconsistent with each other
    #[error("malformed header: {detail}")]
    MalformedHeader {
        /// which consistency check failed
        detail: String,
    },

    /// a string offset or length points outside the file
    #[error("string data out of bounds at offset {offset:#x}")]
    StringBoundsError {
        /// offending absolute byte offset
        offset: u64,
    },

    /// record count does not fit the 16-bit node counter
    #[error("too many records for a tbl file: {count} (maximum is 65535)")]
    TooManyRecords {
        /// number of records that was requested
        count: usize,
    },

    /// the encoded layout does not fit the 32-bit offset and size fields
    #[error("encoded file is too large: {size} bytes (offsets are 32-bit)")]
    FileTooLarge {
        /// total byte length the layout would require
        size: u64,
    },

    /// a value's encoded byte length does not fit the 16-bit node field
    #[error("value at row {row} is too long to encode: {length} bytes")]
    ValueTooLong {
        /// logical row of the offending record
        row: usize,
        /// encoded byte length before the terminator
        length: usize,
    },

    /// a key cannot be represented in the single-byte key charset
    #[error("key {key:?} is not representable in Latin-1")]
    UnsupportedEncoding {
        /// the offending key text
        key: String,
    },
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
