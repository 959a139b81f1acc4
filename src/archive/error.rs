//! Error types for archive packing and reading

use std::path::PathBuf;
use thiserror::Error;

use crate::codec::CodecError;
use crate::hash::HashError;

/// Archive operation result type
pub type PackResult<T> = Result<T, PackError>;

/// Errors raised while packing or reading an archive
#[derive(Debug, Error)]
pub enum PackError {
    /// Manifest has two entries with the same given name
    #[error("Duplicate name in manifest: {0}")]
    DuplicateName(String),

    /// Manifest contains no entries
    #[error("Manifest contains no entries")]
    EmptyManifest,

    /// Manifest line could not be parsed
    #[error("Malformed manifest line {line}: {reason}")]
    InvalidManifest {
        /// 1-based line number
        line: usize,
        /// What was wrong with the line
        reason: String,
    },

    /// An input file could not be read
    #[error("Cannot read input file {path}: {source}")]
    MissingInput {
        /// Path that failed to read
        path: PathBuf,
        /// Underlying filesystem error
        source: std::io::Error,
    },

    /// A file or the whole archive exceeds the signed 32-bit wire limits
    #[error("Archive too large: {size} bytes exceeds the {limit}-byte format limit")]
    TooLarge {
        /// Offending size
        size: u64,
        /// Format ceiling
        limit: u64,
    },

    /// Archive bytes do not form a valid pack file
    #[error("Invalid archive: {0}")]
    InvalidFormat(String),

    /// Decompressed content did not match the recorded original size
    #[error("Size mismatch for {name}: expected {expected} bytes, got {actual}")]
    SizeMismatch {
        /// File name that was loaded
        name: String,
        /// Size recorded in the file table
        expected: usize,
        /// Size the codec actually produced
        actual: usize,
    },

    /// Requested byte range is outside the decompressed content
    #[error("Range at offset {offset} of length {len} is out of bounds for {name} ({size} bytes)")]
    RangeOutOfBounds {
        /// File name that was loaded
        name: String,
        /// Requested start offset
        offset: usize,
        /// Requested length
        len: usize,
        /// Decompressed size of the file
        size: usize,
    },

    /// Perfect hash construction failed
    #[error("Perfect hash construction failed: {0}")]
    Hash(#[from] HashError),

    /// Compression or decompression failed
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Binary read/write error
    #[error("Binary format error: {0}")]
    BinRead(#[from] binrw::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
