//! Error types for codec operations

use thiserror::Error;

/// Codec operation result type
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors raised by compression and decompression
#[derive(Debug, Error)]
pub enum CodecError {
    /// Compression failed
    #[error("Compression failed: {0}")]
    Compression(String),

    /// Decompression failed
    #[error("Decompression failed: {0}")]
    Decompression(String),

    /// Declared decompressed size exceeds the output limit
    #[error("Decompressed size {size} exceeds limit of {limit} bytes")]
    OutputTooLarge {
        /// Requested output size
        size: usize,
        /// Configured ceiling
        limit: usize,
    },
}
