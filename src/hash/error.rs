//! Error types for perfect hash construction

use thiserror::Error;

/// Perfect hash construction result type
pub type HashResult<T> = Result<T, HashError>;

/// Errors raised while building a minimal perfect hash table
#[derive(Debug, Error)]
pub enum HashError {
    /// No keys were supplied
    #[error("Cannot build a perfect hash over an empty key set")]
    EmptyKeySet,

    /// Two keys in the input set are identical
    #[error("Duplicate key in input set: {0}")]
    DuplicateKey(String),

    /// The displacement search for one bucket did not converge
    #[error(
        "Displacement search exhausted after {attempts} seeds for a bucket of {bucket_size} keys"
    )]
    SeedSearchExhausted {
        /// Number of keys in the bucket that failed to place
        bucket_size: usize,
        /// Seed ceiling that was reached
        attempts: u32,
    },
}
