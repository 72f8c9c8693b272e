//! Store error types.

use aurum_core::error::LimitsError;
use thiserror::Error;

/// Errors that can occur while reading or writing store files.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(String),

    /// Encoding a record failed.
    #[error("serialization: {0}")]
    Serialization(String),

    /// File exists but does not hold a valid record.
    #[error("corrupted file: {0}")]
    CorruptedFile(String),

    /// Stored limits violate `0 <= min < max`.
    #[error("invalid stored limits: {0}")]
    InvalidLimits(#[from] LimitsError),
}
