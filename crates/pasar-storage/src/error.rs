//! Storage operation errors

use pasar_core::AppError;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// The candidate failed validation before any I/O happened. Propagated
    /// verbatim so the caller sees the validator's own message.
    #[error(transparent)]
    Rejected(#[from] AppError),

    #[error("Gagal menyimpan file: {0}")]
    StoreFailed(String),

    #[error("Invalid storage path: {0}")]
    InvalidPath(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
