//! Storage operation errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Storage full: {0}")]
    StorageFull(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Invalid blob key: {0}")]
    InvalidKey(String),

    #[error("Randomness source unavailable: {0}")]
    EntropyUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// Classify a filesystem write failure. A full disk is its own error so
    /// the caller can surface 507 instead of a generic 500.
    pub(crate) fn from_write_error(err: std::io::Error, what: &str) -> StoreError {
        // 28 = ENOSPC
        if err.raw_os_error() == Some(28) {
            StoreError::StorageFull(format!("{}: {}", what, err))
        } else {
            StoreError::StorageUnavailable(format!("{}: {}", what, err))
        }
    }
}

impl From<StoreError> for qrdrop_core::AppError {
    fn from(err: StoreError) -> Self {
        use qrdrop_core::AppError;
        match err {
            StoreError::NotFound(msg) => AppError::NotFound(msg),
            StoreError::StorageFull(msg) => AppError::StorageFull(msg),
            StoreError::StorageUnavailable(msg) => AppError::StorageUnavailable(msg),
            StoreError::InvalidKey(msg) => AppError::Internal(format!("invalid blob key: {}", msg)),
            StoreError::EntropyUnavailable(_) => AppError::EntropyUnavailable,
            StoreError::Io(err) => AppError::Internal(format!("IO error: {}", err)),
        }
    }
}
