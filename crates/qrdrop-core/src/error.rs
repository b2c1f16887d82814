//! Error types module
//!
//! This module provides the unified `AppError` used at the application
//! boundary. Lower layers keep their own precise error enums
//! (`qrdrop_store::StoreError`, the service-level validation errors) and
//! convert into `AppError` where a response has to be produced.
//!
//! `NotFound` is deliberately opaque towards clients: the internal detail
//! string is for logs only, and `client_message()` never distinguishes
//! "expired" from "never existed".

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// For expected errors like validation failures and missing tokens
    Debug,
    /// For recoverable issues like resource limits
    Warn,
    /// For unexpected failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage full: {0}")]
    StorageFull(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Randomness source unavailable")]
    EntropyUnavailable,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status code to return for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            AppError::InvalidInput(_) => 400,
            AppError::NotFound(_) => 404,
            AppError::PayloadTooLarge(_) => 413,
            AppError::StorageFull(_) => 507,
            AppError::StorageUnavailable(_)
            | AppError::EntropyUnavailable
            | AppError::Internal(_) => 500,
        }
    }

    /// Machine-readable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "invalid_input",
            AppError::NotFound(_) => "not_found",
            AppError::PayloadTooLarge(_) => "payload_too_large",
            AppError::StorageFull(_) => "storage_full",
            AppError::StorageUnavailable(_) => "storage_unavailable",
            AppError::EntropyUnavailable => "entropy_unavailable",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Whether a client retry can reasonably succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::StorageUnavailable(_) | AppError::EntropyUnavailable
        )
    }

    /// Client-facing message. Internal detail stays in logs.
    ///
    /// `NotFound` always renders the same body no matter why resolution
    /// failed, so callers cannot probe the store for other uploads.
    pub fn client_message(&self) -> String {
        match self {
            AppError::NotFound(_) => "Not found".to_string(),
            AppError::InvalidInput(msg) => format!("Invalid input: {}", msg),
            AppError::PayloadTooLarge(msg) => format!("Payload too large: {}", msg),
            AppError::StorageFull(_) | AppError::StorageUnavailable(_) => {
                "Storage error".to_string()
            }
            AppError::EntropyUnavailable => "Temporary server error, retry".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }

    /// Log level for this error.
    pub fn log_level(&self) -> LogLevel {
        match self {
            AppError::InvalidInput(_) | AppError::NotFound(_) | AppError::PayloadTooLarge(_) => {
                LogLevel::Debug
            }
            AppError::StorageFull(_) => LogLevel::Warn,
            AppError::StorageUnavailable(_)
            | AppError::EntropyUnavailable
            | AppError::Internal(_) => LogLevel::Error,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
