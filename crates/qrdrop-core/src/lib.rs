//! Qrdrop Core Library
//!
//! This crate provides the domain models, error taxonomy, configuration, and
//! clock abstraction shared across all qrdrop components. It performs no I/O.

pub mod clock;
pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{BlobBackend, Config};
pub use error::{AppError, LogLevel};
pub use models::{AccessToken, ObjectMeta, StoredObject};
