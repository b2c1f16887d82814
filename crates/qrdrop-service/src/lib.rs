//! Qrdrop Service Library
//!
//! Transfer orchestration on top of the object store: upload validation,
//! access-token encoding, the uniform not-found boundary, and the background
//! expiry sweeper.

pub mod sweeper;
pub mod token;
pub mod transfer;
pub mod validate;

// Re-export commonly used types
pub use sweeper::ExpirySweeper;
pub use transfer::{FetchedObject, TransferError, TransferService};
pub use validate::{PayloadValidator, ValidationError};
