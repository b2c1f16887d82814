//! Qrdrop Storage Library
//!
//! This crate provides identifier generation, the blob backend abstraction
//! with its implementations (local filesystem, in-memory), and the
//! expiry-checked `ObjectStore` that ties them together.
//!
//! # Blob key format
//!
//! Blob keys are the simple (dashless) hex form of the object id, e.g.
//! `67e5504410b1426f9247bb680e5fe0c8`. Keys must not contain `..`, path
//! separators, or a leading `/`; backends reject anything else.

pub mod blob;
pub mod error;
pub mod factory;
pub mod ids;
pub mod store;

// Re-export commonly used types
pub use blob::local::LocalBlobStore;
pub use blob::memory::MemoryBlobStore;
pub use blob::{BlobStore, BlobStream};
pub use error::{StoreError, StoreResult};
pub use factory::create_blob_store;
pub use ids::{IdGenerator, RandomIds};
pub use store::ObjectStore;
