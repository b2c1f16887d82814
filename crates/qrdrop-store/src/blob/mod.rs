//! Blob backend abstraction.
//!
//! Backends store opaque byte sequences under flat string keys and return
//! them byte-identical. They know nothing about expiry; the `ObjectStore`
//! layers the deadline semantics on top.

pub mod local;
pub mod memory;

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::error::StoreResult;

/// Streaming blob body, yielded chunk by chunk.
pub type BlobStream = Pin<Box<dyn Stream<Item = StoreResult<Bytes>> + Send>>;

/// Keyed binary storage. All backends must implement this trait.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `data` under `key`. The write is durable (to the backend's own
    /// guarantee) when this returns; a failed write leaves nothing behind
    /// that `get` could observe.
    async fn put(&self, key: &str, data: Bytes) -> StoreResult<()>;

    /// Fetch the full blob. `NotFound` if the key does not exist.
    async fn get(&self, key: &str) -> StoreResult<Bytes>;

    /// Fetch the blob as a chunk stream, for large payloads.
    async fn get_stream(&self, key: &str) -> StoreResult<BlobStream>;

    /// Remove the blob. Idempotent: deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> StoreResult<()>;

    /// Whether a blob exists under `key`.
    async fn exists(&self, key: &str) -> StoreResult<bool>;
}
