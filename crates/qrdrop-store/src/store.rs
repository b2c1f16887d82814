//! Expiry-checked object store.
//!
//! `ObjectStore` owns the id → metadata index and a blob backend. Expiry is
//! enforced at two layers: synchronously on every read (an object whose
//! deadline has passed is refused no matter what the sweeper has or hasn't
//! done yet) and asynchronously by the sweeper, which reclaims objects nobody
//! ever fetched. Either layer alone would be insufficient: sweep-only leaves
//! a readable window between deadline and sweep, check-only leaks storage
//! for unread uploads.
//!
//! Index entries survive until the blob is physically gone, so a failed
//! delete stays visible to the sweeper and is retried; the expiry check keeps
//! refusing the entry in the meantime.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use qrdrop_core::{Clock, ObjectMeta, StoredObject};

use crate::blob::{BlobStore, BlobStream};
use crate::error::{StoreError, StoreResult};
use crate::ids::IdGenerator;

pub struct ObjectStore {
    blobs: Arc<dyn BlobStore>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
    ttl: TimeDelta,
    /// The only shared mutable structure. Insert and remove are atomic per
    /// key; the lock is never held across blob I/O.
    index: RwLock<HashMap<Uuid, ObjectMeta>>,
}

impl ObjectStore {
    pub fn new(
        blobs: Arc<dyn BlobStore>,
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
        ttl: std::time::Duration,
    ) -> Self {
        Self {
            blobs,
            ids,
            clock,
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
            index: RwLock::new(HashMap::new()),
        }
    }

    fn blob_key(id: Uuid) -> String {
        id.simple().to_string()
    }

    /// Store a payload and return its metadata, deadline included.
    ///
    /// The blob write commits before the id becomes visible in the index, so
    /// no reader can observe a minted id whose payload is not fully present.
    pub async fn put(
        &self,
        payload: Bytes,
        filename: &str,
        content_type: &str,
    ) -> StoreResult<ObjectMeta> {
        let id = self.ids.mint()?;
        let key = Self::blob_key(id);
        let size_bytes = payload.len() as u64;

        self.blobs.put(&key, payload).await?;

        let created_at = self.clock.now();
        let meta = ObjectMeta {
            id,
            filename: filename.to_string(),
            content_type: content_type.to_string(),
            size_bytes,
            created_at,
            expires_at: created_at + self.ttl,
        };

        self.index.write().await.insert(id, meta.clone());

        tracing::info!(
            id = %id,
            filename = %filename,
            size_bytes,
            expires_at = %meta.expires_at,
            "Object stored"
        );

        Ok(meta)
    }

    /// Fetch a live object in full. Returns `Ok(None)` for absent ids and for
    /// ids whose deadline has passed, with no distinction.
    pub async fn get(&self, id: Uuid) -> StoreResult<Option<StoredObject>> {
        let Some(meta) = self.resolve_live(id).await else {
            return Ok(None);
        };

        match self.blobs.get(&Self::blob_key(id)).await {
            Ok(payload) => Ok(Some(StoredObject { meta, payload })),
            // Lost a race with a concurrent delete right at the deadline;
            // the object is gone either way.
            Err(StoreError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Fetch a live object as a chunk stream, for large payloads.
    pub async fn get_stream(&self, id: Uuid) -> StoreResult<Option<(ObjectMeta, BlobStream)>> {
        let Some(meta) = self.resolve_live(id).await else {
            return Ok(None);
        };

        match self.blobs.get_stream(&Self::blob_key(id)).await {
            Ok(stream) => Ok(Some((meta, stream))),
            Err(StoreError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Remove an object. Idempotent: absent ids are not an error.
    pub async fn delete(&self, id: Uuid) -> StoreResult<()> {
        // Blob first, index second: a failure keeps the entry visible to the
        // sweeper for retry, and the expiry check keeps refusing it anyway.
        self.blobs.delete(&Self::blob_key(id)).await?;
        let removed = self.index.write().await.remove(&id);

        if removed.is_some() {
            tracing::info!(id = %id, "Object deleted");
        }

        Ok(())
    }

    /// Snapshot of ids whose deadline is at or before `now`. No ordering
    /// guarantee; used by the sweeper.
    pub async fn expired_ids(&self, now: DateTime<Utc>) -> Vec<Uuid> {
        self.index
            .read()
            .await
            .values()
            .filter(|meta| meta.is_expired_at(now))
            .map(|meta| meta.id)
            .collect()
    }

    /// Expiry-checked lookup. Logical expiry always wins: when the deadline
    /// has passed at the moment of evaluation, the entry is refused even if
    /// the bytes still exist, and the bytes are reaped opportunistically.
    async fn resolve_live(&self, id: Uuid) -> Option<ObjectMeta> {
        let now = self.clock.now();

        {
            let index = self.index.read().await;
            match index.get(&id) {
                None => return None,
                Some(meta) if !meta.is_expired_at(now) => return Some(meta.clone()),
                Some(_) => {}
            }
        }

        // Refused an expired entry; reap what we refused to serve. On
        // failure the entry stays indexed so the next sweep retries.
        match self.blobs.delete(&Self::blob_key(id)).await {
            Ok(()) => {
                self.index.write().await.remove(&id);
                tracing::debug!(id = %id, "Reaped expired object on read");
            }
            Err(e) => {
                tracing::warn!(error = %e, id = %id, "Failed to reap expired blob on read, next sweep retries");
            }
        }

        None
    }
}
