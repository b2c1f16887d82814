use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::blob::{BlobStore, BlobStream};
use crate::error::{StoreError, StoreResult};

/// Local filesystem blob storage.
#[derive(Clone)]
pub struct LocalBlobStore {
    base_path: PathBuf,
}

impl LocalBlobStore {
    /// Create a new LocalBlobStore rooted at `base_path`, creating the
    /// directory if needed.
    pub async fn new(base_path: impl Into<PathBuf>) -> StoreResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StoreError::StorageUnavailable(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalBlobStore { base_path })
    }

    /// Convert a blob key to a filesystem path.
    ///
    /// Keys are flat identifiers, so anything that could traverse out of the
    /// base directory is rejected outright.
    fn key_to_path(&self, key: &str) -> StoreResult<PathBuf> {
        if key.is_empty()
            || key.contains("..")
            || key.contains('/')
            || key.contains('\\')
            || key.contains('\0')
        {
            return Err(StoreError::InvalidKey(key.to_string()));
        }

        Ok(self.base_path.join(key))
    }

    async fn path_exists(path: &Path) -> bool {
        fs::try_exists(path).await.unwrap_or(false)
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, key: &str, data: Bytes) -> StoreResult<()> {
        let path = self.key_to_path(key)?;
        let size = data.len();
        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path)
            .await
            .map_err(|e| StoreError::from_write_error(e, "Failed to create blob file"))?;

        file.write_all(&data)
            .await
            .map_err(|e| StoreError::from_write_error(e, "Failed to write blob file"))?;

        file.sync_all()
            .await
            .map_err(|e| StoreError::from_write_error(e, "Failed to sync blob file"))?;

        tracing::debug!(
            path = %path.display(),
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local blob write successful"
        );

        Ok(())
    }

    async fn get(&self, key: &str) -> StoreResult<Bytes> {
        let path = self.key_to_path(key)?;

        if !Self::path_exists(&path).await {
            return Err(StoreError::NotFound(key.to_string()));
        }

        let data = fs::read(&path).await.map_err(|e| {
            StoreError::StorageUnavailable(format!(
                "Failed to read blob {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(Bytes::from(data))
    }

    async fn get_stream(&self, key: &str) -> StoreResult<BlobStream> {
        let path = self.key_to_path(key)?;

        if !Self::path_exists(&path).await {
            return Err(StoreError::NotFound(key.to_string()));
        }

        let file = fs::File::open(&path).await.map_err(|e| {
            StoreError::StorageUnavailable(format!(
                "Failed to open blob {}: {}",
                path.display(),
                e
            ))
        })?;

        let reader = tokio_util::io::ReaderStream::new(file);
        let stream = reader.map(|result| {
            result.map_err(|e| {
                StoreError::StorageUnavailable(format!("Failed to read blob chunk: {}", e))
            })
        });

        Ok(Box::pin(stream))
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        let path = self.key_to_path(key)?;

        if !Self::path_exists(&path).await {
            return Ok(());
        }

        fs::remove_file(&path).await.map_err(|e| {
            StoreError::StorageUnavailable(format!(
                "Failed to delete blob {}: {}",
                path.display(),
                e
            ))
        })?;

        tracing::debug!(path = %path.display(), key = %key, "Local blob delete successful");

        Ok(())
    }

    async fn exists(&self, key: &str) -> StoreResult<bool> {
        let path = self.key_to_path(key)?;
        Ok(Self::path_exists(&path).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use tempfile::tempdir;

    #[tokio::test]
    async fn put_get_round_trip_is_byte_exact() {
        let dir = tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path()).await.unwrap();

        let data = Bytes::from_static(b"\x00\x01binary\xffpayload");
        store.put("abc123", data.clone()).await.unwrap();

        let fetched = store.get("abc123").await.unwrap();
        assert_eq!(data, fetched);
    }

    #[tokio::test]
    async fn get_missing_key_is_not_found() {
        let dir = tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path()).await.unwrap();

        let result = store.get("nope").await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn traversal_keys_rejected() {
        let dir = tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path()).await.unwrap();

        for key in ["../etc/passwd", "/etc/passwd", "a/b", "a\\b", ""] {
            let result = store.get(key).await;
            assert!(
                matches!(result, Err(StoreError::InvalidKey(_))),
                "key {:?} should be invalid",
                key
            );
        }
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path()).await.unwrap();

        store.put("gone", Bytes::from_static(b"x")).await.unwrap();
        store.delete("gone").await.unwrap();
        store.delete("gone").await.unwrap();
        store.delete("never-existed").await.unwrap();

        assert!(!store.exists("gone").await.unwrap());
    }

    #[tokio::test]
    async fn stream_yields_full_payload() {
        let dir = tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path()).await.unwrap();

        let data = Bytes::from(vec![7u8; 128 * 1024]);
        store.put("big", data.clone()).await.unwrap();

        let mut stream = store.get_stream("big").await.unwrap();
        let mut collected = Vec::new();
        while let Some(chunk) = stream.next().await {
            collected.extend_from_slice(&chunk.unwrap());
        }

        assert_eq!(data, Bytes::from(collected));
    }
}
