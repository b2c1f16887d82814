//! Blob backend construction from configuration.

use std::sync::Arc;

use qrdrop_core::{BlobBackend, Config};

use crate::blob::local::LocalBlobStore;
use crate::blob::memory::MemoryBlobStore;
use crate::blob::BlobStore;
use crate::error::{StoreError, StoreResult};

/// Create a blob backend based on configuration.
pub async fn create_blob_store(config: &Config) -> StoreResult<Arc<dyn BlobStore>> {
    match config.storage_backend {
        BlobBackend::Local => {
            let base_path = config.local_storage_path.clone().ok_or_else(|| {
                StoreError::StorageUnavailable("LOCAL_STORAGE_PATH not configured".to_string())
            })?;

            let store = LocalBlobStore::new(base_path).await?;
            Ok(Arc::new(store))
        }
        BlobBackend::Memory => Ok(Arc::new(MemoryBlobStore::new())),
    }
}
