//! Transfer orchestration: upload, fetch, manual delete.
//!
//! This is the seam the HTTP layer calls into. Every fetch-side failure
//! (malformed token, unknown id, expired object) collapses into the single
//! `TransferError::NotFound` here, so the external contract stays
//! deliberately uninformative while the logs keep the precise reason.

use std::sync::Arc;

use bytes::Bytes;

use qrdrop_core::{AccessToken, ObjectMeta};
use qrdrop_store::{BlobStream, ObjectStore, StoreError};

use crate::token;
use crate::validate::{PayloadValidator, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The single opaque outcome for a token that resolves to nothing.
    #[error("Not found")]
    NotFound,

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for TransferError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => TransferError::NotFound,
            other => TransferError::Store(other),
        }
    }
}

/// Streaming fetch result: metadata plus the payload chunk stream.
pub struct FetchedObject {
    pub meta: ObjectMeta,
    pub stream: BlobStream,
}

pub struct TransferService {
    store: Arc<ObjectStore>,
    validator: PayloadValidator,
    public_base_url: String,
}

impl TransferService {
    pub fn new(store: Arc<ObjectStore>, max_payload_bytes: u64, public_base_url: String) -> Self {
        Self {
            store,
            validator: PayloadValidator::new(max_payload_bytes),
            public_base_url,
        }
    }

    fn download_url(&self, token: &str) -> String {
        format!(
            "{}/download/{}",
            self.public_base_url.trim_end_matches('/'),
            token
        )
    }

    /// Validate and store one payload; returns the access token. A rejected
    /// or failed upload creates nothing and exposes no identifier.
    #[tracing::instrument(skip(self, payload), fields(filename = %filename, size_bytes = payload.len()))]
    pub async fn upload(
        &self,
        payload: Bytes,
        filename: &str,
        content_type: &str,
    ) -> Result<AccessToken, TransferError> {
        self.validator.validate_size(payload.len() as u64)?;

        let meta = self.store.put(payload, filename, content_type).await?;
        let token = token::encode(meta.id);
        let download_url = self.download_url(&token);

        tracing::info!(id = %meta.id, expires_at = %meta.expires_at, "Upload accepted");

        Ok(AccessToken {
            token,
            download_url,
            expires_at: meta.expires_at,
        })
    }

    /// Resolve a token and stream the payload back. Uniform `NotFound` for
    /// malformed, absent, and expired tokens.
    pub async fn fetch(&self, token: &str) -> Result<FetchedObject, TransferError> {
        let Some(id) = token::decode(token) else {
            tracing::debug!(token_len = token.len(), "Fetch with unparseable token");
            return Err(TransferError::NotFound);
        };

        match self.store.get_stream(id).await? {
            Some((meta, stream)) => {
                tracing::debug!(id = %id, filename = %meta.filename, "Serving object");
                Ok(FetchedObject { meta, stream })
            }
            None => {
                tracing::debug!(id = %id, "Fetch for absent or expired object");
                Err(TransferError::NotFound)
            }
        }
    }

    /// Manual deletion ahead of the deadline. Idempotent: unknown and
    /// malformed tokens are quietly accepted.
    pub async fn delete(&self, token: &str) -> Result<(), TransferError> {
        let Some(id) = token::decode(token) else {
            return Ok(());
        };

        self.store.delete(id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrdrop_core::ManualClock;
    use qrdrop_store::{MemoryBlobStore, RandomIds};
    use std::time::Duration;

    fn service() -> TransferService {
        let store = Arc::new(ObjectStore::new(
            Arc::new(MemoryBlobStore::new()),
            Arc::new(RandomIds),
            Arc::new(ManualClock::default()),
            Duration::from_secs(1200),
        ));
        TransferService::new(store, 1024, "http://localhost:4000/".to_string())
    }

    #[tokio::test]
    async fn download_url_embeds_token_without_double_slash() {
        let svc = service();
        let receipt = svc
            .upload(Bytes::from_static(b"x"), "f.bin", "application/octet-stream")
            .await
            .unwrap();

        assert_eq!(
            receipt.download_url,
            format!("http://localhost:4000/download/{}", receipt.token)
        );
    }

    #[tokio::test]
    async fn empty_upload_rejected_before_storing() {
        let svc = service();
        let result = svc
            .upload(Bytes::new(), "empty.bin", "application/octet-stream")
            .await;
        assert!(matches!(
            result,
            Err(TransferError::Validation(ValidationError::EmptyPayload))
        ));
    }

    #[tokio::test]
    async fn oversize_upload_rejected() {
        let svc = service();
        let result = svc
            .upload(
                Bytes::from(vec![0u8; 2048]),
                "big.bin",
                "application/octet-stream",
            )
            .await;
        assert!(matches!(
            result,
            Err(TransferError::Validation(
                ValidationError::PayloadTooLarge { .. }
            ))
        ));
    }

    #[tokio::test]
    async fn malformed_token_fetch_is_not_found() {
        let svc = service();
        assert!(matches!(
            svc.fetch("not-a-token").await,
            Err(TransferError::NotFound)
        ));
    }

    #[tokio::test]
    async fn malformed_token_delete_is_accepted() {
        let svc = service();
        assert!(svc.delete("not-a-token").await.is_ok());
    }
}
