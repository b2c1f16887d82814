//! Domain models for stored objects and access tokens.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Metadata for one stored object. Write-once: nothing mutates these fields
/// after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectMeta {
    pub id: Uuid,
    pub filename: String,
    pub content_type: String,
    pub size_bytes: u64,
    pub created_at: DateTime<Utc>,
    /// `created_at + ttl`, computed once at write time and never recomputed.
    pub expires_at: DateTime<Utc>,
}

impl ObjectMeta {
    /// Logical expiry check. Once this is true the object must never be
    /// served again, even while its bytes still exist.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// A fully materialized object: metadata plus payload bytes.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub meta: ObjectMeta,
    pub payload: Bytes,
}

/// External representation of one stored object, handed back on upload.
///
/// `token` resolves to exactly one object through the download path;
/// `download_url` is the same token embedded in a shareable URL.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccessToken {
    pub token: String,
    pub download_url: String,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn meta_expiring_at(expires_at: DateTime<Utc>) -> ObjectMeta {
        ObjectMeta {
            id: Uuid::new_v4(),
            filename: "note.txt".to_string(),
            content_type: "text/plain".to_string(),
            size_bytes: 9,
            created_at: expires_at - Duration::seconds(1200),
            expires_at,
        }
    }

    #[test]
    fn not_expired_before_deadline() {
        let deadline = Utc::now();
        let meta = meta_expiring_at(deadline);
        assert!(!meta.is_expired_at(deadline - Duration::milliseconds(1)));
    }

    #[test]
    fn expired_at_exactly_the_deadline() {
        let deadline = Utc::now();
        let meta = meta_expiring_at(deadline);
        assert!(meta.is_expired_at(deadline));
        assert!(meta.is_expired_at(deadline + Duration::milliseconds(1)));
    }

    #[test]
    fn access_token_serializes_expiry_as_rfc3339() {
        let token = AccessToken {
            token: "deadbeefdeadbeefdeadbeefdeadbeef".to_string(),
            download_url: "http://localhost:4000/download/deadbeef".to_string(),
            expires_at: Utc::now(),
        };
        let json = serde_json::to_value(&token).expect("serialize");
        let expires = json.get("expires_at").and_then(|v| v.as_str()).unwrap();
        assert!(expires.contains('T'));
    }
}
