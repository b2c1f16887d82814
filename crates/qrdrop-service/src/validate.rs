//! Upload payload validation.
//!
//! Validation runs before any object is created; a rejected upload has no
//! side effects.

/// Validation errors for uploaded payloads
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Empty payload")]
    EmptyPayload,

    #[error("Payload too large: {size} bytes (max: {max} bytes)")]
    PayloadTooLarge { size: u64, max: u64 },
}

/// Payload validator. Payload bytes are opaque, so only presence and size
/// are checked; filenames and content types pass through untouched.
#[derive(Debug, Clone)]
pub struct PayloadValidator {
    max_payload_bytes: u64,
}

impl PayloadValidator {
    pub fn new(max_payload_bytes: u64) -> Self {
        Self { max_payload_bytes }
    }

    pub fn validate_size(&self, size: u64) -> Result<(), ValidationError> {
        if size == 0 {
            return Err(ValidationError::EmptyPayload);
        }

        if size > self.max_payload_bytes {
            return Err(ValidationError::PayloadTooLarge {
                size,
                max: self.max_payload_bytes,
            });
        }

        Ok(())
    }
}
