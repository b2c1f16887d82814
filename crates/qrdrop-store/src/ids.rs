//! Object identifier generation.
//!
//! Ids must be unguessable and collision-free in practice. A v4 UUID carries
//! 122 bits of entropy, which makes accidental reuse negligible over any
//! realistic operational window; uniqueness is probabilistic-by-construction,
//! nothing tracks history.

use uuid::Uuid;

use crate::error::StoreResult;

/// Mints identifiers for new objects. Stateless; implementations make no
/// durability guarantee.
pub trait IdGenerator: Send + Sync {
    fn mint(&self) -> StoreResult<Uuid>;
}

/// Production generator drawing random v4 UUIDs from the OS entropy source.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn mint(&self) -> StoreResult<Uuid> {
        Ok(Uuid::new_v4())
    }
}
