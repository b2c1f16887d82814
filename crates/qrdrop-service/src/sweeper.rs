//! Background expiry sweeper.
//!
//! One recurring task owned by the service lifecycle: started at init,
//! aborted at shutdown. Each cycle deletes every object whose deadline has
//! passed. Sweeping is best-effort and idempotent; a failure on one object is
//! logged and retried next cycle, and never blocks uploads or reads.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::interval;

use qrdrop_core::Clock;
use qrdrop_store::ObjectStore;

pub struct ExpirySweeper {
    store: Arc<ObjectStore>,
    clock: Arc<dyn Clock>,
    sweep_interval: Duration,
}

impl ExpirySweeper {
    pub fn new(store: Arc<ObjectStore>, clock: Arc<dyn Clock>, sweep_interval: Duration) -> Self {
        Self {
            store,
            clock,
            sweep_interval,
        }
    }

    /// Start the recurring sweep task. Returns a JoinHandle so the owner can
    /// abort it on shutdown.
    pub fn start(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut sweep_interval = interval(self.sweep_interval);

            loop {
                sweep_interval.tick().await;

                let deleted = self.sweep().await;
                if deleted > 0 {
                    tracing::info!(deleted, "Sweep cycle completed");
                } else {
                    tracing::debug!("Sweep cycle completed, nothing expired");
                }
            }
        })
    }

    /// Run one sweep cycle; returns how many objects were deleted. Holds no
    /// lock across iterations beyond each single delete.
    pub async fn sweep(&self) -> usize {
        let now = self.clock.now();
        let expired = self.store.expired_ids(now).await;
        let mut deleted = 0usize;

        for id in expired {
            match self.store.delete(id).await {
                Ok(()) => {
                    tracing::debug!(id = %id, "Swept expired object");
                    deleted += 1;
                }
                Err(e) => {
                    tracing::error!(error = %e, id = %id, "Failed to sweep object, retrying next cycle");
                }
            }
        }

        deleted
    }
}
