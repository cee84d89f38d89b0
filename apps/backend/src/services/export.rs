//! Producer side of the export pipeline.
//!
//! Enqueueing is decoupled from the move that ended the game: failures are
//! logged here and never reach the player.

use std::sync::Arc;

use export_pipeline::{ExportJob, QueueError, WorkQueue};
use tracing::{error, info, warn};

#[derive(Clone, Default)]
pub struct ExportProducer {
    queue: Option<Arc<dyn WorkQueue>>,
}

impl ExportProducer {
    pub fn new(queue: Arc<dyn WorkQueue>) -> Self {
        Self { queue: Some(queue) }
    }

    /// Producer with no queue behind it; every enqueue is skipped.
    pub fn disabled() -> Self {
        Self { queue: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.queue.is_some()
    }

    /// Push one `{roomId}` work item.
    pub async fn enqueue(&self, room_id: &str) -> Result<(), QueueError> {
        let queue = self
            .queue
            .as_ref()
            .ok_or_else(|| QueueError::Config("export queue is not configured".into()))?;
        queue.enqueue(&ExportJob::new(room_id)).await
    }

    /// Fire-and-forget hook for a room that just reached ENDED.
    pub async fn room_ended(&self, room_id: &str) {
        if !self.is_enabled() {
            warn!(room_id, "Export queue disabled; no artifact will be captured");
            return;
        }
        match self.enqueue(room_id).await {
            Ok(()) => info!(room_id, "Export job enqueued"),
            Err(err) => error!(room_id, error = %err, "Failed to enqueue export job"),
        }
    }
}

impl std::fmt::Debug for ExportProducer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportProducer")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
