use std::sync::Arc;
use std::time::Duration;

use export_pipeline::retry::reconnect_delay;
use export_pipeline::{Delivery, QueueError, WorkQueue};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::callback::Notifier;
use crate::capture::Capturer;

/// Result of one [`ExportWorker::process_next`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing was ready.
    Idle,
    Completed { room_id: String },
    /// Dropped without requeue. `room_id` is `None` when the payload did not decode.
    Rejected {
        room_id: Option<String>,
        reason: String,
    },
}

pub struct ExportWorker {
    queue: Arc<dyn WorkQueue>,
    capturer: Arc<dyn Capturer>,
    notifier: Arc<dyn Notifier>,
    capture_timeout: Duration,
}

impl ExportWorker {
    pub fn new(
        queue: Arc<dyn WorkQueue>,
        capturer: Arc<dyn Capturer>,
        notifier: Arc<dyn Notifier>,
        capture_timeout: Duration,
    ) -> Self {
        Self {
            queue,
            capturer,
            notifier,
            capture_timeout,
        }
    }

    async fn reject(
        &self,
        delivery: &Delivery,
        room_id: Option<String>,
        reason: String,
    ) -> Result<Outcome, QueueError> {
        warn!(room_id = room_id.as_deref().unwrap_or("-"), %reason, "Export item rejected");
        self.queue.reject(delivery).await?;
        Ok(Outcome::Rejected { room_id, reason })
    }

    /// Handle at most one item. Queue errors are returned; everything that
    /// goes wrong with the item itself ends in a reject.
    pub async fn process_next(&self) -> Result<Outcome, QueueError> {
        let Some(delivery) = self.queue.reserve().await? else {
            return Ok(Outcome::Idle);
        };

        let job = match delivery.job() {
            Ok(job) => job,
            Err(err) => return self.reject(&delivery, None, err.to_string()).await,
        };
        let room_id = job.room_id;
        info!(room_id = %room_id, "Export item received");

        match tokio::time::timeout(self.capture_timeout, self.capturer.capture(&room_id)).await {
            Ok(Ok(_path)) => {}
            Ok(Err(err)) => {
                return self
                    .reject(&delivery, Some(room_id), format!("capture failed: {err}"))
                    .await
            }
            Err(_) => {
                let reason = format!("capture timed out after {:?}", self.capture_timeout);
                return self.reject(&delivery, Some(room_id), reason).await;
            }
        }

        if let Err(err) = self.notifier.artifact_ready(&room_id).await {
            return self
                .reject(&delivery, Some(room_id), format!("callback failed: {err}"))
                .await;
        }

        self.queue.ack(&delivery).await?;
        info!(room_id = %room_id, "Export item completed");
        Ok(Outcome::Completed { room_id })
    }

    /// Drain the queue until cancelled. Sleeps `poll_interval` when idle and
    /// backs off on queue errors.
    pub async fn run(&self, cancel: CancellationToken, poll_interval: Duration) {
        info!("Export worker started");
        let mut failures = 0u32;

        loop {
            if cancel.is_cancelled() {
                break;
            }

            let wait = match self.process_next().await {
                Ok(Outcome::Idle) => {
                    failures = 0;
                    poll_interval
                }
                Ok(_) => {
                    failures = 0;
                    continue;
                }
                Err(err) => {
                    failures += 1;
                    let delay = reconnect_delay(failures);
                    if err.is_transient() {
                        warn!(error = %err, attempt = failures, retry_delay_ms = delay.as_millis() as u64, "Queue unavailable, backing off");
                    } else {
                        error!(error = %err, attempt = failures, "Queue command failed");
                    }
                    delay
                }
            };

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(wait) => {}
            }
        }
        info!("Export worker shutting down");
    }
}
