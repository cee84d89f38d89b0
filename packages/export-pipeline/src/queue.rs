use async_trait::async_trait;
use thiserror::Error;

use crate::job::ExportJob;

#[derive(Debug, Error)]
pub enum QueueError {
    #[error("invalid queue configuration: {0}")]
    Config(String),
    #[error("queue connection failed: {0}")]
    Connection(String),
    #[error("queue command failed: {0}")]
    Command(String),
    #[error("failed to encode work item: {0}")]
    Encode(String),
    #[error("malformed work item: {0}")]
    Decode(String),
}

impl QueueError {
    /// Whether retrying the same operation later can succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, QueueError::Connection(_) | QueueError::Command(_))
    }
}

/// Key names for one logical queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueNames {
    pub ready: String,
    pub processing: String,
    pub rejected: String,
}

impl QueueNames {
    pub fn new(queue: &str) -> Self {
        Self {
            ready: queue.to_string(),
            processing: format!("{queue}:processing"),
            rejected: format!("{queue}:rejected"),
        }
    }
}

/// A reserved item. The raw payload is kept so the exact entry can be
/// acknowledged or rejected even when it fails to decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub payload: String,
}

impl Delivery {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    pub fn job(&self) -> Result<ExportJob, QueueError> {
        ExportJob::decode(&self.payload)
    }
}

/// Durable, acknowledged work queue.
///
/// Items move `ready -> in flight` on [`WorkQueue::reserve`] and leave the
/// in-flight set only through [`WorkQueue::ack`] or [`WorkQueue::reject`].
/// Rejected items are parked and never handed out again.
#[async_trait]
pub trait WorkQueue: Send + Sync {
    async fn enqueue(&self, job: &ExportJob) -> Result<(), QueueError>;

    /// Take the oldest ready item, if any. Never blocks waiting for work.
    async fn reserve(&self) -> Result<Option<Delivery>, QueueError>;

    async fn ack(&self, delivery: &Delivery) -> Result<(), QueueError>;

    /// Negative acknowledgement without requeue.
    async fn reject(&self, delivery: &Delivery) -> Result<(), QueueError>;

    /// Return items left in flight by a consumer that died to the ready list.
    async fn recover_in_flight(&self) -> Result<usize, QueueError>;
}
