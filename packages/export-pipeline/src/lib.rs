//! Shared contract between the serving process (producer) and the export
//! worker (consumer): the work item wire shape, the durable queue seam and
//! the on-disk artifact layout.

pub mod artifacts;
pub mod job;
pub mod memory;
pub mod queue;
pub mod redis_queue;
pub mod retry;

pub use artifacts::{ArtifactError, ArtifactStore};
pub use job::{ExportJob, DEFAULT_QUEUE};
pub use memory::InMemoryQueue;
pub use queue::{Delivery, QueueError, QueueNames, WorkQueue};
pub use redis_queue::RedisQueue;
