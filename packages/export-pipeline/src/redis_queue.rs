use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{Client, RedisError};
use tokio::time::sleep;
use tracing::{info, warn};

use crate::job::ExportJob;
use crate::queue::{Delivery, QueueError, QueueNames, WorkQueue};
use crate::retry::{is_transient_redis_error, producer_delay, PRODUCER_MAX_ATTEMPTS};

/// Reliable-queue pattern over Redis lists.
///
/// Producers `LPUSH` onto the ready list; a consumer atomically `LMOVE`s the
/// oldest item into `<queue>:processing`. Ack removes it from there, reject
/// moves it to `<queue>:rejected` where nothing consumes it again.
pub struct RedisQueue {
    conn: ConnectionManager,
    names: QueueNames,
}

fn command_error(err: RedisError) -> QueueError {
    if is_transient_redis_error(&err) {
        QueueError::Connection(err.to_string())
    } else {
        QueueError::Command(err.to_string())
    }
}

impl RedisQueue {
    pub async fn connect(redis_url: &str, queue: &str) -> Result<Self, QueueError> {
        let client = Client::open(redis_url)
            .map_err(|err| QueueError::Config(format!("invalid REDIS_URL: {err}")))?;

        let conn = ConnectionManager::new(client)
            .await
            .map_err(|err| QueueError::Connection(err.to_string()))?;

        info!(queue, "Connected export queue to Redis");
        Ok(Self {
            conn,
            names: QueueNames::new(queue),
        })
    }

    pub fn names(&self) -> &QueueNames {
        &self.names
    }

    async fn push_ready(&self, payload: &str) -> Result<(), RedisError> {
        let mut conn = self.conn.clone();
        let _: i64 = redis::cmd("LPUSH")
            .arg(&self.names.ready)
            .arg(payload)
            .query_async(&mut conn)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl WorkQueue for RedisQueue {
    async fn enqueue(&self, job: &ExportJob) -> Result<(), QueueError> {
        let payload = job.encode()?;

        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match self.push_ready(&payload).await {
                Ok(()) => return Ok(()),
                Err(err) => {
                    if attempt >= PRODUCER_MAX_ATTEMPTS || !is_transient_redis_error(&err) {
                        return Err(command_error(err));
                    }
                    let delay = producer_delay(attempt);
                    warn!(
                        error = %err,
                        attempt,
                        retry_delay_ms = delay.as_millis() as u64,
                        room_id = %job.room_id,
                        "Export enqueue failed, retrying"
                    );
                    sleep(delay).await;
                }
            }
        }
    }

    async fn reserve(&self) -> Result<Option<Delivery>, QueueError> {
        let mut conn = self.conn.clone();
        let payload: Option<String> = redis::cmd("LMOVE")
            .arg(&self.names.ready)
            .arg(&self.names.processing)
            .arg("RIGHT")
            .arg("LEFT")
            .query_async(&mut conn)
            .await
            .map_err(command_error)?;
        Ok(payload.map(Delivery::new))
    }

    async fn ack(&self, delivery: &Delivery) -> Result<(), QueueError> {
        let mut conn = self.conn.clone();
        let _: i64 = redis::cmd("LREM")
            .arg(&self.names.processing)
            .arg(1)
            .arg(&delivery.payload)
            .query_async(&mut conn)
            .await
            .map_err(command_error)?;
        Ok(())
    }

    async fn reject(&self, delivery: &Delivery) -> Result<(), QueueError> {
        let mut conn = self.conn.clone();
        let _: () = redis::pipe()
            .atomic()
            .cmd("LREM")
            .arg(&self.names.processing)
            .arg(1)
            .arg(&delivery.payload)
            .ignore()
            .cmd("LPUSH")
            .arg(&self.names.rejected)
            .arg(&delivery.payload)
            .ignore()
            .query_async(&mut conn)
            .await
            .map_err(command_error)?;
        Ok(())
    }

    async fn recover_in_flight(&self) -> Result<usize, QueueError> {
        let mut conn = self.conn.clone();
        let mut recovered = 0usize;
        loop {
            // Newest in-flight first, appended to the consuming end, so the
            // original order is restored.
            let moved: Option<String> = redis::cmd("LMOVE")
                .arg(&self.names.processing)
                .arg(&self.names.ready)
                .arg("LEFT")
                .arg("RIGHT")
                .query_async(&mut conn)
                .await
                .map_err(command_error)?;
            if moved.is_none() {
                break;
            }
            recovered += 1;
        }
        if recovered > 0 {
            warn!(
                queue = %self.names.ready,
                recovered,
                "Returned unacknowledged export items to the queue"
            );
        }
        Ok(recovered)
    }
}
