use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::job::ExportJob;
use crate::queue::{Delivery, QueueError, WorkQueue};

#[derive(Default)]
struct QueueState {
    ready: VecDeque<String>,
    in_flight: Vec<String>,
    rejected: Vec<String>,
}

/// Process-local queue with the same ack/reject semantics as [`crate::RedisQueue`].
#[derive(Default)]
pub struct InMemoryQueue {
    state: Mutex<QueueState>,
}

impl InMemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a raw payload, bypassing encoding. Lets tests plant malformed items.
    pub fn push_raw(&self, payload: impl Into<String>) {
        self.state.lock().ready.push_back(payload.into());
    }

    pub fn ready_len(&self) -> usize {
        self.state.lock().ready.len()
    }

    pub fn in_flight_len(&self) -> usize {
        self.state.lock().in_flight.len()
    }

    pub fn rejected(&self) -> Vec<String> {
        self.state.lock().rejected.clone()
    }

    pub fn ready_jobs(&self) -> Vec<ExportJob> {
        self.state
            .lock()
            .ready
            .iter()
            .filter_map(|raw| ExportJob::decode(raw).ok())
            .collect()
    }

    fn take_in_flight(state: &mut QueueState, payload: &str) -> bool {
        match state.in_flight.iter().position(|p| p == payload) {
            Some(idx) => {
                state.in_flight.remove(idx);
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl WorkQueue for InMemoryQueue {
    async fn enqueue(&self, job: &ExportJob) -> Result<(), QueueError> {
        let payload = job.encode()?;
        self.state.lock().ready.push_back(payload);
        Ok(())
    }

    async fn reserve(&self) -> Result<Option<Delivery>, QueueError> {
        let mut state = self.state.lock();
        let Some(payload) = state.ready.pop_front() else {
            return Ok(None);
        };
        state.in_flight.push(payload.clone());
        Ok(Some(Delivery::new(payload)))
    }

    async fn ack(&self, delivery: &Delivery) -> Result<(), QueueError> {
        let mut state = self.state.lock();
        Self::take_in_flight(&mut state, &delivery.payload);
        Ok(())
    }

    async fn reject(&self, delivery: &Delivery) -> Result<(), QueueError> {
        let mut state = self.state.lock();
        if Self::take_in_flight(&mut state, &delivery.payload) {
            state.rejected.push(delivery.payload.clone());
        }
        Ok(())
    }

    async fn recover_in_flight(&self) -> Result<usize, QueueError> {
        let mut state = self.state.lock();
        let recovered: Vec<String> = state.in_flight.drain(..).collect();
        let count = recovered.len();
        for payload in recovered.into_iter().rev() {
            state.ready.push_front(payload);
        }
        Ok(count)
    }
}
