//! Per-room mutual exclusion for moves, plus one lobby lock for matchmaking.
//!
//! Locks live only while someone holds or waits on them; the entry for a
//! room is dropped when its last guard goes away.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

type LockMap = DashMap<String, Arc<Mutex<()>>>;

#[derive(Default)]
pub struct RoomLocks {
    rooms: Arc<LockMap>,
    lobby: Arc<Mutex<()>>,
}

impl RoomLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `room_id`.
    pub async fn lock(&self, room_id: &str) -> RoomGuard {
        let mutex = self
            .rooms
            .entry(room_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let guard = mutex.lock_owned().await;
        RoomGuard {
            guard: Some(guard),
            rooms: Arc::clone(&self.rooms),
            room_id: room_id.to_string(),
        }
    }

    /// Serializes read-then-act matchmaking within this process.
    pub async fn lock_lobby(&self) -> OwnedMutexGuard<()> {
        Arc::clone(&self.lobby).lock_owned().await
    }

    /// Rooms that currently have a holder or waiter.
    pub fn active_rooms(&self) -> usize {
        self.rooms.len()
    }
}

pub struct RoomGuard {
    guard: Option<OwnedMutexGuard<()>>,
    rooms: Arc<LockMap>,
    room_id: String,
}

impl Drop for RoomGuard {
    fn drop(&mut self) {
        // Release first so our own Arc no longer counts.
        self.guard.take();
        self.rooms
            .remove_if(&self.room_id, |_, m| Arc::strong_count(m) == 1);
    }
}
