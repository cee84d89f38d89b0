//! In-process fan-out of room events to connected sessions.
//!
//! Delivery is at-most-once: a room with no subscribers drops the event, and
//! a subscriber whose mailbox is full misses it. Clients recover through the
//! pull-based room read.

use actix::prelude::*;
use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

use crate::domain::RoomView;

#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub enum RoomEvent {
    StateChanged(RoomView),
    ArtifactReady { room_id: String },
}

#[derive(Default)]
pub struct BroadcastHub {
    rooms: DashMap<String, DashMap<Uuid, Recipient<RoomEvent>>>,
}

impl BroadcastHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `recipient` to `room_id`; the returned token identifies it for
    /// [`BroadcastHub::unsubscribe`].
    pub fn subscribe(&self, room_id: &str, recipient: Recipient<RoomEvent>) -> Uuid {
        let token = Uuid::new_v4();
        self.rooms
            .entry(room_id.to_string())
            .or_default()
            .insert(token, recipient);
        debug!(room_id, %token, "subscriber attached");
        token
    }

    /// Idempotent. Returns whether the token was still registered.
    pub fn unsubscribe(&self, room_id: &str, token: Uuid) -> bool {
        let removed = self
            .rooms
            .get(room_id)
            .and_then(|subs| subs.remove(&token))
            .is_some();
        self.rooms.remove_if(room_id, |_, subs| subs.is_empty());
        removed
    }

    /// Hand `event` to every current subscriber of `room_id`.
    ///
    /// Returns how many mailboxes accepted it. Closed recipients are pruned.
    pub fn publish(&self, room_id: &str, event: RoomEvent) -> usize {
        let targets: Vec<(Uuid, Recipient<RoomEvent>)> = match self.rooms.get(room_id) {
            Some(subs) => subs
                .iter()
                .map(|e| (*e.key(), e.value().clone()))
                .collect(),
            None => return 0,
        };

        let mut delivered = 0;
        let mut closed = Vec::new();
        for (token, recipient) in targets {
            match recipient.try_send(event.clone()) {
                Ok(()) => delivered += 1,
                Err(SendError::Closed(_)) => closed.push(token),
                Err(SendError::Full(_)) => {
                    debug!(room_id, %token, "subscriber mailbox full; event dropped");
                }
            }
        }

        if !closed.is_empty() {
            if let Some(subs) = self.rooms.get(room_id) {
                for token in &closed {
                    subs.remove(token);
                }
            }
            self.rooms.remove_if(room_id, |_, subs| subs.is_empty());
        }

        delivered
    }

    pub fn subscriber_count(&self, room_id: &str) -> usize {
        self.rooms.get(room_id).map(|subs| subs.len()).unwrap_or(0)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}
