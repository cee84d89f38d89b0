use serde::{Deserialize, Serialize};

use super::board::{Board, Color};

/// Room lifecycle. Transitions only move forward: WAITING, PLAYING, ENDED.
/// Variant order is lifecycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RoomStatus {
    Waiting,
    Playing,
    Ended,
}

impl RoomStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, RoomStatus::Ended)
    }
}

/// Snapshot of a room as clients see it, both over HTTP and in
/// `room-state-changed` events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomView {
    pub id: String,
    /// Meaningless once the room has ended.
    pub turn: Option<Color>,
    pub status: RoomStatus,
    /// Winner's display name; null for a draw or an unfinished game.
    pub winner: Option<String>,
    pub winner_id: Option<String>,
    pub board: Board,
}

impl RoomView {
    /// Ordering key over a room's lifetime. Every committed change either
    /// drops a token or advances the status, so a later state never compares
    /// lower than an earlier one.
    pub fn progress(&self) -> (usize, RoomStatus) {
        (self.board.filled_count(), self.status)
    }
}
