//! DTOs for rooms_sea adapter.

use crate::entities::rooms::RoomStatus;
use crate::entities::TokenColor;

/// DTO for updating room fields with optimistic locking.
///
/// Any combination of turn, status and winner is written in one statement
/// with a single lock_version increment.
#[derive(Debug, Clone)]
pub struct RoomUpdate {
    pub id: String,
    pub turn: Option<TokenColor>,
    pub status: Option<RoomStatus>,
    /// Three-state: None = no change, Some(Some(id)) = set, Some(None) = clear.
    pub winner_player_id: Option<Option<String>>,
    pub expected_version: i32,
}

impl RoomUpdate {
    pub fn new(id: impl Into<String>, expected_version: i32) -> Self {
        Self {
            id: id.into(),
            turn: None,
            status: None,
            winner_player_id: None,
            expected_version,
        }
    }

    pub fn with_turn(mut self, turn: TokenColor) -> Self {
        self.turn = Some(turn);
        self
    }

    pub fn with_status(mut self, status: RoomStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_winner(mut self, player_id: impl Into<String>) -> Self {
        self.winner_player_id = Some(Some(player_id.into()));
        self
    }
}
