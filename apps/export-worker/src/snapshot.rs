use serde::Deserialize;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Room state as served by `GET /api/rooms/{room_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSnapshot {
    pub id: String,
    pub turn: Option<String>,
    pub status: String,
    /// Winner's display name.
    pub winner: Option<String>,
    pub winner_id: Option<String>,
    /// Row 0 is the top row.
    pub board: Vec<Vec<Option<String>>>,
}

impl RoomSnapshot {
    pub fn has_valid_shape(&self) -> bool {
        self.board.len() == ROWS && self.board.iter().all(|row| row.len() == COLS)
    }

    pub fn is_ended(&self) -> bool {
        self.status == "ENDED"
    }

    pub fn filled_cells(&self) -> usize {
        self.board.iter().flatten().filter(|c| c.is_some()).count()
    }
}
