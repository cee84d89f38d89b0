//! Error codes for the Connect Four backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! Every code is SCREAMING_SNAKE_CASE and maps 1:1 to the `code` field of
//! problem-details responses.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Game rules (caller-correctable, never retried automatically)
    /// Player is not attached to the room it tried to act on
    NotInRoom,
    /// Room does not exist
    RoomNotFound,
    /// Room already reached a terminal state
    GameEnded,
    /// It is the other color's turn
    NotYourTurn,
    /// Column already holds six tokens
    ColumnFull,

    // Request validation
    /// Column outside 0..=6
    InvalidColumn,
    /// Room id is not a UUID
    InvalidRoomId,
    /// Display name has an invalid length
    InvalidName,
    /// Request carried no player identity
    MissingPlayerIdentity,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource not found
    /// Player not found
    PlayerNotFound,
    /// No artifact captured for the room
    ArtifactNotFound,
    /// Generic not found
    NotFound,

    // Access
    /// Administrative or callback token missing or wrong
    Forbidden,

    // Conflicts (retryable)
    /// Room was modified concurrently
    OptimisticLock,
    /// Another player took the same color in the same room
    ColorTaken,
    /// Export requested for a room that has not ended
    GameNotEnded,
    /// Generic conflict
    Conflict,

    // System errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Database timeout
    DbTimeout,
    /// Export queue not configured or unreachable
    ExportUnavailable,
    /// Data corruption detected
    DataCorruption,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// The exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotInRoom => "NOT_IN_ROOM",
            Self::RoomNotFound => "ROOM_NOT_FOUND",
            Self::GameEnded => "GAME_ENDED",
            Self::NotYourTurn => "NOT_YOUR_TURN",
            Self::ColumnFull => "COLUMN_FULL",

            Self::InvalidColumn => "INVALID_COLUMN",
            Self::InvalidRoomId => "INVALID_ROOM_ID",
            Self::InvalidName => "INVALID_NAME",
            Self::MissingPlayerIdentity => "MISSING_PLAYER_IDENTITY",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::ArtifactNotFound => "ARTIFACT_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::Forbidden => "FORBIDDEN",

            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::ColorTaken => "COLOR_TAKEN",
            Self::GameNotEnded => "GAME_NOT_ENDED",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::ExportUnavailable => "EXPORT_UNAVAILABLE",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }

    /// Conflicts a client may resolve by simply retrying the request.
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::OptimisticLock | Self::ColorTaken | Self::DbUnavailable | Self::DbTimeout
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
