//! Authoritative move validation and application.

use sea_orm::DatabaseTransaction;
use tracing::info;

use crate::domain::{
    check_win, drop_in_column, BoardError, Color, Position, RoomStatus, RoomView, COLS,
};
use crate::errors::domain::{DomainError, InfraErrorKind, ValidationKind};
use crate::repos::rooms::RoomChanges;
use crate::repos::{cells, players, rooms};
use crate::services::rooms::build_view;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub view: RoomView,
    pub mover: Color,
    pub won: bool,
}

impl MoveOutcome {
    pub fn ended(&self) -> bool {
        self.view.status.is_terminal()
    }
}

/// Apply one drop for `player_id` in `room_id`.
///
/// Rejections are checked in this order, and none of them writes anything:
/// not in room, room missing, game ended, not your turn, bad column, column full.
/// The caller must hold the room's lock.
pub async fn apply_move(
    txn: &DatabaseTransaction,
    player_id: &str,
    room_id: &str,
    column: i32,
) -> Result<MoveOutcome, DomainError> {
    let player = match players::find_by_id(txn, player_id).await? {
        Some(p) if p.is_in_room(room_id) => p,
        _ => {
            return Err(DomainError::validation(
                ValidationKind::NotInRoom,
                "You are not in this room",
            ))
        }
    };

    let room = rooms::require_room(txn, room_id).await?;

    if room.status.is_terminal() {
        return Err(DomainError::validation(
            ValidationKind::GameEnded,
            "The game has already ended",
        ));
    }

    let color = match (player.color, room.turn) {
        (Some(mine), Some(turn)) if mine == turn => mine,
        _ => {
            return Err(DomainError::validation(
                ValidationKind::NotYourTurn,
                "It is not your turn",
            ))
        }
    };

    let col = usize::try_from(column)
        .ok()
        .filter(|c| *c < COLS)
        .ok_or_else(|| {
            DomainError::validation(
                ValidationKind::InvalidColumn,
                format!("Column must be between 0 and {}", COLS - 1),
            )
        })?;

    let stacked = cells::count_in_column(txn, room_id, col).await?;
    let token = drop_in_column(stacked, col, color).map_err(board_error)?;
    cells::insert(txn, room_id, token).await?;

    let board = cells::load_board(txn, room_id).await?;
    let placed = Position {
        row: token.row as usize,
        col,
    };
    let won = check_win(&board, placed, color);

    let changes = if won {
        RoomChanges {
            status: Some(RoomStatus::Ended),
            winner_player_id: Some(player_id.to_string()),
            ..Default::default()
        }
    } else if board.is_full() {
        RoomChanges {
            status: Some(RoomStatus::Ended),
            ..Default::default()
        }
    } else {
        RoomChanges {
            turn: Some(color.opposite()),
            status: Some(RoomStatus::Playing),
            ..Default::default()
        }
    };

    let updated = rooms::update_room(txn, room_id, room.lock_version, changes).await?;
    let view = build_view(txn, &updated, board).await?;

    info!(
        room_id,
        player_id,
        column = col,
        row = token.row,
        color = %color,
        won,
        status = ?view.status,
        "Move applied"
    );

    Ok(MoveOutcome {
        view,
        mover: color,
        won,
    })
}

fn board_error(err: BoardError) -> DomainError {
    match err {
        BoardError::ColumnFull(col) => {
            DomainError::validation(ValidationKind::ColumnFull, format!("Column {col} is full"))
        }
        BoardError::InvalidColumn(col) => DomainError::validation(
            ValidationKind::InvalidColumn,
            format!("Column {col} is out of range"),
        ),
        BoardError::CorruptCell { .. } => {
            DomainError::infra(InfraErrorKind::DataCorruption, err.to_string())
        }
    }
}
