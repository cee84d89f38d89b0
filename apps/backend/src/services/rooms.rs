//! Room reads and the administrative reset.

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use tracing::info;

use crate::domain::{Board, RoomView};
use crate::errors::domain::DomainError;
use crate::repos::rooms::Room;
use crate::repos::{cells, players, rooms};

/// Current state of a room, with the board replayed from its cells.
pub async fn read_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
) -> Result<RoomView, DomainError> {
    let room = rooms::require_room(conn, room_id).await?;
    let board = cells::load_board(conn, room_id).await?;
    build_view(conn, &room, board).await
}

/// Assemble the client-facing view, resolving the winner's display name.
pub async fn build_view<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room: &Room,
    board: Board,
) -> Result<RoomView, DomainError> {
    let winner = match room.winner_player_id.as_deref() {
        Some(id) => players::find_by_id(conn, id).await?.and_then(|p| p.name),
        None => None,
    };

    Ok(RoomView {
        id: room.id.clone(),
        turn: room.turn,
        status: room.status,
        winner,
        winner_id: room.winner_player_id.clone(),
        board,
    })
}

/// Plain-text dump of the replayed board for operators.
pub async fn debug_dump<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
) -> Result<String, DomainError> {
    let view = read_room(conn, room_id).await?;
    let turn = view.turn.map(|c| c.as_str()).unwrap_or("-");
    Ok(format!(
        "room {} status={:?} turn={} winner={}\n{}",
        view.id,
        view.status,
        turn,
        view.winner_id.as_deref().unwrap_or("-"),
        view.board
    ))
}

/// Counts of rows removed by [`reset_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResetSummary {
    pub cells: u64,
    pub players: u64,
    pub rooms: u64,
}

/// Delete every cell, player and room. Dependents go first.
pub async fn reset_all(txn: &DatabaseTransaction) -> Result<ResetSummary, DomainError> {
    let summary = ResetSummary {
        cells: cells::delete_all(txn).await?,
        players: players::delete_all(txn).await?,
        rooms: rooms::delete_all(txn).await?,
    };
    info!(
        cells = summary.cells,
        players = summary.players,
        rooms = summary.rooms,
        "All game state reset"
    );
    Ok(summary)
}
