//! Pairs players into rooms.
//!
//! Callers serialize invocations (lobby lock); the `(room_id, color)` unique
//! index rejects whoever loses a cross-process race with a retryable conflict.

use sea_orm::DatabaseTransaction;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::{Color, RoomStatus};
use crate::errors::domain::DomainError;
use crate::repos::rooms::RoomChanges;
use crate::repos::{cells, players, rooms};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartOutcome {
    pub room_id: String,
    pub color: Color,
    /// Only reported when a fresh room was created.
    pub turn: Option<Color>,
    pub status: Option<RoomStatus>,
    /// True when the player joined someone else's room.
    pub paired: bool,
}

pub async fn start_or_join(
    txn: &DatabaseTransaction,
    player_id: &str,
    name: &str,
) -> Result<StartOutcome, DomainError> {
    let player = players::upsert(txn, player_id, name).await?;

    if let Some(previous) = player.room_id.as_deref() {
        leave_room(txn, player_id, previous).await?;
    }

    match rooms::find_single_occupant_room(txn).await? {
        Some(room_id) => join_room(txn, player_id, room_id).await,
        None => open_room(txn, player_id).await,
    }
}

/// Detach the player; an ENDED room left behind is deleted with its cells.
async fn leave_room(
    txn: &DatabaseTransaction,
    player_id: &str,
    room_id: &str,
) -> Result<(), DomainError> {
    players::detach(txn, player_id).await?;

    let Some(room) = rooms::find_by_id(txn, room_id).await? else {
        return Ok(());
    };
    if room.status.is_terminal() {
        let removed_cells = cells::delete_for_room(txn, room_id).await?;
        players::detach_all_in_room(txn, room_id).await?;
        rooms::delete_room(txn, room_id).await?;
        debug!(room_id, removed_cells, "Ended room cleaned up on abandonment");
    }
    Ok(())
}

async fn open_room(txn: &DatabaseTransaction, player_id: &str) -> Result<StartOutcome, DomainError> {
    let room_id = Uuid::new_v4().to_string();
    let room = rooms::create_room(txn, &room_id, Color::STARTING).await?;
    players::attach(txn, player_id, &room_id, Color::STARTING).await?;

    info!(room_id = %room_id, player_id, "Room created");
    Ok(StartOutcome {
        room_id,
        color: Color::STARTING,
        turn: room.turn,
        status: Some(room.status),
        paired: false,
    })
}

async fn join_room(
    txn: &DatabaseTransaction,
    player_id: &str,
    room_id: String,
) -> Result<StartOutcome, DomainError> {
    let occupants = players::find_in_room(txn, &room_id).await?;
    let color = occupants
        .first()
        .and_then(|p| p.color)
        .map(Color::opposite)
        .unwrap_or(Color::STARTING);

    players::attach(txn, player_id, &room_id, color).await?;

    let room = rooms::require_room(txn, &room_id).await?;
    if room.status == RoomStatus::Waiting {
        rooms::update_room(
            txn,
            &room_id,
            room.lock_version,
            RoomChanges {
                status: Some(RoomStatus::Playing),
                ..Default::default()
            },
        )
        .await?;
    }

    info!(room_id = %room_id, player_id, color = %color, "Player paired into room");
    Ok(StartOutcome {
        room_id,
        color,
        turn: None,
        status: None,
        paired: true,
    })
}
