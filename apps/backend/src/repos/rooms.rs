//! Room repository functions for domain layer.

use sea_orm::{ConnectionTrait, DatabaseTransaction};

use crate::adapters::rooms_sea as rooms_adapter;
use crate::domain::{Color, RoomStatus};
use crate::entities::rooms;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: String,
    pub turn: Option<Color>,
    pub status: RoomStatus,
    pub winner_player_id: Option<String>,
    pub lock_version: i32,
}

/// Field changes applied atomically with one lock_version bump.
#[derive(Debug, Clone, Default)]
pub struct RoomChanges {
    pub turn: Option<Color>,
    pub status: Option<RoomStatus>,
    pub winner_player_id: Option<String>,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
) -> Result<Option<Room>, DomainError> {
    let room = rooms_adapter::find_by_id(conn, room_id).await?;
    Ok(room.map(Room::from))
}

pub async fn require_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
) -> Result<Room, DomainError> {
    find_by_id(conn, room_id)
        .await?
        .ok_or_else(|| DomainError::room_not_found(room_id))
}

pub async fn create_room(
    txn: &DatabaseTransaction,
    room_id: &str,
    starting: Color,
) -> Result<Room, DomainError> {
    let room = rooms_adapter::create_room(txn, room_id, starting.into()).await?;
    Ok(Room::from(room))
}

/// Update a room with optimistic locking.
///
/// Fails with `ConflictKind::OptimisticLock` when `expected_lock_version` no
/// longer matches the stored row.
pub async fn update_room(
    txn: &DatabaseTransaction,
    room_id: &str,
    expected_lock_version: i32,
    changes: RoomChanges,
) -> Result<Room, DomainError> {
    let mut dto = rooms_adapter::RoomUpdate::new(room_id, expected_lock_version);
    if let Some(turn) = changes.turn {
        dto = dto.with_turn(turn.into());
    }
    if let Some(status) = changes.status {
        dto = dto.with_status(status.into());
    }
    if let Some(winner) = changes.winner_player_id {
        dto = dto.with_winner(winner);
    }
    let room = rooms_adapter::update_room(txn, dto).await?;
    Ok(Room::from(room))
}

/// Id of some non-ended room that currently holds exactly one player.
pub async fn find_single_occupant_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Option<String>, DomainError> {
    Ok(rooms_adapter::find_single_occupant_room(conn).await?)
}

pub async fn delete_room(txn: &DatabaseTransaction, room_id: &str) -> Result<(), DomainError> {
    rooms_adapter::delete_room(txn, room_id).await?;
    Ok(())
}

pub async fn delete_all(txn: &DatabaseTransaction) -> Result<u64, DomainError> {
    Ok(rooms_adapter::delete_all(txn).await?)
}

impl From<rooms::Model> for Room {
    fn from(model: rooms::Model) -> Self {
        Self {
            id: model.id,
            turn: model.turn.map(Color::from),
            status: model.status.into(),
            winner_player_id: model.winner_player_id,
            lock_version: model.lock_version,
        }
    }
}
