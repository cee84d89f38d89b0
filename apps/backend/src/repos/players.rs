//! Player repository functions for domain layer.

use sea_orm::{ConnectionTrait, DatabaseTransaction};

use crate::adapters::players_sea as players_adapter;
use crate::domain::Color;
use crate::entities::players;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Player as the services see it. `color` and `room_id` are set together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: String,
    pub name: Option<String>,
    pub color: Option<Color>,
    pub room_id: Option<String>,
}

impl Player {
    pub fn is_in_room(&self, room_id: &str) -> bool {
        self.room_id.as_deref() == Some(room_id)
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: &str,
) -> Result<Option<Player>, DomainError> {
    let player = players_adapter::find_by_id(conn, player_id).await?;
    Ok(player.map(Player::from))
}

pub async fn require_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: &str,
) -> Result<Player, DomainError> {
    find_by_id(conn, player_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Player, format!("Player {player_id} not found"))
    })
}

pub async fn upsert(
    txn: &DatabaseTransaction,
    player_id: &str,
    name: &str,
) -> Result<Player, DomainError> {
    let player = players_adapter::upsert(txn, player_id, name).await?;
    Ok(Player::from(player))
}

pub async fn attach(
    txn: &DatabaseTransaction,
    player_id: &str,
    room_id: &str,
    color: Color,
) -> Result<(), DomainError> {
    players_adapter::attach(txn, player_id, room_id, color.into()).await?;
    Ok(())
}

pub async fn detach(txn: &DatabaseTransaction, player_id: &str) -> Result<(), DomainError> {
    players_adapter::detach(txn, player_id).await?;
    Ok(())
}

pub async fn detach_all_in_room(
    txn: &DatabaseTransaction,
    room_id: &str,
) -> Result<u64, DomainError> {
    Ok(players_adapter::detach_all_in_room(txn, room_id).await?)
}

pub async fn find_in_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
) -> Result<Vec<Player>, DomainError> {
    let players = players_adapter::find_in_room(conn, room_id).await?;
    Ok(players.into_iter().map(Player::from).collect())
}

pub async fn delete_all(txn: &DatabaseTransaction) -> Result<u64, DomainError> {
    Ok(players_adapter::delete_all(txn).await?)
}

impl From<players::Model> for Player {
    fn from(model: players::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            color: model.color.map(Color::from),
            room_id: model.room_id,
        }
    }
}
