//! Cell repository functions. The board is always rebuilt from these rows.

use sea_orm::{ConnectionTrait, DatabaseTransaction};

use crate::adapters::cells_sea as cells_adapter;
use crate::domain::{materialize_board, Board, Color, PlacedToken};
use crate::entities::cells;
use crate::errors::domain::{DomainError, InfraErrorKind};

pub async fn list_for_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
) -> Result<Vec<PlacedToken>, DomainError> {
    let rows = cells_adapter::list_for_room(conn, room_id).await?;
    Ok(rows.into_iter().map(PlacedToken::from).collect())
}

/// Replay every stored token of `room_id` into a grid.
pub async fn load_board<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
) -> Result<Board, DomainError> {
    let cells = list_for_room(conn, room_id).await?;
    materialize_board(&cells).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("Room {room_id} has inconsistent cells: {e}"),
        )
    })
}

pub async fn count_in_column<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
    col: usize,
) -> Result<usize, DomainError> {
    let n = cells_adapter::count_in_column(conn, room_id, col as i16).await?;
    Ok(n as usize)
}

pub async fn insert(
    txn: &DatabaseTransaction,
    room_id: &str,
    token: PlacedToken,
) -> Result<(), DomainError> {
    cells_adapter::insert(txn, room_id, token.row, token.col, token.color.into()).await?;
    Ok(())
}

pub async fn delete_for_room(txn: &DatabaseTransaction, room_id: &str) -> Result<u64, DomainError> {
    Ok(cells_adapter::delete_for_room(txn, room_id).await?)
}

pub async fn delete_all(txn: &DatabaseTransaction) -> Result<u64, DomainError> {
    Ok(cells_adapter::delete_all(txn).await?)
}

impl From<cells::Model> for PlacedToken {
    fn from(model: cells::Model) -> Self {
        Self {
            row: model.row,
            col: model.col,
            color: Color::from(model.color),
        }
    }
}
