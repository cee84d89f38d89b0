//! SeaORM adapter for rooms - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, JoinType, QueryFilter, QuerySelect, RelationTrait,
    Set,
};

use crate::entities::rooms::{self, RoomStatus};
use crate::entities::{players, TokenColor};

pub mod dto;

pub use dto::RoomUpdate;

fn room_not_found(room_id: &str) -> sea_orm::DbErr {
    sea_orm::DbErr::RecordNotFound(format!("ROOM_NOT_FOUND:{room_id}"))
}

/// Apply an update guarded by `lock_version`, then refetch.
///
/// Zero affected rows means either the room is gone (RecordNotFound) or
/// somebody else bumped the version first (structured OPTIMISTIC_LOCK payload).
async fn optimistic_update_then_fetch<C, F>(
    conn: &C,
    id: &str,
    current_lock_version: i32,
    configure_update: F,
) -> Result<rooms::Model, sea_orm::DbErr>
where
    C: ConnectionTrait + Send + Sync,
    F: FnOnce(sea_orm::UpdateMany<rooms::Entity>) -> sea_orm::UpdateMany<rooms::Entity>,
{
    let now = time::OffsetDateTime::now_utc();

    let result = configure_update(rooms::Entity::update_many())
        .col_expr(rooms::Column::UpdatedAt, Expr::val(now).into())
        .col_expr(
            rooms::Column::LockVersion,
            Expr::col(rooms::Column::LockVersion).add(1),
        )
        .filter(rooms::Column::Id.eq(id))
        .filter(rooms::Column::LockVersion.eq(current_lock_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return match rooms::Entity::find_by_id(id.to_string()).one(conn).await? {
            Some(room) => Err(sea_orm::DbErr::Custom(format!(
                "OPTIMISTIC_LOCK:{{\"expected\":{},\"actual\":{}}}",
                current_lock_version, room.lock_version
            ))),
            None => Err(room_not_found(id)),
        };
    }

    require_room(conn, id).await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
) -> Result<Option<rooms::Model>, sea_orm::DbErr> {
    rooms::Entity::find_by_id(room_id.to_string()).one(conn).await
}

pub async fn require_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
) -> Result<rooms::Model, sea_orm::DbErr> {
    find_by_id(conn, room_id)
        .await?
        .ok_or_else(|| room_not_found(room_id))
}

/// Insert a fresh WAITING room whose first turn belongs to `starting`.
pub async fn create_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
    starting: TokenColor,
) -> Result<rooms::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let active = rooms::ActiveModel {
        id: Set(room_id.to_string()),
        turn: Set(Some(starting)),
        status: Set(RoomStatus::Waiting),
        winner_player_id: Set(None),
        lock_version: Set(1),
        created_at: Set(now),
        updated_at: Set(now),
    };
    rooms::Entity::insert(active).exec_without_returning(conn).await?;
    require_room(conn, room_id).await
}

pub async fn update_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoomUpdate,
) -> Result<rooms::Model, sea_orm::DbErr> {
    optimistic_update_then_fetch(conn, &dto.id, dto.expected_version, |mut update| {
        if let Some(turn) = dto.turn {
            update = update.col_expr(rooms::Column::Turn, Expr::val(turn).into());
        }
        if let Some(status) = dto.status {
            update = update.col_expr(rooms::Column::Status, Expr::val(status).into());
        }
        if let Some(winner) = dto.winner_player_id {
            update = update.col_expr(rooms::Column::WinnerPlayerId, Expr::val(winner).into());
        }
        update
    })
    .await
}

/// Id of some non-ended room holding exactly one player.
///
/// Groups players by room and keeps groups of size one. Which room wins
/// when several qualify is left to the database. `id` exists on both joined
/// tables, so the counted column must stay qualified.
pub async fn find_single_occupant_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Option<String>, sea_orm::DbErr> {
    let row: Option<(String, i64)> = players::Entity::find()
        .select_only()
        .column(players::Column::RoomId)
        .column_as(Expr::col((players::Entity, players::Column::Id)).count(), "occupants")
        .join(JoinType::InnerJoin, players::Relation::Room.def())
        .filter(players::Column::RoomId.is_not_null())
        .filter(rooms::Column::Status.ne(RoomStatus::Ended))
        .group_by(players::Column::RoomId)
        .having(Expr::expr(Expr::col((players::Entity, players::Column::Id)).count()).eq(1))
        .into_tuple()
        .one(conn)
        .await?;
    Ok(row.map(|(room_id, _)| room_id))
}

pub async fn delete_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
) -> Result<u64, sea_orm::DbErr> {
    let res = rooms::Entity::delete_by_id(room_id.to_string())
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}

pub async fn delete_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    let res = rooms::Entity::delete_many().exec(conn).await?;
    Ok(res.rows_affected)
}
