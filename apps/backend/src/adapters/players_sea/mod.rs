//! SeaORM adapter for players - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::entities::{players, TokenColor};

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: &str,
) -> Result<Option<players::Model>, sea_orm::DbErr> {
    players::Entity::find_by_id(player_id.to_string())
        .one(conn)
        .await
}

/// Create the player with no room or color, or refresh the display name.
pub async fn upsert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: &str,
    name: &str,
) -> Result<players::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();

    if find_by_id(conn, player_id).await?.is_some() {
        players::Entity::update_many()
            .col_expr(players::Column::Name, Expr::val(name).into())
            .col_expr(players::Column::UpdatedAt, Expr::val(now).into())
            .filter(players::Column::Id.eq(player_id))
            .exec(conn)
            .await?;
    } else {
        let active = players::ActiveModel {
            id: Set(player_id.to_string()),
            name: Set(Some(name.to_string())),
            color: Set(None),
            room_id: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        players::Entity::insert(active)
            .exec_without_returning(conn)
            .await?;
    }

    find_by_id(conn, player_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound(format!("PLAYER_NOT_FOUND:{player_id}")))
}

async fn set_membership<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: &str,
    room_id: Option<&str>,
    color: Option<TokenColor>,
) -> Result<(), sea_orm::DbErr> {
    let result = players::Entity::update_many()
        .col_expr(
            players::Column::RoomId,
            Expr::val(room_id.map(str::to_string)).into(),
        )
        .col_expr(players::Column::Color, Expr::val(color).into())
        .col_expr(
            players::Column::UpdatedAt,
            Expr::val(time::OffsetDateTime::now_utc()).into(),
        )
        .filter(players::Column::Id.eq(player_id))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(sea_orm::DbErr::RecordNotFound(format!(
            "PLAYER_NOT_FOUND:{player_id}"
        )));
    }
    Ok(())
}

pub async fn attach<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: &str,
    room_id: &str,
    color: TokenColor,
) -> Result<(), sea_orm::DbErr> {
    set_membership(conn, player_id, Some(room_id), Some(color)).await
}

pub async fn detach<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: &str,
) -> Result<(), sea_orm::DbErr> {
    set_membership(conn, player_id, None, None).await
}

/// Clear room and color for everyone still pointing at `room_id`.
pub async fn detach_all_in_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
) -> Result<u64, sea_orm::DbErr> {
    let result = players::Entity::update_many()
        .col_expr(players::Column::RoomId, Expr::val(Option::<String>::None).into())
        .col_expr(players::Column::Color, Expr::val(Option::<TokenColor>::None).into())
        .filter(players::Column::RoomId.eq(room_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

pub async fn find_in_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
) -> Result<Vec<players::Model>, sea_orm::DbErr> {
    players::Entity::find()
        .filter(players::Column::RoomId.eq(room_id))
        .order_by_asc(players::Column::CreatedAt)
        .all(conn)
        .await
}

pub async fn delete_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    let res = players::Entity::delete_many().exec(conn).await?;
    Ok(res.rows_affected)
}
