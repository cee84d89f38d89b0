//! SeaORM adapter for placed tokens. Cells are insert-only.

use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::{cells, TokenColor};

pub async fn list_for_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
) -> Result<Vec<cells::Model>, sea_orm::DbErr> {
    cells::Entity::find()
        .filter(cells::Column::RoomId.eq(room_id))
        .order_by_asc(cells::Column::Id)
        .all(conn)
        .await
}

pub async fn count_in_column<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
    col: i16,
) -> Result<u64, sea_orm::DbErr> {
    cells::Entity::find()
        .filter(cells::Column::RoomId.eq(room_id))
        .filter(cells::Column::Col.eq(col))
        .count(conn)
        .await
}

pub async fn insert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
    row: i16,
    col: i16,
    color: TokenColor,
) -> Result<(), sea_orm::DbErr> {
    let active = cells::ActiveModel {
        id: NotSet,
        room_id: Set(room_id.to_string()),
        row: Set(row),
        col: Set(col),
        color: Set(color),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };
    cells::Entity::insert(active).exec(conn).await?;
    Ok(())
}

pub async fn delete_for_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
) -> Result<u64, sea_orm::DbErr> {
    let res = cells::Entity::delete_many()
        .filter(cells::Column::RoomId.eq(room_id))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}

pub async fn delete_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    let res = cells::Entity::delete_many().exec(conn).await?;
    Ok(res.rows_affected)
}
