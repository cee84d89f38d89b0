use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::token_color::TokenColor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
pub enum RoomStatus {
    #[sea_orm(string_value = "WAITING")]
    Waiting,
    #[sea_orm(string_value = "PLAYING")]
    Playing,
    #[sea_orm(string_value = "ENDED")]
    Ended,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rooms")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub turn: Option<TokenColor>,
    pub status: RoomStatus,
    #[sea_orm(column_name = "winner_player_id")]
    pub winner_player_id: Option<String>,
    #[sea_orm(column_name = "lock_version")]
    pub lock_version: i32,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::players::Entity")]
    Players,
    #[sea_orm(has_many = "super::cells::Entity")]
    Cells,
}

impl Related<super::players::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Players.def()
    }
}

impl Related<super::cells::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cells.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<RoomStatus> for crate::domain::RoomStatus {
    fn from(s: RoomStatus) -> Self {
        match s {
            RoomStatus::Waiting => Self::Waiting,
            RoomStatus::Playing => Self::Playing,
            RoomStatus::Ended => Self::Ended,
        }
    }
}

impl From<crate::domain::RoomStatus> for RoomStatus {
    fn from(s: crate::domain::RoomStatus) -> Self {
        match s {
            crate::domain::RoomStatus::Waiting => Self::Waiting,
            crate::domain::RoomStatus::Playing => Self::Playing,
            crate::domain::RoomStatus::Ended => Self::Ended,
        }
    }
}
