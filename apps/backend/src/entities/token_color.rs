use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Stored color shared by `players.color`, `rooms.turn` and `cells.color`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
pub enum TokenColor {
    #[sea_orm(string_value = "YELLOW")]
    Yellow,
    #[sea_orm(string_value = "RED")]
    Red,
}

impl From<TokenColor> for crate::domain::Color {
    fn from(c: TokenColor) -> Self {
        match c {
            TokenColor::Yellow => Self::Yellow,
            TokenColor::Red => Self::Red,
        }
    }
}

impl From<crate::domain::Color> for TokenColor {
    fn from(c: crate::domain::Color) -> Self {
        match c {
            crate::domain::Color::Yellow => Self::Yellow,
            crate::domain::Color::Red => Self::Red,
        }
    }
}
