//! SeaORM adapters. Functions return `DbErr`; repos map to `DomainError`.

pub mod cells_sea;
pub mod players_sea;
pub mod rooms_sea;
