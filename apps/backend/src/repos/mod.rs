//! Repository functions: adapters in, domain structs and `DomainError` out.

pub mod cells;
pub mod players;
pub mod rooms;
