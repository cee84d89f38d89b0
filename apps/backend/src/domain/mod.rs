//! Domain layer: pure board logic, no I/O.

pub mod board;
pub mod room_view;

#[cfg(test)]
mod tests_props_board;

pub use board::{
    check_win, drop_in_column, materialize_board, Board, BoardError, Color, PlacedToken,
    Position, COLS, CONNECT, ROWS,
};
pub use room_view::{RoomStatus, RoomView};
