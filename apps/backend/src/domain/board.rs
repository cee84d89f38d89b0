//! Board representation, gravity and incremental win detection.
//!
//! Row 0 is the top of the board and row 5 the bottom. Tokens fall to the
//! lowest free row of their column, so a column holding `n` tokens receives
//! the next one at row `ROWS - 1 - n`.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;
/// Tokens in a line needed to win.
pub const CONNECT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Color {
    Yellow,
    Red,
}

impl Color {
    /// The color that moves first in every room.
    pub const STARTING: Color = Color::Yellow;

    pub fn opposite(self) -> Self {
        match self {
            Color::Yellow => Color::Red,
            Color::Red => Color::Yellow,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Color::Yellow => "YELLOW",
            Color::Red => "RED",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

/// A token as persisted: where it sits and whose it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedToken {
    pub row: i16,
    pub col: i16,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("column {0} is outside 0..{COLS}")]
    InvalidColumn(usize),
    #[error("column {0} is full")]
    ColumnFull(usize),
    #[error("stored token at ({row}, {col}) is off the board or overlaps another")]
    CorruptCell { row: i16, col: i16 },
}

/// 6×7 grid, serialized as six arrays of seven `null | "YELLOW" | "RED"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board([[Option<Color>; COLS]; ROWS]);

impl Board {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, pos: Position) -> Option<Color> {
        self.0
            .get(pos.row)
            .and_then(|row| row.get(pos.col))
            .copied()
            .flatten()
    }

    /// Writes a token without applying gravity. Callers own placement rules.
    pub fn place(&mut self, pos: Position, color: Color) {
        self.0[pos.row][pos.col] = Some(color);
    }

    pub fn rows(&self) -> &[[Option<Color>; COLS]; ROWS] {
        &self.0
    }

    /// Number of tokens currently stacked in `col`.
    pub fn column_height(&self, col: usize) -> usize {
        self.0.iter().filter(|row| row[col].is_some()).count()
    }

    pub fn filled_count(&self) -> usize {
        self.0.iter().flatten().filter(|c| c.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.filled_count() == ROWS * COLS
    }
}

impl fmt::Display for Board {
    /// Plain-text grid: `.` empty, `Y` yellow, `R` red, top row first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.0 {
            let line: String = row
                .iter()
                .map(|c| match c {
                    None => '.',
                    Some(Color::Yellow) => 'Y',
                    Some(Color::Red) => 'R',
                })
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Rebuilds a room's grid by replaying its persisted tokens.
pub fn materialize_board<'a, I>(cells: I) -> Result<Board, BoardError>
where
    I: IntoIterator<Item = &'a PlacedToken>,
{
    let mut board = Board::empty();
    for cell in cells {
        let corrupt = BoardError::CorruptCell {
            row: cell.row,
            col: cell.col,
        };
        let row = usize::try_from(cell.row).map_err(|_| corrupt.clone())?;
        let col = usize::try_from(cell.col).map_err(|_| corrupt.clone())?;
        if row >= ROWS || col >= COLS {
            return Err(corrupt);
        }
        let pos = Position { row, col };
        if board.get(pos).is_some() {
            return Err(corrupt);
        }
        board.place(pos, cell.color);
    }
    Ok(board)
}

/// Where a token dropped into `column` lands, given how many it already holds.
pub fn drop_in_column(
    existing_in_column: usize,
    column: usize,
    color: Color,
) -> Result<PlacedToken, BoardError> {
    if column >= COLS {
        return Err(BoardError::InvalidColumn(column));
    }
    if existing_in_column >= ROWS {
        return Err(BoardError::ColumnFull(column));
    }
    let row = ROWS - 1 - existing_in_column;
    Ok(PlacedToken {
        row: row as i16,
        col: column as i16,
        color,
    })
}

const AXES: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// True when the token at `pos` completes a line of [`CONNECT`] for `color`.
///
/// Only the neighbourhood of the last move is inspected: at most
/// `CONNECT - 1` cells in each of the eight directions.
pub fn check_win(board: &Board, pos: Position, color: Color) -> bool {
    AXES.iter().any(|&(dr, dc)| {
        1 + run_length(board, pos, color, dr, dc) + run_length(board, pos, color, -dr, -dc)
            >= CONNECT
    })
}

fn run_length(board: &Board, from: Position, color: Color, dr: isize, dc: isize) -> usize {
    let mut count = 0;
    let (mut r, mut c) = (from.row as isize, from.col as isize);
    for _ in 1..CONNECT {
        r += dr;
        c += dc;
        if r < 0 || c < 0 || r >= ROWS as isize || c >= COLS as isize {
            break;
        }
        let pos = Position {
            row: r as usize,
            col: c as usize,
        };
        if board.get(pos) != Some(color) {
            break;
        }
        count += 1;
    }
    count
}
