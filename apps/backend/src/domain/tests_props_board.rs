//! Property tests for gravity, replay and win detection (pure domain, no DB).

use proptest::prelude::*;

use crate::domain::board::{
    check_win, drop_in_column, materialize_board, Board, Color, PlacedToken, Position, COLS,
    CONNECT, ROWS,
};

fn color() -> impl Strategy<Value = Color> {
    prop_oneof![Just(Color::Yellow), Just(Color::Red)]
}

/// Replays a column sequence with alternating colors, skipping full columns.
fn play(columns: &[usize]) -> (Vec<PlacedToken>, Board) {
    let mut board = Board::empty();
    let mut cells = Vec::new();
    let mut turn = Color::STARTING;
    for &col in columns {
        if let Ok(token) = drop_in_column(board.column_height(col), col, turn) {
            board.place(
                Position {
                    row: token.row as usize,
                    col,
                },
                turn,
            );
            cells.push(token);
            turn = turn.opposite();
        }
    }
    (cells, board)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Rows handed out in one column go 5, 4, ... 0 and then the column is full.
    #[test]
    fn prop_gravity_strictly_decreasing(col in 0..COLS, c in color()) {
        let mut last = ROWS;
        for n in 0..ROWS {
            let token = drop_in_column(n, col, c).unwrap();
            prop_assert!((token.row as usize) < last);
            last = token.row as usize;
        }
        prop_assert_eq!(last, 0);
        prop_assert!(drop_in_column(ROWS, col, c).is_err());
    }

    /// Replaying cells and dropping one more token changes exactly one cell.
    #[test]
    fn prop_round_trip_adds_exactly_one_cell(
        moves in prop::collection::vec(0..COLS, 0..30),
        next in 0..COLS,
        c in color(),
    ) {
        let (cells, _) = play(&moves);
        let before = materialize_board(&cells).unwrap();
        prop_assume!(before.column_height(next) < ROWS);

        let token = drop_in_column(before.column_height(next), next, c).unwrap();
        let mut with_new = cells.clone();
        with_new.push(token);
        let after = materialize_board(&with_new).unwrap();

        let mut diffs = 0;
        for r in 0..ROWS {
            for col in 0..COLS {
                let p = Position { row: r, col };
                if before.get(p) != after.get(p) {
                    diffs += 1;
                    prop_assert!(before.get(p).is_none());
                    prop_assert_eq!(after.get(p), Some(c));
                }
            }
        }
        prop_assert_eq!(diffs, 1);
    }

    /// A line of four is found from every one of its cells, in every
    /// orientation and its reflection.
    #[test]
    fn prop_win_found_from_any_cell_of_line(
        axis in 0usize..4,
        start_row in 0..ROWS,
        start_col in 0..COLS,
        anchor in 0..CONNECT,
        c in color(),
    ) {
        let (dr, dc): (isize, isize) = [(0, 1), (1, 0), (1, 1), (1, -1)][axis];
        let line: Vec<(isize, isize)> = (0..CONNECT as isize)
            .map(|i| (start_row as isize + dr * i, start_col as isize + dc * i))
            .collect();
        prop_assume!(line
            .iter()
            .all(|&(r, col)| r >= 0 && col >= 0 && r < ROWS as isize && col < COLS as isize));

        for reflect in [false, true] {
            let mut board = Board::empty();
            for &(r, col) in &line {
                let col = if reflect { COLS as isize - 1 - col } else { col };
                board.place(Position { row: r as usize, col: col as usize }, c);
            }
            let (ar, ac) = line[anchor];
            let ac = if reflect { COLS as isize - 1 - ac } else { ac };
            let anchor_pos = Position { row: ar as usize, col: ac as usize };
            prop_assert!(check_win(&board, anchor_pos, c));
            prop_assert!(!check_win(&board, anchor_pos, c.opposite()));
        }
    }

    /// Three in a line never wins.
    #[test]
    fn prop_three_is_not_enough(
        axis in 0usize..4,
        start_row in 0..ROWS,
        start_col in 0..COLS,
        c in color(),
    ) {
        let (dr, dc): (isize, isize) = [(0, 1), (1, 0), (1, 1), (1, -1)][axis];
        let line: Vec<(isize, isize)> = (0..(CONNECT as isize - 1))
            .map(|i| (start_row as isize + dr * i, start_col as isize + dc * i))
            .collect();
        prop_assume!(line
            .iter()
            .all(|&(r, col)| r >= 0 && col >= 0 && r < ROWS as isize && col < COLS as isize));

        let mut board = Board::empty();
        for &(r, col) in &line {
            board.place(Position { row: r as usize, col: col as usize }, c);
        }
        for &(r, col) in &line {
            let pos = Position { row: r as usize, col: col as usize };
            prop_assert!(!check_win(&board, pos, c));
        }
    }
}
