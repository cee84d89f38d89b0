//! Game setup through the real service layer.

use backend::domain::Color;
use backend::services::matchmaking::StartOutcome;
use backend::services::moves::MoveOutcome;
use backend::AppError;
use backend_test_support::identities::{display_name, player_id};

use super::test_state::TestEnv;

pub struct Seat {
    pub player_id: String,
    pub name: String,
}

/// Two players paired into one PLAYING room.
pub struct PairedRoom {
    pub room_id: String,
    pub yellow: Seat,
    pub red: Seat,
}

impl PairedRoom {
    pub fn seat(&self, color: Color) -> &Seat {
        match color {
            Color::Yellow => &self.yellow,
            Color::Red => &self.red,
        }
    }
}

pub async fn start(env: &TestEnv, prefix: &str) -> Result<(Seat, StartOutcome), AppError> {
    let seat = Seat {
        player_id: player_id(),
        name: display_name(prefix),
    };
    let outcome = env.flow().start_or_join(&seat.player_id, &seat.name).await?;
    Ok((seat, outcome))
}

pub async fn paired_room(env: &TestEnv) -> Result<PairedRoom, AppError> {
    let (first, opened) = start(env, "yellow").await?;
    let (second, joined) = start(env, "red").await?;
    assert_eq!(opened.room_id, joined.room_id, "second player should pair");
    assert_eq!(opened.color, Color::Yellow);

    Ok(PairedRoom {
        room_id: opened.room_id,
        yellow: first,
        red: second,
    })
}

pub async fn play(env: &TestEnv, seat: &Seat, room_id: &str, column: i32) -> Result<MoveOutcome, AppError> {
    env.flow().apply_move(&seat.player_id, room_id, column).await
}

/// Play alternating moves starting with YELLOW.
pub async fn play_columns(
    env: &TestEnv,
    room: &PairedRoom,
    columns: &[i32],
) -> Result<Option<MoveOutcome>, AppError> {
    let mut last = None;
    let mut color = Color::Yellow;
    for &column in columns {
        last = Some(play(env, room.seat(color), &room.room_id, column).await?);
        color = color.opposite();
    }
    Ok(last)
}

/// Yellow stacks column 3 while red plays 4, 4, 5: yellow wins on move 7.
pub const YELLOW_VERTICAL_WIN: [i32; 7] = [3, 4, 3, 4, 3, 5, 3];

/// Fills the whole board without four in a row for either color.
///
/// Columns are filled in pairs of two-high bands, shifting the color phase
/// per band so no line of four forms in any direction.
pub fn draw_sequence() -> Vec<i32> {
    let mut seq = Vec::with_capacity(42);
    for band in 0..3 {
        for pair in [[0, 1], [2, 3], [4, 5]] {
            let cols = if band == 1 { [pair[1], pair[0]] } else { pair };
            for _ in 0..2 {
                seq.push(cols[0]);
                seq.push(cols[1]);
            }
        }
    }
    for _ in 0..6 {
        seq.push(6);
    }
    seq
}
