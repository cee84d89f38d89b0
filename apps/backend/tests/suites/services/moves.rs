// Integration tests for move arbitration: gravity, turn order, win and draw
// detection, and the order in which rejections are reported.

use backend::domain::{Color, RoomStatus};
use backend::errors::ErrorCode;
use backend::AppError;

use crate::support::build_test_env;
use crate::support::factory::{
    draw_sequence, paired_room, play, play_columns, start, YELLOW_VERTICAL_WIN,
};

#[tokio::test]
async fn token_falls_to_bottom_and_turn_passes() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let room = paired_room(&env).await?;

    let outcome = play(&env, &room.yellow, &room.room_id, 3).await?;

    assert_eq!(outcome.mover, Color::Yellow);
    assert!(!outcome.won);
    assert_eq!(outcome.view.board.rows()[5][3], Some(Color::Yellow));
    assert_eq!(outcome.view.turn, Some(Color::Red));
    assert_eq!(outcome.view.status, RoomStatus::Playing);

    let second = play(&env, &room.red, &room.room_id, 3).await?;
    assert_eq!(second.view.board.rows()[4][3], Some(Color::Red));
    assert_eq!(second.view.turn, Some(Color::Yellow));
    Ok(())
}

#[tokio::test]
async fn vertical_four_wins_and_ends_room() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let room = paired_room(&env).await?;

    let last = play_columns(&env, &room, &YELLOW_VERTICAL_WIN)
        .await?
        .expect("moves were played");

    assert!(last.won);
    assert_eq!(last.view.status, RoomStatus::Ended);
    assert_eq!(last.view.winner_id.as_deref(), Some(room.yellow.player_id.as_str()));
    assert_eq!(last.view.winner.as_deref(), Some(room.yellow.name.as_str()));

    let view = env.flow().read_room(&room.room_id).await?;
    assert_eq!(view, last.view);
    Ok(())
}

#[tokio::test]
async fn horizontal_four_wins() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let room = paired_room(&env).await?;

    let last = play_columns(&env, &room, &[0, 0, 1, 1, 2, 2, 3])
        .await?
        .expect("moves were played");

    assert!(last.won);
    assert_eq!(last.view.winner_id.as_deref(), Some(room.yellow.player_id.as_str()));
    Ok(())
}

#[tokio::test]
async fn full_board_without_line_is_a_draw() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let room = paired_room(&env).await?;

    let last = play_columns(&env, &room, &draw_sequence())
        .await?
        .expect("moves were played");

    assert!(!last.won);
    assert!(last.view.board.is_full());
    assert_eq!(last.view.status, RoomStatus::Ended);
    assert_eq!(last.view.winner, None);
    assert_eq!(last.view.winner_id, None);
    Ok(())
}

#[tokio::test]
async fn first_move_in_waiting_room_starts_play() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let (seat, opened) = start(&env, "solo").await?;

    let outcome = play(&env, &seat, &opened.room_id, 0).await?;

    assert_eq!(outcome.view.status, RoomStatus::Playing);
    assert_eq!(outcome.view.turn, Some(Color::Red));
    Ok(())
}

#[tokio::test]
async fn outsider_gets_not_in_room_even_for_unknown_room() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let room = paired_room(&env).await?;
    let (outsider, _) = start(&env, "outsider").await?;

    let err = play(&env, &outsider, &room.room_id, 0).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotInRoom);

    // Not-in-room is checked before room existence.
    let err = play(&env, &outsider, "no-such-room", 0).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotInRoom);
    Ok(())
}

#[tokio::test]
async fn wrong_color_gets_not_your_turn() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let room = paired_room(&env).await?;

    let err = play(&env, &room.red, &room.room_id, 0).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotYourTurn);

    // Nothing was written.
    let view = env.flow().read_room(&room.room_id).await?;
    assert_eq!(view.board.filled_count(), 0);
    assert_eq!(view.turn, Some(Color::Yellow));
    Ok(())
}

#[tokio::test]
async fn seventh_token_in_column_is_rejected() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let room = paired_room(&env).await?;

    play_columns(&env, &room, &[2, 2, 2, 2, 2, 2]).await?;
    let err = play(&env, &room.yellow, &room.room_id, 2).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::ColumnFull);

    let view = env.flow().read_room(&room.room_id).await?;
    assert_eq!(view.board.column_height(2), 6);
    assert_eq!(view.turn, Some(Color::Yellow));
    Ok(())
}

#[tokio::test]
async fn column_out_of_range_is_invalid() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let room = paired_room(&env).await?;

    for column in [-1, 7, 100] {
        let err = play(&env, &room.yellow, &room.room_id, column).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidColumn, "column {column}");
    }
    Ok(())
}

#[tokio::test]
async fn moves_after_end_get_game_ended_before_turn_check() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let room = paired_room(&env).await?;
    play_columns(&env, &room, &YELLOW_VERTICAL_WIN).await?;

    // Red would be on turn in a live game; yellow would not. Both see GAME_ENDED.
    for seat in [&room.red, &room.yellow] {
        let err = play(&env, seat, &room.room_id, 0).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::GameEnded);
    }
    Ok(())
}

#[tokio::test]
async fn ended_room_reports_game_ended_even_for_out_of_range_column() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let room = paired_room(&env).await?;
    play_columns(&env, &room, &YELLOW_VERTICAL_WIN).await?;
    let before = env.flow().read_room(&room.room_id).await?;
    assert_eq!(before.board.filled_count(), YELLOW_VERTICAL_WIN.len());

    for column in [99, -1] {
        let err = play(&env, &room.red, &room.room_id, column).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::GameEnded);
    }

    let after = env.flow().read_room(&room.room_id).await?;
    assert_eq!(after.board.filled_count(), before.board.filled_count());
    assert_eq!(after.status, RoomStatus::Ended);
    Ok(())
}
