// Integration tests for start-or-join pairing.

use backend::domain::{Color, RoomStatus};
use backend::AppError;

use crate::support::build_test_env;
use crate::support::factory::{paired_room, play_columns, start, YELLOW_VERTICAL_WIN};

#[tokio::test]
async fn first_player_opens_waiting_room_as_yellow() -> Result<(), AppError> {
    let env = build_test_env().await?;

    let (_, outcome) = start(&env, "alice").await?;

    assert_eq!(outcome.color, Color::Yellow);
    assert_eq!(outcome.turn, Some(Color::Yellow));
    assert_eq!(outcome.status, Some(RoomStatus::Waiting));
    assert!(!outcome.paired);

    let view = env.flow().read_room(&outcome.room_id).await?;
    assert_eq!(view.status, RoomStatus::Waiting);
    assert_eq!(view.board.filled_count(), 0);
    Ok(())
}

#[tokio::test]
async fn second_player_joins_as_red_and_room_starts() -> Result<(), AppError> {
    let env = build_test_env().await?;

    let (_, opened) = start(&env, "alice").await?;
    let (_, joined) = start(&env, "bob").await?;

    assert_eq!(joined.room_id, opened.room_id);
    assert_eq!(joined.color, Color::Red);
    // Only room creation reports turn and status.
    assert_eq!(joined.turn, None);
    assert_eq!(joined.status, None);
    assert!(joined.paired);

    let view = env.flow().read_room(&opened.room_id).await?;
    assert_eq!(view.status, RoomStatus::Playing);
    assert_eq!(view.turn, Some(Color::Yellow));
    Ok(())
}

#[tokio::test]
async fn third_player_gets_a_fresh_room() -> Result<(), AppError> {
    let env = build_test_env().await?;

    let room = paired_room(&env).await?;
    let (_, third) = start(&env, "carol").await?;

    assert_ne!(third.room_id, room.room_id);
    assert_eq!(third.color, Color::Yellow);
    assert_eq!(third.status, Some(RoomStatus::Waiting));
    Ok(())
}

#[tokio::test]
async fn restarting_leaves_previous_room() -> Result<(), AppError> {
    let env = build_test_env().await?;

    let (seat, first) = start(&env, "alice").await?;
    let second = env
        .flow()
        .start_or_join(&seat.player_id, &seat.name)
        .await?;

    // The abandoned room has no occupants left, so it is not offered back.
    assert_eq!(second.color, Color::Yellow);
    assert_ne!(second.room_id, first.room_id);
    Ok(())
}

#[tokio::test]
async fn ended_rooms_are_never_joined() -> Result<(), AppError> {
    let env = build_test_env().await?;

    let room = paired_room(&env).await?;
    play_columns(&env, &room, &YELLOW_VERTICAL_WIN).await?;

    // Red leaves the finished room; the room now has a single occupant
    // but must not be offered to newcomers.
    env.flow()
        .start_or_join(&room.red.player_id, &room.red.name)
        .await?;
    let (_, newcomer) = start(&env, "dave").await?;

    assert_ne!(newcomer.room_id, room.room_id);
    Ok(())
}

#[tokio::test]
async fn abandoned_ended_room_is_deleted() -> Result<(), AppError> {
    let env = build_test_env().await?;

    let room = paired_room(&env).await?;
    play_columns(&env, &room, &YELLOW_VERTICAL_WIN).await?;

    env.flow()
        .start_or_join(&room.yellow.player_id, &room.yellow.name)
        .await?;

    let err = env.flow().read_room(&room.room_id).await.unwrap_err();
    assert_eq!(err.code().as_str(), "ROOM_NOT_FOUND");
    Ok(())
}
