// Administrative reset.

use backend::errors::ErrorCode;
use backend::AppError;

use crate::support::build_test_env;
use crate::support::factory::{paired_room, play, start};

#[tokio::test]
async fn reset_removes_rooms_players_and_cells() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let room = paired_room(&env).await?;
    play(&env, &room.yellow, &room.room_id, 0).await?;
    start(&env, "loner").await?;

    let summary = env.flow().reset_all().await?;

    assert_eq!(summary.cells, 1);
    assert_eq!(summary.players, 3);
    assert_eq!(summary.rooms, 2);

    let err = env.flow().read_room(&room.room_id).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::RoomNotFound);
    Ok(())
}

#[tokio::test]
async fn reset_on_empty_store_is_a_no_op() -> Result<(), AppError> {
    let env = build_test_env().await?;

    let summary = env.flow().reset_all().await?;
    assert_eq!(summary, Default::default());

    // Matchmaking works normally afterwards.
    let (_, outcome) = start(&env, "after").await?;
    assert!(!outcome.paired);
    Ok(())
}

#[tokio::test]
async fn old_room_ids_are_unknown_after_reset() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let room = paired_room(&env).await?;
    env.flow().reset_all().await?;

    // The player row is gone too, so membership fails first.
    let err = play(&env, &room.yellow, &room.room_id, 0).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotInRoom);
    Ok(())
}
