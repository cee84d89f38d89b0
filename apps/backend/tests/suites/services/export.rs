// Hand-off of finished games to the export queue.

use backend::errors::ErrorCode;
use backend::AppError;
use export_pipeline::ExportJob;

use crate::support::build_test_env;
use crate::support::factory::{draw_sequence, paired_room, play, play_columns, YELLOW_VERTICAL_WIN};

#[tokio::test]
async fn win_enqueues_exactly_one_job() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let room = paired_room(&env).await?;

    play_columns(&env, &room, &YELLOW_VERTICAL_WIN[..6]).await?;
    assert_eq!(env.queue.ready_len(), 0, "no export before the game ends");

    play(&env, &room.yellow, &room.room_id, 3).await?;
    assert_eq!(env.queue.ready_jobs(), vec![ExportJob::new(room.room_id.clone())]);
    Ok(())
}

#[tokio::test]
async fn draw_is_exported_too() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let room = paired_room(&env).await?;

    play_columns(&env, &room, &draw_sequence()).await?;

    assert_eq!(env.queue.ready_jobs(), vec![ExportJob::new(room.room_id.clone())]);
    Ok(())
}

#[tokio::test]
async fn rejected_move_after_end_does_not_re_enqueue() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let room = paired_room(&env).await?;
    play_columns(&env, &room, &YELLOW_VERTICAL_WIN).await?;

    assert!(play(&env, &room.red, &room.room_id, 0).await.is_err());
    assert_eq!(env.queue.ready_len(), 1);
    Ok(())
}

#[tokio::test]
async fn retrigger_requires_ended_room() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let room = paired_room(&env).await?;

    let err = env.flow().retrigger_export(&room.room_id).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::GameNotEnded);

    let err = env
        .flow()
        .retrigger_export("00000000-0000-4000-8000-000000000000")
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::RoomNotFound);
    assert_eq!(env.queue.ready_len(), 0);
    Ok(())
}

#[tokio::test]
async fn retrigger_pushes_another_job() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let room = paired_room(&env).await?;
    play_columns(&env, &room, &YELLOW_VERTICAL_WIN).await?;

    env.flow().retrigger_export(&room.room_id).await?;

    assert_eq!(env.queue.ready_len(), 2);
    Ok(())
}
