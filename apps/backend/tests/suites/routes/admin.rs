// Operator routes: reset and export re-trigger.

use actix_web::test;
use backend::errors::ErrorCode;
use backend::AppError;

use crate::common::{assert_problem, ok_json};
use crate::support::factory::{paired_room, play_columns, YELLOW_VERTICAL_WIN};
use crate::support::test_state::ADMIN_TOKEN;
use crate::support::{build_test_env, create_test_app};

const ADMIN_HEADER: &str = "x-admin-token";

#[actix_web::test]
async fn reset_requires_token() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let app = create_test_app(env.state.clone()).await;

    let req = test::TestRequest::post().uri("/api/admin/reset").to_request();
    assert_problem(test::call_service(&app, req).await, 403, "FORBIDDEN").await;

    let req = test::TestRequest::post()
        .uri("/api/admin/reset")
        .insert_header((ADMIN_HEADER, "wrong"))
        .to_request();
    assert_problem(test::call_service(&app, req).await, 403, "FORBIDDEN").await;
    Ok(())
}

#[actix_web::test]
async fn reset_clears_rooms() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let room = paired_room(&env).await?;
    let app = create_test_app(env.state.clone()).await;

    let req = test::TestRequest::post()
        .uri("/api/admin/reset")
        .insert_header((ADMIN_HEADER, ADMIN_TOKEN))
        .to_request();
    let body = ok_json(test::call_service(&app, req).await).await;
    assert_eq!(body["success"], true);

    let err = env.flow().read_room(&room.room_id).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::RoomNotFound);
    Ok(())
}

#[actix_web::test]
async fn export_retrigger_queues_ended_room() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let room = paired_room(&env).await?;
    play_columns(&env, &room, &YELLOW_VERTICAL_WIN).await?;
    let app = create_test_app(env.state.clone()).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/admin/rooms/{}/export", room.room_id))
        .insert_header((ADMIN_HEADER, ADMIN_TOKEN))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 202);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["queued"], true);

    // One from the winning move, one from the operator.
    assert_eq!(env.queue.ready_len(), 2);
    Ok(())
}

#[actix_web::test]
async fn export_retrigger_rejects_live_room() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let room = paired_room(&env).await?;
    let app = create_test_app(env.state.clone()).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/admin/rooms/{}/export", room.room_id))
        .insert_header((ADMIN_HEADER, ADMIN_TOKEN))
        .to_request();
    assert_problem(test::call_service(&app, req).await, 409, "GAME_NOT_ENDED").await;
    assert_eq!(env.queue.ready_len(), 0);
    Ok(())
}
