// Worker callback and artifact fallback endpoints.

use actix_web::test;
use backend::AppError;
use serde_json::json;

use crate::common::{assert_problem, ok_json};
use crate::support::factory::paired_room;
use crate::support::test_state::CALLBACK_TOKEN;
use crate::support::{build_test_env, create_test_app};

const CALLBACK_HEADER: &str = "x-export-token";

fn ready_req(room_id: &str, token: Option<&str>) -> actix_http::Request {
    let mut req = test::TestRequest::post()
        .uri("/api/artifacts/ready")
        .set_json(json!({ "roomId": room_id }));
    if let Some(token) = token {
        req = req.insert_header((CALLBACK_HEADER, token));
    }
    req.to_request()
}

#[actix_web::test]
async fn status_and_fetch_before_capture() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let room = paired_room(&env).await?;
    let app = create_test_app(env.state.clone()).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/artifacts/{}/status", room.room_id))
        .to_request();
    let body = ok_json(test::call_service(&app, req).await).await;
    assert_eq!(body, json!({ "exists": false }));

    let req = test::TestRequest::get()
        .uri(&format!("/api/artifacts/{}", room.room_id))
        .to_request();
    assert_problem(test::call_service(&app, req).await, 404, "ARTIFACT_NOT_FOUND").await;
    Ok(())
}

#[actix_web::test]
async fn stored_artifact_is_served_as_svg() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let room = paired_room(&env).await?;
    env.state
        .artifacts()
        .write(&room.room_id, b"<svg xmlns=\"http://www.w3.org/2000/svg\"/>")
        .await
        .expect("write artifact");
    let app = create_test_app(env.state.clone()).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/artifacts/{}/status", room.room_id))
        .to_request();
    let body = ok_json(test::call_service(&app, req).await).await;
    assert_eq!(body["exists"], true);

    let req = test::TestRequest::get()
        .uri(&format!("/api/artifacts/{}", room.room_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(
        resp.headers().get("content-type").and_then(|v| v.to_str().ok()),
        Some("image/svg+xml")
    );
    let bytes = test::read_body(resp).await;
    assert!(bytes.starts_with(b"<svg"));
    Ok(())
}

#[actix_web::test]
async fn ready_callback_requires_token() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let room = paired_room(&env).await?;
    let app = create_test_app(env.state.clone()).await;

    let resp = test::call_service(&app, ready_req(&room.room_id, None)).await;
    assert_problem(resp, 403, "FORBIDDEN").await;
    Ok(())
}

#[actix_web::test]
async fn ready_callback_without_file_is_not_found() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let room = paired_room(&env).await?;
    let app = create_test_app(env.state.clone()).await;

    let resp = test::call_service(&app, ready_req(&room.room_id, Some(CALLBACK_TOKEN))).await;
    assert_problem(resp, 404, "ARTIFACT_NOT_FOUND").await;
    Ok(())
}

#[actix_web::test]
async fn ready_callback_confirms_stored_artifact() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let room = paired_room(&env).await?;
    env.state
        .artifacts()
        .write(&room.room_id, b"<svg/>")
        .await
        .expect("write artifact");
    let app = create_test_app(env.state.clone()).await;

    let resp = test::call_service(&app, ready_req(&room.room_id, Some(CALLBACK_TOKEN))).await;
    let body = ok_json(resp).await;
    assert_eq!(body, json!({ "success": true, "delivered": 0 }));
    Ok(())
}

#[actix_web::test]
async fn ready_callback_validates_room_id() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let app = create_test_app(env.state.clone()).await;

    let resp = test::call_service(&app, ready_req("../../etc/passwd", Some(CALLBACK_TOKEN))).await;
    assert_problem(resp, 400, "INVALID_ROOM_ID").await;
    Ok(())
}
