// Player identity issuance through the full middleware chain.

use actix_web::test;
use backend::AppError;

use crate::common::ok_json;
use crate::support::{build_test_env, create_test_app};

#[actix_web::test]
async fn first_visit_gets_a_cookie_that_sticks() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let app = create_test_app(env.state.clone()).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/players/me").to_request(),
    )
    .await;
    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "playerId")
        .expect("identity cookie issued")
        .into_owned();
    assert!(cookie.http_only().unwrap_or(false));
    let issued = ok_json(resp).await;
    assert_eq!(issued["id"], cookie.value());

    // Presenting the cookie keeps the same identity and issues nothing new.
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/players/me")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(resp.response().cookies().count(), 0);
    let again = ok_json(resp).await;
    assert_eq!(again["id"], cookie.value());
    Ok(())
}

#[actix_web::test]
async fn garbage_identity_is_replaced() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let app = create_test_app(env.state.clone()).await;

    let req = test::TestRequest::get()
        .uri("/api/players/me")
        .insert_header(("x-player-id", "'; drop table players; --"))
        .to_request();
    let body = ok_json(test::call_service(&app, req).await).await;

    let id = body["id"].as_str().expect("id");
    assert!(uuid::Uuid::parse_str(id).is_ok());
    Ok(())
}
