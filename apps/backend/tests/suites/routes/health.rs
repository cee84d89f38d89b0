use actix_web::test;
use backend::AppError;

use crate::support::{build_test_env, create_test_app};

#[actix_web::test]
async fn test_health_endpoint() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let app = create_test_app(env.state.clone()).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    assert!(resp.headers().contains_key("x-request-id"));
    let body = test::read_body(resp).await;
    assert_eq!(body, "ok");
    Ok(())
}
