#![allow(dead_code)]

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::{
    assert_problem_details_from_service_response, ProblemDetailsLike,
};
use serde_json::Value;

// Logging is auto-installed for every test binary that includes `common`.
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Assert an RFC 7807 error response with the given status and code.
pub async fn assert_problem<B: MessageBody>(
    resp: ServiceResponse<B>,
    status: u16,
    code: &str,
) -> ProblemDetailsLike {
    let status = StatusCode::from_u16(status).expect("valid status");
    assert_problem_details_from_service_response(resp, code, status, None).await
}

/// Assert a 200 and parse the JSON body.
pub async fn ok_json<B: MessageBody>(resp: ServiceResponse<B>) -> Value {
    let status = resp.status();
    let body = test::read_body(resp).await;
    assert_eq!(
        status,
        StatusCode::OK,
        "unexpected status, body: {}",
        String::from_utf8_lossy(&body)
    );
    serde_json::from_slice(&body).expect("JSON body")
}
