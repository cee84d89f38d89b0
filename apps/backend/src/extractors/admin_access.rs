use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::error::AppError;
use crate::logging::security;
use crate::state::app_state::AppState;

pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";
pub const EXPORT_TOKEN_HEADER: &str = "x-export-token";

/// Byte comparison whose running time does not depend on where the inputs
/// first differ.
fn tokens_match(expected: &str, presented: &str) -> bool {
    let (a, b) = (expected.as_bytes(), presented.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Shared check: when `expected` is configured, `header` must carry it.
fn check_token(
    req: &HttpRequest,
    expected: Option<&str>,
    header: &str,
    surface: &'static str,
) -> Result<(), AppError> {
    let Some(expected) = expected else {
        return Ok(());
    };
    let presented = req
        .headers()
        .get(header)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if tokens_match(expected, presented) {
        Ok(())
    } else {
        security::token_rejected(surface, req.path());
        Err(AppError::forbidden(format!("Missing or invalid {header}")))
    }
}

fn app_state(req: &HttpRequest) -> Result<&web::Data<AppState>, AppError> {
    req.app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::internal_msg("AppState not available"))
}

/// Guard for administrative routes (`x-admin-token`).
#[derive(Debug, Clone, Copy)]
pub struct AdminAccess;

impl FromRequest for AdminAccess {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(app_state(req).and_then(|state| {
            check_token(req, state.admin_token(), ADMIN_TOKEN_HEADER, "admin")?;
            Ok(AdminAccess)
        }))
    }
}

/// Guard for the export worker's completion callback (`x-export-token`).
#[derive(Debug, Clone, Copy)]
pub struct CallbackAccess;

impl FromRequest for CallbackAccess {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(app_state(req).and_then(|state| {
            check_token(req, state.callback_token(), EXPORT_TOKEN_HEADER, "export-callback")?;
            Ok(CallbackAccess)
        }))
    }
}
