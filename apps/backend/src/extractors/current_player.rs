use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::middleware::PlayerId;

/// Opaque id of the calling player, as resolved by `PlayerIdentity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentPlayer(pub String);

impl CurrentPlayer {
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl FromRequest for CurrentPlayer {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let found = req
            .extensions()
            .get::<PlayerId>()
            .map(|p| CurrentPlayer(p.0.clone()));
        ready(found.ok_or_else(|| {
            AppError::bad_request(
                ErrorCode::MissingPlayerIdentity,
                "Request carries no player identity",
            )
        }))
    }
}
