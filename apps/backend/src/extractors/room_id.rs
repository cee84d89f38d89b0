use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use uuid::Uuid;

use crate::error::AppError;
use crate::errors::ErrorCode;

/// `{room_id}` path segment, validated as a UUID and normalized to its
/// lowercase hyphenated form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomId(pub String);

impl RoomId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn parse(raw: &str) -> Result<Self, AppError> {
        Uuid::parse_str(raw.trim())
            .map(|id| RoomId(id.to_string()))
            .map_err(|_| {
                AppError::bad_request(ErrorCode::InvalidRoomId, format!("Invalid room id: {raw}"))
            })
    }
}

impl FromRequest for RoomId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let parsed = match req.match_info().get("room_id") {
            Some(raw) => RoomId::parse(raw),
            None => Err(AppError::bad_request(
                ErrorCode::InvalidRoomId,
                "Missing room_id parameter",
            )),
        };
        ready(parsed)
    }
}
