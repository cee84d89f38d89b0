//! Matchmaking and move routes.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::{Color, RoomStatus, RoomView};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{CurrentPlayer, ValidatedJson};
use crate::services::game_flow::GameFlow;
use crate::state::app_state::AppState;

const NAME_MIN_CHARS: usize = 2;
const NAME_MAX_CHARS: usize = 20;

#[derive(Debug, Deserialize)]
pub struct StartRequest {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartResponse {
    pub room_id: String,
    pub color: Color,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turn: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RoomStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub room_id: String,
    pub column: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MoveResponse {
    pub success: bool,
    pub room: RoomView,
}

/// Trimmed display name, or `INVALID_NAME`.
fn validate_name(raw: &str) -> Result<String, AppError> {
    let name = raw.trim();
    let chars = name.chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&chars) {
        return Err(AppError::invalid(
            ErrorCode::InvalidName,
            format!("Name must be {NAME_MIN_CHARS} to {NAME_MAX_CHARS} characters"),
        ));
    }
    Ok(name.to_string())
}

/// POST /api/game/start
async fn start(
    player: CurrentPlayer,
    body: ValidatedJson<StartRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let name = validate_name(&body.name)?;
    let outcome = GameFlow::new(&app_state)
        .start_or_join(player.id(), &name)
        .await?;

    Ok(HttpResponse::Ok().json(StartResponse {
        room_id: outcome.room_id,
        color: outcome.color,
        turn: outcome.turn,
        status: outcome.status,
    }))
}

/// POST /api/game/move
///
/// The room id is deliberately not shape-checked here: a player asking to
/// move in a room they are not in gets `NOT_IN_ROOM` whatever the id looks like.
async fn make_move(
    player: CurrentPlayer,
    body: ValidatedJson<MoveRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let MoveRequest { room_id, column } = body.into_inner();
    let outcome = GameFlow::new(&app_state)
        .apply_move(player.id(), room_id.trim(), column)
        .await?;

    Ok(HttpResponse::Ok().json(MoveResponse {
        success: true,
        room: outcome.view,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/start", web::post().to(start))
        .route("/move", web::post().to(make_move));
}
