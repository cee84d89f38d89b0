use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::db::require_db;
use crate::domain::Color;
use crate::error::AppError;
use crate::extractors::CurrentPlayer;
use crate::repos::players;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub id: String,
    /// False until the identity has started a game once.
    pub exists: bool,
    pub name: Option<String>,
    pub color: Option<Color>,
    pub room_id: Option<String>,
}

/// GET /api/players/me
async fn me(
    player: CurrentPlayer,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let found = players::find_by_id(db, player.id()).await?;

    let body = match found {
        Some(p) => MeResponse {
            id: p.id,
            exists: true,
            name: p.name,
            color: p.color,
            room_id: p.room_id,
        },
        None => MeResponse {
            id: player.0,
            exists: false,
            name: None,
            color: None,
            room_id: None,
        },
    };
    Ok(HttpResponse::Ok().json(body))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/me", web::get().to(me));
}
