//! Operator routes. Guarded by `x-admin-token` when `ADMIN_TOKEN` is set.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AppError;
use crate::extractors::{AdminAccess, RoomId};
use crate::services::game_flow::GameFlow;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct ResetResponse {
    pub success: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QueuedResponse {
    pub queued: bool,
}

/// POST /api/admin/reset
async fn reset(
    _admin: AdminAccess,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let summary = GameFlow::new(&app_state).reset_all().await?;
    info!(?summary, "Admin reset completed");
    Ok(HttpResponse::Ok().json(ResetResponse { success: true }))
}

/// POST /api/admin/rooms/{room_id}/export
async fn retrigger_export(
    _admin: AdminAccess,
    room_id: RoomId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    GameFlow::new(&app_state)
        .retrigger_export(room_id.as_str())
        .await?;
    info!(room_id = room_id.as_str(), "Export re-triggered by operator");
    Ok(HttpResponse::Accepted().json(QueuedResponse { queued: true }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/reset", web::post().to(reset))
        .route("/rooms/{room_id}/export", web::post().to(retrigger_export));
}
