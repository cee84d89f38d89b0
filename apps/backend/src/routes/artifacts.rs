use actix_web::{web, HttpResponse};
use export_pipeline::artifacts::ARTIFACT_CONTENT_TYPE;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::extractors::{CallbackAccess, RoomId, ValidatedJson};
use crate::services::artifacts;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadyRequest {
    pub room_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReadyResponse {
    pub success: bool,
    pub delivered: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub exists: bool,
}

/// POST /api/artifacts/ready
///
/// Export worker callback. Fails with 404 when the file is not on disk, so
/// the worker rejects the item instead of acknowledging a phantom artifact.
async fn ready(
    _callback: CallbackAccess,
    body: ValidatedJson<ReadyRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let room_id = RoomId::parse(&body.room_id)?;
    let delivered = artifacts::confirm_ready(
        app_state.artifacts(),
        &app_state.hub(),
        room_id.as_str(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(ReadyResponse {
        success: true,
        delivered,
    }))
}

/// GET /api/artifacts/{room_id}/status
async fn status(
    room_id: RoomId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let exists = artifacts::artifact_exists(app_state.artifacts(), room_id.as_str()).await?;
    Ok(HttpResponse::Ok().json(StatusResponse { exists }))
}

/// GET /api/artifacts/{room_id}
async fn fetch(
    room_id: RoomId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let bytes = artifacts::fetch_artifact(app_state.artifacts(), room_id.as_str()).await?;
    Ok(HttpResponse::Ok()
        .content_type(ARTIFACT_CONTENT_TYPE)
        .body(bytes))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/ready", web::post().to(ready))
        .route("/{room_id}/status", web::get().to(status))
        .route("/{room_id}", web::get().to(fetch));
}
