use actix_web::{web, HttpResponse};

use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::RoomId;
use crate::services::game_flow::GameFlow;
use crate::services::rooms;
use crate::state::app_state::AppState;

/// GET /api/rooms/{room_id}
async fn get_room(
    room_id: RoomId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let view = GameFlow::new(&app_state).read_room(room_id.as_str()).await?;
    Ok(HttpResponse::Ok().json(view))
}

/// GET /api/rooms/{room_id}/debug
async fn debug_room(
    room_id: RoomId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let dump = rooms::debug_dump(db, room_id.as_str()).await?;
    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(dump))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{room_id}", web::get().to(get_room))
        .route("/{room_id}/debug", web::get().to(debug_room));
}
