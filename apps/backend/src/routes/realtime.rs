use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;

use crate::extractors::RoomId;
use crate::services::game_flow::GameFlow;
use crate::state::app_state::AppState;
use crate::ws::session::RoomWsSession;

/// GET /ws/rooms/{room_id}
///
/// Unknown rooms fail with `ROOM_NOT_FOUND` before the upgrade.
async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    room_id: RoomId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    GameFlow::new(&app_state).read_room(room_id.as_str()).await?;

    let session = RoomWsSession::new(room_id.0, app_state.clone());
    ws::start(session, &req, stream)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{room_id}", web::get().to(upgrade));
}
