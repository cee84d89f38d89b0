use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::web;
use actix_web_actors::ws;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::{RoomStatus, RoomView};
use crate::services::rooms::read_room;
use crate::state::app_state::AppState;
use crate::ws::hub::{BroadcastHub, RoomEvent};
use crate::ws::protocol::ServerMsg;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

#[derive(Message)]
#[rtype(result = "()")]
pub struct Shutdown;

/// Most advanced room state already pushed to one client.
///
/// The session subscribes before its snapshot is read, so an event queued
/// during that read may be older than the snapshot; such events are dropped.
#[derive(Debug, Default)]
struct StateCursor(Option<(usize, RoomStatus)>);

impl StateCursor {
    /// Record `view` as sent, unless it is older than what the client has.
    fn advance(&mut self, view: &RoomView) -> bool {
        let next = view.progress();
        if self.0.is_some_and(|shown| next < shown) {
            return false;
        }
        self.0 = Some(next);
        true
    }
}

/// One WebSocket connection following one room.
pub struct RoomWsSession {
    conn_id: Uuid,
    room_id: String,
    app_state: web::Data<AppState>,
    hub: Arc<BroadcastHub>,
    subscription: Option<Uuid>,
    shown: StateCursor,

    last_heartbeat: Instant,
    heartbeat_handle: Option<SpawnHandle>,
}

impl RoomWsSession {
    pub fn new(room_id: String, app_state: web::Data<AppState>) -> Self {
        let hub = app_state.hub();
        Self {
            conn_id: Uuid::new_v4(),
            room_id,
            app_state,
            hub,
            subscription: None,
            shown: StateCursor::default(),
            last_heartbeat: Instant::now(),
            heartbeat_handle: None,
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
        }
    }

    fn start_heartbeat(&mut self, ctx: &mut ws::WebsocketContext<Self>) {
        let handle = ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(
                    conn_id = %actor.conn_id,
                    room_id = %actor.room_id,
                    "[WS SESSION] heartbeat timed out"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
        self.heartbeat_handle = Some(handle);
    }

    /// Push the current room state. Mailbox processing waits for it, so the
    /// snapshot always precedes relayed events.
    fn send_snapshot(&self, ctx: &mut ws::WebsocketContext<Self>) {
        let app_state = self.app_state.clone();
        let room_id = self.room_id.clone();

        ctx.wait(
            async move {
                let db = crate::db::require_db(&app_state)?;
                read_room(db, &room_id).await.map_err(crate::AppError::from)
            }
            .into_actor(self)
            .map(|res, actor, ctx| match res {
                Ok(view) => actor.push_state(ctx, view),
                Err(err) => {
                    tracing::error!(
                        ?err,
                        conn_id = %actor.conn_id,
                        room_id = %actor.room_id,
                        "[WS SESSION] snapshot load failed"
                    );
                    ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                    ctx.stop();
                }
            }),
        );
    }

    fn push_state(&mut self, ctx: &mut ws::WebsocketContext<Self>, view: RoomView) {
        if self.shown.advance(&view) {
            Self::send_json(ctx, &ServerMsg::RoomStateChanged(view));
        } else {
            debug!(
                conn_id = %self.conn_id,
                room_id = %self.room_id,
                "[WS SESSION] skipped state older than last sent"
            );
        }
    }

    fn unsubscribe(&mut self) {
        if let Some(token) = self.subscription.take() {
            self.hub.unsubscribe(&self.room_id, token);
        }
    }
}

impl Actor for RoomWsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(
            conn_id = %self.conn_id,
            room_id = %self.room_id,
            "[WS SESSION] started"
        );

        let recipient = ctx.address().recipient::<RoomEvent>();
        self.subscription = Some(self.hub.subscribe(&self.room_id, recipient));

        Self::send_json(ctx, &ServerMsg::connected());
        self.send_snapshot(ctx);
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.unsubscribe();
        info!(
            conn_id = %self.conn_id,
            room_id = %self.room_id,
            "[WS SESSION] stopped"
        );
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for RoomWsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_))
            | Ok(ws::Message::Text(_))
            | Ok(ws::Message::Binary(_))
            | Ok(ws::Message::Continuation(_))
            | Ok(ws::Message::Nop) => {
                // Clients only listen; any inbound frame counts as liveness.
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Err(err) => {
                warn!(
                    conn_id = %self.conn_id,
                    room_id = %self.room_id,
                    error = %err,
                    "[WS SESSION] protocol error"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}

impl Handler<RoomEvent> for RoomWsSession {
    type Result = ();

    fn handle(&mut self, msg: RoomEvent, ctx: &mut Self::Context) -> Self::Result {
        match msg {
            RoomEvent::StateChanged(view) => self.push_state(ctx, view),
            RoomEvent::ArtifactReady { room_id } => {
                Self::send_json(ctx, &ServerMsg::ArtifactReady { room_id })
            }
        }
    }
}

impl Handler<Shutdown> for RoomWsSession {
    type Result = ();

    fn handle(&mut self, _msg: Shutdown, ctx: &mut Self::Context) -> Self::Result {
        self.unsubscribe();

        if let Some(handle) = self.heartbeat_handle.take() {
            ctx.cancel_future(handle);
        }

        ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Away)));
        ctx.stop();
    }
}
