//! Orchestration around the transactional services: locking, commit, then
//! notification. Nothing here runs while a transaction is open except the
//! transaction itself.

use tracing::{debug, warn};

use crate::db::require_db;
use crate::db::txn::with_txn;
use crate::domain::RoomStatus;
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::errors::ErrorCode;
use crate::services::matchmaking::{self, StartOutcome};
use crate::services::moves::{self, MoveOutcome};
use crate::services::rooms::{self, ResetSummary};
use crate::state::app_state::AppState;
use crate::ws::RoomEvent;

pub struct GameFlow<'a> {
    state: &'a AppState,
}

impl<'a> GameFlow<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Place the player in a room, pairing when someone is waiting.
    pub async fn start_or_join(&self, player_id: &str, name: &str) -> Result<StartOutcome, AppError> {
        let db = require_db(self.state)?;

        let outcome = {
            let _lobby = self.state.room_locks().lock_lobby().await;
            let (player_id, name) = (player_id.to_string(), name.to_string());
            with_txn(db, move |txn| {
                Box::pin(async move { matchmaking::start_or_join(txn, &player_id, &name).await })
            })
            .await?
        };

        if outcome.paired {
            self.publish_current(&outcome.room_id).await;
        }
        Ok(outcome)
    }

    /// Apply a move under the room's lock, then broadcast and, when the game
    /// just ended, hand the room to the export pipeline.
    pub async fn apply_move(
        &self,
        player_id: &str,
        room_id: &str,
        column: i32,
    ) -> Result<MoveOutcome, AppError> {
        let db = require_db(self.state)?;

        let outcome = {
            let _room = self.state.room_locks().lock(room_id).await;
            let (pid, rid) = (player_id.to_string(), room_id.to_string());
            let outcome = with_txn(db, move |txn| {
                Box::pin(async move { moves::apply_move(txn, &pid, &rid, column).await })
            })
            .await?;

            // Still under the lock so subscribers see states in commit order.
            let delivered = self
                .state
                .hub()
                .publish(room_id, RoomEvent::StateChanged(outcome.view.clone()));
            debug!(room_id, delivered, "room-state-changed published");
            outcome
        };

        if outcome.ended() {
            self.state.exports().room_ended(room_id).await;
        }
        Ok(outcome)
    }

    pub async fn read_room(&self, room_id: &str) -> Result<crate::domain::RoomView, AppError> {
        let db = require_db(self.state)?;
        Ok(rooms::read_room(db, room_id).await?)
    }

    pub async fn reset_all(&self) -> Result<ResetSummary, AppError> {
        let db = require_db(self.state)?;
        let _lobby = self.state.room_locks().lock_lobby().await;
        Ok(with_txn(db, |txn| Box::pin(async move { rooms::reset_all(txn).await })).await?)
    }

    /// Operator re-trigger for a finished room whose artifact never arrived.
    pub async fn retrigger_export(&self, room_id: &str) -> Result<(), AppError> {
        let view = self.read_room(room_id).await?;
        if view.status != RoomStatus::Ended {
            return Err(DomainError::conflict(
                ConflictKind::GameNotEnded,
                format!("Room {room_id} has not ended"),
            )
            .into());
        }

        self.state.exports().enqueue(room_id).await.map_err(|err| {
            warn!(room_id, error = %err, "Manual export enqueue failed");
            AppError::unavailable(ErrorCode::ExportUnavailable, format!("Export queue unavailable: {err}"))
        })
    }

    /// Best-effort snapshot push after a commit that changed room state.
    ///
    /// Read and publish happen under the room lock, so a move committing in
    /// between cannot be overtaken by this older view.
    async fn publish_current(&self, room_id: &str) {
        let Some(db) = self.state.db() else {
            return;
        };
        let _room = self.state.room_locks().lock(room_id).await;
        match rooms::read_room(db, room_id).await {
            Ok(view) => {
                let delivered = self
                    .state
                    .hub()
                    .publish(room_id, RoomEvent::StateChanged(view));
                debug!(room_id, delivered, "room-state-changed published");
            }
            Err(err) => warn!(room_id, error = %err, "Could not load room for broadcast"),
        }
    }
}
