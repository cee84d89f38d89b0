use std::sync::Arc;

use export_pipeline::ArtifactStore;
use sea_orm::DatabaseConnection;

use crate::db::room_locks::RoomLocks;
use crate::services::export::ExportProducer;
use crate::ws::BroadcastHub;

/// Shared, process-wide resources handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Database connection (optional for test scenarios)
    db: Option<DatabaseConnection>,
    hub: Arc<BroadcastHub>,
    room_locks: Arc<RoomLocks>,
    exports: ExportProducer,
    artifacts: ArtifactStore,
    admin_token: Option<String>,
    callback_token: Option<String>,
}

impl AppState {
    pub fn new(
        db: Option<DatabaseConnection>,
        exports: ExportProducer,
        artifacts: ArtifactStore,
    ) -> Self {
        Self {
            db,
            hub: Arc::new(BroadcastHub::new()),
            room_locks: Arc::new(RoomLocks::new()),
            exports,
            artifacts,
            admin_token: None,
            callback_token: None,
        }
    }

    pub fn with_tokens(mut self, admin: Option<String>, callback: Option<String>) -> Self {
        self.admin_token = admin;
        self.callback_token = callback;
        self
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }

    pub fn hub(&self) -> Arc<BroadcastHub> {
        Arc::clone(&self.hub)
    }

    pub fn room_locks(&self) -> &RoomLocks {
        &self.room_locks
    }

    pub fn exports(&self) -> &ExportProducer {
        &self.exports
    }

    pub fn artifacts(&self) -> &ArtifactStore {
        &self.artifacts
    }

    /// Token guarding `/api/admin/*`. `None` leaves the admin surface open.
    pub fn admin_token(&self) -> Option<&str> {
        self.admin_token.as_deref()
    }

    /// Token the export worker must present on its callback.
    pub fn callback_token(&self) -> Option<&str> {
        self.callback_token.as_deref()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("db", &self.db.is_some())
            .field("rooms_with_subscribers", &self.hub.room_count())
            .field("exports", &self.exports)
            .field("artifacts", &self.artifacts.root())
            .finish_non_exhaustive()
    }
}
