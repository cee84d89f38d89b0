use std::path::PathBuf;
use std::sync::Arc;

use export_pipeline::{ArtifactStore, WorkQueue};

use crate::config::db::DbKind;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::services::export::ExportProducer;
use crate::state::app_state::AppState;

const DEFAULT_ARTIFACT_DIR: &str = "artifacts";

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    db_kind: Option<DbKind>,
    export_queue: Option<Arc<dyn WorkQueue>>,
    artifact_dir: PathBuf,
    admin_token: Option<String>,
    callback_token: Option<String>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            db_kind: None,
            export_queue: None,
            artifact_dir: PathBuf::from(DEFAULT_ARTIFACT_DIR),
            admin_token: None,
            callback_token: None,
        }
    }

    pub fn with_db(mut self, kind: DbKind) -> Self {
        self.db_kind = Some(kind);
        self
    }

    pub fn with_export_queue(mut self, queue: Arc<dyn WorkQueue>) -> Self {
        self.export_queue = Some(queue);
        self
    }

    pub fn with_artifact_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifact_dir = dir.into();
        self
    }

    pub fn with_admin_token(mut self, token: Option<String>) -> Self {
        self.admin_token = token;
        self
    }

    pub fn with_callback_token(mut self, token: Option<String>) -> Self {
        self.callback_token = token;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        // single entrypoint: connect + migrate
        let db = match self.db_kind {
            Some(kind) => Some(bootstrap_db(&kind).await?),
            None => None,
        };
        let exports = match self.export_queue {
            Some(queue) => ExportProducer::new(queue),
            None => ExportProducer::disabled(),
        };

        Ok(
            AppState::new(db, exports, ArtifactStore::new(self.artifact_dir))
                .with_tokens(self.admin_token, self.callback_token),
        )
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
