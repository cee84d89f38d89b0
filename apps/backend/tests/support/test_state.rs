//! Hermetic per-test application state.
//!
//! SQLite in-memory by default, so every test gets its own empty database.
//! `TEST_DB_KIND=postgres` (with `DATABASE_URL`) runs against Postgres
//! instead; tests then share that database, and each one starts from
//! `reset_all`, so run them with `--test-threads=1`.

use std::env;
use std::str::FromStr;
use std::sync::Arc;

use backend::config::db::DbKind;
use backend::infra::state::{build_state, StateBuilder};
use backend::services::game_flow::GameFlow;
use backend::state::app_state::AppState;
use backend::AppError;
use export_pipeline::InMemoryQueue;
use tempfile::TempDir;

pub const ADMIN_TOKEN: &str = "test-admin-token";
pub const CALLBACK_TOKEN: &str = "test-callback-token";

pub fn resolve_test_db_kind() -> Result<DbKind, AppError> {
    match env::var("TEST_DB_KIND") {
        Ok(raw) if !raw.trim().is_empty() => DbKind::from_str(raw.trim()),
        _ => Ok(DbKind::SqliteMemory),
    }
}

pub struct TestEnv {
    pub state: AppState,
    pub queue: Arc<InMemoryQueue>,
    /// Owns the artifact directory for the lifetime of the test.
    pub artifacts: TempDir,
}

impl TestEnv {
    pub fn flow(&self) -> GameFlow<'_> {
        GameFlow::new(&self.state)
    }
}

fn test_state_builder(queue: Arc<InMemoryQueue>, dir: &TempDir) -> Result<StateBuilder, AppError> {
    Ok(build_state()
        .with_db(resolve_test_db_kind()?)
        .with_export_queue(queue)
        .with_artifact_dir(dir.path())
        .with_admin_token(Some(ADMIN_TOKEN.to_string()))
        .with_callback_token(Some(CALLBACK_TOKEN.to_string())))
}

pub async fn build_test_env() -> Result<TestEnv, AppError> {
    let queue = Arc::new(InMemoryQueue::new());
    let artifacts = tempfile::tempdir()
        .map_err(|e| AppError::config("failed to create artifact dir", e))?;

    let state = test_state_builder(queue.clone(), &artifacts)?.build().await?;
    if !matches!(resolve_test_db_kind()?, DbKind::SqliteMemory) {
        GameFlow::new(&state).reset_all().await?;
    }

    Ok(TestEnv {
        state,
        queue,
        artifacts,
    })
}
