use std::env;
use std::path::PathBuf;

use export_pipeline::DEFAULT_QUEUE;

use crate::config::db::DbKind;
use crate::error::AppError;

/// Serving-process settings read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub db_kind: DbKind,
    /// Export producer is disabled when unset
    pub redis_url: Option<String>,
    pub export_queue: String,
    pub export_dir: PathBuf,
    pub admin_token: Option<String>,
    pub callback_token: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match env::var("BACKEND_PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|e| {
                AppError::config(format!("BACKEND_PORT must be a valid port number, got '{raw}'"), e)
            })?,
            Err(_) => 3001,
        };

        Ok(Self {
            host,
            port,
            db_kind: DbKind::from_env()?,
            redis_url: optional_var("REDIS_URL"),
            export_queue: optional_var("EXPORT_QUEUE").unwrap_or_else(|| DEFAULT_QUEUE.to_string()),
            export_dir: PathBuf::from(
                optional_var("EXPORT_DIR").unwrap_or_else(|| "artifacts".to_string()),
            ),
            admin_token: optional_var("ADMIN_TOKEN"),
            callback_token: optional_var("EXPORT_CALLBACK_TOKEN"),
        })
    }
}

/// Unset and blank values are both treated as absent.
fn optional_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
