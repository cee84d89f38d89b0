use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use export_pipeline::DEFAULT_QUEUE;

/// Export worker settings. Every flag falls back to an environment variable.
#[derive(Debug, Clone, Parser)]
#[command(name = "export-worker", about = "Captures finished Connect Four boards")]
pub struct WorkerArgs {
    #[arg(long, env = "REDIS_URL", default_value = "redis://127.0.0.1:6379")]
    pub redis_url: String,

    #[arg(long, env = "EXPORT_QUEUE", default_value = DEFAULT_QUEUE)]
    pub queue: String,

    /// Base URL of the serving process, used for room reads and the callback.
    #[arg(long, env = "EXPORT_API_BASE_URL", default_value = "http://localhost:3001")]
    pub api_base_url: String,

    #[arg(long, env = "EXPORT_DIR", default_value = "artifacts")]
    pub export_dir: PathBuf,

    #[arg(long, env = "EXPORT_CAPTURE_TIMEOUT_SECS", default_value_t = 30)]
    pub capture_timeout_secs: u64,

    #[arg(long, env = "EXPORT_POLL_INTERVAL_MS", default_value_t = 500)]
    pub poll_interval_ms: u64,

    #[arg(long, env = "EXPORT_CALLBACK_TOKEN")]
    pub callback_token: Option<String>,
}

impl WorkerArgs {
    pub fn capture_timeout(&self) -> Duration {
        Duration::from_secs(self.capture_timeout_secs.max(1))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(10))
    }

    /// Base URL without a trailing slash.
    pub fn api_base(&self) -> String {
        self.api_base_url.trim_end_matches('/').to_string()
    }
}
