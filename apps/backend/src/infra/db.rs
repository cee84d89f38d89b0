use std::future::Future;
use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{info, warn};

use crate::config::db::{db_url, pool_max, DbKind};
use crate::error::AppError;

const CONNECT_ATTEMPTS: u32 = 5;
const CONNECT_INTERVAL_MS: u64 = 1000;

fn engine(kind: &DbKind) -> &'static str {
    match kind {
        DbKind::Postgres => "postgresql",
        DbKind::SqliteFile | DbKind::SqliteMemory => "sqlite",
    }
}

/// Retry a connection attempt with fixed interval delays.
/// Returns the error of the last attempt once all retries are exhausted.
async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut attempt = 1;
    loop {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(attempts = attempt, interval_ms, "connection_retry=success");
                }
                return Ok(result);
            }
            Err(e) if attempt >= max_attempts => return Err(e),
            Err(e) => {
                warn!(attempt, max_attempts, interval_ms, error = %e, "connection_retry=failed");
                tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                attempt += 1;
            }
        }
    }
}

fn connect_options(kind: &DbKind, url: String) -> Result<ConnectOptions, AppError> {
    let mut opts = ConnectOptions::new(url);
    opts.sqlx_logging(false)
        .acquire_timeout(Duration::from_secs(10))
        .connect_timeout(Duration::from_secs(5));

    match kind {
        // Every pooled connection to `sqlite::memory:` is a separate database,
        // so the pool is pinned to a single connection that never expires.
        DbKind::SqliteMemory => {
            opts.max_connections(1).min_connections(1);
        }
        DbKind::SqliteFile => {
            opts.max_connections(pool_max()?.min(4)).min_connections(1);
        }
        DbKind::Postgres => {
            opts.max_connections(pool_max()?).min_connections(1);
        }
    }
    Ok(opts)
}

/// Open the pool for `kind` without touching the schema.
pub async fn connect_db(kind: &DbKind) -> Result<DatabaseConnection, AppError> {
    let url = db_url(kind)?;

    let connect = || {
        let opts = connect_options(kind, url.clone());
        async move {
            let opts = opts?;
            Database::connect(opts).await.map_err(|e| {
                AppError::config(format!("failed to connect to {}", engine(kind)), e)
            })
        }
    };

    let conn = match kind {
        DbKind::Postgres => retry_connection(connect, CONNECT_ATTEMPTS, CONNECT_INTERVAL_MS).await?,
        _ => connect().await?,
    };
    info!(engine = engine(kind), "database connected");
    Ok(conn)
}

/// Connect and bring the schema up to date.
pub async fn bootstrap_db(kind: &DbKind) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(kind).await?;
    migrate(&conn, MigrationCommand::Up)
        .await
        .map_err(|e| AppError::config("database migration failed", e))?;
    Ok(conn)
}
