use std::env;
use std::str::FromStr;

use crate::error::AppError;

/// Which database backend the serving process talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbKind {
    /// PostgreSQL at `DATABASE_URL`
    Postgres,
    /// SQLite file at `SQLITE_DB_PATH`
    SqliteFile,
    /// Private in-memory SQLite (tests, throwaway local runs)
    SqliteMemory,
}

impl FromStr for DbKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(DbKind::Postgres),
            "sqlite-file" | "sqlite" => Ok(DbKind::SqliteFile),
            "sqlite-memory" | "memory" => Ok(DbKind::SqliteMemory),
            other => Err(AppError::config_msg(format!(
                "Unknown DB_KIND '{other}' (expected postgres, sqlite-file or sqlite-memory)"
            ))),
        }
    }
}

impl DbKind {
    /// Reads `DB_KIND`, defaulting to Postgres.
    pub fn from_env() -> Result<Self, AppError> {
        match env::var("DB_KIND") {
            Ok(raw) => raw.parse(),
            Err(_) => Ok(DbKind::Postgres),
        }
    }

    pub fn is_sqlite(&self) -> bool {
        !matches!(self, DbKind::Postgres)
    }
}

/// Builds the connection URL for `kind` from the environment.
pub fn db_url(kind: &DbKind) -> Result<String, AppError> {
    match kind {
        DbKind::Postgres => must_var("DATABASE_URL"),
        DbKind::SqliteFile => {
            let path =
                env::var("SQLITE_DB_PATH").unwrap_or_else(|_| "connect_four.sqlite".to_string());
            Ok(format!("sqlite://{path}?mode=rwc"))
        }
        DbKind::SqliteMemory => Ok("sqlite::memory:".to_string()),
    }
}

/// Maximum pool size from `DB_POOL_MAX` (default 10).
pub fn pool_max() -> Result<u32, AppError> {
    match env::var("DB_POOL_MAX") {
        Ok(raw) => raw
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| AppError::config_msg(format!("DB_POOL_MAX must be a positive integer, got '{raw}'"))),
        Err(_) => Ok(10),
    }
}

fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|e| {
        AppError::config(
            format!("Required environment variable '{name}' is not set"),
            e,
        )
    })
}
