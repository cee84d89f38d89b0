use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use migration::sea_orm::{ConnectOptions, Database, DbErr};
use migration::MigrationCommand;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Command {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

impl From<Command> for MigrationCommand {
    fn from(c: Command) -> Self {
        match c {
            Command::Up => MigrationCommand::Up,
            Command::Down => MigrationCommand::Down,
            Command::Fresh => MigrationCommand::Fresh,
            Command::Reset => MigrationCommand::Reset,
            Command::Refresh => MigrationCommand::Refresh,
            Command::Status => MigrationCommand::Status,
        }
    }
}

/// In-memory SQLite is deliberately absent: the database would vanish when
/// the command exits.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Db {
    Postgres,
    SqliteFile,
}

#[derive(Debug, Parser)]
#[command(name = "migration", about = "Connect Four database migration tool")]
struct Args {
    #[arg(value_enum)]
    command: Command,

    #[arg(short, long, value_enum, env = "DB_KIND", default_value = "postgres")]
    db: Db,

    /// Required for postgres.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[arg(long, env = "SQLITE_DB_PATH", default_value = "connect_four.sqlite")]
    sqlite_path: String,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("DATABASE_URL must be set for postgres")]
    MissingDatabaseUrl,
    #[error("database error: {0}")]
    Db(#[from] DbErr),
}

impl Args {
    fn url(&self) -> Result<String, CliError> {
        match self.db {
            Db::Postgres => self
                .database_url
                .clone()
                .filter(|u| !u.trim().is_empty())
                .ok_or(CliError::MissingDatabaseUrl),
            Db::SqliteFile => Ok(format!("sqlite://{}?mode=rwc", self.sqlite_path)),
        }
    }
}

async fn run(args: Args) -> Result<(), CliError> {
    let mut opts = ConnectOptions::new(args.url()?);
    opts.max_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await?;

    info!(db = ?args.db, command = ?args.command, "Running migration");
    migration::migrate(&db, args.command.into()).await?;

    if let Some(latest) = migration::get_latest_migration_version(&db).await? {
        info!(latest = %latest, "Schema version");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("migration=info,sqlx=warn")
        .init();

    // clap prints usage and exits with 2 on bad input
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Migration failed");
            ExitCode::FAILURE
        }
    }
}
