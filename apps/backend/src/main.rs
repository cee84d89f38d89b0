use std::io;
use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use backend::config::server::ServerConfig;
use backend::infra::state::build_state;
use backend::middleware::{
    cors_middleware, PlayerIdentity, RequestTrace, StructuredLogger, TraceSpan,
};
use backend::routes;
use export_pipeline::RedisQueue;
use tracing::{error, info, warn};

mod telemetry;

fn startup_error(err: impl std::fmt::Display) -> io::Error {
    io::Error::other(err.to_string())
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    telemetry::init_tracing();

    let config = ServerConfig::from_env().map_err(|e| {
        error!(error = %e, "Invalid server configuration");
        startup_error(e)
    })?;

    let mut builder = build_state()
        .with_db(config.db_kind.clone())
        .with_artifact_dir(config.export_dir.clone())
        .with_admin_token(config.admin_token.clone())
        .with_callback_token(config.callback_token.clone());

    match &config.redis_url {
        Some(url) => match RedisQueue::connect(url, &config.export_queue).await {
            Ok(queue) => builder = builder.with_export_queue(Arc::new(queue)),
            // Games keep running; ended rooms can be re-exported after a restart.
            Err(e) => error!(error = %e, "Export queue unreachable; exports disabled"),
        },
        None => warn!("REDIS_URL not set; exports disabled"),
    }
    if config.admin_token.is_none() {
        warn!("ADMIN_TOKEN not set; administrative routes are unauthenticated");
    }
    if config.callback_token.is_none() {
        warn!("EXPORT_CALLBACK_TOKEN not set; artifact callback is unauthenticated");
    }

    let app_state = builder.build().await.map_err(|e| {
        error!(error = %e, "Failed to build application state");
        startup_error(e)
    })?;

    info!(
        host = %config.host,
        port = config.port,
        db_kind = ?config.db_kind,
        exports = app_state.exports().is_enabled(),
        "Starting Connect Four backend"
    );

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(PlayerIdentity)
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
