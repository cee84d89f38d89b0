use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use export_pipeline::retry::reconnect_delay;
use export_pipeline::{ArtifactStore, RedisQueue, WorkQueue};
use export_worker::{ExportWorker, HttpNotifier, SvgBoardCapturer, WorkerArgs};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,export_worker=info,export_pipeline=info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_ansi(false).json())
        .init();
}

/// Keep trying until Redis answers or shutdown is requested.
async fn connect_queue(args: &WorkerArgs, cancel: &CancellationToken) -> Option<RedisQueue> {
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        match RedisQueue::connect(&args.redis_url, &args.queue).await {
            Ok(queue) => return Some(queue),
            Err(err) if !err.is_transient() => {
                error!(error = %err, "Export queue configuration is invalid");
                return None;
            }
            Err(err) => {
                let delay = reconnect_delay(attempt);
                warn!(error = %err, attempt, retry_delay_ms = delay.as_millis() as u64, "Redis unavailable, retrying");
                tokio::select! {
                    _ = cancel.cancelled() => return None,
                    _ = tokio::time::sleep(delay) => {}
                }
            }
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let args = WorkerArgs::parse();

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutdown requested");
            }
            cancel.cancel();
        }
    });

    let Some(queue) = connect_queue(&args, &cancel).await else {
        return if cancel.is_cancelled() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        };
    };
    let queue: Arc<dyn WorkQueue> = Arc::new(queue);

    match queue.recover_in_flight().await {
        Ok(0) => {}
        Ok(n) => info!(recovered = n, "Recovered unacknowledged items"),
        Err(err) => warn!(error = %err, "Could not recover in-flight items"),
    }

    let client = match reqwest::Client::builder()
        .timeout(args.capture_timeout())
        .build()
    {
        Ok(client) => client,
        Err(err) => {
            error!(error = %err, "Failed to build HTTP client");
            return ExitCode::FAILURE;
        }
    };

    let api_base = args.api_base();
    let worker = ExportWorker::new(
        queue,
        Arc::new(SvgBoardCapturer::new(
            client.clone(),
            api_base.clone(),
            ArtifactStore::new(args.export_dir.clone()),
        )),
        Arc::new(HttpNotifier::new(client, &api_base, args.callback_token.clone())),
        args.capture_timeout(),
    );

    info!(
        queue = %args.queue,
        api = %api_base,
        export_dir = %args.export_dir.display(),
        "Export worker ready"
    );
    worker.run(cancel, args.poll_interval()).await;
    ExitCode::SUCCESS
}
