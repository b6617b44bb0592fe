//! Application wiring: collaborators, state, replay loop, and the HTTP server.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use printhub_core::config::AppConfig;
use printhub_core::error::{AppError, ErrorKind};
use printhub_core::result::AppResult;
use printhub_core::traits::{Clock, Converter, Printer, SystemClock};
use printhub_cups::{LibreOfficeConverter, LprPrinter};
use printhub_worker::{Dispatcher, JobStore, PrintExecutor, QuietHoursPolicy, QueueRunner};

use crate::router::build_router;
use crate::state::AppState;

/// Build the shared state with the real CUPS printer and system clock.
pub async fn build_state(config: &AppConfig) -> AppResult<AppState> {
    let printer: Arc<dyn Printer> = Arc::new(LprPrinter::from_config(&config.printer));

    let converter: Option<Arc<dyn Converter>> = if config.conversion.enabled {
        let converter = LibreOfficeConverter::from_config(&config.conversion);
        match converter.locate().await {
            Some(program) => tracing::info!("Office conversion enabled via '{}'", program),
            None => tracing::warn!(
                "Office conversion enabled but none of {:?} is installed",
                config.conversion.commands
            ),
        }
        let converter: Arc<dyn Converter> = Arc::new(converter);
        Some(converter)
    } else {
        tracing::info!("Office conversion disabled");
        None
    };

    build_state_with(config, printer, converter, Arc::new(SystemClock)).await
}

/// Build the shared state around the given collaborators.
pub async fn build_state_with(
    config: &AppConfig,
    printer: Arc<dyn Printer>,
    converter: Option<Arc<dyn Converter>>,
    clock: Arc<dyn Clock>,
) -> AppResult<AppState> {
    tokio::fs::create_dir_all(&config.storage.save_dir)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!(
                    "Failed to create save directory '{}'",
                    config.storage.save_dir.display()
                ),
                e,
            )
        })?;

    let store = Arc::new(JobStore::open(config.queue_file()).await?);
    let policy = QuietHoursPolicy::new(
        config.quiet_hours.window()?,
        &config.quiet_hours.timezone,
        clock,
    );
    let executor = Arc::new(PrintExecutor::new(printer, converter));
    let dispatcher = Arc::new(Dispatcher::new(policy, store, executor));

    Ok(AppState::new(Arc::new(config.clone()), dispatcher))
}

/// Start the replay loop if it is enabled.
fn spawn_runner(
    config: &AppConfig,
    state: &AppState,
    cancel: watch::Receiver<bool>,
) -> Option<JoinHandle<()>> {
    if !config.queue.enabled {
        tracing::info!("Queue replay loop disabled");
        return None;
    }

    let runner = QueueRunner::new(
        Arc::clone(&state.dispatcher),
        Duration::from_secs(config.queue.poll_interval_seconds),
    );
    tracing::info!(
        "Queue replay loop started (every {}s)",
        config.queue.poll_interval_seconds
    );
    Some(tokio::spawn(async move {
        runner.run(cancel).await;
    }))
}

/// Run the PrintHub server until a shutdown signal arrives.
pub async fn run_server(config: AppConfig) -> AppResult<()> {
    tracing::info!("Starting PrintHub v{}", env!("CARGO_PKG_VERSION"));

    if !config.access.is_configured() {
        tracing::warn!("access.allowed_user_ids is empty; every request will be refused");
    }

    let state = build_state(&config).await?;
    let pending = state.store().len().await;
    if pending > 0 {
        tracing::info!("{} job(s) waiting in the queue from a previous run", pending);
    }

    tracing::info!(
        "Quiet hours {}-{} ({}), printer '{}'",
        config.quiet_hours.start,
        config.quiet_hours.end,
        state.policy().zone_name(),
        config.printer.name
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let runner_handle = spawn_runner(&config, &state, shutdown_rx);

    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("PrintHub listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, stopping...");
            let _ = shutdown_tx.send(true);
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    if let Some(handle) = runner_handle {
        let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
        if tokio::time::timeout(grace, handle).await.is_err() {
            tracing::warn!("Queue replay loop did not stop within {}s", grace.as_secs());
        }
    }

    tracing::info!("PrintHub shut down gracefully");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
