//! Route definitions for the PrintHub HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState` and
//! passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Room for multipart boundaries and the small text fields.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.storage.max_file_bytes() as usize + MULTIPART_OVERHEAD;

    let api_routes = Router::new()
        .merge(health_routes())
        .merge(print_routes())
        .merge(queue_routes())
        .merge(status_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Liveness probe
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// File submission
fn print_routes() -> Router<AppState> {
    Router::new().route("/print", post(handlers::print::submit))
}

/// Deferred queue
fn queue_routes() -> Router<AppState> {
    Router::new()
        .route("/queue", get(handlers::queue::list_queue))
        .route("/queue/process", post(handlers::queue::process_queue))
}

fn status_routes() -> Router<AppState> {
    Router::new().route("/status", get(handlers::status::status))
}
