//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use printhub_core::config::AppConfig;
use printhub_worker::{Dispatcher, JobStore, PrintExecutor, QuietHoursPolicy};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Routes uploads to the printer or the queue
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    /// Bundle the configuration and dispatcher.
    pub fn new(config: Arc<AppConfig>, dispatcher: Arc<Dispatcher>) -> Self {
        Self { config, dispatcher }
    }

    /// The persistent job queue.
    pub fn store(&self) -> &JobStore {
        self.dispatcher.store()
    }

    /// The quiet-hours policy.
    pub fn policy(&self) -> &QuietHoursPolicy {
        self.dispatcher.policy()
    }

    /// The print executor.
    pub fn executor(&self) -> &PrintExecutor {
        self.dispatcher.executor()
    }
}
