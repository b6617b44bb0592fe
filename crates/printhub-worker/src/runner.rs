//! Queue runner: periodically replays the queue once quiet hours end.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing;

use printhub_entity::job::DrainSummary;

use crate::dispatcher::{Dispatcher, ProcessOutcome};

/// Background loop that drains the queue outside quiet hours.
#[derive(Debug)]
pub struct QueueRunner {
    /// Shared with the request handlers.
    dispatcher: Arc<Dispatcher>,
    /// Time between checks.
    interval: Duration,
}

impl QueueRunner {
    /// Create a runner that checks every `interval`.
    pub fn new(dispatcher: Arc<Dispatcher>, interval: Duration) -> Self {
        Self {
            dispatcher,
            interval,
        }
    }

    /// Run until `cancel` turns `true` or its sender is dropped.
    ///
    /// Cancellation is observed between ticks only: a drain that has
    /// started always runs to completion.
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) {
        tracing::info!(
            "Queue runner started with poll_interval={}s",
            self.interval.as_secs()
        );

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        while !*cancel.borrow() {
            tokio::select! {
                changed = cancel.changed() => {
                    if changed.is_err() {
                        tracing::debug!("Shutdown channel closed");
                        break;
                    }
                }
                _ = ticker.tick() => {
                    self.tick_guarded().await;
                }
            }
        }

        tracing::info!("Queue runner shut down");
    }

    /// Run one tick on its own task so a panic inside a collaborator is
    /// logged instead of killing the loop.
    async fn tick_guarded(&self) {
        let dispatcher = Arc::clone(&self.dispatcher);
        let handle = tokio::spawn(async move { Self::tick_with(&dispatcher).await });
        if let Err(e) = handle.await {
            tracing::error!("Queue tick aborted: {}", e);
        }
    }

    /// Check quiet hours and drain the queue if they are over.
    ///
    /// Returns `None` while quiet, otherwise the summary of the pass.
    pub async fn tick(&self) -> Option<DrainSummary> {
        Self::tick_with(&self.dispatcher).await
    }

    async fn tick_with(dispatcher: &Dispatcher) -> Option<DrainSummary> {
        let report = match dispatcher.process_queue_now().await {
            ProcessOutcome::QuietHoursActive => {
                tracing::trace!("Quiet hours active, skipping queue");
                return None;
            }
            ProcessOutcome::Processed(report) => report,
        };

        let summary = report.summary();
        if summary.total() > 0 {
            tracing::info!(
                succeeded = summary.succeeded,
                failed = summary.failed,
                "Processed queued print jobs"
            );
        }
        if let Some(e) = &report.persist_error {
            tracing::warn!("Queue drained but could not be saved: {}", e);
        }

        Some(summary)
    }
}
