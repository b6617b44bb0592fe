//! Dispatcher: decides between printing now and deferring to the queue.

use std::sync::Arc;

use chrono::NaiveTime;
use serde::Serialize;
use tracing;

use printhub_core::result::AppResult;
use printhub_core::types::{JobId, PrintOptions};
use printhub_entity::job::{OriginContext, PrintJob};

use crate::executor::{IncomingFile, PrintExecutor};
use crate::policy::QuietHoursPolicy;
use crate::store::{DrainReport, JobStore};

/// What happened to an incoming file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DispatchOutcome {
    /// Sent to the printer immediately.
    Printed,
    /// Conversion or printing failed; nothing was queued.
    Failed {
        /// Human-readable reason.
        reason: String,
    },
    /// Deferred until quiet hours end.
    Queued {
        /// Identity of the stored job.
        job_id: JobId,
        /// Local time of day at which the queue is released.
        release_at: NaiveTime,
        /// Queue length after the job was added.
        position: usize,
    },
}

/// Result of a manual queue drain request.
#[derive(Debug)]
pub enum ProcessOutcome {
    /// Quiet hours are active; the queue was not touched.
    QuietHoursActive,
    /// The queue was drained.
    Processed(DrainReport),
}

/// Routes incoming files and drains the queue.
#[derive(Debug)]
pub struct Dispatcher {
    policy: QuietHoursPolicy,
    store: Arc<JobStore>,
    executor: Arc<PrintExecutor>,
}

impl Dispatcher {
    /// Wire the dispatcher to its collaborators.
    pub fn new(policy: QuietHoursPolicy, store: Arc<JobStore>, executor: Arc<PrintExecutor>) -> Self {
        Self {
            policy,
            store,
            executor,
        }
    }

    /// Quiet-hours policy in use.
    pub fn policy(&self) -> &QuietHoursPolicy {
        &self.policy
    }

    /// The backing job store.
    pub fn store(&self) -> &Arc<JobStore> {
        &self.store
    }

    /// The print executor.
    pub fn executor(&self) -> &Arc<PrintExecutor> {
        &self.executor
    }

    /// Print `file` now, or queue it when quiet hours are active.
    ///
    /// Conversion happens first in both cases, so queued jobs always
    /// reference a printable file. Collaborator failures are returned as
    /// [`DispatchOutcome::Failed`]; only a failure to persist the queue is
    /// an `Err`.
    pub async fn handle_incoming_file(
        &self,
        file: IncomingFile,
        options: PrintOptions,
        origin: OriginContext,
    ) -> AppResult<DispatchOutcome> {
        let printable = match self.executor.prepare(&file).await {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!("Rejected '{}': {}", file.path.display(), e);
                return Ok(DispatchOutcome::Failed {
                    reason: e.to_string(),
                });
            }
        };

        if !self.policy.is_quiet_now() {
            return Ok(match self.executor.execute(&printable, &options).await {
                Ok(()) => DispatchOutcome::Printed,
                Err(e) => DispatchOutcome::Failed {
                    reason: e.to_string(),
                },
            });
        }

        let job = PrintJob::new(printable, options, origin, self.policy.local_now());
        let job_id = job.id;
        let position = self.store.enqueue(job).await?;

        Ok(DispatchOutcome::Queued {
            job_id,
            release_at: self.policy.release_time(),
            position,
        })
    }

    /// Drain the queue now, unless quiet hours are active.
    pub async fn process_queue_now(&self) -> ProcessOutcome {
        if self.policy.is_quiet_now() {
            tracing::debug!("Quiet hours active, leaving queue untouched");
            return ProcessOutcome::QuietHoursActive;
        }

        ProcessOutcome::Processed(self.store.drain_and_process(self.executor.as_ref()).await)
    }
}
