//! Response DTOs.

use chrono::{DateTime, FixedOffset, NaiveTime};
use serde::{Deserialize, Serialize};

use printhub_core::types::{JobId, PrintOptions};
use printhub_entity::job::{JobResult, PrintJob};
use printhub_worker::DispatchOutcome;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status string.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// Result of submitting a file for printing.
#[derive(Debug, Clone, Serialize)]
pub struct PrintResponse {
    /// Name the upload was saved under.
    pub file_name: String,
    /// Printed now or queued.
    #[serde(flatten)]
    pub outcome: DispatchOutcome,
}

/// One queued job with its position.
#[derive(Debug, Clone, Serialize)]
pub struct QueueItem {
    /// 1-based position in processing order.
    pub position: usize,
    /// File name without directory.
    pub file_name: String,
    /// The stored job.
    #[serde(flatten)]
    pub job: PrintJob,
}

/// Snapshot of the print queue.
#[derive(Debug, Clone, Serialize)]
pub struct QueueResponse {
    /// Number of queued jobs.
    pub count: usize,
    /// Jobs in processing order.
    pub jobs: Vec<QueueItem>,
}

impl QueueResponse {
    /// Number the jobs by position.
    pub fn from_jobs(jobs: Vec<PrintJob>) -> Self {
        let jobs: Vec<QueueItem> = jobs
            .into_iter()
            .enumerate()
            .map(|(i, job)| QueueItem {
                position: i + 1,
                file_name: job.file_name(),
                job,
            })
            .collect();
        Self {
            count: jobs.len(),
            jobs,
        }
    }
}

/// Outcome of one job in a drain pass.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedJob {
    pub job_id: JobId,
    pub file_name: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&JobResult> for ProcessedJob {
    fn from(result: &JobResult) -> Self {
        Self {
            job_id: result.job.id,
            file_name: result.job.file_name(),
            success: result.success,
            error: result.error.clone(),
        }
    }
}

/// Result of a manual drain.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessResponse {
    /// Jobs processed in this pass.
    pub processed: usize,
    /// Jobs the printer accepted.
    pub succeeded: usize,
    /// Jobs that failed.
    pub failed: usize,
    /// Per-job outcomes in queue order.
    pub results: Vec<ProcessedJob>,
    /// Set when the emptied queue could not be saved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Quiet-hours window as configured.
#[derive(Debug, Clone, Serialize)]
pub struct QuietHoursInfo {
    pub start: NaiveTime,
    pub end: NaiveTime,
    /// Zone in use after fallback.
    pub timezone: String,
    /// Whether printing is suppressed right now.
    pub active: bool,
}

/// Service status.
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    /// Options applied to new jobs.
    pub printer: PrintOptions,
    /// Upload size limit in megabytes.
    pub max_file_mb: u64,
    /// Whether office documents are converted.
    pub conversion_enabled: bool,
    pub quiet_hours: QuietHoursInfo,
    /// Current time in the configured zone.
    pub local_time: DateTime<FixedOffset>,
    /// Number of queued jobs.
    pub queue_length: usize,
}
