//! Outcomes of processing queued jobs.

use serde::{Deserialize, Serialize};

use super::model::PrintJob;

/// Terminal outcome of one queued job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobResult {
    /// The job that was processed.
    pub job: PrintJob,
    /// Whether the printer accepted the job.
    pub success: bool,
    /// Failure reason, when `success` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl JobResult {
    /// A job that printed.
    pub fn succeeded(job: PrintJob) -> Self {
        Self {
            job,
            success: true,
            error: None,
        }
    }

    /// A job that failed with the given reason.
    pub fn failed(job: PrintJob, error: impl Into<String>) -> Self {
        Self {
            job,
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Success/failure counts for one drain pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrainSummary {
    /// Jobs the printer accepted.
    pub succeeded: usize,
    /// Jobs that failed.
    pub failed: usize,
}

impl DrainSummary {
    /// Aggregate a batch of results.
    pub fn from_results(results: &[JobResult]) -> Self {
        let succeeded = results.iter().filter(|r| r.success).count();
        Self {
            succeeded,
            failed: results.len() - succeeded,
        }
    }

    /// Total number of jobs processed.
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}
