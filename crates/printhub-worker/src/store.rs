//! Persistent FIFO of deferred print jobs.
//!
//! The queue file is the only source of truth: every operation reloads it
//! from disk and every mutation rewrites it completely. A single mutex
//! serializes all operations inside the process; there is no cross-process
//! locking, so exactly one running instance may own the file.

use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::sync::Mutex;
use tracing;

use printhub_core::error::{AppError, ErrorKind};
use printhub_core::result::AppResult;
use printhub_entity::job::{DrainSummary, JobResult, PrintJob};

use crate::executor::{ExecutionError, JobProcessor};

/// Results of one drain pass.
#[derive(Debug, Default)]
pub struct DrainReport {
    /// One result per job present when the drain started, in queue order.
    pub results: Vec<JobResult>,
    /// Set when the emptied queue could not be written back.
    pub persist_error: Option<AppError>,
}

impl DrainReport {
    /// Success/failure counts.
    pub fn summary(&self) -> DrainSummary {
        DrainSummary::from_results(&self.results)
    }

    /// Whether the queue was empty.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// File-backed job queue with exclusive access.
#[derive(Debug)]
pub struct JobStore {
    /// Queue file location.
    path: PathBuf,
    /// Serializes every read-modify-write of the file.
    lock: Mutex<()>,
}

impl JobStore {
    /// Open the store at `path`, creating its parent directory.
    ///
    /// The file itself is created on the first write; a missing file is an
    /// empty queue.
    pub async fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create queue directory: {}", parent.display()),
                    e,
                )
            })?;
        }

        tracing::debug!("Opened job store at '{}'", path.display());
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    /// Location of the queue file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a job to the end of the queue.
    ///
    /// Returns the queue length after the append. Fails only when the
    /// queue file cannot be written, in which case the job is not queued.
    pub async fn enqueue(&self, job: PrintJob) -> AppResult<usize> {
        let _guard = self.lock.lock().await;

        let mut jobs = self.load().await;
        let job_id = job.id;
        let file_name = job.file_name();
        jobs.push(job);
        self.save(&jobs).await?;

        tracing::info!(
            "Queued print job: id={}, file='{}', position={}",
            job_id,
            file_name,
            jobs.len()
        );
        Ok(jobs.len())
    }

    /// Snapshot of all queued jobs in processing order.
    pub async fn list_all(&self) -> Vec<PrintJob> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    /// Number of queued jobs.
    pub async fn len(&self) -> usize {
        self.list_all().await.len()
    }

    /// Whether the queue is empty.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Process every queued job once, in order, then remove them all.
    ///
    /// Every job present when the pass starts produces exactly one
    /// [`JobResult`] and is removed afterwards, whatever its outcome. A job
    /// whose file no longer exists is reported as failed without reaching
    /// the processor. Failed jobs are not retried.
    pub async fn drain_and_process<P>(&self, processor: &P) -> DrainReport
    where
        P: JobProcessor + ?Sized,
    {
        let _guard = self.lock.lock().await;

        let jobs = self.load().await;
        if jobs.is_empty() {
            return DrainReport::default();
        }

        tracing::info!("Processing {} queued print job(s)", jobs.len());

        let count = jobs.len();
        let mut results = Vec::with_capacity(count);

        for job in jobs {
            let outcome = if file_exists(&job.file_path).await {
                processor.process(&job).await
            } else {
                Err(ExecutionError::MissingFile(job.file_path.clone()))
            };

            match outcome {
                Ok(()) => {
                    tracing::info!("Queued job {} printed: '{}'", job.id, job.file_name());
                    results.push(JobResult::succeeded(job));
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to process queued job {} ('{}'): {}",
                        job.id,
                        job.file_path.display(),
                        e
                    );
                    results.push(JobResult::failed(job, e.to_string()));
                }
            }
        }

        // The lock is held for the whole pass, so the processed jobs are
        // still the head of the file. Ids are not used here: records
        // written without one get a fresh id on every load.
        let mut remaining = self.load().await;
        remaining.drain(..count.min(remaining.len()));

        let persist_error = match self.save(&remaining).await {
            Ok(()) => None,
            Err(e) => {
                tracing::error!("Failed to persist queue after drain: {}", e);
                Some(e)
            }
        };

        DrainReport {
            results,
            persist_error,
        }
    }

    /// Read the queue file. Missing, unreadable, or corrupt files yield an
    /// empty queue; a corrupt file is first moved aside to `<name>.corrupt`.
    async fn load(&self) -> Vec<PrintJob> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == IoErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::error!("Failed to load queue '{}': {}", self.path.display(), e);
                return Vec::new();
            }
        };

        if raw.trim().is_empty() {
            return Vec::new();
        }

        match serde_json::from_str::<Vec<PrintJob>>(&raw) {
            Ok(jobs) => jobs,
            Err(e) => {
                let aside = self.sibling_path(".corrupt");
                tracing::error!(
                    "Queue file '{}' is corrupt, moving it to '{}': {}",
                    self.path.display(),
                    aside.display(),
                    e
                );
                if let Err(e) = fs::rename(&self.path, &aside).await {
                    tracing::error!(
                        "Failed to move corrupt queue file '{}': {}",
                        self.path.display(),
                        e
                    );
                }
                Vec::new()
            }
        }
    }

    /// Replace the queue file with `jobs`.
    ///
    /// Writes a sibling temp file and renames it over the queue file, so a
    /// crash mid-write leaves the previous queue intact.
    async fn save(&self, jobs: &[PrintJob]) -> AppResult<()> {
        let data = serde_json::to_vec_pretty(jobs)?;
        let tmp = self.sibling_path(".tmp");

        fs::write(&tmp, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write queue file: {}", tmp.display()),
                e,
            )
        })?;

        fs::rename(&tmp, &self.path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to replace queue file: {}", self.path.display()),
                e,
            )
        })?;

        tracing::trace!("Saved {} job(s) to '{}'", jobs.len(), self.path.display());
        Ok(())
    }

    fn sibling_path(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "print_queue.json".into());
        name.push(suffix);
        self.path.with_file_name(name)
    }
}

async fn file_exists(path: &Path) -> bool {
    matches!(fs::try_exists(path).await, Ok(true))
}
