//! Child process execution for CUPS and LibreOffice tools.
//!
//! Runs external commands with a timeout and captured output. Processes
//! still running when the timeout fires are killed.

use std::ffi::OsStr;
use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::process::Command;
use tracing;

use crate::error::CommandError;

/// Maximum number of stderr characters kept in errors.
const STDERR_LIMIT: usize = 2000;

/// Captured output of a successful command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Standard output.
    pub stdout: String,
    /// Standard error.
    pub stderr: String,
    /// Wall-clock duration.
    pub duration_ms: u64,
}

/// Runs one program with a fixed timeout.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    timeout: Duration,
}

impl CommandRunner {
    /// Create a runner with the given timeout.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Create a runner with a timeout in seconds.
    pub fn with_timeout_secs(seconds: u64) -> Self {
        Self::new(Duration::from_secs(seconds))
    }

    /// The configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run `program` with `args` and wait for it to exit successfully.
    pub async fn run<I, S>(&self, program: &str, args: I) -> Result<CommandOutput, CommandError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let start = Instant::now();

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        tracing::debug!("Running command: {:?}", cmd.as_std());

        let result = tokio::time::timeout(self.timeout, cmd.output()).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(Ok(output)) => {
                let stdout = String::from_utf8_lossy(&output.stdout).to_string();
                let stderr = String::from_utf8_lossy(&output.stderr).to_string();

                if !output.status.success() {
                    let code = output.status.code().unwrap_or(-1);
                    tracing::error!(
                        "Command failed: program='{}', exit_code={}, stderr='{}'",
                        program,
                        code,
                        stderr.trim()
                    );
                    return Err(CommandError::Failed {
                        program: program.to_string(),
                        code,
                        stderr: stderr.trim().chars().take(STDERR_LIMIT).collect(),
                    });
                }

                tracing::debug!(
                    "Command completed: program='{}', duration={}ms",
                    program,
                    duration_ms
                );
                Ok(CommandOutput {
                    stdout,
                    stderr,
                    duration_ms,
                })
            }
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::error!("Command not found: '{}'", program);
                Err(CommandError::NotFound {
                    program: program.to_string(),
                })
            }
            Ok(Err(e)) => {
                tracing::error!("Failed to execute '{}': {}", program, e);
                Err(CommandError::Io {
                    program: program.to_string(),
                    source: e,
                })
            }
            Err(_) => {
                tracing::error!(
                    "Command timed out after {}s: program='{}'",
                    self.timeout.as_secs(),
                    program
                );
                Err(CommandError::Timeout {
                    program: program.to_string(),
                    timeout_seconds: self.timeout.as_secs(),
                })
            }
        }
    }
}

/// Whether `program` can be found on `PATH`.
pub async fn is_available(program: &str) -> bool {
    let result = Command::new("which")
        .arg(program)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await;

    matches!(result, Ok(status) if status.success())
}

/// The first of `candidates` found on `PATH`.
pub async fn find_first(candidates: &[String]) -> Option<String> {
    for candidate in candidates {
        if is_available(candidate).await {
            return Some(candidate.clone());
        }
    }
    None
}
