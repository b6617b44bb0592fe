//! Errors from running CUPS and LibreOffice command-line tools.
//!
//! Every failure maps to `printhub_core::error::AppError` so the printer
//! adapter can hand it straight back through the `Printer` trait.

use printhub_core::error::{AppError, ErrorKind};
use thiserror::Error;

/// Failure of a single external command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The executable is not on `PATH`.
    #[error("Command not found: {program}")]
    NotFound {
        /// Executable name.
        program: String,
    },

    /// The process did not finish in time and was killed.
    #[error("{program} timed out after {timeout_seconds}s")]
    Timeout {
        /// Executable name.
        program: String,
        /// The limit that was exceeded.
        timeout_seconds: u64,
    },

    /// The process exited unsuccessfully.
    #[error("{program} exited with code {code}: {stderr}")]
    Failed {
        /// Executable name.
        program: String,
        /// Exit code, `-1` when killed by a signal.
        code: i32,
        /// Captured stderr, truncated.
        stderr: String,
    },

    /// The process could not be spawned or awaited.
    #[error("Failed to run {program}: {source}")]
    Io {
        /// Executable name.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Required configuration is missing.
    #[error("{0}")]
    Misconfigured(String),
}

impl From<CommandError> for AppError {
    fn from(err: CommandError) -> Self {
        let message = err.to_string();
        match err {
            CommandError::Misconfigured(_) => AppError::configuration(message),
            CommandError::Io { source, .. } => {
                AppError::with_source(ErrorKind::ExternalService, message, source)
            }
            _ => AppError::external_service(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_command_maps_to_external_service() {
        let err: AppError = CommandError::Failed {
            program: "lpr".to_string(),
            code: 1,
            stderr: "lpr: The printer or class does not exist.".to_string(),
        }
        .into();
        assert_eq!(err.kind, ErrorKind::ExternalService);
        assert_eq!(
            err.message,
            "lpr exited with code 1: lpr: The printer or class does not exist."
        );
    }

    #[test]
    fn test_misconfigured_maps_to_configuration() {
        let err: AppError = CommandError::Misconfigured("printer.ip is not set".to_string()).into();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }
}
