//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. Every field has a default, so an empty configuration is valid
//! apart from the access allow-list.

pub mod access;
pub mod app;
pub mod logging;
pub mod printer;
pub mod queue;
pub mod quiet_hours;
pub mod storage;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use self::access::AccessConfig;
pub use self::app::ServerConfig;
pub use self::logging::LoggingConfig;
pub use self::printer::{ConversionConfig, PrinterConfig};
pub use self::queue::QueueConfig;
pub use self::quiet_hours::{QuietHoursConfig, QuietWindow};
pub use self::storage::StorageConfig;

use crate::error::AppError;
use crate::result::AppResult;

/// Root application configuration.
///
/// Built once at startup and shared read-only (behind an `Arc`) with every
/// component; nothing mutates it afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Target printer and default print options.
    #[serde(default)]
    pub printer: PrinterConfig,
    /// Office document conversion.
    #[serde(default)]
    pub conversion: ConversionConfig,
    /// Quiet hours window.
    #[serde(default)]
    pub quiet_hours: QuietHoursConfig,
    /// Deferred queue and replay loop.
    #[serde(default)]
    pub queue: QueueConfig,
    /// Upload directory and size limit.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Requester allow-list.
    #[serde(default)]
    pub access: AccessConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `PRINTHUB__`
    /// (e.g. `PRINTHUB__QUIET_HOURS__START=23:00`).
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from(&["config/default".to_string(), format!("config/{env}")])
    }

    /// Load configuration from an explicit list of files, later files winning.
    pub fn load_from(files: &[String]) -> Result<Self, AppError> {
        let mut builder = config::Config::builder();
        for file in files {
            builder = builder.add_source(config::File::with_name(file).required(false));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("PRINTHUB")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("access.allowed_user_ids")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values that would otherwise misbehave at runtime.
    pub fn validate(&self) -> AppResult<()> {
        self.quiet_hours.window()?;

        if self.queue.poll_interval_seconds == 0 {
            return Err(AppError::configuration(
                "queue.poll_interval_seconds must be greater than zero",
            ));
        }
        if self.storage.max_file_mb == 0 {
            return Err(AppError::configuration(
                "storage.max_file_mb must be greater than zero",
            ));
        }
        if self.printer.name.trim().is_empty() {
            return Err(AppError::configuration("printer.name must not be empty"));
        }
        if self.queue.file_name.trim().is_empty() {
            return Err(AppError::configuration("queue.file_name must not be empty"));
        }

        Ok(())
    }

    /// Full path of the persisted queue file.
    pub fn queue_file(&self) -> PathBuf {
        self.storage.save_dir.join(&self.queue.file_name)
    }
}
