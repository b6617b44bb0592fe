//! Deferred print queue configuration.

use serde::{Deserialize, Serialize};

/// Background replay loop and queue file configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Whether the background replay loop runs.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Interval in seconds between quiet-hours checks.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,
    /// Queue file name, relative to `storage.save_dir`.
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            poll_interval_seconds: default_poll_interval(),
            file_name: default_file_name(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_poll_interval() -> u64 {
    60
}

fn default_file_name() -> String {
    "print_queue.json".to_string()
}
