//! Upload storage configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where incoming files are saved and how large they may be.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for downloaded, converted, and queued files.
    #[serde(default = "default_save_dir")]
    pub save_dir: PathBuf,
    /// Maximum accepted file size in megabytes.
    #[serde(default = "default_max_file_mb")]
    pub max_file_mb: u64,
}

impl StorageConfig {
    /// Maximum accepted file size in bytes.
    pub fn max_file_bytes(&self) -> u64 {
        self.max_file_mb * 1024 * 1024
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            save_dir: default_save_dir(),
            max_file_mb: default_max_file_mb(),
        }
    }
}

fn default_save_dir() -> PathBuf {
    PathBuf::from("/data/incoming")
}

fn default_max_file_mb() -> u64 {
    20
}
