//! Printer collaborator trait.

use std::path::Path;

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::PrintOptions;

/// Sends a ready-to-print file to a printer.
///
/// Implementations must be safe to call concurrently: immediate prints
/// are not serialized by the queue lock.
#[async_trait]
pub trait Printer: Send + Sync + std::fmt::Debug + 'static {
    /// Print `file` with the given options. Any failure is returned as an
    /// error carrying a human-readable reason.
    async fn print(&self, file: &Path, options: &PrintOptions) -> AppResult<()>;
}
