//! Document converter collaborator trait.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

/// Converts office documents into printable PDFs.
#[async_trait]
pub trait Converter: Send + Sync + std::fmt::Debug + 'static {
    /// Convert `file` to PDF and return the path of the result.
    ///
    /// `None` is an expected outcome (tool missing, conversion failed) and
    /// is treated by callers as a job failure, not a fault.
    async fn convert(&self, file: &Path) -> Option<PathBuf>;
}
