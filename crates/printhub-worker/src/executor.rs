//! Print executor: normalizes printer and converter outcomes.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tracing;

use printhub_core::traits::{Converter, Printer};
use printhub_core::types::PrintOptions;
use printhub_entity::document::DocumentKind;
use printhub_entity::job::PrintJob;

/// Terminal failure of a single print attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecutionError {
    /// The referenced file no longer exists.
    #[error("File not found")]
    MissingFile(PathBuf),

    /// The printer rejected or failed the job.
    #[error("Print failed: {0}")]
    Print(String),

    /// The document could not be converted to PDF.
    #[error("Conversion failed: {0}")]
    Conversion(String),

    /// An office document arrived while conversion is turned off.
    #[error("Office documents are not accepted: conversion is disabled")]
    ConversionDisabled,
}

/// Processes one queued job. Driven by the store during a drain.
#[async_trait]
pub trait JobProcessor: Send + Sync {
    /// Print the job's file with its captured options.
    async fn process(&self, job: &PrintJob) -> Result<(), ExecutionError>;
}

/// A freshly received file awaiting dispatch.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    /// Where the upload was saved.
    pub path: PathBuf,
    /// Classification of its MIME type.
    pub kind: DocumentKind,
}

impl IncomingFile {
    /// Describe a saved upload.
    pub fn new(path: impl Into<PathBuf>, kind: DocumentKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// Adapter around the printer and optional converter collaborators.
#[derive(Debug, Clone)]
pub struct PrintExecutor {
    printer: Arc<dyn Printer>,
    /// `None` when conversion is disabled.
    converter: Option<Arc<dyn Converter>>,
}

impl PrintExecutor {
    /// Create an executor. Pass `None` as converter to reject office files.
    pub fn new(printer: Arc<dyn Printer>, converter: Option<Arc<dyn Converter>>) -> Self {
        Self { printer, converter }
    }

    /// Whether office documents can be accepted.
    pub fn conversion_enabled(&self) -> bool {
        self.converter.is_some()
    }

    /// Turn an incoming file into a printable one.
    ///
    /// PDFs and images pass through unchanged. Office documents are
    /// converted; a missing result is a terminal failure.
    pub async fn prepare(&self, file: &IncomingFile) -> Result<PathBuf, ExecutionError> {
        if !file.kind.needs_conversion() {
            return Ok(file.path.clone());
        }

        let converter = self
            .converter
            .as_ref()
            .ok_or(ExecutionError::ConversionDisabled)?;

        tracing::info!("Converting '{}' to PDF", file.path.display());
        match converter.convert(&file.path).await {
            Some(pdf) => {
                tracing::debug!("Converted '{}' -> '{}'", file.path.display(), pdf.display());
                Ok(pdf)
            }
            None => Err(ExecutionError::Conversion(format!(
                "could not convert '{}'",
                display_name(&file.path)
            ))),
        }
    }

    /// Send a printable file to the printer.
    pub async fn execute(&self, file: &Path, options: &PrintOptions) -> Result<(), ExecutionError> {
        tracing::info!(
            printer = %options.printer_name,
            media = %options.media,
            duplex = %options.duplex,
            "Printing '{}'",
            file.display()
        );

        self.printer.print(file, options).await.map_err(|e| {
            tracing::warn!("Printer rejected '{}': {}", file.display(), e);
            ExecutionError::Print(e.message)
        })
    }
}

#[async_trait]
impl JobProcessor for PrintExecutor {
    async fn process(&self, job: &PrintJob) -> Result<(), ExecutionError> {
        self.execute(&job.file_path, &job.options).await
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{self, FakePrinter};

    #[derive(Debug)]
    struct FakeConverter {
        output: Option<PathBuf>,
    }

    #[async_trait]
    impl Converter for FakeConverter {
        async fn convert(&self, _file: &Path) -> Option<PathBuf> {
            self.output.clone()
        }
    }

    #[tokio::test]
    async fn test_pdf_passes_through_prepare() {
        let executor = PrintExecutor::new(Arc::new(FakePrinter::default()), None);
        let file = IncomingFile::new("/data/incoming/a.pdf", DocumentKind::Pdf);
        assert_eq!(
            executor.prepare(&file).await.unwrap(),
            PathBuf::from("/data/incoming/a.pdf")
        );
    }

    #[tokio::test]
    async fn test_office_rejected_when_conversion_disabled() {
        let executor = PrintExecutor::new(Arc::new(FakePrinter::default()), None);
        let file = IncomingFile::new("/data/incoming/a.docx", DocumentKind::Office);
        assert_eq!(
            executor.prepare(&file).await.unwrap_err(),
            ExecutionError::ConversionDisabled
        );
    }

    #[tokio::test]
    async fn test_office_converted_when_enabled() {
        let converter = FakeConverter {
            output: Some(PathBuf::from("/data/incoming/a.pdf")),
        };
        let executor = PrintExecutor::new(
            Arc::new(FakePrinter::default()),
            Some(Arc::new(converter)),
        );
        let file = IncomingFile::new("/data/incoming/a.docx", DocumentKind::Office);
        assert_eq!(
            executor.prepare(&file).await.unwrap(),
            PathBuf::from("/data/incoming/a.pdf")
        );
    }

    #[tokio::test]
    async fn test_conversion_none_is_failure() {
        let executor = PrintExecutor::new(
            Arc::new(FakePrinter::default()),
            Some(Arc::new(FakeConverter { output: None })),
        );
        let file = IncomingFile::new("/data/incoming/a.docx", DocumentKind::Office);
        let err = executor.prepare(&file).await.unwrap_err();
        assert!(matches!(err, ExecutionError::Conversion(_)));
        assert!(err.to_string().contains("a.docx"));
    }

    #[tokio::test]
    async fn test_printer_error_becomes_print_failure() {
        let printer = FakePrinter::failing("lpr exited with status 1");
        let executor = PrintExecutor::new(Arc::new(printer), None);
        let err = executor
            .execute(Path::new("/data/incoming/a.pdf"), &testing::options())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ExecutionError::Print("lpr exited with status 1".to_string())
        );
    }

    #[tokio::test]
    async fn test_execute_reaches_printer() {
        let printer = Arc::new(FakePrinter::default());
        let executor = PrintExecutor::new(printer.clone(), None);
        executor
            .execute(Path::new("/data/incoming/a.pdf"), &testing::options())
            .await
            .unwrap();
        assert_eq!(printer.printed(), vec![PathBuf::from("/data/incoming/a.pdf")]);
    }
}
