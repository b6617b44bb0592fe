//! Office document conversion through headless LibreOffice.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing;

use printhub_core::config::ConversionConfig;
use printhub_core::traits::Converter;

use crate::command::{self, CommandRunner};

/// Converts documents to PDF with `libreoffice --headless`.
///
/// The PDF is written next to the source file.
#[derive(Debug, Clone)]
pub struct LibreOfficeConverter {
    runner: CommandRunner,
    /// Executables tried in order.
    candidates: Vec<String>,
}

impl LibreOfficeConverter {
    /// Create a converter trying `candidates` in order.
    pub fn new(runner: CommandRunner, candidates: Vec<String>) -> Self {
        Self { runner, candidates }
    }

    /// Build a converter from the conversion section of the configuration.
    pub fn from_config(config: &ConversionConfig) -> Self {
        Self::new(
            CommandRunner::with_timeout_secs(config.timeout_seconds),
            config.commands.clone(),
        )
    }

    /// The first available LibreOffice executable.
    pub async fn locate(&self) -> Option<String> {
        command::find_first(&self.candidates).await
    }

    /// Path LibreOffice writes the PDF for `input` to inside `out_dir`.
    pub fn expected_output(input: &Path, out_dir: &Path) -> Option<PathBuf> {
        let stem = input.file_stem()?;
        let mut name = stem.to_os_string();
        name.push(".pdf");
        Some(out_dir.join(name))
    }
}

#[async_trait]
impl Converter for LibreOfficeConverter {
    async fn convert(&self, file: &Path) -> Option<PathBuf> {
        let Some(program) = self.locate().await else {
            tracing::warn!(
                "LibreOffice not installed; cannot convert '{}'",
                file.display()
            );
            return None;
        };

        let out_dir = file.parent().unwrap_or_else(|| Path::new("."));
        let expected = Self::expected_output(file, out_dir)?;

        let args = [
            OsStr::new("--headless"),
            OsStr::new("--convert-to"),
            OsStr::new("pdf"),
            OsStr::new("--outdir"),
            out_dir.as_os_str(),
            file.as_os_str(),
        ];

        if let Err(e) = self.runner.run(&program, args).await {
            tracing::error!("LibreOffice conversion failed for '{}': {}", file.display(), e);
            return None;
        }

        if tokio::fs::try_exists(&expected).await.unwrap_or(false) {
            tracing::info!(
                "Converted '{}' to '{}'",
                file.display(),
                expected.display()
            );
            Some(expected)
        } else {
            tracing::error!("PDF not found after conversion: '{}'", expected.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_output_uses_stem() {
        assert_eq!(
            LibreOfficeConverter::expected_output(
                Path::new("/data/incoming/ab12cd34_Quarterly Report.docx"),
                Path::new("/data/incoming"),
            ),
            Some(PathBuf::from("/data/incoming/ab12cd34_Quarterly Report.pdf"))
        );
    }

    #[tokio::test]
    async fn test_missing_converter_yields_none() {
        let converter = LibreOfficeConverter::new(
            CommandRunner::with_timeout_secs(5),
            vec!["printhub-no-such-office".to_string()],
        );
        assert_eq!(
            converter.convert(Path::new("/tmp/whatever.docx")).await,
            None
        );
    }
}
