//! Printer and document conversion configuration.

use serde::{Deserialize, Serialize};

use crate::types::PrintOptions;

/// Target printer and the default options applied to new jobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrinterConfig {
    /// CUPS queue name.
    #[serde(default = "default_name")]
    pub name: String,
    /// IP address of the network printer, used by `printer setup`.
    #[serde(default)]
    pub ip: Option<String>,
    /// Paper size (A4, Letter, ...).
    #[serde(default = "default_media")]
    pub media: String,
    /// Duplex mode passed to the printer (`one-sided`, `two-sided-long-edge`, ...).
    #[serde(default = "default_duplex")]
    pub duplex: String,
    /// Scale content to the page.
    #[serde(default = "default_true")]
    pub fit_to_page: bool,
    /// Pass media/duplex/fit-to-page as `lpr -o` flags.
    ///
    /// Off by default: some IPP printers reject jobs carrying them.
    #[serde(default)]
    pub pass_options: bool,
    /// Timeout for a single `lpr` invocation.
    #[serde(default = "default_print_timeout")]
    pub timeout_seconds: u64,
    /// Timeout for `lpadmin` during printer setup.
    #[serde(default = "default_setup_timeout")]
    pub setup_timeout_seconds: u64,
}

impl PrinterConfig {
    /// Snapshot of the options a job submitted right now would print with.
    pub fn print_options(&self) -> PrintOptions {
        PrintOptions {
            printer_name: self.name.clone(),
            media: self.media.clone(),
            duplex: self.duplex.clone(),
            fit_to_page: self.fit_to_page,
        }
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            ip: None,
            media: default_media(),
            duplex: default_duplex(),
            fit_to_page: true,
            pass_options: false,
            timeout_seconds: default_print_timeout(),
            setup_timeout_seconds: default_setup_timeout(),
        }
    }
}

/// Office document to PDF conversion settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Whether Office documents are accepted and converted.
    #[serde(default)]
    pub enabled: bool,
    /// Candidate converter executables, tried in order.
    #[serde(default = "default_commands")]
    pub commands: Vec<String>,
    /// Timeout for a single conversion.
    #[serde(default = "default_conversion_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            commands: default_commands(),
            timeout_seconds: default_conversion_timeout(),
        }
    }
}

fn default_name() -> String {
    "HP1200w".to_string()
}

fn default_media() -> String {
    "A4".to_string()
}

fn default_duplex() -> String {
    "one-sided".to_string()
}

fn default_true() -> bool {
    true
}

fn default_print_timeout() -> u64 {
    30
}

fn default_setup_timeout() -> u64 {
    30
}

fn default_commands() -> Vec<String> {
    vec!["libreoffice".to_string(), "soffice".to_string()]
}

fn default_conversion_timeout() -> u64 {
    60
}
