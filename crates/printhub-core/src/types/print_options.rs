//! Print option snapshot handed to the printer.

use serde::{Deserialize, Serialize};

/// Options a job prints with.
///
/// Captured when a job is created so later configuration changes do not
/// alter jobs that are already waiting. The core never interprets these
/// values; they are passed through to the printer as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintOptions {
    /// Printer (CUPS queue) name.
    pub printer_name: String,
    /// Paper size.
    pub media: String,
    /// Duplex mode.
    pub duplex: String,
    /// Scale content to the page.
    pub fit_to_page: bool,
}
