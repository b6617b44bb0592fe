//! Inbound document classification.

use serde::{Deserialize, Serialize};

const PDF_MIME: &str = "application/pdf";

const IMAGE_MIMES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/tiff",
    "image/webp",
];

const OFFICE_MIMES: &[&str] = &[
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-powerpoint",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    "application/rtf",
    "text/plain",
];

/// How an inbound file is handled before printing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Printed as-is.
    Pdf,
    /// Printed as-is.
    Image,
    /// Must be converted to PDF first.
    Office,
}

impl DocumentKind {
    /// Classify a MIME type; `None` for unsupported types.
    ///
    /// Parameters such as `; charset=utf-8` are ignored.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if essence == PDF_MIME {
            Some(Self::Pdf)
        } else if IMAGE_MIMES.contains(&essence.as_str()) {
            Some(Self::Image)
        } else if OFFICE_MIMES.contains(&essence.as_str()) {
            Some(Self::Office)
        } else {
            None
        }
    }

    /// Whether the document must go through the converter.
    pub fn needs_conversion(&self) -> bool {
        matches!(self, Self::Office)
    }

    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Image => "image",
            Self::Office => "office",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
