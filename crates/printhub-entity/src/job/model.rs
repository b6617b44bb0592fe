//! Print job entity model.

use std::path::PathBuf;

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize, de};

use printhub_core::types::{JobId, PrintOptions};

/// Identifiers needed to notify the requester about a job later on.
///
/// Opaque to the queue: stored and handed back, never interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginContext {
    /// Chat the file was sent from.
    pub chat_id: i64,
    /// Message that carried the file.
    pub message_id: i64,
}

/// A print request deferred during quiet hours.
///
/// Serialized as one flat record in the queue file:
/// `{id, file_path, chat_id, message_id, printer_name, media, duplex,
/// fit_to_page, queued_at}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintJob {
    /// Synthetic job identity. Records written without one get a fresh ID.
    #[serde(default)]
    pub id: JobId,
    /// Absolute path to the printable (already converted) file.
    pub file_path: PathBuf,
    /// Requester identifiers.
    #[serde(flatten)]
    pub origin: OriginContext,
    /// Options captured when the job was queued.
    #[serde(flatten)]
    pub options: PrintOptions,
    /// When the job was queued, in the configured time zone.
    #[serde(deserialize_with = "deserialize_queued_at")]
    pub queued_at: DateTime<FixedOffset>,
}

impl PrintJob {
    /// Create a new job with a fresh identifier.
    pub fn new(
        file_path: PathBuf,
        options: PrintOptions,
        origin: OriginContext,
        queued_at: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            id: JobId::new(),
            file_path,
            origin,
            options,
            queued_at,
        }
    }

    /// The file name without its directory, for display.
    pub fn file_name(&self) -> String {
        self.file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file_path.display().to_string())
    }
}

/// Parse a queue timestamp.
///
/// RFC 3339 values keep their offset. Naive ISO-8601 values (written when
/// the configured zone could not be resolved) are read in the local zone.
pub fn parse_queued_at(raw: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at);
    }

    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
    match Local.from_local_datetime(&naive).earliest() {
        Some(at) => Some(at.fixed_offset()),
        // Skipped by a DST jump; keep the wall-clock reading as UTC.
        None => Some(naive.and_utc().fixed_offset()),
    }
}

fn deserialize_queued_at<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_queued_at(&raw)
        .ok_or_else(|| de::Error::custom(format!("invalid queued_at timestamp '{raw}'")))
}
