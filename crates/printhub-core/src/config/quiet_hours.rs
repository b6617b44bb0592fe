//! Quiet hours configuration.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// Local time window during which jobs are queued instead of printed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuietHoursConfig {
    /// Window start as `HH:MM`.
    #[serde(default = "default_start")]
    pub start: String,
    /// Window end as `HH:MM` (inclusive).
    #[serde(default = "default_end")]
    pub end: String,
    /// IANA time zone the window is expressed in.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

/// A parsed quiet-hours window. `start > end` means the window wraps midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuietWindow {
    /// First quiet minute.
    pub start: NaiveTime,
    /// Last quiet minute.
    pub end: NaiveTime,
}

impl QuietHoursConfig {
    /// Parse both bounds of the window.
    pub fn window(&self) -> AppResult<QuietWindow> {
        Ok(QuietWindow {
            start: parse_time_of_day(&self.start)?,
            end: parse_time_of_day(&self.end)?,
        })
    }
}

impl Default for QuietHoursConfig {
    fn default() -> Self {
        Self {
            start: default_start(),
            end: default_end(),
            timezone: default_timezone(),
        }
    }
}

/// Parse an `HH:MM` (or `HH:MM:SS`) time of day.
pub fn parse_time_of_day(value: &str) -> AppResult<NaiveTime> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|e| {
            AppError::configuration(format!("Invalid time of day '{value}' (expected HH:MM): {e}"))
        })
}

fn default_start() -> String {
    "22:30".to_string()
}

fn default_end() -> String {
    "09:00".to_string()
}

fn default_timezone() -> String {
    "UTC".to_string()
}
