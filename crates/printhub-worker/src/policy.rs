//! Quiet-hours policy: decides whether printing is currently suppressed.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Local, NaiveTime, Utc};
use chrono_tz::Tz;
use tracing;

use printhub_core::config::QuietWindow;
use printhub_core::traits::Clock;

/// Whether `now` falls inside the quiet window `[start, end]`.
///
/// Both bounds are inclusive. When `start > end` the window wraps
/// midnight.
pub fn is_quiet(now: NaiveTime, start: NaiveTime, end: NaiveTime) -> bool {
    if start <= end {
        start <= now && now <= end
    } else {
        now >= start || now <= end
    }
}

/// Quiet-hours window bound to a time zone and a clock.
#[derive(Debug, Clone)]
pub struct QuietHoursPolicy {
    /// Parsed window bounds.
    window: QuietWindow,
    /// Configured zone, or `None` when falling back to the process zone.
    zone: Option<Tz>,
    /// Time source.
    clock: Arc<dyn Clock>,
}

impl QuietHoursPolicy {
    /// Create a policy for the given window.
    ///
    /// An unknown time zone name is not an error: the policy logs a warning
    /// and uses the process's local time zone instead.
    pub fn new(window: QuietWindow, timezone: &str, clock: Arc<dyn Clock>) -> Self {
        let zone = match timezone.parse::<Tz>() {
            Ok(tz) => Some(tz),
            Err(e) => {
                tracing::warn!(
                    "Failed to use timezone '{}' ({}), falling back to system time",
                    timezone,
                    e
                );
                None
            }
        };

        Self {
            window,
            zone,
            clock,
        }
    }

    /// The current instant in the configured zone.
    pub fn local_now(&self) -> DateTime<FixedOffset> {
        self.to_local(self.clock.now())
    }

    /// Convert an instant into the configured zone.
    pub fn to_local(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self.zone {
            Some(tz) => instant.with_timezone(&tz).fixed_offset(),
            None => instant.with_timezone(&Local).fixed_offset(),
        }
    }

    /// Whether printing is suppressed right now.
    pub fn is_quiet_now(&self) -> bool {
        self.is_quiet_at(self.local_now().time())
    }

    /// Whether printing is suppressed at the given local time of day.
    pub fn is_quiet_at(&self, now: NaiveTime) -> bool {
        is_quiet(now, self.window.start, self.window.end)
    }

    /// The configured window.
    pub fn window(&self) -> QuietWindow {
        self.window
    }

    /// Local time of day at which queued jobs are released.
    pub fn release_time(&self) -> NaiveTime {
        self.window.end
    }

    /// Name of the zone actually in use.
    pub fn zone_name(&self) -> String {
        match self.zone {
            Some(tz) => tz.name().to_string(),
            None => "local".to_string(),
        }
    }
}
