//! Wall-clock abstraction.

use chrono::{DateTime, Utc};

/// Source of the current instant.
///
/// Quiet-hours decisions read the time through this trait so the replay
/// loop and dispatcher can be driven by a fixed clock in tests.
pub trait Clock: Send + Sync + std::fmt::Debug + 'static {
    /// The current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// The operating system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
