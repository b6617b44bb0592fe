//! Test doubles shared by the worker's unit tests.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, NaiveTime, Utc};
use tokio::sync::Notify;

use printhub_core::config::QuietWindow;
use printhub_core::error::AppError;
use printhub_core::result::AppResult;
use printhub_core::traits::{Clock, Printer};
use printhub_core::types::PrintOptions;
use printhub_entity::job::OriginContext;

use crate::policy::QuietHoursPolicy;

/// Clock whose instant is set by the test.
#[derive(Debug)]
pub struct ManualClock(Mutex<DateTime<Utc>>);

impl ManualClock {
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self(Mutex::new(instant))
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        *self.0.lock().unwrap() = instant;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

/// Printer that records every file it is asked to print.
#[derive(Debug, Default)]
pub struct FakePrinter {
    printed: Mutex<Vec<PathBuf>>,
    fail_with: Option<String>,
}

impl FakePrinter {
    pub fn failing(reason: &str) -> Self {
        Self {
            fail_with: Some(reason.to_string()),
            ..Default::default()
        }
    }

    pub fn printed(&self) -> Vec<PathBuf> {
        self.printed.lock().unwrap().clone()
    }
}

#[async_trait]
impl Printer for FakePrinter {
    async fn print(&self, file: &Path, _options: &PrintOptions) -> AppResult<()> {
        if let Some(reason) = &self.fail_with {
            return Err(AppError::external_service(reason.clone()));
        }
        self.printed.lock().unwrap().push(file.to_path_buf());
        Ok(())
    }
}

/// Printer that blocks inside `print` until the test releases it.
#[derive(Debug, Default)]
pub struct GatedPrinter {
    /// Signalled when a print call begins.
    pub started: Notify,
    /// Signal to let the pending print call finish.
    pub release: Notify,
    printed: Mutex<Vec<PathBuf>>,
}

impl GatedPrinter {
    pub fn printed(&self) -> Vec<PathBuf> {
        self.printed.lock().unwrap().clone()
    }
}

#[async_trait]
impl Printer for GatedPrinter {
    async fn print(&self, file: &Path, _options: &PrintOptions) -> AppResult<()> {
        self.started.notify_one();
        self.release.notified().await;
        self.printed.lock().unwrap().push(file.to_path_buf());
        Ok(())
    }
}

/// The default 22:30-09:00 window evaluated in UTC.
pub fn overnight_policy(clock: Arc<ManualClock>) -> QuietHoursPolicy {
    QuietHoursPolicy::new(
        QuietWindow {
            start: NaiveTime::from_hms_opt(22, 30, 0).unwrap(),
            end: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        },
        "UTC",
        clock,
    )
}

pub fn options() -> PrintOptions {
    PrintOptions {
        printer_name: "HP1200w".to_string(),
        media: "A4".to_string(),
        duplex: "one-sided".to_string(),
        fit_to_page: true,
    }
}

pub fn origin(message_id: i64) -> OriginContext {
    OriginContext {
        chat_id: 1001,
        message_id,
    }
}

pub async fn touch(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    tokio::fs::write(&path, b"%PDF-1.4").await.unwrap();
    path
}
