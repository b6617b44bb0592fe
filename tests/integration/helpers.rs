//! Shared test helpers for integration tests.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use printhub_api::AppState;
use printhub_core::config::AppConfig;
use printhub_core::error::AppError;
use printhub_core::result::AppResult;
use printhub_core::traits::{Clock, Printer};
use printhub_core::types::PrintOptions;

/// User ID on the allow-list of every test app.
pub const ALLOWED_USER: i64 = 42;

const BOUNDARY: &str = "printhub-test-boundary";

/// Clock the tests move by hand.
#[derive(Debug)]
pub struct TestClock(Mutex<DateTime<Utc>>);

impl TestClock {
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.0.lock().unwrap() = instant;
    }
}

impl Clock for TestClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

/// Printer that records files instead of sending them to CUPS.
#[derive(Debug, Default)]
pub struct RecordingPrinter {
    printed: Mutex<Vec<PathBuf>>,
    fail_with: Option<String>,
}

impl RecordingPrinter {
    pub fn printed(&self) -> Vec<PathBuf> {
        self.printed.lock().unwrap().clone()
    }
}

#[async_trait]
impl Printer for RecordingPrinter {
    async fn print(&self, file: &Path, _options: &PrintOptions) -> AppResult<()> {
        if let Some(reason) = &self.fail_with {
            return Err(AppError::external_service(reason.clone()));
        }
        self.printed.lock().unwrap().push(file.to_path_buf());
        Ok(())
    }
}

/// A UTC instant on a fixed test day.
pub fn utc(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, hour, minute, 0).unwrap()
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for inspecting the queue directly
    pub state: AppState,
    /// Clock driving the quiet-hours policy
    pub clock: Arc<TestClock>,
    /// Printer standing in for CUPS
    pub printer: Arc<RecordingPrinter>,
    /// Upload directory, removed on drop
    pub dir: TempDir,
}

impl TestApp {
    /// App with the 22:30-09:00 UTC window and a 1 MB upload limit
    pub async fn at(now: DateTime<Utc>) -> Self {
        Self::build(now, RecordingPrinter::default(), |_| {}).await
    }

    /// App whose printer rejects every job
    pub async fn with_failing_printer(now: DateTime<Utc>, reason: &str) -> Self {
        let printer = RecordingPrinter {
            fail_with: Some(reason.to_string()),
            ..Default::default()
        };
        Self::build(now, printer, |_| {}).await
    }

    /// App with a customized configuration
    pub async fn configured(now: DateTime<Utc>, customize: impl FnOnce(&mut AppConfig)) -> Self {
        Self::build(now, RecordingPrinter::default(), customize).await
    }

    async fn build(
        now: DateTime<Utc>,
        printer: RecordingPrinter,
        customize: impl FnOnce(&mut AppConfig),
    ) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");

        let mut config = AppConfig::default();
        config.storage.save_dir = dir.path().join("incoming");
        config.storage.max_file_mb = 1;
        config.quiet_hours.timezone = "UTC".to_string();
        config.access.allowed_user_ids = vec![ALLOWED_USER];
        customize(&mut config);

        let clock = Arc::new(TestClock(Mutex::new(now)));
        let printer = Arc::new(printer);

        let state = printhub_api::build_state_with(
            &config,
            printer.clone(),
            None,
            clock.clone(),
        )
        .await
        .expect("Failed to build state");

        let router = printhub_api::build_router(state.clone());

        Self {
            router,
            state,
            clock,
            printer,
            dir,
        }
    }

    /// Make a request with an empty body
    pub async fn request(&self, method: &str, path: &str, user: Option<i64>) -> TestResponse {
        let mut req = Request::builder().method(method).uri(path);
        if let Some(user) = user {
            req = req.header("X-User-Id", user.to_string());
        }
        let req = req.body(Body::empty()).expect("Failed to build request");
        self.send(req).await
    }

    /// Upload a file to `/api/print` as the allowed user
    pub async fn upload(&self, file_name: &str, mime: &str, data: &[u8]) -> TestResponse {
        self.upload_as(Some(ALLOWED_USER), file_name, mime, data).await
    }

    /// Upload a file to `/api/print`
    pub async fn upload_as(
        &self,
        user: Option<i64>,
        file_name: &str,
        mime: &str,
        data: &[u8],
    ) -> TestResponse {
        let body = multipart_body(file_name, mime, data);

        let mut req = Request::builder()
            .method("POST")
            .uri("/api/print")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={}", BOUNDARY),
            );
        if let Some(user) = user {
            req = req.header("X-User-Id", user.to_string());
        }
        let req = req.body(Body::from(body)).expect("Failed to build request");
        self.send(req).await
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// A `multipart/form-data` body with `chat_id`, `message_id`, and `file` parts
fn multipart_body(file_name: &str, mime: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in [("chat_id", "1001"), ("message_id", "7")] {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {mime}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
