//! Integration tests for the status endpoint.

use axum::http::StatusCode;

use crate::helpers::{self, ALLOWED_USER, TestApp};

#[tokio::test]
async fn test_status_reports_quiet_hours_and_queue() {
    let app = TestApp::at(helpers::utc(23, 0)).await;
    app.upload("scan.pdf", "application/pdf", b"%PDF-1.4").await;

    let response = app.request("GET", "/api/status", Some(ALLOWED_USER)).await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["quiet_hours"]["active"], true);
    assert_eq!(data["quiet_hours"]["start"], "22:30:00");
    assert_eq!(data["quiet_hours"]["end"], "09:00:00");
    assert_eq!(data["quiet_hours"]["timezone"], "UTC");
    assert_eq!(data["queue_length"], 1);
    assert_eq!(data["max_file_mb"], 1);
    assert_eq!(data["conversion_enabled"], false);
    assert_eq!(data["printer"]["media"], "A4");
}

#[tokio::test]
async fn test_status_outside_quiet_hours() {
    let app = TestApp::at(helpers::utc(10, 0)).await;

    let response = app.request("GET", "/api/status", Some(ALLOWED_USER)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["quiet_hours"]["active"], false);
    assert_eq!(response.body["data"]["queue_length"], 0);
}
