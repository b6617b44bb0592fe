//! Integration tests for the requester allow-list.

use axum::http::StatusCode;

use crate::helpers::{self, ALLOWED_USER, TestApp};

#[tokio::test]
async fn test_health_needs_no_identity() {
    let app = TestApp::at(helpers::utc(12, 0)).await;

    let response = app.request("GET", "/api/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_missing_user_header_is_forbidden() {
    let app = TestApp::at(helpers::utc(12, 0)).await;

    let response = app.request("GET", "/api/queue", None).await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "FORBIDDEN");
}

#[tokio::test]
async fn test_unknown_user_cannot_print() {
    let app = TestApp::at(helpers::utc(12, 0)).await;

    let response = app
        .upload_as(Some(7), "scan.pdf", "application/pdf", b"%PDF-1.4")
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert!(app.printer.printed().is_empty());
}

#[tokio::test]
async fn test_empty_allow_list_denies_everyone() {
    let app = TestApp::configured(helpers::utc(12, 0), |config| {
        config.access.allowed_user_ids.clear();
    })
    .await;

    let response = app.request("GET", "/api/status", Some(ALLOWED_USER)).await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}
