//! Integration tests for file submission.

use axum::http::StatusCode;

use crate::helpers::{self, TestApp};

#[tokio::test]
async fn test_pdf_prints_immediately_outside_quiet_hours() {
    let app = TestApp::at(helpers::utc(12, 0)).await;

    let response = app.upload("scan.pdf", "application/pdf", b"%PDF-1.4").await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["status"], "printed");

    let printed = app.printer.printed();
    assert_eq!(printed.len(), 1);
    let name = printed[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.ends_with("_scan.pdf"));
    assert_eq!(response.body["data"]["file_name"], name.as_str());
    assert!(printed[0].starts_with(app.dir.path()));
    assert!(app.state.store().is_empty().await);
}

#[tokio::test]
async fn test_photo_is_queued_during_quiet_hours() {
    let app = TestApp::at(helpers::utc(23, 0)).await;

    let response = app.upload("cat.jpg", "image/jpeg", b"\xFF\xD8\xFF").await;

    assert_eq!(response.status, StatusCode::ACCEPTED, "{:?}", response.body);
    let data = &response.body["data"];
    assert_eq!(data["status"], "queued");
    assert_eq!(data["release_at"], "09:00:00");
    assert_eq!(data["position"], 1);
    assert!(data["job_id"].is_string());

    assert!(app.printer.printed().is_empty());

    let jobs = app.state.store().list_all().await;
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].origin.chat_id, 1001);
    assert_eq!(jobs[0].origin.message_id, 7);
    assert!(jobs[0].file_path.exists());
}

#[tokio::test]
async fn test_unsupported_type_is_rejected() {
    let app = TestApp::at(helpers::utc(12, 0)).await;

    let response = app.upload("archive.zip", "application/zip", b"PK\x03\x04").await;

    assert_eq!(response.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(response.body["error"], "UNSUPPORTED_MEDIA_TYPE");
    assert_eq!(response.body["message"], "Unsupported file type: application/zip");
    assert!(app.printer.printed().is_empty());
}

#[tokio::test]
async fn test_office_document_rejected_without_conversion() {
    let app = TestApp::at(helpers::utc(12, 0)).await;

    let response = app
        .upload(
            "report.docx",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            b"PK\x03\x04",
        )
        .await;

    assert_eq!(response.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(app.state.store().is_empty().await);
}

#[tokio::test]
async fn test_oversized_file_is_rejected() {
    let app = TestApp::at(helpers::utc(12, 0)).await;
    let data = vec![0u8; 1024 * 1024 + 1];

    let response = app.upload("big.pdf", "application/pdf", &data).await;

    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(response.body["message"], "File too large (max 1 MB)");
    assert!(app.printer.printed().is_empty());
}

#[tokio::test]
async fn test_printer_failure_is_reported_and_not_queued() {
    let app = TestApp::with_failing_printer(helpers::utc(12, 0), "printer offline").await;

    let response = app.upload("scan.pdf", "application/pdf", b"%PDF-1.4").await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_eq!(response.body["error"], "PRINT_FAILED");
    assert!(
        response.body["message"]
            .as_str()
            .unwrap()
            .contains("printer offline")
    );
    assert!(app.state.store().is_empty().await);
}
