//! Integration tests for queue inspection and manual processing.

use axum::http::StatusCode;

use crate::helpers::{self, ALLOWED_USER, TestApp};

#[tokio::test]
async fn test_queue_lists_jobs_in_order() {
    let app = TestApp::at(helpers::utc(23, 30)).await;
    app.upload("first.pdf", "application/pdf", b"%PDF-1.4").await;
    app.upload("second.png", "image/png", b"\x89PNG").await;

    let response = app.request("GET", "/api/queue", Some(ALLOWED_USER)).await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["count"], 2);
    assert_eq!(data["jobs"][0]["position"], 1);
    assert!(
        data["jobs"][0]["file_name"]
            .as_str()
            .unwrap()
            .ends_with("_first.pdf")
    );
    assert_eq!(data["jobs"][1]["position"], 2);
    assert!(
        data["jobs"][1]["file_name"]
            .as_str()
            .unwrap()
            .ends_with("_second.png")
    );
}

#[tokio::test]
async fn test_manual_processing_refused_during_quiet_hours() {
    let app = TestApp::at(helpers::utc(23, 0)).await;
    app.upload("scan.pdf", "application/pdf", b"%PDF-1.4").await;

    let response = app
        .request("POST", "/api/queue/process", Some(ALLOWED_USER))
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "QUIET_HOURS_ACTIVE");
    assert_eq!(response.body["details"]["end"], "09:00");
    assert_eq!(app.state.store().len().await, 1);
    assert!(app.printer.printed().is_empty());
}

#[tokio::test]
async fn test_manual_processing_prints_queue_after_quiet_hours() {
    let app = TestApp::at(helpers::utc(23, 0)).await;
    app.upload("a.pdf", "application/pdf", b"%PDF-1.4").await;
    app.upload("b.jpg", "image/jpeg", b"\xFF\xD8\xFF").await;

    app.clock.set(helpers::utc(9, 30));
    let response = app
        .request("POST", "/api/queue/process", Some(ALLOWED_USER))
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let data = &response.body["data"];
    assert_eq!(data["processed"], 2);
    assert_eq!(data["succeeded"], 2);
    assert_eq!(data["failed"], 0);
    assert_eq!(data["results"][0]["success"], true);
    assert!(data.get("warning").is_none());

    assert_eq!(app.printer.printed().len(), 2);
    assert!(app.state.store().is_empty().await);
}

#[tokio::test]
async fn test_processing_empty_queue_is_a_no_op() {
    let app = TestApp::at(helpers::utc(15, 0)).await;

    let response = app
        .request("POST", "/api/queue/process", Some(ALLOWED_USER))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["processed"], 0);
    assert!(app.printer.printed().is_empty());
}
