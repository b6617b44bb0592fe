//! Queue inspection and manual processing handlers.

use axum::Json;
use axum::extract::State;

use printhub_core::error::AppError;
use printhub_worker::ProcessOutcome;

use crate::dto::response::{ApiResponse, ProcessResponse, ProcessedJob, QueueResponse};
use crate::error::ApiError;
use crate::extractors::Requester;
use crate::state::AppState;

/// GET /api/queue
pub async fn list_queue(
    State(state): State<AppState>,
    _requester: Requester,
) -> Json<ApiResponse<QueueResponse>> {
    let jobs = state.store().list_all().await;
    Json(ApiResponse::ok(QueueResponse::from_jobs(jobs)))
}

/// POST /api/queue/process
///
/// Refused with 409 while quiet hours are active.
pub async fn process_queue(
    State(state): State<AppState>,
    requester: Requester,
) -> Result<Json<ApiResponse<ProcessResponse>>, ApiError> {
    tracing::info!(user_id = requester.user_id(), "Manual queue processing requested");

    let report = match state.dispatcher.process_queue_now().await {
        ProcessOutcome::QuietHoursActive => {
            let quiet = &state.config.quiet_hours;
            let err = AppError::conflict(format!(
                "Quiet hours are active ({}-{}); the queue will be processed at {}",
                quiet.start, quiet.end, quiet.end
            ));
            return Err(ApiError::from(err)
                .with_code("QUIET_HOURS_ACTIVE")
                .with_details(serde_json::json!({
                    "start": quiet.start,
                    "end": quiet.end,
                    "timezone": state.policy().zone_name(),
                })));
        }
        ProcessOutcome::Processed(report) => report,
    };

    let summary = report.summary();
    let body = ProcessResponse {
        processed: summary.total(),
        succeeded: summary.succeeded,
        failed: summary.failed,
        results: report.results.iter().map(ProcessedJob::from).collect(),
        warning: report
            .persist_error
            .as_ref()
            .map(|e| format!("Queue could not be saved: {}", e.message)),
    };

    Ok(Json(ApiResponse::ok(body)))
}
