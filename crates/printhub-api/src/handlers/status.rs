//! Service status handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, QuietHoursInfo, StatusResponse};
use crate::extractors::Requester;
use crate::state::AppState;

/// GET /api/status
pub async fn status(
    State(state): State<AppState>,
    _requester: Requester,
) -> Json<ApiResponse<StatusResponse>> {
    let policy = state.policy();
    let window = policy.window();

    Json(ApiResponse::ok(StatusResponse {
        printer: state.config.printer.print_options(),
        max_file_mb: state.config.storage.max_file_mb,
        conversion_enabled: state.executor().conversion_enabled(),
        quiet_hours: QuietHoursInfo {
            start: window.start,
            end: window.end,
            timezone: policy.zone_name(),
            active: policy.is_quiet_now(),
        },
        local_time: policy.local_now(),
        queue_length: state.store().len().await,
    }))
}
