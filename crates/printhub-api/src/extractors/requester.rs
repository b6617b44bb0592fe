//! `Requester` extractor: identifies the caller and enforces the allow-list.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use printhub_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the numeric ID of the user the request acts for.
pub const USER_ID_HEADER: &str = "x-user-id";

/// An allowed caller, identified by the chat user ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requester(pub i64);

impl Requester {
    /// The caller's user ID.
    pub fn user_id(&self) -> i64 {
        self.0
    }
}

impl FromRequestParts<AppState> for Requester {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let access = &state.config.access;

        // An empty allow-list denies everyone.
        if !access.is_configured() {
            tracing::warn!("Request denied: no allowed user IDs configured");
            return Err(AppError::authorization(
                "Access denied: no allowed users are configured",
            )
            .into());
        }

        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::authorization("Missing X-User-Id header"))?;

        let user_id: i64 = raw
            .trim()
            .parse()
            .map_err(|_| AppError::authorization("Invalid X-User-Id header"))?;

        if !access.is_allowed(user_id) {
            tracing::warn!(user_id, "Request denied: user not in allow-list");
            return Err(AppError::authorization("Access denied").into());
        }

        Ok(Requester(user_id))
    }
}
