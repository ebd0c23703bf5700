use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::session::ports::SessionServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshResponseData {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Exchange the bearer refresh token for a new access token.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<ApiSuccess<RefreshResponseData>, ApiError> {
    state
        .session_service
        .refresh(&headers)
        .await
        .map_err(ApiError::from)
        .map(|access| {
            ApiSuccess::new(
                StatusCode::OK,
                RefreshResponseData {
                    token: access.token,
                    expires_at: access.expires_at,
                },
            )
        })
}
