use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use crate::domain::session::ports::SessionServicePort;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetResponseData {
    pub users_deleted: u64,
    pub refresh_tokens_deleted: u64,
}

/// Wipe all users and refresh tokens. Refused outside development.
///
/// Chirps and refresh tokens go with their users through cascading deletes;
/// tokens are purged explicitly first so the count is reported.
pub async fn reset(
    State(state): State<AppState>,
) -> Result<ApiSuccess<ResetResponseData>, ApiError> {
    let refresh_tokens_deleted = state.session_service.purge().await?;
    let users_deleted = state.user_service.purge_users().await?;

    tracing::warn!(users_deleted, refresh_tokens_deleted, "Application state reset");

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ResetResponseData {
            users_deleted,
            refresh_tokens_deleted,
        },
    ))
}
