use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;

use crate::domain::refresh_token::errors::RefreshTokenError;
use crate::domain::session::errors::SessionError;
use crate::domain::session::ports::SessionServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Revoke the bearer refresh token. Revoking twice is not an error.
pub async fn revoke(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    match state.session_service.revoke(&headers).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        // Unlike refresh, an unknown token is reported as such here
        Err(SessionError::RefreshToken(RefreshTokenError::NotFound)) => {
            Err(ApiError::NotFound("Refresh token not found".to_string()))
        }
        Err(err) => Err(err.into()),
    }
}
