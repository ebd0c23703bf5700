use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::session::ports::SessionServicePort;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

const USER_UPGRADED: &str = "user.upgraded";

#[derive(Debug, Deserialize)]
pub struct PolkaEvent {
    event: String,
    data: PolkaEventData,
}

#[derive(Debug, Deserialize)]
pub struct PolkaEventData {
    user_id: Uuid,
}

/// Payment provider callback. Upgrades a user on `user.upgraded` and
/// acknowledges every other event without acting on it.
///
/// The API key is checked before the body is even looked at.
pub async fn polka_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<PolkaEvent>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    state.session_service.authenticate_service(&headers)?;

    let Json(payload) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    if payload.event != USER_UPGRADED {
        tracing::debug!(event = %payload.event, "Ignoring webhook event");
        return Ok(StatusCode::NO_CONTENT);
    }

    state
        .user_service
        .upgrade_to_chirpy_red(&UserId(payload.data.user_id))
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}
