use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use crate::domain::chirp::errors::ChirpError;
use crate::domain::chirp::models::ChirpBody;
use crate::domain::chirp::ports::ChirpServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::ChirpResponseData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateChirpRequest {
    body: String,
}

/// The author is always the authenticated caller.
pub async fn create_chirp(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Json(req): Json<CreateChirpRequest>,
) -> Result<ApiSuccess<ChirpResponseData>, ApiError> {
    let body = ChirpBody::new(req.body).map_err(ChirpError::from)?;

    state
        .chirp_service
        .create_chirp(caller.user_id, body)
        .await
        .map_err(ApiError::from)
        .map(|ref chirp| ApiSuccess::new(StatusCode::CREATED, chirp.into()))
}
