use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::chirp::errors::ChirpError;
use crate::domain::chirp::models::ChirpId;
use crate::domain::chirp::ports::ChirpServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::ChirpResponseData;
use crate::inbound::http::router::AppState;

pub async fn get_chirp(
    State(state): State<AppState>,
    Path(chirp_id): Path<String>,
) -> Result<ApiSuccess<ChirpResponseData>, ApiError> {
    let chirp_id = ChirpId::from_string(&chirp_id).map_err(ChirpError::from)?;

    state
        .chirp_service
        .get_chirp(chirp_id)
        .await
        .map_err(ApiError::from)
        .map(|ref chirp| ApiSuccess::new(StatusCode::OK, chirp.into()))
}
