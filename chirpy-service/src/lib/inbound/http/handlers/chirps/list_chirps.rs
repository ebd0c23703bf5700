use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use crate::domain::chirp::errors::ChirpError;
use crate::domain::chirp::models::ChirpFilter;
use crate::domain::chirp::models::SortOrder;
use crate::domain::chirp::ports::ChirpServicePort;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::ChirpResponseData;
use crate::inbound::http::router::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ChirpQuery {
    author_id: Option<String>,
    sort: Option<String>, // "asc" or "desc"
}

impl ChirpQuery {
    fn try_into_filter(self) -> Result<ChirpFilter, ChirpError> {
        let author_id = self
            .author_id
            .as_deref()
            .map(UserId::from_string)
            .transpose()?;
        let sort = self
            .sort
            .as_deref()
            .map(str::parse::<SortOrder>)
            .transpose()?
            .unwrap_or_default();

        Ok(ChirpFilter { author_id, sort })
    }
}

pub async fn list_chirps(
    State(state): State<AppState>,
    Query(params): Query<ChirpQuery>,
) -> Result<ApiSuccess<Vec<ChirpResponseData>>, ApiError> {
    let filter = params.try_into_filter()?;

    state
        .chirp_service
        .list_chirps(filter)
        .await
        .map_err(ApiError::from)
        .map(|chirps| {
            let chirp_data: Vec<ChirpResponseData> = chirps.iter().map(|c| c.into()).collect();
            ApiSuccess::new(StatusCode::OK, chirp_data)
        })
}
