use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Duration;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::session::models::LoginCommand;
use crate::domain::session::models::Session;
use crate::domain::session::ports::SessionServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::UserResponseData;
use crate::inbound::http::router::AppState;

/// HTTP request body for logging in (raw JSON)
#[derive(Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
    /// Requested access token lifetime; capped server side.
    /// Values chrono cannot represent count as no request.
    expires_in_seconds: Option<i64>,
}

impl From<LoginRequest> for LoginCommand {
    fn from(req: LoginRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
            requested_ttl: req.expires_in_seconds.and_then(Duration::try_seconds),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    #[serde(flatten)]
    pub user: UserResponseData,
    pub token: String,
    pub refresh_token: String,
}

impl From<&Session> for LoginResponseData {
    fn from(session: &Session) -> Self {
        Self {
            user: (&session.user).into(),
            token: session.access_token.token.clone(),
            refresh_token: session.refresh_token.token.clone(),
        }
    }
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    state
        .session_service
        .login(body.into())
        .await
        .map_err(ApiError::from)
        .map(|ref session| ApiSuccess::new(StatusCode::OK, session.into()))
}
