use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::chirp::errors::ChirpError;
use crate::domain::chirp::models::Chirp;
use crate::domain::refresh_token::errors::RefreshTokenError;
use crate::domain::session::errors::SessionError;
use crate::domain::user::models::User;
use crate::user::errors::UserError;

pub mod admin;
pub mod chirps;
pub mod healthz;
pub mod sessions;
pub mod users;
pub mod webhooks;

const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";
const INTERNAL_MESSAGE: &str = "Internal server error";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
}

impl ApiError {
    /// Log the cause and hide it from the client.
    fn internal(cause: impl std::fmt::Display) -> Self {
        tracing::error!(error = %cause, "Request failed");
        ApiError::InternalServerError(INTERNAL_MESSAGE.to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::internal(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::EmailAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            UserError::InvalidEmail(_)
            | UserError::InvalidPassword(_)
            | UserError::InvalidUserId(_) => ApiError::UnprocessableEntity(err.to_string()),
            UserError::PurgeForbidden => ApiError::Forbidden(err.to_string()),
            UserError::Password(_) | UserError::DatabaseError(_) | UserError::Unknown(_) => {
                ApiError::internal(err)
            }
        }
    }
}

impl From<ChirpError> for ApiError {
    fn from(err: ChirpError) -> Self {
        match err {
            ChirpError::InvalidChirpBody(_) => ApiError::UnprocessableEntity(err.to_string()),
            ChirpError::InvalidChirpId(_)
            | ChirpError::InvalidUserId(_)
            | ChirpError::InvalidSortOrder(_) => ApiError::BadRequest(err.to_string()),
            ChirpError::NotFound(_) => ApiError::NotFound(err.to_string()),
            ChirpError::NotAuthor { .. } => {
                ApiError::Forbidden("Only the author can delete a chirp".to_string())
            }
            ChirpError::DatabaseError(_) | ChirpError::Unknown(_) => ApiError::internal(err),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            SessionError::RefreshToken(RefreshTokenError::PurgeForbidden) => {
                ApiError::Forbidden(RefreshTokenError::PurgeForbidden.to_string())
            }
            err if err.is_unauthorized() => {
                ApiError::Unauthorized(UNAUTHORIZED_MESSAGE.to_string())
            }
            err => ApiError::internal(err),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Public view of a user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResponseData {
    pub id: String,
    pub email: String,
    pub is_chirpy_red: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponseData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.as_str().to_string(),
            is_chirpy_red: user.is_chirpy_red,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChirpResponseData {
    pub id: String,
    pub body: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Chirp> for ChirpResponseData {
    fn from(chirp: &Chirp) -> Self {
        Self {
            id: chirp.id.to_string(),
            body: chirp.body.as_str().to_string(),
            user_id: chirp.user_id.to_string(),
            created_at: chirp.created_at,
            updated_at: chirp.updated_at,
        }
    }
}
