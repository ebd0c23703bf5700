use auth::CredentialError;
use auth::JwtError;
use auth::PasswordError;
use thiserror::Error;

use crate::domain::refresh_token::errors::RefreshTokenError;
use crate::domain::user::errors::UserError;

/// Errors of the login, refresh, revoke and request authentication flows.
///
/// Every variant except the infrastructure ones is presented to clients as
/// a plain "unauthorized"; the detail is for logs.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("Missing credentials: {0}")]
    MissingCredentials(#[from] CredentialError),

    #[error("Invalid access token: {0}")]
    InvalidAccessToken(JwtError),

    #[error("Access token subject is not a user ID")]
    InvalidSubject,

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Refresh token error: {0}")]
    RefreshToken(#[from] RefreshTokenError),

    // Infrastructure errors
    #[error("Password error: {0}")]
    Password(PasswordError),

    #[error("Token issue failed: {0}")]
    TokenIssue(JwtError),

    #[error("User lookup failed: {0}")]
    UserLookup(UserError),
}

impl SessionError {
    /// Whether the caller failed to prove who it is, as opposed to the
    /// server failing to check.
    pub fn is_unauthorized(&self) -> bool {
        match self {
            SessionError::InvalidCredentials
            | SessionError::MissingCredentials(_)
            | SessionError::InvalidAccessToken(_)
            | SessionError::InvalidSubject
            | SessionError::InvalidApiKey => true,
            SessionError::RefreshToken(err) => matches!(
                err,
                RefreshTokenError::NotFound
                    | RefreshTokenError::Expired
                    | RefreshTokenError::Revoked
            ),
            SessionError::Password(_) | SessionError::TokenIssue(_) | SessionError::UserLookup(_) => {
                false
            }
        }
    }
}
