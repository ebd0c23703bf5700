use thiserror::Error;

/// Errors of the refresh token ledger.
///
/// Messages never include the token string itself.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RefreshTokenError {
    #[error("Refresh token not found")]
    NotFound,

    #[error("Refresh token already exists")]
    Conflict,

    #[error("Refresh token is expired")]
    Expired,

    #[error("Refresh token is revoked")]
    Revoked,

    #[error("Purging refresh tokens is only allowed in development")]
    PurgeForbidden,

    #[error("Database error: {0}")]
    DatabaseError(String),
}
