use thiserror::Error;

/// Error type for access token operations.
///
/// Every verification variant is reported to clients as the same
/// "unauthorized" outcome; the distinction exists for logs and tests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token issuer is not accepted")]
    BadIssuer,

    #[error("Token is expired")]
    Expired,

    #[error("Token signature is invalid")]
    BadSignature,
}
