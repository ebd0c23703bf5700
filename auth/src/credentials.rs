//! Authorization header parsing.
//!
//! Two schemes are recognised, each by its literal, case-sensitive prefix:
//! `Authorization: Bearer <token>` and `Authorization: ApiKey <key>`.
//! Anything else is treated as if no credential had been sent.

use http::header::AUTHORIZATION;
use http::HeaderMap;
use thiserror::Error;

const BEARER_PREFIX: &str = "Bearer ";
const API_KEY_PREFIX: &str = "ApiKey ";

/// Error type for credential extraction.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Missing or malformed Authorization header")]
    MissingHeader,
}

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// # Errors
/// * `MissingHeader` - Header absent, not valid UTF-8, of another scheme, or empty
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, CredentialError> {
    extract_with_prefix(headers, BEARER_PREFIX)
}

/// Extract the key from an `Authorization: ApiKey <key>` header.
///
/// A bare value without the `ApiKey ` prefix is rejected rather than taken as the key.
///
/// # Errors
/// * `MissingHeader` - Header absent, not valid UTF-8, of another scheme, or empty
pub fn extract_api_key(headers: &HeaderMap) -> Result<&str, CredentialError> {
    extract_with_prefix(headers, API_KEY_PREFIX)
}

fn extract_with_prefix<'a>(
    headers: &'a HeaderMap,
    prefix: &str,
) -> Result<&'a str, CredentialError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(CredentialError::MissingHeader)?;

    match value.strip_prefix(prefix) {
        Some(credential) if !credential.is_empty() => Ok(credential),
        _ => Err(CredentialError::MissingHeader),
    }
}
