use async_trait::async_trait;
use http::HeaderMap;

use super::errors::SessionError;
use super::models::AccessToken;
use super::models::LoginCommand;
use super::models::Session;
use crate::domain::user::models::UserId;

/// Port for authentication and credential lifecycle operations.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Verify email and password, then issue an access and a refresh token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password, indistinguishably
    /// * `RefreshToken(Conflict)` - Generated refresh token collided
    /// * `Password`, `TokenIssue`, `UserLookup` - Infrastructure failures
    async fn login(&self, command: LoginCommand) -> Result<Session, SessionError>;

    /// Resolve the calling user from an `Authorization: Bearer` access token.
    ///
    /// # Errors
    /// * `MissingCredentials` - No bearer token
    /// * `InvalidAccessToken` - Token malformed, forged, foreign or expired
    /// * `InvalidSubject` - Token subject is not a user ID
    fn authenticate(&self, headers: &HeaderMap) -> Result<UserId, SessionError>;

    /// Exchange the bearer refresh token for a new access token.
    ///
    /// The refresh token itself is left untouched.
    ///
    /// # Errors
    /// * `MissingCredentials` - No bearer token
    /// * `RefreshToken(NotFound | Expired | Revoked)` - Token unusable
    async fn refresh(&self, headers: &HeaderMap) -> Result<AccessToken, SessionError>;

    /// Revoke the bearer refresh token.
    ///
    /// # Errors
    /// * `MissingCredentials` - No bearer token
    /// * `RefreshToken(NotFound)` - Token was never issued
    async fn revoke(&self, headers: &HeaderMap) -> Result<(), SessionError>;

    /// Check an `Authorization: ApiKey` header against the configured key.
    ///
    /// # Errors
    /// * `MissingCredentials` - No API key header
    /// * `InvalidApiKey` - Key does not match
    fn authenticate_service(&self, headers: &HeaderMap) -> Result<(), SessionError>;

    /// Delete every refresh token. Development only.
    ///
    /// # Errors
    /// * `RefreshToken(PurgeForbidden)` - Service runs outside development
    async fn purge(&self) -> Result<u64, SessionError>;
}
