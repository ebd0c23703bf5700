use std::sync::Arc;

use async_trait::async_trait;
use auth::extract_api_key;
use auth::extract_bearer;
use auth::ApiKey;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;
use http::HeaderMap;

use super::errors::SessionError;
use super::models::AccessToken;
use super::models::LoginCommand;
use super::models::Session;
use super::ports::SessionServicePort;
use crate::domain::refresh_token::ledger::RefreshTokenLedger;
use crate::domain::refresh_token::ports::RefreshTokenRepository;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Authentication facade over users, access tokens and the refresh token ledger.
///
/// Holds the signing secret and the service API key; request handlers only
/// ever pass headers through.
pub struct SessionService<UR, RR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
{
    users: Arc<UR>,
    ledger: RefreshTokenLedger<RR>,
    authenticator: Authenticator,
    api_key: ApiKey,
}

impl<UR, RR> SessionService<UR, RR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
{
    /// # Arguments
    /// * `users` - User persistence, read only here
    /// * `ledger` - Refresh token ledger
    /// * `authenticator` - Password verification and access token signing
    /// * `api_key` - Key expected from trusted service callers
    pub fn new(
        users: Arc<UR>,
        ledger: RefreshTokenLedger<RR>,
        authenticator: Authenticator,
        api_key: ApiKey,
    ) -> Self {
        Self {
            users,
            ledger,
            authenticator,
            api_key,
        }
    }
}

#[async_trait]
impl<UR, RR> SessionServicePort for SessionService<UR, RR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
{
    async fn login(&self, command: LoginCommand) -> Result<Session, SessionError> {
        let user = self
            .users
            .find_by_email(&command.email)
            .await
            .map_err(SessionError::UserLookup)?
            .ok_or_else(|| {
                tracing::warn!("Login failed: unknown email");
                let _ = self.authenticator.reject_unknown_subject(&command.password);
                SessionError::InvalidCredentials
            })?;

        let result = self
            .authenticator
            .authenticate(
                &command.password,
                user.password_hash.as_str(),
                &user.id.to_string(),
                command.requested_ttl,
            )
            .map_err(|err| match err {
                AuthenticationError::InvalidCredentials => {
                    tracing::warn!(user_id = %user.id, "Login failed: password mismatch");
                    SessionError::InvalidCredentials
                }
                AuthenticationError::PasswordError(err) => SessionError::Password(err),
                AuthenticationError::JwtError(err) => SessionError::TokenIssue(err),
            })?;

        let refresh_token = self.ledger.issue_for(user.id).await?;
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(Session {
            user,
            access_token: result.into(),
            refresh_token,
        })
    }

    fn authenticate(&self, headers: &HeaderMap) -> Result<UserId, SessionError> {
        let token = extract_bearer(headers).inspect_err(|err| {
            tracing::warn!(error = %err, "Request authentication failed");
        })?;

        let subject = self.authenticator.validate_token(token).map_err(|err| {
            tracing::warn!(error = %err, "Access token rejected");
            SessionError::InvalidAccessToken(err)
        })?;

        UserId::from_string(&subject).map_err(|_| {
            tracing::warn!("Access token subject is not a user ID");
            SessionError::InvalidSubject
        })
    }

    async fn refresh(&self, headers: &HeaderMap) -> Result<AccessToken, SessionError> {
        let token = extract_bearer(headers)?;

        let row = self.ledger.lookup(token).await.inspect_err(|err| {
            tracing::warn!(error = %err, "Refresh failed");
        })?;
        self.ledger.validate(&row, Utc::now()).inspect_err(|err| {
            tracing::warn!(user_id = %row.user_id, error = %err, "Refresh failed");
        })?;

        let result = self
            .authenticator
            .issue_access_token(&row.user_id.to_string(), None)
            .map_err(SessionError::TokenIssue)?;
        tracing::debug!(user_id = %row.user_id, "Access token refreshed");

        Ok(result.into())
    }

    async fn revoke(&self, headers: &HeaderMap) -> Result<(), SessionError> {
        let token = extract_bearer(headers)?;

        self.ledger.revoke(token).await.inspect_err(|err| {
            tracing::warn!(error = %err, "Revoke failed");
        })?;
        tracing::info!("Refresh token revoked");

        Ok(())
    }

    fn authenticate_service(&self, headers: &HeaderMap) -> Result<(), SessionError> {
        let presented = extract_api_key(headers).inspect_err(|err| {
            tracing::warn!(error = %err, "Service authentication failed");
        })?;

        if !self.api_key.matches(presented) {
            tracing::warn!("Service authentication failed: API key mismatch");
            return Err(SessionError::InvalidApiKey);
        }

        Ok(())
    }

    async fn purge(&self) -> Result<u64, SessionError> {
        Ok(self.ledger.purge_all().await?)
    }
}
