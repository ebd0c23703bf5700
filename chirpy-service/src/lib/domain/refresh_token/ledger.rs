use std::sync::Arc;

use auth::RefreshTokenIssuer;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use super::errors::RefreshTokenError;
use super::models::RefreshToken;
use super::ports::RefreshTokenRepository;
use crate::config::Platform;
use crate::domain::user::models::UserId;

/// Fixed lifetime of a refresh token. Never extended after creation.
pub const REFRESH_TOKEN_LIFETIME_DAYS: i64 = 60;

/// Record of issued refresh tokens with their expiry and revocation state.
///
/// Rows are created at login, only read on refresh, and only ever gain a
/// `revoked_at` afterwards. Nothing here deletes a row except the
/// development-only [`RefreshTokenLedger::purge_all`].
pub struct RefreshTokenLedger<RR>
where
    RR: RefreshTokenRepository,
{
    repository: Arc<RR>,
    issuer: RefreshTokenIssuer,
    platform: Platform,
}

impl<RR> RefreshTokenLedger<RR>
where
    RR: RefreshTokenRepository,
{
    /// # Arguments
    /// * `repository` - Refresh token persistence implementation
    /// * `platform` - Deployment environment, gates [`Self::purge_all`]
    pub fn new(repository: Arc<RR>, platform: Platform) -> Self {
        Self {
            repository,
            issuer: RefreshTokenIssuer::new(),
            platform,
        }
    }

    /// Persist a token for `user_id` expiring at `expires_at`.
    ///
    /// # Errors
    /// * `Conflict` - Token string was issued before
    /// * `DatabaseError` - Database operation failed
    pub async fn create(
        &self,
        token: String,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshToken, RefreshTokenError> {
        let now = Utc::now();
        let row = RefreshToken {
            token,
            user_id,
            created_at: now,
            updated_at: now,
            expires_at,
            revoked_at: None,
        };

        self.repository.create(row).await
    }

    /// Generate and persist a fresh token with the fixed 60 day lifetime.
    ///
    /// # Errors
    /// * `Conflict` - Generated token collided with an existing one
    /// * `DatabaseError` - Database operation failed
    pub async fn issue_for(&self, user_id: UserId) -> Result<RefreshToken, RefreshTokenError> {
        let expires_at = Utc::now() + Duration::days(REFRESH_TOKEN_LIFETIME_DAYS);
        let row = self
            .create(self.issuer.generate(), user_id, expires_at)
            .await?;

        tracing::debug!(user_id = %user_id, expires_at = %row.expires_at, "Refresh token issued");

        Ok(row)
    }

    /// Fetch the row for a token string.
    ///
    /// # Errors
    /// * `NotFound` - Token was never issued
    /// * `DatabaseError` - Database operation failed
    pub async fn lookup(&self, token: &str) -> Result<RefreshToken, RefreshTokenError> {
        self.repository
            .find(token)
            .await?
            .ok_or(RefreshTokenError::NotFound)
    }

    /// Revoke a token.
    ///
    /// Revoking an already revoked token succeeds and keeps the original
    /// revocation time.
    ///
    /// # Errors
    /// * `NotFound` - Token was never issued
    /// * `DatabaseError` - Database operation failed
    pub async fn revoke(&self, token: &str) -> Result<(), RefreshTokenError> {
        self.repository.mark_revoked(token, Utc::now()).await
    }

    /// Check a fetched row at time `now`.
    ///
    /// Expiry is checked before revocation, so a row that is both reports
    /// `Expired`.
    ///
    /// # Errors
    /// * `Expired` - `now` is at or past `expires_at`
    /// * `Revoked` - `revoked_at` is set
    pub fn validate(
        &self,
        row: &RefreshToken,
        now: DateTime<Utc>,
    ) -> Result<(), RefreshTokenError> {
        if row.is_expired_at(now) {
            return Err(RefreshTokenError::Expired);
        }
        if row.is_revoked() {
            return Err(RefreshTokenError::Revoked);
        }
        Ok(())
    }

    /// Delete every refresh token.
    ///
    /// # Errors
    /// * `PurgeForbidden` - Ledger was not constructed for development
    /// * `DatabaseError` - Database operation failed
    pub async fn purge_all(&self) -> Result<u64, RefreshTokenError> {
        if !self.platform.allows_purge() {
            tracing::warn!(platform = ?self.platform, "Refused to purge refresh tokens");
            return Err(RefreshTokenError::PurgeForbidden);
        }

        let removed = self.repository.delete_all().await?;
        tracing::warn!(removed, "All refresh tokens purged");

        Ok(removed)
    }
}
