use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use super::errors::RefreshTokenError;
use super::models::RefreshToken;

/// Persistence operations for refresh tokens.
///
/// Each call is a single-row statement; no multi-row transaction is needed.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync + 'static {
    /// Insert a new token row.
    ///
    /// # Errors
    /// * `Conflict` - A row with the same token string exists
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, token: RefreshToken) -> Result<RefreshToken, RefreshTokenError>;

    /// Exact-match lookup by token string.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find(&self, token: &str) -> Result<Option<RefreshToken>, RefreshTokenError>;

    /// Set `revoked_at` to `at` unless it is already set.
    ///
    /// # Errors
    /// * `NotFound` - No row with this token string
    /// * `DatabaseError` - Database operation failed
    async fn mark_revoked(&self, token: &str, at: DateTime<Utc>)
        -> Result<(), RefreshTokenError>;

    /// Remove every row, returning how many were removed.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn delete_all(&self) -> Result<u64, RefreshTokenError>;
}
