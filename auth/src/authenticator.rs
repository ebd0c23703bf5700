use std::sync::OnceLock;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::AccessTokenCodec;
use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Default access token lifetime, also the ceiling for client requests.
pub const DEFAULT_ACCESS_TOKEN_TTL_SECONDS: i64 = 60 * 60;

/// Hash verified against when there is no stored hash, so a login for an
/// unknown subject costs the same as a wrong password.
static PLACEHOLDER_HASH: OnceLock<Option<String>> = OnceLock::new();

/// Authentication coordinator combining password verification and access tokens.
///
/// Owns the signing secret (through its codec) and the server-side lifetime
/// ceiling, so callers can only ever shorten a token's life.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    codec: AccessTokenCodec,
    access_token_ttl: Duration,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,

    /// When the access token stops verifying
    pub expires_at: DateTime<Utc>,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl From<PasswordError> for AuthenticationError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::Mismatch => AuthenticationError::InvalidCredentials,
            other => AuthenticationError::PasswordError(other),
        }
    }
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for access token signing
    /// * `access_token_ttl` - Default and maximum access token lifetime
    pub fn new(jwt_secret: &[u8], access_token_ttl: Duration) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            codec: AccessTokenCodec::new(jwt_secret),
            access_token_ttl,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Lifetime granted for a requested one.
    ///
    /// Absent, non-positive or over-long requests get the configured default.
    pub fn effective_ttl(&self, requested: Option<Duration>) -> Duration {
        match requested {
            Some(ttl) if ttl > Duration::zero() && ttl < self.access_token_ttl => ttl,
            _ => self.access_token_ttl,
        }
    }

    /// Verify credentials and issue an access token for `subject`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash could not be checked
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
        requested_ttl: Option<Duration>,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        self.password_hasher.verify(password, stored_hash)?;

        Ok(self.issue_access_token(subject, requested_ttl)?)
    }

    /// Reject a login for a subject that does not exist.
    ///
    /// Runs a full password verification against a placeholder hash first,
    /// then always returns `InvalidCredentials`.
    pub fn reject_unknown_subject(&self, password: &str) -> AuthenticationError {
        let placeholder = PLACEHOLDER_HASH
            .get_or_init(|| self.password_hasher.hash("chirpy-placeholder-password").ok());

        if let Some(hash) = placeholder {
            let _ = self.password_hasher.verify(password, hash);
        }

        AuthenticationError::InvalidCredentials
    }

    /// Issue an access token without password verification.
    ///
    /// Used by the refresh flow, where the caller proved itself with a
    /// refresh token instead.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn issue_access_token(
        &self,
        subject: &str,
        requested_ttl: Option<Duration>,
    ) -> Result<AuthenticationResult, JwtError> {
        let claims = Claims::for_subject(subject, Utc::now(), self.effective_ttl(requested_ttl));
        let access_token = self.codec.encode(&claims)?;
        let expires_at = claims
            .expires_at()
            .ok_or_else(|| JwtError::EncodingFailed("expiry out of range".to_string()))?;

        Ok(AuthenticationResult {
            access_token,
            expires_at,
        })
    }

    /// Validate an access token and return its subject.
    ///
    /// # Errors
    /// * `JwtError` - Token is malformed, expired, foreign or forged
    pub fn validate_token(&self, token: &str) -> Result<String, JwtError> {
        self.codec.verify(token)
    }
}
