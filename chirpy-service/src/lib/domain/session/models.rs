use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::domain::refresh_token::models::RefreshToken;
use crate::domain::user::models::User;

/// Login attempt as received from a client.
///
/// The email is deliberately left unvalidated: a malformed address is just
/// another unknown account.
pub struct LoginCommand {
    pub email: String,
    pub password: String,
    pub requested_ttl: Option<Duration>,
}

impl fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCommand")
            .field("email", &self.email)
            .field("password", &"***")
            .field("requested_ttl", &self.requested_ttl)
            .finish()
    }
}

/// Signed access token and its expiry.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl From<auth::AuthenticationResult> for AccessToken {
    fn from(result: auth::AuthenticationResult) -> Self {
        Self {
            token: result.access_token,
            expires_at: result.expires_at,
        }
    }
}

/// Outcome of a successful login.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub access_token: AccessToken,
    pub refresh_token: RefreshToken,
}
