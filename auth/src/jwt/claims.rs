use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Issuer tag stamped on every access token and required on verification.
pub const ACCESS_TOKEN_ISSUER: &str = "chirpy-access";

/// Access token claims.
///
/// A self-contained envelope: subject, issue time, expiry and issuer.
/// Timestamps are Unix seconds as mandated by RFC 7519.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Issued at
    pub iat: i64,

    /// Expiration time
    pub exp: i64,

    /// Issuer
    pub iss: String,
}

impl Claims {
    /// Create claims for a subject valid for `ttl` starting at `now`.
    pub fn for_subject(subject: impl ToString, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            iss: ACCESS_TOKEN_ISSUER.to_string(),
        }
    }

    /// Expiry as a timestamp.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_subject() {
        let now = Utc::now();
        let claims = Claims::for_subject("user123", now, Duration::hours(1));

        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.iss, ACCESS_TOKEN_ISSUER);
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp - claims.iat, 60 * 60);
    }

    #[test]
    fn test_expires_at() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let claims = Claims::for_subject("user123", now, Duration::seconds(30));

        assert_eq!(
            claims.expires_at(),
            DateTime::from_timestamp(1_700_000_030, 0)
        );
    }
}
