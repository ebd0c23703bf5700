use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::EmailError;
use crate::user::errors::PasswordInputError;
use crate::user::errors::UserIdError;

/// User aggregate entity.
///
/// Represents a registered user and their plan.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub password_hash: PasswordHash,
    pub is_chirpy_red: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Arguments
    /// * `s` - UUID string to parse
    ///
    /// # Returns
    /// Parsed UserId
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string
    ///
    /// # Returns
    /// Validated EmailAddress value object
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    ///
    /// # Returns
    /// Email string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Stored Argon2 password hash.
///
/// Debug output is redacted so the hash never reaches the logs.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn new(hash: String) -> Self {
        Self(hash)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(***)")
    }
}

/// Plaintext password as submitted by a client, not yet hashed.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    /// # Errors
    /// * `Empty` - Password is the empty string
    pub fn new(password: String) -> Result<Self, PasswordInputError> {
        if password.is_empty() {
            Err(PasswordInputError::Empty)
        } else {
            Ok(Self(password))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Command to create a new user with domain types
#[derive(Debug)]
pub struct CreateUserCommand {
    pub email: EmailAddress,
    pub password: Password,
}

impl CreateUserCommand {
    /// Construct a new create user command.
    ///
    /// # Arguments
    /// * `email` - Validated email address
    /// * `password` - Plain text password (will be hashed by service)
    pub fn new(email: EmailAddress, password: Password) -> Self {
        Self { email, password }
    }
}

/// Command to replace the credentials of the authenticated user.
#[derive(Debug)]
pub struct UpdateUserCommand {
    pub email: EmailAddress,
    pub password: Password,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(EmailAddress::new("walt@breakingbad.com".to_string()).is_ok());
        assert!(matches!(
            EmailAddress::new("not-an-email".to_string()),
            Err(EmailError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_user_id_round_trip_through_string() {
        let id = UserId::new();
        assert_eq!(UserId::from_string(&id.to_string()), Ok(id));
        assert!(UserId::from_string("nope").is_err());
    }

    #[test]
    fn test_secrets_are_redacted_in_debug() {
        let user = User {
            id: UserId::new(),
            email: EmailAddress::new("walt@breakingbad.com".to_string()).unwrap(),
            password_hash: PasswordHash::new("$argon2id$v=19$secret".to_string()),
            is_chirpy_red: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let password = Password::new("04234".to_string()).unwrap();

        assert!(!format!("{:?}", user).contains("secret"));
        assert!(!format!("{:?}", password).contains("04234"));
    }

    #[test]
    fn test_empty_password_rejected() {
        assert!(matches!(
            Password::new(String::new()),
            Err(PasswordInputError::Empty)
        ));
    }
}
