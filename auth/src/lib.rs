//! Credential primitives for the Chirpy backend.
//!
//! Storage-agnostic building blocks; the service crate persists refresh
//! tokens and composes these into its login/refresh/revoke flows:
//! - Password hashing (Argon2id)
//! - Access token issuance and verification (HS256 JWT)
//! - Opaque refresh token generation
//! - `Authorization` header parsing (`Bearer` and `ApiKey` schemes)
//! - Constant-time API key comparison
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).is_ok());
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::AccessTokenCodec;
//! use chrono::Duration;
//!
//! let codec = AccessTokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let token = codec.issue("user123", Duration::hours(1)).unwrap();
//! assert_eq!(codec.verify(&token).unwrap(), "user123");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(1));
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth.authenticate("password123", &hash, "user123", None).unwrap();
//!
//! // Validate token
//! let subject = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(subject, "user123");
//! ```

pub mod api_key;
pub mod authenticator;
pub mod credentials;
pub mod jwt;
pub mod password;
pub mod refresh;

// Re-export commonly used items
pub use api_key::ApiKey;
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use authenticator::DEFAULT_ACCESS_TOKEN_TTL_SECONDS;
pub use credentials::extract_api_key;
pub use credentials::extract_bearer;
pub use credentials::CredentialError;
pub use jwt::AccessTokenCodec;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use refresh::RefreshTokenIssuer;
