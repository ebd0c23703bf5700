use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::ACCESS_TOKEN_ISSUER;
use super::errors::JwtError;

/// Signs and verifies short-lived access tokens.
///
/// Tokens are HS256 JWTs carrying a [`Claims`] envelope. Verification needs
/// no storage round-trip, so access tokens cannot be revoked before they
/// expire; keep the lifetime short.
pub struct AccessTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AccessTokenCodec {
    /// Create a codec with the server-wide signing secret.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens, at least 32 bytes for HS256
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_issuer(&[ACCESS_TOKEN_ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue a signed token for `subject` valid for `ttl` from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn issue(&self, subject: &str, ttl: Duration) -> Result<String, JwtError> {
        let claims = Claims::for_subject(subject, Utc::now(), ttl);
        self.encode(&claims)
    }

    /// Sign an explicit set of claims.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and return its subject.
    ///
    /// # Errors
    /// * `Malformed` - Token cannot be parsed, uses another algorithm or lacks claims
    /// * `BadSignature` - Signature does not match the signing secret
    /// * `BadIssuer` - Issuer tag is not [`ACCESS_TOKEN_ISSUER`]
    /// * `Expired` - Current time is past the expiry
    pub fn verify(&self, token: &str) -> Result<String, JwtError> {
        self.decode(token).map(|claims| claims.sub)
    }

    /// Verify a token and return the full claims.
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::Expired,
                ErrorKind::InvalidIssuer => JwtError::BadIssuer,
                ErrorKind::InvalidSignature => JwtError::BadSignature,
                _ => JwtError::Malformed(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::Duration as StdDuration;

    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    #[test]
    fn test_issue_and_verify() {
        let codec = AccessTokenCodec::new(SECRET);

        let token = codec
            .issue("user123", Duration::hours(1))
            .expect("Failed to issue token");
        assert!(!token.is_empty());

        let subject = codec.verify(&token).expect("Failed to verify token");
        assert_eq!(subject, "user123");
    }

    #[test]
    fn test_decode_returns_envelope() {
        let codec = AccessTokenCodec::new(SECRET);
        let token = codec.issue("user123", Duration::minutes(5)).unwrap();

        let claims = codec.decode(&token).unwrap();
        assert_eq!(claims.iss, ACCESS_TOKEN_ISSUER);
        assert_eq!(claims.exp - claims.iat, 5 * 60);
    }

    #[test]
    fn test_verify_garbage_is_malformed() {
        let codec = AccessTokenCodec::new(SECRET);

        assert!(matches!(
            codec.verify("invalid.token.here"),
            Err(JwtError::Malformed(_))
        ));
        assert!(matches!(codec.verify(""), Err(JwtError::Malformed(_))));
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let issuer = AccessTokenCodec::new(b"secret1_at_least_32_bytes_long_key!");
        let verifier = AccessTokenCodec::new(b"secret2_at_least_32_bytes_long_key!");

        let token = issuer.issue("user123", Duration::hours(1)).unwrap();

        assert_eq!(verifier.verify(&token), Err(JwtError::BadSignature));
    }

    #[test]
    fn test_verify_tampered_payload() {
        let codec = AccessTokenCodec::new(SECRET);
        let token = codec.issue("user123", Duration::hours(1)).unwrap();
        let other = codec.issue("user456", Duration::hours(1)).unwrap();

        // Splice the payload of one token onto the signature of another
        let parts: Vec<&str> = token.split('.').collect();
        let other_parts: Vec<&str> = other.split('.').collect();
        let forged = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);

        assert_eq!(codec.verify(&forged), Err(JwtError::BadSignature));
    }

    #[test]
    fn test_verify_foreign_issuer() {
        let codec = AccessTokenCodec::new(SECRET);
        let mut claims = Claims::for_subject("user123", Utc::now(), Duration::hours(1));
        claims.iss = "someone-else".to_string();

        let token = codec.encode(&claims).unwrap();

        assert_eq!(codec.verify(&token), Err(JwtError::BadIssuer));
    }

    #[test]
    fn test_verify_past_expiry() {
        let codec = AccessTokenCodec::new(SECRET);
        let claims = Claims::for_subject(
            "user123",
            Utc::now() - Duration::hours(2),
            Duration::hours(1),
        );
        let token = codec.encode(&claims).unwrap();

        assert_eq!(codec.verify(&token), Err(JwtError::Expired));
    }

    #[test]
    fn test_short_lived_token_expires() {
        let codec = AccessTokenCodec::new(SECRET);
        let token = codec.issue("user123", Duration::seconds(1)).unwrap();

        assert!(codec.verify(&token).is_ok());

        // Expiry has second granularity, so wait past the next full second
        thread::sleep(StdDuration::from_millis(2100));

        assert_eq!(codec.verify(&token), Err(JwtError::Expired));
    }

    #[test]
    fn test_verify_missing_claims_is_malformed() {
        #[derive(serde::Serialize)]
        struct Partial {
            sub: String,
        }

        let token = encode(
            &Header::new(Algorithm::HS256),
            &Partial {
                sub: "user123".to_string(),
            },
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        let codec = AccessTokenCodec::new(SECRET);
        assert!(matches!(codec.verify(&token), Err(JwtError::Malformed(_))));
    }

    #[test]
    fn test_verify_other_algorithm_is_malformed() {
        let claims = Claims::for_subject("user123", Utc::now(), Duration::hours(1));
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        let codec = AccessTokenCodec::new(SECRET);
        assert!(matches!(codec.verify(&token), Err(JwtError::Malformed(_))));
    }
}
