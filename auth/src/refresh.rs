use rand::Rng;

/// Number of random bytes backing a refresh token (256 bits).
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Generates opaque refresh tokens.
///
/// A refresh token is a capability reference: it embeds no claims and is
/// only meaningful together with the persisted ledger row it names.
#[derive(Debug, Clone, Copy, Default)]
pub struct RefreshTokenIssuer;

impl RefreshTokenIssuer {
    pub fn new() -> Self {
        Self
    }

    /// Generate a new hex-encoded token from the thread-local CSPRNG.
    pub fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        let token_bytes: [u8; REFRESH_TOKEN_BYTES] = rng.gen();
        hex::encode(token_bytes)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_generate_length_and_alphabet() {
        let token = RefreshTokenIssuer::new().generate();

        assert_eq!(token.len(), REFRESH_TOKEN_BYTES * 2);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generate_is_unique() {
        let issuer = RefreshTokenIssuer::new();
        let tokens: HashSet<String> = (0..1000).map(|_| issuer.generate()).collect();

        assert_eq!(tokens.len(), 1000);
    }
}
