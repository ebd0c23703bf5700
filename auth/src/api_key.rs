use std::fmt;

use subtle::ConstantTimeEq;

/// Static shared secret identifying a trusted server-to-server caller.
///
/// Loaded once from configuration and only ever compared.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Compare a presented key against this one in constant time.
    ///
    /// Length differences return early; the key length is not secret.
    pub fn matches(&self, presented: &str) -> bool {
        let expected = self.0.as_bytes();
        let presented = presented.as_bytes();

        if expected.len() != presented.len() {
            return false;
        }

        expected.ct_eq(presented).into()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}
