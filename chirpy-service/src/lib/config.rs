use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Shortest accepted signing secret, in bytes.
pub const MIN_JWT_SECRET_LEN: usize = 32;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub polka: PolkaConfig,
    #[serde(default)]
    pub platform: Platform,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_access_token_ttl_seconds")]
    pub access_token_ttl_seconds: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PolkaConfig {
    pub api_key: String,
}

/// Deployment environment.
///
/// Destructive administrative operations are only available in development.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Development,
    #[default]
    Production,
}

impl Platform {
    pub fn allows_purge(&self) -> bool {
        matches!(self, Platform::Development)
    }
}

fn default_access_token_ttl_seconds() -> i64 {
    auth::DEFAULT_ACCESS_TOKEN_TTL_SECONDS
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, POLKA__API_KEY, PLATFORM, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "production".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject settings the service must not start with.
    ///
    /// # Errors
    /// * `Message` - Secret missing or too short, API key missing, or a
    ///   token lifetime that is not positive or not representable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ConfigError::Message(format!(
                "jwt.secret must be at least {} bytes (set JWT__SECRET)",
                MIN_JWT_SECRET_LEN
            )));
        }

        if self.polka.api_key.trim().is_empty() {
            return Err(ConfigError::Message(
                "polka.api_key must not be empty (set POLKA__API_KEY)".to_string(),
            ));
        }

        self.jwt.access_token_ttl().map(|_| ())
    }
}

impl JwtConfig {
    /// Configured access token lifetime.
    ///
    /// # Errors
    /// * `Message` - Lifetime is not positive or not representable
    pub fn access_token_ttl(&self) -> Result<chrono::Duration, ConfigError> {
        chrono::Duration::try_seconds(self.access_token_ttl_seconds)
            .filter(|ttl| *ttl > chrono::Duration::zero())
            .ok_or_else(|| {
                ConfigError::Message(format!(
                    "jwt.access_token_ttl_seconds must be positive, got {}",
                    self.access_token_ttl_seconds
                ))
            })
    }
}
