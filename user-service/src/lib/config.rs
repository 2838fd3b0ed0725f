use std::env;

use auth::AuthConfig;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Longest accepted token lifetime: one year.
pub const MAX_TOKEN_TTL_SECONDS: i64 = 365 * 24 * 60 * 60;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
}

/// Identity store selection.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub backend: StoreBackend,
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    pub grpc_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_seconds: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[redacted]")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    /// Argon2 iteration count
    pub cost: u32,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject settings the service cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.is_empty() {
            return Err(ConfigError::Message("jwt.secret must not be empty".to_string()));
        }

        if self.jwt.ttl_seconds <= 0 {
            return Err(ConfigError::Message(format!(
                "jwt.ttl_seconds must be positive, got {}",
                self.jwt.ttl_seconds
            )));
        }

        if self.jwt.ttl_seconds > MAX_TOKEN_TTL_SECONDS {
            return Err(ConfigError::Message(format!(
                "jwt.ttl_seconds must be at most {}, got {}",
                MAX_TOKEN_TTL_SECONDS, self.jwt.ttl_seconds
            )));
        }

        if self.database.backend == StoreBackend::Postgres && self.database.max_connections == 0 {
            return Err(ConfigError::Message(
                "database.max_connections must be at least 1".to_string(),
            ));
        }

        if self.password.cost == 0 {
            return Err(ConfigError::Message(
                "password.cost must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Authentication settings handed to the core.
    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            secret: self.jwt.secret.as_bytes().to_vec(),
            token_ttl: chrono::Duration::try_seconds(self.jwt.ttl_seconds)
                .unwrap_or(chrono::Duration::MAX),
            hash_cost: self.password.cost,
        }
    }
}
