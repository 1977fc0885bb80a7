//! Application configuration schemas.
//!
//! Configuration is deserialized via the `config` crate from an optional TOML
//! file overlaid with `CHIRPY__`-prefixed environment variables. Each
//! sub-module represents a logical configuration section.

pub mod auth;
pub mod database;
pub mod logging;

use serde::{Deserialize, Serialize};

pub use self::auth::{AuthConfig, PasswordHashConfig};
pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;

use crate::error::AuthError;

/// Environment prefix for configuration overrides.
const ENV_PREFIX: &str = "CHIRPY";

/// Deployment platform. Destructive bulk operations are only allowed in `dev`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Local development.
    Dev,
    /// Anything else.
    #[default]
    Production,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Dev => write!(f, "dev"),
            Platform::Production => write!(f, "production"),
        }
    }
}

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Deployment platform.
    #[serde(default)]
    pub platform: Platform,
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Refresh-token database settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from an optional TOML file and the environment.
    ///
    /// Environment variables use the `CHIRPY__` prefix with `__` between
    /// sections, e.g. `CHIRPY__AUTH__JWT_SECRET`.
    pub fn load(path: &str) -> Result<Self, AuthError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AuthError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AuthError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Parse configuration from a TOML string, without environment overrides.
    pub fn from_toml(source: &str) -> Result<Self, AuthError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml("").expect("empty config should parse");
        assert_eq!(config.platform, Platform::Production);
        assert_eq!(config.auth.access_token_ttl_seconds, 3600);
        assert_eq!(config.auth.password_hash, PasswordHashConfig::default());
        assert_eq!(config.logging.level, "warn");
        assert!(config.auth.jwt_secret.is_empty());
    }

    #[test]
    fn test_sections_override_defaults() {
        let config = AppConfig::from_toml(
            r#"
            platform = "dev"

            [auth]
            jwt_secret = "abc123"
            access_token_ttl_seconds = 120

            [auth.password_hash]
            memory_kib = 4096

            [database]
            url = "postgres://u:p@db:5432/chirpy"
            max_connections = 3

            [logging]
            format = "json"
            "#,
        )
        .expect("config should parse");

        assert_eq!(config.platform, Platform::Dev);
        assert_eq!(config.auth.jwt_secret, "abc123");
        assert_eq!(config.auth.access_token_ttl(), chrono::Duration::seconds(120));
        assert_eq!(config.auth.password_hash.memory_kib, 4096);
        assert_eq!(config.auth.password_hash.iterations, 2);
        assert_eq!(config.database.max_connections, 3);
        assert_eq!(config.database.min_connections, 1);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_unknown_platform_is_rejected() {
        let err = AppConfig::from_toml(r#"platform = "staging""#).expect_err("must fail");
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
    }
}
