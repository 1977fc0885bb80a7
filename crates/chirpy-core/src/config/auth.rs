//! Authentication configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::types::SigningSecret;

/// Default access-token lifetime in seconds (one hour).
pub const DEFAULT_ACCESS_TOKEN_TTL_SECONDS: u64 = 3600;

/// Authentication and credential configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared secret for access-token signing (HMAC-SHA256). No default.
    #[serde(default, skip_serializing)]
    pub jwt_secret: String,
    /// Access token TTL in seconds. `0` falls back to one hour.
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_seconds: u64,
    /// Argon2id cost parameters for new password hashes.
    #[serde(default)]
    pub password_hash: PasswordHashConfig,
}

impl AuthConfig {
    /// Returns the signing secret, failing if none was configured.
    pub fn signing_secret(&self) -> Result<SigningSecret, AuthError> {
        if self.jwt_secret.is_empty() {
            return Err(AuthError::configuration(
                "auth.jwt_secret is not set (CHIRPY__AUTH__JWT_SECRET)",
            ));
        }
        Ok(SigningSecret::from(self.jwt_secret.as_str()))
    }

    /// Returns the access-token lifetime, substituting the default for zero.
    pub fn access_token_ttl(&self) -> chrono::Duration {
        let seconds = if self.access_token_ttl_seconds == 0 {
            DEFAULT_ACCESS_TOKEN_TTL_SECONDS
        } else {
            self.access_token_ttl_seconds
        };
        let max = (i64::MAX / 1000) as u64;
        chrono::Duration::seconds(seconds.min(max) as i64)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            access_token_ttl_seconds: default_access_ttl(),
            password_hash: PasswordHashConfig::default(),
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("access_token_ttl_seconds", &self.access_token_ttl_seconds)
            .field("password_hash", &self.password_hash)
            .finish()
    }
}

/// Argon2id cost parameters. Embedded in every hash, so changing them
/// never invalidates existing hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordHashConfig {
    /// Memory cost in KiB.
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,
    /// Number of passes.
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    /// Degree of parallelism.
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

impl Default for PasswordHashConfig {
    fn default() -> Self {
        Self {
            memory_kib: default_memory_kib(),
            iterations: default_iterations(),
            parallelism: default_parallelism(),
        }
    }
}

fn default_access_ttl() -> u64 {
    DEFAULT_ACCESS_TOKEN_TTL_SECONDS
}

fn default_memory_kib() -> u32 {
    19 * 1024
}

fn default_iterations() -> u32 {
    2
}

fn default_parallelism() -> u32 {
    1
}
