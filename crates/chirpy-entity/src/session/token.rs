//! Access-token value type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A signed access token as handed to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    /// The compact signed token string.
    pub token: String,
    /// When the token was issued.
    pub issued_at: DateTime<Utc>,
    /// When the token stops validating.
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// The raw token string.
    pub fn as_str(&self) -> &str {
        &self.token
    }

    /// Lifetime in whole seconds.
    pub fn expires_in(&self) -> i64 {
        (self.expires_at - self.issued_at).num_seconds()
    }
}
