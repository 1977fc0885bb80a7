//! Refresh-token revocation state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a refresh token.
///
/// The only transition is `Active -> Revoked`. There is no operation that
/// turns a revoked token back into an active one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RefreshTokenState {
    /// Usable until its natural expiry.
    Active,
    /// Permanently invalid since `at`.
    Revoked {
        /// When the token was revoked.
        at: DateTime<Utc>,
    },
}

impl RefreshTokenState {
    /// Rebuilds the state from a nullable `revoked_at` column.
    pub fn from_revoked_at(revoked_at: Option<DateTime<Utc>>) -> Self {
        match revoked_at {
            Some(at) => Self::Revoked { at },
            None => Self::Active,
        }
    }

    /// Returns the revoked state. An already revoked state keeps its original timestamp.
    pub fn revoke(self, at: DateTime<Utc>) -> Self {
        match self {
            Self::Active => Self::Revoked { at },
            revoked @ Self::Revoked { .. } => revoked,
        }
    }

    /// Whether the token has been revoked.
    pub fn is_revoked(&self) -> bool {
        matches!(self, Self::Revoked { .. })
    }

    /// The revocation time, if revoked.
    pub fn revoked_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Active => None,
            Self::Revoked { at } => Some(*at),
        }
    }
}

impl std::fmt::Display for RefreshTokenState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Revoked { at } => write!(f, "revoked at {}", at.to_rfc3339()),
        }
    }
}
