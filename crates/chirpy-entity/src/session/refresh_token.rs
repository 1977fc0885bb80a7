//! Refresh-token entity and its storage row.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use chirpy_core::error::AuthError;
use chirpy_core::types::UserId;

use super::state::RefreshTokenState;

/// A long-lived opaque refresh token.
///
/// Created at login and checked on every refresh. The token string is the
/// lookup key; uniqueness comes from its entropy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    /// Opaque random token value.
    pub token: String,
    /// The principal this token was issued to.
    pub owner: UserId,
    /// When the token was issued.
    pub issued_at: DateTime<Utc>,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
    /// Revocation state. Only moves forward through [`RefreshToken::revoke`].
    state: RefreshTokenState,
}

impl RefreshToken {
    /// Creates a new active token valid for `ttl` from `issued_at`.
    pub fn new(token: String, owner: UserId, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            token,
            owner,
            issued_at,
            expires_at: issued_at + ttl,
            state: RefreshTokenState::Active,
        }
    }

    /// Current revocation state.
    pub fn state(&self) -> RefreshTokenState {
        self.state
    }

    /// Marks the token revoked at `at`. Returns `false` if it already was.
    pub fn revoke(&mut self, at: DateTime<Utc>) -> bool {
        if self.state.is_revoked() {
            return false;
        }
        self.state = self.state.revoke(at);
        true
    }

    /// Whether the token is past its expiry at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Returns the owner if the token is still usable at `now`.
    ///
    /// Revocation is reported before expiry.
    pub fn owner_if_valid(&self, now: DateTime<Utc>) -> Result<UserId, AuthError> {
        if self.state.is_revoked() {
            return Err(AuthError::token_revoked("Refresh token has been revoked"));
        }
        if self.is_expired_at(now) {
            return Err(AuthError::token_expired("Refresh token has expired"));
        }
        Ok(self.owner)
    }
}

/// Storage shape of a refresh token (`refresh_tokens` table).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RefreshTokenRow {
    /// Primary key.
    pub token: String,
    /// Owning principal.
    pub owner: UserId,
    /// Issuance timestamp.
    pub issued_at: DateTime<Utc>,
    /// Expiry timestamp.
    pub expires_at: DateTime<Utc>,
    /// Revocation timestamp, `NULL` while active.
    pub revoked_at: Option<DateTime<Utc>>,
}

impl From<RefreshTokenRow> for RefreshToken {
    fn from(row: RefreshTokenRow) -> Self {
        Self {
            token: row.token,
            owner: row.owner,
            issued_at: row.issued_at,
            expires_at: row.expires_at,
            state: RefreshTokenState::from_revoked_at(row.revoked_at),
        }
    }
}

impl From<&RefreshToken> for RefreshTokenRow {
    fn from(token: &RefreshToken) -> Self {
        Self {
            token: token.token.clone(),
            owner: token.owner,
            issued_at: token.issued_at,
            expires_at: token.expires_at,
            revoked_at: token.state.revoked_at(),
        }
    }
}
