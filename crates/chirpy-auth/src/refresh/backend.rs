//! Persistence contract for refresh tokens.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use chirpy_core::error::AuthError;
use chirpy_core::types::UserId;
use chirpy_entity::session::RefreshToken;

/// Durable storage for refresh tokens.
///
/// Implementations must make a completed `mark_revoked` visible to every
/// later `find`, from any task. No stronger ordering is required.
#[async_trait]
pub trait RefreshTokenBackend: Send + Sync + std::fmt::Debug {
    /// Persists a new token. A duplicate token value is a `PersistenceFailure`.
    async fn insert(&self, token: &RefreshToken) -> Result<(), AuthError>;

    /// Fetches a token by value.
    async fn find(&self, token: &str) -> Result<Option<RefreshToken>, AuthError>;

    /// Marks an active token revoked. Returns `false` if the token is
    /// unknown or was already revoked.
    async fn mark_revoked(&self, token: &str, at: DateTime<Utc>) -> Result<bool, AuthError>;

    /// Revokes every active token owned by `owner`. Returns the count.
    async fn revoke_all_for_owner(&self, owner: UserId, at: DateTime<Utc>)
    -> Result<u64, AuthError>;

    /// Revokes every active token. Returns the count.
    async fn revoke_all(&self, at: DateTime<Utc>) -> Result<u64, AuthError>;
}
