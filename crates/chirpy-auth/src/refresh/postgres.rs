//! PostgreSQL refresh-token backend.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use chirpy_core::error::AuthError;
use chirpy_core::types::UserId;
use chirpy_database::RefreshTokenRepository;
use chirpy_entity::session::{RefreshToken, RefreshTokenRow};

use super::backend::RefreshTokenBackend;

/// Refresh tokens stored in the `refresh_tokens` table.
#[derive(Debug, Clone)]
pub struct PgRefreshTokenBackend {
    repo: RefreshTokenRepository,
}

impl PgRefreshTokenBackend {
    /// Wraps a repository.
    pub fn new(repo: RefreshTokenRepository) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl RefreshTokenBackend for PgRefreshTokenBackend {
    async fn insert(&self, token: &RefreshToken) -> Result<(), AuthError> {
        self.repo.create(&RefreshTokenRow::from(token)).await
    }

    async fn find(&self, token: &str) -> Result<Option<RefreshToken>, AuthError> {
        Ok(self.repo.find_by_token(token).await?.map(RefreshToken::from))
    }

    async fn mark_revoked(&self, token: &str, at: DateTime<Utc>) -> Result<bool, AuthError> {
        self.repo.revoke(token, at).await
    }

    async fn revoke_all_for_owner(
        &self,
        owner: UserId,
        at: DateTime<Utc>,
    ) -> Result<u64, AuthError> {
        self.repo.revoke_all_by_owner(owner, at).await
    }

    async fn revoke_all(&self, at: DateTime<Utc>) -> Result<u64, AuthError> {
        self.repo.revoke_all(at).await
    }
}
