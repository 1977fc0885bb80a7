//! Refresh-token lifecycle on top of a [`RefreshTokenBackend`].

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, info};

use chirpy_core::error::AuthError;
use chirpy_core::traits::Clock;
use chirpy_core::types::UserId;
use chirpy_entity::session::RefreshToken;

use super::backend::RefreshTokenBackend;
use crate::entropy;

/// Lifetime of a refresh token, in days.
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 60;

/// Random bytes drawn per refresh token (256 bits).
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Draws a fresh refresh-token value: 32 random bytes as 64 lowercase hex chars.
///
/// Fails with `HashingFailure` when the OS random source is unavailable.
pub fn generate_token() -> Result<String, AuthError> {
    Ok(hex::encode(entropy::bytes::<REFRESH_TOKEN_BYTES>()?))
}

/// Issues, resolves and revokes refresh tokens.
///
/// Every lookup goes to the backend, so a revocation is seen by the next
/// lookup from any task. Token values never appear in logs.
#[derive(Debug, Clone)]
pub struct RefreshTokenStore {
    backend: Arc<dyn RefreshTokenBackend>,
    clock: Arc<dyn Clock>,
}

impl RefreshTokenStore {
    /// Creates a store over `backend`, reading time from `clock`.
    pub fn new(backend: Arc<dyn RefreshTokenBackend>, clock: Arc<dyn Clock>) -> Self {
        Self { backend, clock }
    }

    /// Issues and persists a new token for `owner`, valid for 60 days.
    pub async fn issue(&self, owner: UserId) -> Result<RefreshToken, AuthError> {
        let token = RefreshToken::new(
            generate_token()?,
            owner,
            self.clock.now(),
            Duration::days(REFRESH_TOKEN_TTL_DAYS),
        );
        self.backend.insert(&token).await?;

        info!(user_id = %owner, expires_at = %token.expires_at, "Refresh token issued");
        Ok(token)
    }

    /// Resolves a token to its owner.
    ///
    /// Fails with `TokenNotFound`, `TokenRevoked` or `TokenExpired`, checked
    /// in that order.
    pub async fn lookup_owner(&self, token: &str) -> Result<UserId, AuthError> {
        let record = self
            .backend
            .find(token)
            .await?
            .ok_or_else(|| AuthError::token_not_found("Refresh token not found"))?;

        record.owner_if_valid(self.clock.now()).inspect_err(|e| {
            debug!(user_id = %record.owner, reason = %e.kind, "Refresh token rejected");
        })
    }

    /// Revokes a token. Revoking an unknown or already-revoked token succeeds.
    pub async fn revoke(&self, token: &str) -> Result<(), AuthError> {
        if self.backend.mark_revoked(token, self.clock.now()).await? {
            info!("Refresh token revoked");
        } else {
            debug!("Refresh token revoke was a no-op");
        }
        Ok(())
    }

    /// Revokes every active token of `owner`. Returns how many were revoked.
    pub async fn revoke_all_for(&self, owner: UserId) -> Result<u64, AuthError> {
        let count = self
            .backend
            .revoke_all_for_owner(owner, self.clock.now())
            .await?;
        info!(user_id = %owner, count, "Revoked refresh tokens for user");
        Ok(count)
    }

    /// Revokes every active token. Returns how many were revoked.
    pub async fn revoke_all(&self) -> Result<u64, AuthError> {
        let count = self.backend.revoke_all(self.clock.now()).await?;
        info!(count, "Revoked all refresh tokens");
        Ok(count)
    }

    /// Fetches the stored record without judging it.
    pub async fn inspect(&self, token: &str) -> Result<Option<RefreshToken>, AuthError> {
        self.backend.find(token).await
    }
}
