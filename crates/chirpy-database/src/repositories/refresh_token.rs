//! Refresh-token repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::warn;

use chirpy_core::error::{AuthError, ErrorKind};
use chirpy_core::result::AuthResult;
use chirpy_core::types::UserId;
use chirpy_entity::session::RefreshTokenRow;

/// Repository for the `refresh_tokens` table.
#[derive(Debug, Clone)]
pub struct RefreshTokenRepository {
    pool: PgPool,
}

impl RefreshTokenRepository {
    /// Create a new refresh-token repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a freshly issued token.
    ///
    /// A primary-key collision is reported as a persistence failure and is
    /// not retried.
    pub async fn create(&self, row: &RefreshTokenRow) -> AuthResult<()> {
        sqlx::query(
            "INSERT INTO refresh_tokens (token, owner, issued_at, expires_at, revoked_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&row.token)
        .bind(row.owner)
        .bind(row.issued_at)
        .bind(row.expires_at)
        .bind(row.revoked_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let unique = e
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation());
            if unique {
                warn!(owner = %row.owner, "Refresh token collided with an existing token");
                AuthError::with_source(
                    ErrorKind::PersistenceFailure,
                    "Refresh token already exists",
                    e,
                )
            } else {
                AuthError::with_source(
                    ErrorKind::PersistenceFailure,
                    "Failed to create refresh token",
                    e,
                )
            }
        })?;
        Ok(())
    }

    /// Find a token row by its value.
    pub async fn find_by_token(&self, token: &str) -> AuthResult<Option<RefreshTokenRow>> {
        sqlx::query_as::<_, RefreshTokenRow>(
            "SELECT token, owner, issued_at, expires_at, revoked_at \
             FROM refresh_tokens WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AuthError::with_source(
                ErrorKind::PersistenceFailure,
                "Failed to find refresh token",
                e,
            )
        })
    }

    /// Set `revoked_at` on an active token. Returns `true` if a row changed.
    pub async fn revoke(&self, token: &str, at: DateTime<Utc>) -> AuthResult<bool> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET revoked_at = $2 \
             WHERE token = $1 AND revoked_at IS NULL",
        )
        .bind(token)
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AuthError::with_source(
                ErrorKind::PersistenceFailure,
                "Failed to revoke refresh token",
                e,
            )
        })?;
        Ok(result.rows_affected() > 0)
    }

    /// Revoke every active token owned by `owner`.
    pub async fn revoke_all_by_owner(&self, owner: UserId, at: DateTime<Utc>) -> AuthResult<u64> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET revoked_at = $2 \
             WHERE owner = $1 AND revoked_at IS NULL",
        )
        .bind(owner)
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AuthError::with_source(
                ErrorKind::PersistenceFailure,
                "Failed to revoke refresh tokens for owner",
                e,
            )
        })?;
        Ok(result.rows_affected())
    }

    /// Revoke every active token in the table.
    pub async fn revoke_all(&self, at: DateTime<Utc>) -> AuthResult<u64> {
        let result = sqlx::query("UPDATE refresh_tokens SET revoked_at = $1 WHERE revoked_at IS NULL")
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AuthError::with_source(
                    ErrorKind::PersistenceFailure,
                    "Failed to revoke all refresh tokens",
                    e,
                )
            })?;
        Ok(result.rows_affected())
    }
}
