//! Access-token issuance.

use chrono::Duration;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use tracing::debug;

use chirpy_core::error::{AuthError, ErrorKind};
use chirpy_core::types::{SigningSecret, UserId};
use chirpy_entity::session::AccessToken;

use super::AccessTokenCodec;
use super::claims::{Claims, TokenKind};

/// Lifetime used when the caller passes a zero or negative ttl.
pub const DEFAULT_ACCESS_TOKEN_TTL: Duration = Duration::hours(1);

impl AccessTokenCodec {
    /// Issues an HS256-signed access token for `principal`.
    ///
    /// A zero or negative `ttl` means [`DEFAULT_ACCESS_TOKEN_TTL`]. A `ttl`
    /// that pushes expiry past the representable date range is a
    /// configuration error.
    pub fn issue(
        &self,
        principal: UserId,
        secret: &SigningSecret,
        ttl: Duration,
    ) -> Result<AccessToken, AuthError> {
        ensure_secret(secret)?;

        let ttl = if ttl <= Duration::zero() {
            DEFAULT_ACCESS_TOKEN_TTL
        } else {
            ttl
        };
        let now = self.clock.now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AuthError::configuration("Access token lifetime is out of range"))?;

        let claims = Claims {
            iss: TokenKind::Access,
            sub: principal.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| {
            AuthError::with_source(
                ErrorKind::HashingFailure,
                "Failed to sign access token",
                e,
            )
        })?;

        debug!(user_id = %principal, expires_at = %expires_at, "Issued access token");

        Ok(AccessToken {
            token,
            issued_at: now,
            expires_at,
        })
    }
}

pub(super) fn ensure_secret(secret: &SigningSecret) -> Result<(), AuthError> {
    if secret.is_empty() {
        return Err(AuthError::configuration("Signing secret is empty"));
    }
    Ok(())
}
