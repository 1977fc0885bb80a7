//! Access-token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use chirpy_core::error::{AuthError, ErrorKind};
use chirpy_core::types::{SigningSecret, UserId};

use super::AccessTokenCodec;
use super::claims::{Claims, TokenKind};
use super::encoder::ensure_secret;

impl AccessTokenCodec {
    /// Validates an access token and returns its principal.
    ///
    /// Checks run in a fixed order and the first failure wins:
    /// 1. Structure and signature (`InvalidSignature`)
    /// 2. Expiry against the codec clock (`TokenExpired`; a missing `exp`
    ///    counts as expired)
    /// 3. Token kind (`IssuerMismatch`)
    /// 4. Subject is a UUID (`SubjectMalformed`)
    pub fn validate(&self, token: &str, secret: &SigningSecret) -> Result<UserId, AuthError> {
        ensure_secret(secret)?;

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation(),
        )
        .map_err(|e| {
            debug!(reason = ?e.kind(), "Access token rejected");
            AuthError::with_source(
                ErrorKind::InvalidSignature,
                "Invalid access token",
                e,
            )
        })?;
        let claims = data.claims;

        if self.clock.now().timestamp() > claims.exp {
            return Err(AuthError::token_expired("Access token has expired"));
        }

        if claims.iss != TokenKind::Access {
            return Err(AuthError::issuer_mismatch(
                "Token was not issued as an access token",
            ));
        }

        claims.sub.parse::<UserId>().map_err(|e| {
            AuthError::with_source(
                ErrorKind::SubjectMalformed,
                "Token subject is not a valid user id",
                e,
            )
        })
    }
}

/// Signature-only validation; time and issuer are checked by the codec.
fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation.validate_aud = false;
    validation.leeway = 0;
    validation.required_spec_claims.clear();
    validation
}
