//! Session flows built from the hasher, the access-token codec and the
//! refresh-token store.

use std::sync::Arc;

use chrono::Duration;
use serde::Serialize;
use tracing::{debug, error, info};

use chirpy_core::config::AuthConfig;
use chirpy_core::error::AuthError;
use chirpy_core::traits::Clock;
use chirpy_core::types::{SigningSecret, UserId};
use chirpy_entity::session::{AccessToken, RefreshToken};

use crate::bearer::extract_bearer;
use crate::jwt::{AccessTokenCodec, DEFAULT_ACCESS_TOKEN_TTL};
use crate::password::CredentialHasher;
use crate::refresh::{RefreshTokenBackend, RefreshTokenStore};

use super::lookup::CredentialLookup;

/// Result of a successful login.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    /// The authenticated principal.
    pub principal: UserId,
    /// Short-lived access token.
    pub access_token: AccessToken,
    /// Long-lived refresh token.
    pub refresh_token: RefreshToken,
}

/// Runs login, refresh, logout and per-request authentication.
///
/// Holds no per-session state; every call is independent and the service can
/// be shared freely across tasks.
#[derive(Debug, Clone)]
pub struct SessionService {
    hasher: CredentialHasher,
    codec: AccessTokenCodec,
    refresh_tokens: RefreshTokenStore,
    access_ttl: Duration,
    decoy_hash: Option<Arc<str>>,
}

impl SessionService {
    /// Creates a service from its parts. Access tokens last one hour.
    pub fn new(
        hasher: CredentialHasher,
        codec: AccessTokenCodec,
        refresh_tokens: RefreshTokenStore,
    ) -> Self {
        let decoy_hash = hasher
            .decoy_hash()
            .inspect_err(|e| error!(error = %e, "Failed to build decoy password hash"))
            .ok()
            .map(Arc::from);
        Self {
            decoy_hash,
            hasher,
            codec,
            refresh_tokens,
            access_ttl: DEFAULT_ACCESS_TOKEN_TTL,
        }
    }

    /// Builds a service from auth configuration.
    pub fn from_config(
        config: &AuthConfig,
        backend: Arc<dyn RefreshTokenBackend>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AuthError> {
        let hasher = CredentialHasher::new(&config.password_hash)?;
        let codec = AccessTokenCodec::new(clock.clone());
        let refresh_tokens = RefreshTokenStore::new(backend, clock);

        Ok(Self::new(hasher, codec, refresh_tokens).with_access_ttl(config.access_token_ttl()))
    }

    /// Overrides the access-token lifetime. Non-positive values mean one hour.
    pub fn with_access_ttl(mut self, ttl: Duration) -> Self {
        self.access_ttl = if ttl <= Duration::zero() {
            DEFAULT_ACCESS_TOKEN_TTL
        } else {
            ttl
        };
        self
    }

    /// Checks an email and password and opens a session.
    ///
    /// An unknown email, a wrong password, a failed lookup and an unusable
    /// stored hash all produce the same `InvalidCredentials` error. When no
    /// credential is found the password is still run through Argon2.
    pub async fn login<L>(
        &self,
        email: &str,
        password: &str,
        secret: &SigningSecret,
        lookup: &L,
    ) -> Result<LoginResult, AuthError>
    where
        L: CredentialLookup + ?Sized,
    {
        let credential = match lookup.find_by_email(email).await {
            Ok(Some(credential)) => credential,
            Ok(None) => {
                self.verify_decoy(password);
                return Err(reject_login());
            }
            Err(e) => {
                error!(error = %e, "Credential lookup failed");
                self.verify_decoy(password);
                return Err(reject_login());
            }
        };

        if !matches!(
            self.hasher.verify(password, &credential.password_hash),
            Ok(true)
        ) {
            return Err(reject_login());
        }

        let principal = credential.principal;
        let access_token = self.codec.issue(principal, secret, self.access_ttl)?;
        let refresh_token = self.refresh_tokens.issue(principal).await?;

        info!(user_id = %principal, "User logged in");

        Ok(LoginResult {
            principal,
            access_token,
            refresh_token,
        })
    }

    /// Mints a new access token for the owner of a refresh token.
    ///
    /// The refresh token is neither rotated nor extended.
    pub async fn refresh(
        &self,
        refresh_token: &str,
        secret: &SigningSecret,
    ) -> Result<AccessToken, AuthError> {
        let owner = self.refresh_tokens.lookup_owner(refresh_token).await?;
        let access_token = self.codec.issue(owner, secret, self.access_ttl)?;

        debug!(user_id = %owner, "Access token refreshed");
        Ok(access_token)
    }

    /// Revokes a refresh token (logout). Idempotent.
    pub async fn revoke(&self, refresh_token: &str) -> Result<(), AuthError> {
        self.refresh_tokens.revoke(refresh_token).await
    }

    /// Resolves the principal behind an `Authorization` header value.
    pub fn authenticate(
        &self,
        authorization: &str,
        secret: &SigningSecret,
    ) -> Result<UserId, AuthError> {
        let token = extract_bearer(authorization)?;
        self.codec.validate(token, secret)
    }

    /// Revokes every refresh token of `principal`.
    pub async fn revoke_all_for(&self, principal: UserId) -> Result<u64, AuthError> {
        self.refresh_tokens.revoke_all_for(principal).await
    }

    /// Revokes every refresh token.
    pub async fn revoke_all(&self) -> Result<u64, AuthError> {
        self.refresh_tokens.revoke_all().await
    }

    /// The password hasher.
    pub fn hasher(&self) -> &CredentialHasher {
        &self.hasher
    }

    /// The access-token codec.
    pub fn codec(&self) -> &AccessTokenCodec {
        &self.codec
    }

    /// The refresh-token store.
    pub fn refresh_tokens(&self) -> &RefreshTokenStore {
        &self.refresh_tokens
    }

    /// Lifetime given to newly issued access tokens.
    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    /// Spends one password check on a credential that does not exist.
    /// Returns whether Argon2 ran against the decoy hash.
    fn verify_decoy(&self, password: &str) -> bool {
        match &self.decoy_hash {
            Some(decoy) => {
                let _ = self.hasher.verify(password, decoy);
                true
            }
            None => {
                let _ = self.hasher.hash(password);
                false
            }
        }
    }
}

fn reject_login() -> AuthError {
    debug!("Login rejected");
    AuthError::invalid_credentials()
}
