//! Unified error type for the authentication subsystem.
//!
//! Every operation returns [`AuthError`] carrying an [`ErrorKind`]. Input-driven
//! kinds are deterministic for a given input and clock; the fatal kinds
//! (`HashingFailure`, `PersistenceFailure`, `Configuration`) depend on the
//! environment and may be retried at the caller's discretion.

use std::fmt;
use thiserror::Error;

/// Error kind taxonomy. Mapping kinds to transport status codes belongs to the
/// HTTP layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// Login failed. Never says whether the email or the password was wrong.
    InvalidCredentials,
    /// No credential was presented.
    MissingCredential,
    /// The `Authorization` header does not follow the bearer scheme.
    MalformedHeader,
    /// The access token is corrupt or its MAC does not verify.
    InvalidSignature,
    /// The token is past its expiry.
    TokenExpired,
    /// The access token was not minted as an access token by this system.
    IssuerMismatch,
    /// The access token subject is not a valid principal identifier.
    SubjectMalformed,
    /// No refresh token with the presented value exists.
    TokenNotFound,
    /// The refresh token has been revoked.
    TokenRevoked,
    /// Hashing, signing or the random source failed.
    HashingFailure,
    /// The durable store failed or rejected a write.
    PersistenceFailure,
    /// Configuration could not be loaded or is incomplete.
    Configuration,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "INVALID_CREDENTIALS"),
            Self::MissingCredential => write!(f, "MISSING_CREDENTIAL"),
            Self::MalformedHeader => write!(f, "MALFORMED_HEADER"),
            Self::InvalidSignature => write!(f, "INVALID_SIGNATURE"),
            Self::TokenExpired => write!(f, "TOKEN_EXPIRED"),
            Self::IssuerMismatch => write!(f, "ISSUER_MISMATCH"),
            Self::SubjectMalformed => write!(f, "SUBJECT_MALFORMED"),
            Self::TokenNotFound => write!(f, "TOKEN_NOT_FOUND"),
            Self::TokenRevoked => write!(f, "TOKEN_REVOKED"),
            Self::HashingFailure => write!(f, "HASHING_FAILURE"),
            Self::PersistenceFailure => write!(f, "PERSISTENCE_FAILURE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
        }
    }
}

/// The error returned by every fallible operation in the workspace.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AuthError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message. Never contains secrets or token values.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AuthError {
    /// Create a new error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Login failed; the message is fixed so callers cannot tell which half failed.
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorKind::InvalidCredentials, "Incorrect email or password")
    }

    /// No credential was presented.
    pub fn missing_credential(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingCredential, message)
    }

    /// The authorization header is malformed.
    pub fn malformed_header(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedHeader, message)
    }

    /// The token signature or structure is invalid.
    pub fn invalid_signature(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidSignature, message)
    }

    /// The token has expired.
    pub fn token_expired(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TokenExpired, message)
    }

    /// The token kind or issuer does not match.
    pub fn issuer_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::IssuerMismatch, message)
    }

    /// The token subject is not a principal identifier.
    pub fn subject_malformed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SubjectMalformed, message)
    }

    /// The refresh token does not exist.
    pub fn token_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TokenNotFound, message)
    }

    /// The refresh token has been revoked.
    pub fn token_revoked(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TokenRevoked, message)
    }

    /// Hashing, signing or randomness failed.
    pub fn hashing(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::HashingFailure, message)
    }

    /// The durable store failed.
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PersistenceFailure, message)
    }

    /// Configuration is missing or invalid.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Whether the error comes from the environment rather than from the input.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::HashingFailure | ErrorKind::PersistenceFailure | ErrorKind::Configuration
        )
    }
}

impl Clone for AuthError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<config::ConfigError> for AuthError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_kind_and_message() {
        let err = AuthError::token_revoked("Refresh token has been revoked");
        assert_eq!(
            err.to_string(),
            "TOKEN_REVOKED: Refresh token has been revoked"
        );
    }

    #[test]
    fn test_invalid_credentials_message_is_fixed() {
        let err = AuthError::invalid_credentials();
        assert_eq!(err.kind, ErrorKind::InvalidCredentials);
        assert!(!err.message.contains("email not found"));
        assert!(!err.message.contains("password mismatch"));
    }

    #[test]
    fn test_fatal_kinds() {
        assert!(AuthError::hashing("rng").is_fatal());
        assert!(AuthError::persistence("db down").is_fatal());
        assert!(AuthError::configuration("no secret").is_fatal());
        assert!(!AuthError::token_expired("late").is_fatal());
        assert!(!AuthError::invalid_credentials().is_fatal());
    }

    #[test]
    fn test_clone_drops_source() {
        let io = std::io::Error::other("boom");
        let err = AuthError::with_source(ErrorKind::PersistenceFailure, "write failed", io);
        assert!(std::error::Error::source(&err).is_some());
        let cloned = err.clone();
        assert_eq!(cloned.kind, ErrorKind::PersistenceFailure);
        assert!(cloned.source.is_none());
    }
}
