//! Convenience result type alias.

use crate::error::AuthError;

/// A specialized `Result` type for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;
