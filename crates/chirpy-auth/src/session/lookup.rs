//! Credential lookup collaborator.

use async_trait::async_trait;

use chirpy_core::error::AuthError;
use chirpy_entity::user::StoredCredential;

/// Resolves a login email to the stored credential of its principal.
///
/// Supplied by whoever owns user records. Closures of the form
/// `Fn(&str) -> Option<StoredCredential>` implement it directly.
#[async_trait]
pub trait CredentialLookup: Send + Sync {
    /// Returns the credential for `email`, or `None` if there is no such user.
    async fn find_by_email(&self, email: &str) -> Result<Option<StoredCredential>, AuthError>;
}

#[async_trait]
impl<F> CredentialLookup for F
where
    F: Fn(&str) -> Option<StoredCredential> + Send + Sync,
{
    async fn find_by_email(&self, email: &str) -> Result<Option<StoredCredential>, AuthError> {
        Ok(self(email))
    }
}
