//! Stored credential as resolved by the user-record collaborator.

use serde::{Deserialize, Serialize};

use chirpy_core::types::UserId;

/// The part of a user record needed to check a login.
#[derive(Clone, Serialize, Deserialize)]
pub struct StoredCredential {
    /// The principal the credential belongs to.
    pub principal: UserId,
    /// Self-describing Argon2id PHC hash string.
    pub password_hash: String,
}

impl StoredCredential {
    /// Creates a credential record.
    pub fn new(principal: UserId, password_hash: impl Into<String>) -> Self {
        Self {
            principal,
            password_hash: password_hash.into(),
        }
    }
}

impl std::fmt::Debug for StoredCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredCredential")
            .field("principal", &self.principal)
            .finish_non_exhaustive()
    }
}
