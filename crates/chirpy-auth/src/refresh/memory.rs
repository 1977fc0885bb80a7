//! In-memory refresh-token backend for single-node deployments and tests.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::warn;

use chirpy_core::error::AuthError;
use chirpy_core::types::UserId;
use chirpy_entity::session::RefreshToken;

use super::backend::RefreshTokenBackend;

/// Refresh tokens held in a process-local map.
///
/// Clones share the same map. Contents are lost on restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryRefreshTokenBackend {
    tokens: Arc<RwLock<HashMap<String, RefreshToken>>>,
}

impl MemoryRefreshTokenBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored tokens, revoked ones included.
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    /// Whether nothing has been stored yet.
    pub async fn is_empty(&self) -> bool {
        self.tokens.read().await.is_empty()
    }
}

#[async_trait]
impl RefreshTokenBackend for MemoryRefreshTokenBackend {
    async fn insert(&self, token: &RefreshToken) -> Result<(), AuthError> {
        let mut tokens = self.tokens.write().await;
        match tokens.entry(token.token.clone()) {
            Entry::Occupied(_) => {
                warn!(user_id = %token.owner, "Refresh token value collision");
                Err(AuthError::persistence("Refresh token already exists"))
            }
            Entry::Vacant(slot) => {
                slot.insert(token.clone());
                Ok(())
            }
        }
    }

    async fn find(&self, token: &str) -> Result<Option<RefreshToken>, AuthError> {
        Ok(self.tokens.read().await.get(token).cloned())
    }

    async fn mark_revoked(&self, token: &str, at: DateTime<Utc>) -> Result<bool, AuthError> {
        let mut tokens = self.tokens.write().await;
        Ok(tokens.get_mut(token).is_some_and(|t| t.revoke(at)))
    }

    async fn revoke_all_for_owner(
        &self,
        owner: UserId,
        at: DateTime<Utc>,
    ) -> Result<u64, AuthError> {
        let mut tokens = self.tokens.write().await;
        let revoked = tokens
            .values_mut()
            .filter(|t| t.owner == owner)
            .map(|t| t.revoke(at))
            .filter(|&revoked| revoked)
            .count();
        Ok(revoked as u64)
    }

    async fn revoke_all(&self, at: DateTime<Utc>) -> Result<u64, AuthError> {
        let mut tokens = self.tokens.write().await;
        let revoked = tokens
            .values_mut()
            .map(|t| t.revoke(at))
            .filter(|&revoked| revoked)
            .count();
        Ok(revoked as u64)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use chirpy_core::error::ErrorKind;

    use super::*;

    fn token(value: &str, owner: UserId) -> RefreshToken {
        RefreshToken::new(value.to_string(), owner, Utc::now(), Duration::days(1))
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let backend = MemoryRefreshTokenBackend::new();
        assert!(backend.is_empty().await);

        let owner = UserId::new();
        backend.insert(&token("t1", owner)).await.expect("insert");

        let found = backend.find("t1").await.expect("find").expect("present");
        assert_eq!(found.owner, owner);
        assert!(backend.find("t2").await.expect("find").is_none());
        assert_eq!(backend.len().await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_persistence_failure() {
        let backend = MemoryRefreshTokenBackend::new();
        let owner = UserId::new();
        backend.insert(&token("dup", owner)).await.expect("insert");
        let err = backend
            .insert(&token("dup", UserId::new()))
            .await
            .expect_err("duplicate");
        assert_eq!(err.kind, ErrorKind::PersistenceFailure);
        let kept = backend.find("dup").await.expect("find").expect("present");
        assert_eq!(kept.owner, owner);
    }

    #[tokio::test]
    async fn test_mark_revoked_only_once() {
        let backend = MemoryRefreshTokenBackend::new();
        backend.insert(&token("t", UserId::new())).await.expect("insert");

        let at = Utc::now();
        assert!(backend.mark_revoked("t", at).await.expect("revoke"));
        assert!(!backend.mark_revoked("t", at + Duration::seconds(5)).await.expect("revoke"));
        assert!(!backend.mark_revoked("missing", at).await.expect("revoke"));

        let stored = backend.find("t").await.expect("find").expect("present");
        assert_eq!(stored.state().revoked_at(), Some(at));
    }

    #[tokio::test]
    async fn test_bulk_revocation_counts_active_only() {
        let backend = MemoryRefreshTokenBackend::new();
        let alice = UserId::new();
        let bob = UserId::new();
        for (value, owner) in [("a1", alice), ("a2", alice), ("b1", bob), ("b2", bob)] {
            backend.insert(&token(value, owner)).await.expect("insert");
        }
        let at = Utc::now();
        backend.mark_revoked("a1", at).await.expect("revoke");

        assert_eq!(backend.revoke_all_for_owner(alice, at).await.expect("owner"), 1);
        assert_eq!(backend.revoke_all(at).await.expect("all"), 2);
        assert_eq!(backend.revoke_all(at).await.expect("all"), 0);
    }
}
