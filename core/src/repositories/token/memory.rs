//! In-memory revocation store.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::errors::AuthResult;

use super::store::RevocationStore;

#[derive(Debug, Clone)]
struct StoredToken {
    subject: String,
    expires_at: DateTime<Utc>,
    is_revoked: bool,
}

/// Process-local [`RevocationStore`] backed by a `HashMap`.
///
/// Suitable for tests and single-process deployments; anything that needs
/// revocation to survive a restart wants a real database behind the trait.
#[derive(Default)]
pub struct MemoryRevocationStore {
    tokens: RwLock<HashMap<String, StoredToken>>,
}

impl MemoryRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subject a saved token hash belongs to, if present and not revoked
    pub async fn subject_of(&self, token_hash: &str) -> Option<String> {
        let tokens = self.tokens.read().await;
        tokens
            .get(token_hash)
            .filter(|t| !t.is_revoked && t.expires_at > Utc::now())
            .map(|t| t.subject.clone())
    }
}

#[async_trait]
impl RevocationStore for MemoryRevocationStore {
    async fn save_refresh_token(
        &self,
        token_hash: &str,
        subject: &str,
        expires_at: DateTime<Utc>,
    ) -> AuthResult<()> {
        let mut tokens = self.tokens.write().await;
        tokens.insert(
            token_hash.to_string(),
            StoredToken {
                subject: subject.to_string(),
                expires_at,
                is_revoked: false,
            },
        );
        Ok(())
    }

    async fn is_revoked(&self, token_hash: &str) -> AuthResult<bool> {
        let tokens = self.tokens.read().await;
        // Unknown tokens count as revoked: they were never issued through
        // this store, or have already been cleaned up.
        Ok(tokens.get(token_hash).map_or(true, |t| t.is_revoked))
    }

    async fn revoke(&self, token_hash: &str) -> AuthResult<bool> {
        let mut tokens = self.tokens.write().await;
        if let Some(token) = tokens.get_mut(token_hash) {
            token.is_revoked = true;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn delete_expired(&self) -> AuthResult<usize> {
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        let now = Utc::now();
        tokens.retain(|_, t| t.expires_at > now);
        Ok(before - tokens.len())
    }
}
