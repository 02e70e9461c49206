//! Revocation store trait for refresh-token persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::AuthResult;

/// Collaborator interface for refresh-token persistence and revocation.
///
/// The token service itself only mints and validates; an embedding
/// application implements this trait when rotation or revocation is
/// required. Implementations receive SHA-256 hashes (see
/// `TokenService::hash_token`), never raw tokens.
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Persist a refresh token hash for a subject
    async fn save_refresh_token(
        &self,
        token_hash: &str,
        subject: &str,
        expires_at: DateTime<Utc>,
    ) -> AuthResult<()>;

    /// Whether a refresh token has been revoked or was never saved
    async fn is_revoked(&self, token_hash: &str) -> AuthResult<bool>;

    /// Revoke a refresh token
    ///
    /// Returns `true` if the token was found and revoked, `false` if not
    /// found.
    async fn revoke(&self, token_hash: &str) -> AuthResult<bool>;

    /// Remove expired entries, returning how many were deleted
    async fn delete_expired(&self) -> AuthResult<usize>;
}
