//! Session repository trait (port)

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use roster_shared::EntityId;

use crate::error::DomainError;

/// Server-side sessions keyed by the digest of the cookie token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(
        &self,
        token_hash: &str,
        user_id: EntityId,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<(), DomainError>;

    /// User owning an unexpired session.
    async fn find_user_id(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<EntityId>, DomainError>;

    async fn delete(&self, token_hash: &str) -> Result<(), DomainError>;

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError>;
}
