//! User repository trait (port)

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use roster_shared::EntityId;

use crate::domain::{NewUser, User};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<User>, DomainError>;

    /// Case-insensitive lookup.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Inserts a user that belongs to no company.
    async fn create(&self, user: &NewUser) -> Result<User, DomainError>;

    async fn record_login(&self, id: EntityId, at: DateTime<Utc>) -> Result<(), DomainError>;
}
