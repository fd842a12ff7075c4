//! Plan repository trait (port)

use async_trait::async_trait;

use roster_shared::EntityId;

use crate::domain::Plan;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlanRepository: Send + Sync {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Plan>, DomainError>;
    async fn list_all(&self) -> Result<Vec<Plan>, DomainError>;
    async fn list_active(&self) -> Result<Vec<Plan>, DomainError>;
    async fn update(&self, plan: &Plan) -> Result<Plan, DomainError>;
}
