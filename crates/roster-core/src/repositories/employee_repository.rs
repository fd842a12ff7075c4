//! Employee repository trait (port)

use async_trait::async_trait;

use roster_shared::EntityId;

use crate::domain::{Employee, EmployeeDraft, TenantScope};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Tenant employees ordered by employee code.
    async fn list(&self, scope: &TenantScope) -> Result<Vec<Employee>, DomainError>;

    /// `None` when the id does not exist or belongs to another company.
    async fn find(&self, scope: &TenantScope, id: EntityId) -> Result<Option<Employee>, DomainError>;

    async fn count_active(&self, scope: &TenantScope) -> Result<i64, DomainError>;

    /// Active employees across every company.
    async fn count_active_all(&self) -> Result<i64, DomainError>;

    /// Inserts a new active employee. With a `ceiling`, the active headcount
    /// is counted in the same transaction and the insert is refused with
    /// [`DomainError::EmployeeLimitReached`] once it reaches the ceiling.
    async fn create(
        &self,
        scope: &TenantScope,
        draft: &EmployeeDraft,
        ceiling: Option<i64>,
    ) -> Result<Employee, DomainError>;

    /// Fails with [`DomainError::EmployeeNotFound`] outside the tenant.
    async fn update(
        &self,
        scope: &TenantScope,
        id: EntityId,
        draft: &EmployeeDraft,
    ) -> Result<Employee, DomainError>;
}
