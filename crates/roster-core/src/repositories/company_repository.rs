//! Company repository trait (port)

use async_trait::async_trait;

use roster_shared::EntityId;

use crate::domain::{Company, ContractTerms, NewCompany, NewUser};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Company>, DomainError>;

    /// All companies, newest first.
    async fn list_all(&self) -> Result<Vec<Company>, DomainError>;

    async fn list_recent(&self, limit: i64) -> Result<Vec<Company>, DomainError>;
    async fn count_active(&self) -> Result<i64, DomainError>;
    async fn update(&self, company: &Company) -> Result<Company, DomainError>;

    /// Inserts the company, its first contract and its first company admin
    /// in one transaction. Nothing is persisted if any insert fails.
    async fn onboard(
        &self,
        company: &NewCompany,
        terms: &ContractTerms,
        admin: &NewUser,
    ) -> Result<Company, DomainError>;
}
