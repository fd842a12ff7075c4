//! Contract repository trait (port)

use async_trait::async_trait;
use chrono::NaiveDate;

use roster_shared::EntityId;

use crate::domain::{Contract, ContractTerms, ContractWithPlan, ExpiringContract};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContractRepository: Send + Sync {
    /// The company's single active contract, expired or not.
    async fn find_active_for_company(
        &self,
        company_id: EntityId,
    ) -> Result<Option<ContractWithPlan>, DomainError>;

    /// Contract history, newest start date first.
    async fn list_for_company(&self, company_id: EntityId) -> Result<Vec<Contract>, DomainError>;

    /// Active contracts whose end date is on or after `today`.
    async fn count_current(&self, today: NaiveDate) -> Result<i64, DomainError>;

    async fn list_expiring(
        &self,
        today: NaiveDate,
        until: NaiveDate,
    ) -> Result<Vec<ExpiringContract>, DomainError>;

    /// Deactivates the current contract and inserts the new one in one
    /// transaction.
    async fn replace_active(
        &self,
        company_id: EntityId,
        terms: &ContractTerms,
    ) -> Result<Contract, DomainError>;
}
