//! Read access to attendance, payroll and leave records (port)

use async_trait::async_trait;
use chrono::NaiveDate;

use roster_shared::EntityId;

use crate::domain::{LeaveCredit, PayrollCalculation, TenantScope};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Working-time records dated on or after `since`.
    async fn count_working_time_since(
        &self,
        scope: &TenantScope,
        since: NaiveDate,
    ) -> Result<i64, DomainError>;

    /// Leave grants, newest first.
    async fn leave_credits_for(
        &self,
        scope: &TenantScope,
        employee_id: EntityId,
    ) -> Result<Vec<LeaveCredit>, DomainError>;

    /// Payroll history, most recent month first.
    async fn payroll_for(
        &self,
        scope: &TenantScope,
        employee_id: EntityId,
    ) -> Result<Vec<PayrollCalculation>, DomainError>;
}
