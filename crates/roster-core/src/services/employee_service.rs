//! Tenant-side employee administration.
//!
//! Every operation takes the caller's [`TenantScope`]; the company id is
//! never read from the request.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tracing::{info, warn};
use validator::Validate;

use roster_shared::EntityId;

use crate::domain::{
    ContractWithPlan, Employee, EmployeeDraft, LeaveCredit, PayrollCalculation, TenantScope,
};
use crate::error::DomainError;
use crate::repositories::{ContractRepository, EmployeeRepository, RecordRepository};

/// Active contract as shown on the tenant dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct ContractStatus {
    #[serde(flatten)]
    pub current: ContractWithPlan,
    pub expired: bool,
    pub days_remaining: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TenantDashboard {
    pub active_employees: i64,
    pub contract: Option<ContractStatus>,
    /// Working-time records dated in the current month.
    pub month_working_records: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmployeeDetail {
    pub employee: Employee,
    pub leave_credits: Vec<LeaveCredit>,
    pub payroll_history: Vec<PayrollCalculation>,
}

pub struct EmployeeService {
    employees: Arc<dyn EmployeeRepository>,
    contracts: Arc<dyn ContractRepository>,
    records: Arc<dyn RecordRepository>,
}

impl EmployeeService {
    pub fn new(
        employees: Arc<dyn EmployeeRepository>,
        contracts: Arc<dyn ContractRepository>,
        records: Arc<dyn RecordRepository>,
    ) -> Self {
        Self {
            employees,
            contracts,
            records,
        }
    }

    pub async fn dashboard(
        &self,
        scope: &TenantScope,
        today: NaiveDate,
    ) -> Result<TenantDashboard, DomainError> {
        let contract = self
            .contracts
            .find_active_for_company(scope.company_id())
            .await?
            .map(|current| ContractStatus {
                expired: current.contract.is_expired_on(today),
                days_remaining: current.contract.days_remaining(today),
                current,
            });
        let month_start = today.with_day(1).unwrap_or(today);

        Ok(TenantDashboard {
            active_employees: self.employees.count_active(scope).await?,
            contract,
            month_working_records: self
                .records
                .count_working_time_since(scope, month_start)
                .await?,
        })
    }

    pub async fn list(&self, scope: &TenantScope) -> Result<Vec<Employee>, DomainError> {
        self.employees.list(scope).await
    }

    pub async fn find(&self, scope: &TenantScope, id: EntityId) -> Result<Employee, DomainError> {
        self.employees
            .find(scope, id)
            .await?
            .ok_or(DomainError::EmployeeNotFound)
    }

    /// Employee with its leave grants and payroll history.
    pub async fn detail(
        &self,
        scope: &TenantScope,
        id: EntityId,
    ) -> Result<EmployeeDetail, DomainError> {
        let employee = self.find(scope, id).await?;
        Ok(EmployeeDetail {
            leave_credits: self.records.leave_credits_for(scope, employee.id).await?,
            payroll_history: self.records.payroll_for(scope, employee.id).await?,
            employee,
        })
    }

    /// Adds an employee. While the company has an active contract, its plan
    /// caps the number of active employees.
    pub async fn create(
        &self,
        scope: &TenantScope,
        draft: EmployeeDraft,
    ) -> Result<Employee, DomainError> {
        draft.validate()?;

        let ceiling = self
            .contracts
            .find_active_for_company(scope.company_id())
            .await?
            .map(|current| current.plan.max_employees);

        let employee = self
            .employees
            .create(scope, &draft, ceiling)
            .await
            .inspect_err(|e| {
                if let DomainError::EmployeeLimitReached { max } = e {
                    warn!("Company {} is at its limit of {} employees", scope.company_id(), max);
                }
            })?;
        info!("Employee {} added to company {}", employee.id, scope.company_id());
        Ok(employee)
    }

    pub async fn update(
        &self,
        scope: &TenantScope,
        id: EntityId,
        draft: EmployeeDraft,
    ) -> Result<Employee, DomainError> {
        draft.validate()?;
        let employee = self.employees.update(scope, id, &draft).await?;
        info!(
            "Employee {} of company {} updated (status {})",
            employee.id,
            scope.company_id(),
            employee.status.as_str()
        );
        Ok(employee)
    }
}
