// ============================================================================
// Roster Core - Platform Administration Service
// File: crates/roster-core/src/services/platform_service.rs
// Description: Company onboarding, plans and contracts for the platform admin
// ============================================================================

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use tracing::{info, warn};
use validator::Validate;

use roster_security::PasswordService;
use roster_shared::constants::{EXPIRING_SOON_DAYS, RECENT_COMPANIES_LIMIT};
use roster_shared::utils::mask_email;
use roster_shared::EntityId;

use crate::domain::{
    AdminAccount, BillingCycle, Company, CompanyUpdate, Contract, ContractTerms,
    ContractWithPlan, ExpiringContract, NewCompany, NewUser, Plan, PlanUpdate, Role,
};
use crate::error::DomainError;
use crate::repositories::{
    CompanyRepository, ContractRepository, EmployeeRepository, PlanRepository,
};

/// Platform-wide figures for the operator dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct PlatformDashboard {
    pub active_companies: i64,
    pub current_contracts: i64,
    pub active_employees: i64,
    pub recent_companies: Vec<Company>,
    pub expiring_contracts: Vec<ExpiringContract>,
}

/// Company edit view.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyDetail {
    pub company: Company,
    pub active_contract: Option<ContractWithPlan>,
    pub contracts: Vec<Contract>,
    /// Plans offered when issuing a new contract.
    pub plans: Vec<Plan>,
}

/// Everything captured by the onboarding form.
#[derive(Debug, Clone)]
pub struct Onboarding {
    pub company: NewCompany,
    pub admin: AdminAccount,
    pub plan_id: EntityId,
    pub start_date: NaiveDate,
    pub billing_cycle: BillingCycle,
}

/// New contract for an existing company.
#[derive(Debug, Clone)]
pub struct ContractRequest {
    pub plan_id: EntityId,
    pub start_date: NaiveDate,
    pub billing_cycle: BillingCycle,
    pub notes: Option<String>,
}

pub struct PlatformService {
    companies: Arc<dyn CompanyRepository>,
    plans: Arc<dyn PlanRepository>,
    contracts: Arc<dyn ContractRepository>,
    employees: Arc<dyn EmployeeRepository>,
}

impl PlatformService {
    pub fn new(
        companies: Arc<dyn CompanyRepository>,
        plans: Arc<dyn PlanRepository>,
        contracts: Arc<dyn ContractRepository>,
        employees: Arc<dyn EmployeeRepository>,
    ) -> Self {
        Self {
            companies,
            plans,
            contracts,
            employees,
        }
    }

    pub async fn dashboard(&self, today: NaiveDate) -> Result<PlatformDashboard, DomainError> {
        let until = today + Duration::days(EXPIRING_SOON_DAYS);
        Ok(PlatformDashboard {
            active_companies: self.companies.count_active().await?,
            current_contracts: self.contracts.count_current(today).await?,
            active_employees: self.employees.count_active_all().await?,
            recent_companies: self.companies.list_recent(RECENT_COMPANIES_LIMIT).await?,
            expiring_contracts: self.contracts.list_expiring(today, until).await?,
        })
    }

    pub async fn list_companies(&self) -> Result<Vec<Company>, DomainError> {
        self.companies.list_all().await
    }

    /// Plans a new company can sign up for.
    pub async fn available_plans(&self) -> Result<Vec<Plan>, DomainError> {
        self.plans.list_active().await
    }

    /// Creates a company together with its first contract and company admin.
    pub async fn onboard(&self, request: Onboarding) -> Result<Company, DomainError> {
        request.company.validate()?;
        request.admin.validate()?;

        let plan = self.active_plan(request.plan_id).await?;
        let terms = ContractTerms::derive(&plan, request.start_date, request.billing_cycle, None);

        let password_hash = PasswordService::hash(&request.admin.password)
            .map_err(|e| DomainError::PasswordHashError(e.to_string()))?;
        let admin = NewUser {
            email: request.admin.email.trim().to_string(),
            password_hash,
            name: request.admin.name.clone(),
            role: Role::CompanyAdmin,
        };

        let company = self.companies.onboard(&request.company, &terms, &admin).await?;
        info!(
            "Company onboarded: {} (id {}) on plan {} until {}, admin {}",
            company.code,
            company.id,
            plan.name,
            terms.end_date,
            mask_email(&admin.email)
        );
        Ok(company)
    }

    pub async fn company_detail(&self, id: EntityId) -> Result<CompanyDetail, DomainError> {
        let company = self
            .companies
            .find_by_id(id)
            .await?
            .ok_or(DomainError::CompanyNotFound)?;
        Ok(CompanyDetail {
            active_contract: self.contracts.find_active_for_company(company.id).await?,
            contracts: self.contracts.list_for_company(company.id).await?,
            plans: self.plans.list_active().await?,
            company,
        })
    }

    pub async fn update_company(
        &self,
        id: EntityId,
        update: CompanyUpdate,
    ) -> Result<Company, DomainError> {
        update.validate()?;
        let mut company = self
            .companies
            .find_by_id(id)
            .await?
            .ok_or(DomainError::CompanyNotFound)?;
        company.apply(update);

        let company = self.companies.update(&company).await?;
        info!("Company updated: {} (active: {})", company.code, company.is_active);
        Ok(company)
    }

    /// Issues a new contract, retiring the company's current one.
    pub async fn issue_contract(
        &self,
        company_id: EntityId,
        request: ContractRequest,
    ) -> Result<Contract, DomainError> {
        let company = self
            .companies
            .find_by_id(company_id)
            .await?
            .ok_or(DomainError::CompanyNotFound)?;
        let plan = self.active_plan(request.plan_id).await?;
        let terms = ContractTerms::derive(
            &plan,
            request.start_date,
            request.billing_cycle,
            request.notes,
        );

        let contract = self.contracts.replace_active(company.id, &terms).await?;
        info!(
            "Contract {} issued for {} on plan {} ({} to {})",
            contract.id, company.code, plan.name, contract.start_date, contract.end_date
        );
        Ok(contract)
    }

    pub async fn list_plans(&self) -> Result<Vec<Plan>, DomainError> {
        self.plans.list_all().await
    }

    pub async fn plan(&self, id: EntityId) -> Result<Plan, DomainError> {
        self.plans.find_by_id(id).await?.ok_or(DomainError::PlanNotFound)
    }

    /// Existing contracts keep the fee they were signed with.
    pub async fn update_plan(&self, id: EntityId, update: PlanUpdate) -> Result<Plan, DomainError> {
        update.validate()?;
        let mut plan = self.plan(id).await?;
        plan.apply(update);

        let plan = self.plans.update(&plan).await?;
        info!("Plan updated: {} (max employees {})", plan.name, plan.max_employees);
        Ok(plan)
    }

    async fn active_plan(&self, id: EntityId) -> Result<Plan, DomainError> {
        match self.plans.find_by_id(id).await? {
            Some(plan) if plan.is_active => Ok(plan),
            Some(plan) => {
                warn!("Rejected contract on inactive plan {}", plan.name);
                Err(DomainError::PlanNotActive(plan.display_name))
            }
            None => {
                warn!("Rejected contract on unknown plan {}", id);
                Err(DomainError::PlanNotActive(format!("#{}", id)))
            }
        }
    }
}
