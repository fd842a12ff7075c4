// ============================================================================
// Roster API - Employee Handlers
// File: crates/roster-api/src/handlers/employee.rs
// ============================================================================
//! Employee list, add and edit for company admins. The tenant scope comes
//! from [`TenantAdmin`]; ids in the path are only looked up inside it.

use axum::{
    extract::{Path, State},
    Form,
};
use serde::Serialize;

use roster_core::services::EmployeeDetail;
use roster_core::{Employee, EmployeeStatus, WageType};
use roster_shared::constants::{
    DEFAULT_BASE_WAGE, DEFAULT_STANDARD_WORKING_DAYS, DEFAULT_STANDARD_WORKING_HOURS,
    DEFAULT_TRANSPORTATION_ALLOWANCE,
};

use crate::error::ApiError;
use crate::extract::TenantAdmin;
use crate::flash::{FlashLevel, FlashRedirect, IncomingFlash};
use crate::forms::{parse_id, EmployeeForm};
use crate::response::View;
use crate::state::AppState;

const EMPLOYEES: &str = "/employees";

#[derive(Debug, Serialize)]
pub struct EmployeesView {
    pub employees: Vec<Employee>,
}

/// Initial values for the add form.
#[derive(Debug, Serialize)]
pub struct EmployeeDefaults {
    pub status: EmployeeStatus,
    pub wage_type: WageType,
    pub base_wage: i64,
    pub transportation_allowance: i64,
    pub standard_working_hours: f64,
    pub standard_working_days: i64,
}

impl Default for EmployeeDefaults {
    fn default() -> Self {
        Self {
            status: EmployeeStatus::Active,
            wage_type: WageType::Monthly,
            base_wage: DEFAULT_BASE_WAGE,
            transportation_allowance: DEFAULT_TRANSPORTATION_ALLOWANCE,
            standard_working_hours: DEFAULT_STANDARD_WORKING_HOURS,
            standard_working_days: DEFAULT_STANDARD_WORKING_DAYS,
        }
    }
}

/// GET /employees
pub async fn list(
    admin: TenantAdmin,
    State(state): State<AppState>,
    flash: IncomingFlash,
) -> Result<View<EmployeesView>, ApiError> {
    let employees = state.employees.list(&admin.scope).await?;
    Ok(View::new(EmployeesView { employees }, flash))
}

/// GET /employee/add
pub async fn add_page(_admin: TenantAdmin, flash: IncomingFlash) -> View<EmployeeDefaults> {
    View::new(EmployeeDefaults::default(), flash)
}

/// POST /employee/add
pub async fn add(
    admin: TenantAdmin,
    State(state): State<AppState>,
    Form(form): Form<EmployeeForm>,
) -> Result<FlashRedirect, ApiError> {
    let draft = form.into_draft()?;
    let employee = state
        .employees
        .create(&admin.scope, draft)
        .await
        .map_err(|e| ApiError::from_domain(e, EMPLOYEES))?;

    Ok(FlashRedirect::to(EMPLOYEES)
        .with(FlashLevel::Success, format!("Employee \"{}\" added.", employee.name)))
}

/// GET /employee/{id}/edit
pub async fn edit_page(
    admin: TenantAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    flash: IncomingFlash,
) -> Result<View<EmployeeDetail>, ApiError> {
    let detail = state.employees.detail(&admin.scope, parse_id(&id)?).await?;
    Ok(View::new(detail, flash))
}

/// POST /employee/{id}/edit
pub async fn edit(
    admin: TenantAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<EmployeeForm>,
) -> Result<FlashRedirect, ApiError> {
    let id = parse_id(&id)?;
    let draft = form.into_draft()?;
    let employee = state
        .employees
        .update(&admin.scope, id, draft)
        .await
        .map_err(|e| ApiError::from_domain(e, &format!("/employee/{}/edit", id)))?;

    Ok(FlashRedirect::to(EMPLOYEES)
        .with(FlashLevel::Success, format!("Employee \"{}\" updated.", employee.name)))
}
