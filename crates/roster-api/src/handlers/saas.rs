// ============================================================================
// Roster API - Platform Admin Handlers
// File: crates/roster-api/src/handlers/saas.rs
// ============================================================================
//! Company onboarding, company/contract maintenance and plan editing.
//! Every handler requires [`PlatformAdmin`].

use axum::{
    extract::{Path, State},
    Form,
};
use chrono::NaiveDate;
use serde::Serialize;

use roster_core::services::{CompanyDetail, PlatformDashboard};
use roster_core::{BillingCycle, Company, Plan};
use roster_shared::{today, EntityId};

use crate::error::ApiError;
use crate::extract::PlatformAdmin;
use crate::flash::{FlashLevel, FlashRedirect, IncomingFlash};
use crate::forms::{parse_id, CompanyEditForm, ContractForm, OnboardForm, PlanForm};
use crate::response::View;
use crate::state::AppState;

const COMPANIES: &str = "/saas/companies";
const PLANS: &str = "/saas/plans";
const ADD_COMPANY: &str = "/saas/company/add";

#[derive(Debug, Serialize)]
pub struct CompaniesView {
    pub companies: Vec<Company>,
}

#[derive(Debug, Serialize)]
pub struct OnboardView {
    pub plans: Vec<Plan>,
    pub today: NaiveDate,
    pub billing_cycles: [BillingCycle; 2],
}

#[derive(Debug, Serialize)]
pub struct PlansView {
    pub plans: Vec<Plan>,
}

#[derive(Debug, Serialize)]
pub struct PlanView {
    pub plan: Plan,
}

/// GET /saas/dashboard
pub async fn dashboard(
    _admin: PlatformAdmin,
    State(state): State<AppState>,
    flash: IncomingFlash,
) -> Result<View<PlatformDashboard>, ApiError> {
    let dashboard = state.platform.dashboard(today()).await?;
    Ok(View::new(dashboard, flash))
}

/// GET /saas/companies
pub async fn companies(
    _admin: PlatformAdmin,
    State(state): State<AppState>,
    flash: IncomingFlash,
) -> Result<View<CompaniesView>, ApiError> {
    let companies = state.platform.list_companies().await?;
    Ok(View::new(CompaniesView { companies }, flash))
}

/// GET /saas/company/add
pub async fn onboard_page(
    _admin: PlatformAdmin,
    State(state): State<AppState>,
    flash: IncomingFlash,
) -> Result<View<OnboardView>, ApiError> {
    let plans = state.platform.available_plans().await?;
    Ok(View::new(
        OnboardView {
            plans,
            today: today(),
            billing_cycles: [BillingCycle::Monthly, BillingCycle::Yearly],
        },
        flash,
    ))
}

/// POST /saas/company/add
pub async fn onboard(
    _admin: PlatformAdmin,
    State(state): State<AppState>,
    Form(form): Form<OnboardForm>,
) -> Result<FlashRedirect, ApiError> {
    let request = form.into_onboarding()?;
    let company = state
        .platform
        .onboard(request)
        .await
        .map_err(|e| ApiError::from_domain(e, ADD_COMPANY))?;

    Ok(FlashRedirect::to(COMPANIES)
        .with(FlashLevel::Success, format!("Company \"{}\" registered.", company.name)))
}

/// GET /saas/company/{id}/edit
pub async fn edit_company_page(
    _admin: PlatformAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    flash: IncomingFlash,
) -> Result<View<CompanyDetail>, ApiError> {
    let detail = state.platform.company_detail(parse_id(&id)?).await?;
    Ok(View::new(detail, flash))
}

/// POST /saas/company/{id}/edit
pub async fn edit_company(
    _admin: PlatformAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<CompanyEditForm>,
) -> Result<FlashRedirect, ApiError> {
    let id = parse_id(&id)?;
    let company = state
        .platform
        .update_company(id, form.into_update()?)
        .await
        .map_err(|e| ApiError::from_domain(e, &company_edit_path(id)))?;

    Ok(FlashRedirect::to(COMPANIES)
        .with(FlashLevel::Success, format!("Company \"{}\" updated.", company.name)))
}

/// POST /saas/company/{id}/contract
pub async fn issue_contract(
    _admin: PlatformAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ContractForm>,
) -> Result<FlashRedirect, ApiError> {
    let id = parse_id(&id)?;
    let back = company_edit_path(id);
    let contract = state
        .platform
        .issue_contract(id, form.into_request()?)
        .await
        .map_err(|e| ApiError::from_domain(e, &back))?;

    Ok(FlashRedirect::to(back).with(
        FlashLevel::Success,
        format!("New contract issued, valid until {}.", contract.end_date),
    ))
}

/// GET /saas/plans
pub async fn plans(
    _admin: PlatformAdmin,
    State(state): State<AppState>,
    flash: IncomingFlash,
) -> Result<View<PlansView>, ApiError> {
    let plans = state.platform.list_plans().await?;
    Ok(View::new(PlansView { plans }, flash))
}

/// GET /saas/plan/edit/{id}
pub async fn edit_plan_page(
    _admin: PlatformAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    flash: IncomingFlash,
) -> Result<View<PlanView>, ApiError> {
    let plan = state.platform.plan(parse_id(&id)?).await?;
    Ok(View::new(PlanView { plan }, flash))
}

/// POST /saas/plan/edit/{id}
pub async fn edit_plan(
    _admin: PlatformAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<PlanForm>,
) -> Result<FlashRedirect, ApiError> {
    let id = parse_id(&id)?;
    let plan = state
        .platform
        .update_plan(id, form.into_update()?)
        .await
        .map_err(|e| ApiError::from_domain(e, &format!("/saas/plan/edit/{}", id)))?;

    Ok(FlashRedirect::to(PLANS)
        .with(FlashLevel::Success, format!("Plan \"{}\" updated.", plan.display_name)))
}

fn company_edit_path(id: EntityId) -> String {
    format!("/saas/company/{}/edit", id)
}
