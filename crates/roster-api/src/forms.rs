// ============================================================================
// Roster API - Form Payloads
// File: crates/roster-api/src/forms.rs
// ============================================================================
//! urlencoded form bodies and their coercion into domain requests.
//!
//! Every field arrives as optional text. Blank dates mean "none", blank
//! numbers fall back to their defaults, unparsable input is a 400.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::Deserialize;

use roster_core::services::{ContractRequest, Onboarding};
use roster_core::{
    AdminAccount, BillingCycle, CompanyUpdate, EmployeeDraft, EmployeeStatus, NewCompany,
    PlanUpdate, WageType,
};
use roster_shared::constants::{
    DEFAULT_BASE_WAGE, DEFAULT_STANDARD_WORKING_DAYS, DEFAULT_STANDARD_WORKING_HOURS,
    DEFAULT_TRANSPORTATION_ALLOWANCE,
};
use roster_shared::utils::non_blank;
use roster_shared::{parse_date, today, EntityId};

use crate::error::ApiError;

type FormResult<T> = Result<T, ApiError>;

fn required(field: &str, value: Option<String>) -> FormResult<String> {
    non_blank(value).ok_or_else(|| ApiError::BadRequest(format!("{} is required", field)))
}

fn date(field: &str, value: Option<String>) -> FormResult<Option<NaiveDate>> {
    non_blank(value)
        .map(|v| {
            parse_date(&v).map_err(|_| {
                ApiError::BadRequest(format!("{} must be a date (YYYY-MM-DD)", field))
            })
        })
        .transpose()
}

fn number<T: FromStr>(field: &str, value: Option<String>) -> FormResult<Option<T>> {
    non_blank(value)
        .map(|v| {
            v.parse::<T>()
                .map_err(|_| ApiError::BadRequest(format!("{} must be a number", field)))
        })
        .transpose()
}

/// Like [`number`], but `NaN` and infinities are rejected too.
fn finite_number(field: &str, value: Option<String>) -> FormResult<Option<f64>> {
    match number::<f64>(field, value)? {
        Some(n) if !n.is_finite() => Err(ApiError::BadRequest(format!("{} must be a number", field))),
        other => Ok(other),
    }
}

fn required_number<T: FromStr>(field: &str, value: Option<String>) -> FormResult<T> {
    number(field, value)?.ok_or_else(|| ApiError::BadRequest(format!("{} is required", field)))
}

fn billing_cycle(value: Option<String>) -> FormResult<BillingCycle> {
    match non_blank(value) {
        None => Ok(BillingCycle::default()),
        Some(v) => BillingCycle::from_str(&v)
            .ok_or_else(|| ApiError::BadRequest(format!("Unknown billing cycle: {}", v))),
    }
}

/// HTML checkboxes send `on` when ticked and nothing otherwise.
fn checkbox(value: &Option<String>) -> bool {
    matches!(value.as_deref(), Some("on" | "true" | "1"))
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OnboardForm {
    pub company_code: Option<String>,
    pub company_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub admin_name: Option<String>,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
    pub plan_id: Option<String>,
    pub start_date: Option<String>,
    pub billing_cycle: Option<String>,
}

impl OnboardForm {
    pub fn into_onboarding(self) -> FormResult<Onboarding> {
        Ok(Onboarding {
            company: NewCompany {
                code: required("Company code", self.company_code)?,
                name: required("Company name", self.company_name)?,
                address: non_blank(self.address),
                phone: non_blank(self.phone),
                email: non_blank(self.email),
            },
            admin: AdminAccount {
                name: non_blank(self.admin_name),
                email: required("Admin email", self.admin_email)?,
                // Passwords are not trimmed.
                password: self
                    .admin_password
                    .filter(|p| !p.is_empty())
                    .ok_or_else(|| ApiError::BadRequest("Admin password is required".into()))?,
            },
            plan_id: required_number("Plan", self.plan_id)?,
            start_date: date("Start date", self.start_date)?.unwrap_or_else(today),
            billing_cycle: billing_cycle(self.billing_cycle)?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CompanyEditForm {
    pub company_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_active: Option<String>,
}

impl CompanyEditForm {
    pub fn into_update(self) -> FormResult<CompanyUpdate> {
        let is_active = checkbox(&self.is_active);
        Ok(CompanyUpdate {
            name: required("Company name", self.company_name)?,
            address: non_blank(self.address),
            phone: non_blank(self.phone),
            email: non_blank(self.email),
            is_active,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ContractForm {
    pub plan_id: Option<String>,
    pub start_date: Option<String>,
    pub billing_cycle: Option<String>,
    pub notes: Option<String>,
}

impl ContractForm {
    pub fn into_request(self) -> FormResult<ContractRequest> {
        Ok(ContractRequest {
            plan_id: required_number("Plan", self.plan_id)?,
            start_date: date("Start date", self.start_date)?.unwrap_or_else(today),
            billing_cycle: billing_cycle(self.billing_cycle)?,
            notes: non_blank(self.notes),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PlanForm {
    pub display_name: Option<String>,
    pub max_employees: Option<String>,
    pub monthly_fee: Option<String>,
    pub yearly_fee: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<String>,
}

impl PlanForm {
    pub fn into_update(self) -> FormResult<PlanUpdate> {
        let is_active = checkbox(&self.is_active);
        Ok(PlanUpdate {
            display_name: required("Display name", self.display_name)?,
            max_employees: required_number("Employee limit", self.max_employees)?,
            monthly_fee: required_number("Monthly fee", self.monthly_fee)?,
            yearly_fee: number("Yearly fee", self.yearly_fee)?,
            description: non_blank(self.description),
            is_active,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct EmployeeForm {
    pub employee_code: Option<String>,
    pub name: Option<String>,
    pub name_kana: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub join_date: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub employment_type: Option<String>,
    pub status: Option<String>,
    pub wage_type: Option<String>,
    pub base_wage: Option<String>,
    pub transportation_allowance: Option<String>,
    pub working_time_system: Option<String>,
    pub standard_working_hours: Option<String>,
    pub standard_working_days: Option<String>,
}

impl EmployeeForm {
    pub fn into_draft(self) -> FormResult<EmployeeDraft> {
        let status = match non_blank(self.status) {
            None => EmployeeStatus::default(),
            Some(v) => EmployeeStatus::from_str(&v)
                .ok_or_else(|| ApiError::BadRequest(format!("Unknown status: {}", v)))?,
        };
        let wage_type = non_blank(self.wage_type)
            .map(|v| {
                WageType::from_str(&v)
                    .ok_or_else(|| ApiError::BadRequest(format!("Unknown wage type: {}", v)))
            })
            .transpose()?;

        Ok(EmployeeDraft {
            employee_code: non_blank(self.employee_code),
            name: required("Name", self.name)?,
            name_kana: non_blank(self.name_kana),
            email: non_blank(self.email),
            phone: non_blank(self.phone),
            birth_date: date("Birth date", self.birth_date)?,
            gender: non_blank(self.gender),
            address: non_blank(self.address),
            join_date: date("Join date", self.join_date)?,
            department: non_blank(self.department),
            position: non_blank(self.position),
            employment_type: non_blank(self.employment_type),
            status,
            wage_type,
            base_wage: number("Base wage", self.base_wage)?.unwrap_or(DEFAULT_BASE_WAGE),
            transportation_allowance: number("Transportation allowance", self.transportation_allowance)?
                .unwrap_or(DEFAULT_TRANSPORTATION_ALLOWANCE),
            working_time_system: non_blank(self.working_time_system),
            standard_working_hours: finite_number("Standard working hours", self.standard_working_hours)?
                .unwrap_or(DEFAULT_STANDARD_WORKING_HOURS),
            standard_working_days: number("Standard working days", self.standard_working_days)?
                .unwrap_or(DEFAULT_STANDARD_WORKING_DAYS),
        })
    }
}

/// Path segment that must be a numeric id.
pub fn parse_id(raw: &str) -> FormResult<EntityId> {
    raw.parse()
        .map_err(|_| ApiError::NotFound(format!("No record with id {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_numbers_use_defaults() {
        let draft = EmployeeForm {
            name: Some("Sato Hanako".into()),
            base_wage: Some("".into()),
            ..Default::default()
        }
        .into_draft()
        .unwrap();
        assert_eq!(draft.base_wage, DEFAULT_BASE_WAGE);
        assert_eq!(draft.transportation_allowance, DEFAULT_TRANSPORTATION_ALLOWANCE);
        assert_eq!(draft.standard_working_hours, 8.0);
        assert_eq!(draft.standard_working_days, 5);
        assert_eq!(draft.status, EmployeeStatus::Active);
        assert!(draft.join_date.is_none());
    }

    #[test]
    fn bad_input_is_rejected() {
        let bad_wage = EmployeeForm {
            name: Some("Sato".into()),
            base_wage: Some("lots".into()),
            ..Default::default()
        };
        assert!(matches!(bad_wage.into_draft(), Err(ApiError::BadRequest(_))));

        let bad_date = EmployeeForm {
            name: Some("Sato".into()),
            join_date: Some("2024/04/01".into()),
            ..Default::default()
        };
        assert!(matches!(bad_date.into_draft(), Err(ApiError::BadRequest(_))));

        for hours in ["NaN", "inf", "-infinity"] {
            let not_finite = EmployeeForm {
                name: Some("Sato".into()),
                standard_working_hours: Some(hours.into()),
                ..Default::default()
            };
            assert!(matches!(not_finite.into_draft(), Err(ApiError::BadRequest(_))), "{}", hours);
        }

        let nameless = EmployeeForm::default();
        assert!(matches!(nameless.into_draft(), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn onboarding_defaults_to_monthly() {
        let onboarding = OnboardForm {
            company_code: Some("ACME".into()),
            company_name: Some("Acme".into()),
            admin_email: Some("admin@acme.test".into()),
            admin_password: Some("secret123".into()),
            plan_id: Some("1".into()),
            start_date: Some("2024-01-10".into()),
            ..Default::default()
        }
        .into_onboarding()
        .unwrap();
        assert_eq!(onboarding.billing_cycle, BillingCycle::Monthly);
        assert_eq!(onboarding.start_date, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        assert!(onboarding.company.email.is_none());
    }

    #[test]
    fn unchecked_box_means_inactive() {
        let update = CompanyEditForm {
            company_name: Some("Acme".into()),
            ..Default::default()
        }
        .into_update()
        .unwrap();
        assert!(!update.is_active);

        let plan = PlanForm {
            display_name: Some("Basic".into()),
            max_employees: Some("10".into()),
            monthly_fee: Some("5000".into()),
            is_active: Some("on".into()),
            ..Default::default()
        }
        .into_update()
        .unwrap();
        assert!(plan.is_active);
        assert_eq!(plan.yearly_fee, None);
    }
}
