// ============================================================================
// Roster Core - Employee Entity
// File: crates/roster-core/src/domain/employee.rs
// Description: Employee master record owned by one company
// ============================================================================

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use roster_shared::EntityId;

/// Employment status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeStatus {
    Active,
    Terminated,
}

impl EmployeeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeStatus::Active => "active",
            EmployeeStatus::Terminated => "terminated",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(EmployeeStatus::Active),
            "terminated" => Some(EmployeeStatus::Terminated),
            _ => None,
        }
    }
}

impl Default for EmployeeStatus {
    fn default() -> Self {
        EmployeeStatus::Active
    }
}

/// Wage basis enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WageType {
    Monthly,
    Hourly,
    Daily,
}

impl WageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WageType::Monthly => "monthly",
            WageType::Hourly => "hourly",
            WageType::Daily => "daily",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "monthly" => Some(WageType::Monthly),
            "hourly" => Some(WageType::Hourly),
            "daily" => Some(WageType::Daily),
            _ => None,
        }
    }
}

/// Employee entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: EntityId,
    pub company_id: EntityId,
    /// Company-assigned staff number.
    pub employee_code: Option<String>,
    pub name: String,
    pub name_kana: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub join_date: Option<NaiveDate>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub employment_type: Option<String>,
    pub status: EmployeeStatus,

    // Wage
    pub wage_type: Option<WageType>,
    pub base_wage: i64,
    pub transportation_allowance: i64,

    // Working-time system
    pub working_time_system: Option<String>,
    pub standard_working_hours: f64,
    pub standard_working_days: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }
}

/// Editable employee fields, shared by create and update. On create the
/// status is ignored and the employee starts active.
#[derive(Debug, Clone, Validate)]
pub struct EmployeeDraft {
    #[validate(length(max = 50, message = "Employee code too long"))]
    pub employee_code: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(length(max = 100, message = "Kana name too long"))]
    pub name_kana: Option<String>,

    #[validate(email(message = "Invalid employee email"))]
    pub email: Option<String>,

    #[validate(length(max = 20, message = "Phone number too long"))]
    pub phone: Option<String>,

    pub birth_date: Option<NaiveDate>,
    pub gender: Option<String>,

    #[validate(length(max = 500, message = "Address too long"))]
    pub address: Option<String>,

    pub join_date: Option<NaiveDate>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub employment_type: Option<String>,
    pub status: EmployeeStatus,
    pub wage_type: Option<WageType>,

    #[validate(range(min = 0, message = "Base wage cannot be negative"))]
    pub base_wage: i64,

    #[validate(range(min = 0, message = "Transportation allowance cannot be negative"))]
    pub transportation_allowance: i64,

    pub working_time_system: Option<String>,

    #[validate(range(min = 0.0, max = 24.0, message = "Standard hours must be between 0 and 24"))]
    pub standard_working_hours: f64,

    #[validate(range(min = 0, max = 7, message = "Standard days must be between 0 and 7"))]
    pub standard_working_days: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> EmployeeDraft {
        EmployeeDraft {
            employee_code: Some("EMP001".into()),
            name: "Tanaka Taro".into(),
            name_kana: None,
            email: Some("tanaka@test.com".into()),
            phone: None,
            birth_date: NaiveDate::from_ymd_opt(1990, 4, 15),
            gender: None,
            address: None,
            join_date: NaiveDate::from_ymd_opt(2020, 4, 1),
            department: Some("Sales".into()),
            position: None,
            employment_type: Some("full_time".into()),
            status: EmployeeStatus::Active,
            wage_type: Some(WageType::Monthly),
            base_wage: 350_000,
            transportation_allowance: 15_000,
            working_time_system: Some("standard".into()),
            standard_working_hours: 8.0,
            standard_working_days: 5,
        }
    }

    #[test]
    fn valid_draft() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn name_is_required() {
        let d = EmployeeDraft { name: String::new(), ..draft() };
        assert!(d.validate().unwrap_err().field_errors().contains_key("name"));
    }

    #[test]
    fn hours_and_days_are_bounded() {
        let d = EmployeeDraft {
            standard_working_hours: 25.0,
            standard_working_days: 8,
            ..draft()
        };
        let errors = d.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("standard_working_hours"));
        assert!(errors.field_errors().contains_key("standard_working_days"));
    }

    #[test]
    fn status_and_wage_text() {
        assert_eq!(EmployeeStatus::from_str("terminated"), Some(EmployeeStatus::Terminated));
        assert_eq!(EmployeeStatus::default(), EmployeeStatus::Active);
        assert_eq!(WageType::from_str("hourly"), Some(WageType::Hourly));
        assert_eq!(WageType::Daily.as_str(), "daily");
        assert_eq!(WageType::from_str("weekly"), None);
    }
}
