//! Attendance, payroll and leave records.
//!
//! These tables are read by the tenant views but nothing in the service
//! writes them yet.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use roster_shared::EntityId;

/// One employee working day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkingTimeRecord {
    pub id: EntityId,
    pub company_id: EntityId,
    pub employee_id: EntityId,
    pub work_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub break_minutes: i64,

    // Hour buckets
    pub regular_hours: f64,
    pub overtime_in_legal: f64,
    pub overtime_out_legal: f64,
    pub legal_holiday_hours: f64,
    pub non_legal_holiday_hours: f64,
    pub late_night_hours: f64,

    pub is_absent: bool,
    pub is_paid_leave: bool,
    pub leave_days: f64,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Monthly payslip breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollCalculation {
    pub id: EntityId,
    pub company_id: EntityId,
    pub employee_id: EntityId,
    pub year: i64,
    pub month: i64,

    // Earnings
    pub base_salary: i64,
    pub overtime_pay: i64,
    pub transportation: i64,
    pub other_allowances: i64,
    pub gross_salary: i64,

    // Deductions
    pub health_insurance: i64,
    pub pension: i64,
    pub employment_insurance: i64,
    pub income_tax: i64,
    pub resident_tax: i64,
    pub other_deductions: i64,
    pub total_deductions: i64,

    pub net_salary: i64,

    // Attendance totals
    pub total_working_days: i64,
    pub total_working_hours: f64,
    pub paid_leave_days: f64,
    pub absent_days: i64,

    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Paid-leave grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveCredit {
    pub id: EntityId,
    pub company_id: EntityId,
    pub employee_id: EntityId,
    pub grant_date: NaiveDate,
    pub days_granted: f64,
    pub expiry_date: Option<NaiveDate>,
    pub days_used: f64,
    pub days_remaining: Option<f64>,
    pub fiscal_year: Option<i64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
