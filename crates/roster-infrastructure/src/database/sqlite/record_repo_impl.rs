//! Tenant-scoped reads of attendance, payroll and leave tables.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, SqlitePool};

use roster_core::domain::{LeaveCredit, PayrollCalculation, TenantScope};
use roster_core::error::DomainError;
use roster_core::repositories::RecordRepository;
use roster_shared::EntityId;

use super::db_error;

pub struct SqliteRecordRepository {
    pool: SqlitePool,
}

impl SqliteRecordRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct LeaveCreditRow {
    pub id: i64,
    pub company_id: i64,
    pub employee_id: i64,
    pub grant_date: NaiveDate,
    pub days_granted: f64,
    pub expiry_date: Option<NaiveDate>,
    pub days_used: f64,
    pub days_remaining: Option<f64>,
    pub fiscal_year: Option<i64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<LeaveCreditRow> for LeaveCredit {
    fn from(row: LeaveCreditRow) -> Self {
        LeaveCredit {
            id: row.id,
            company_id: row.company_id,
            employee_id: row.employee_id,
            grant_date: row.grant_date,
            days_granted: row.days_granted,
            expiry_date: row.expiry_date,
            days_used: row.days_used,
            days_remaining: row.days_remaining,
            fiscal_year: row.fiscal_year,
            notes: row.notes,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct PayrollRow {
    pub id: i64,
    pub company_id: i64,
    pub employee_id: i64,
    pub year: i64,
    pub month: i64,
    pub base_salary: i64,
    pub overtime_pay: i64,
    pub transportation: i64,
    pub other_allowances: i64,
    pub gross_salary: i64,
    pub health_insurance: i64,
    pub pension: i64,
    pub employment_insurance: i64,
    pub income_tax: i64,
    pub resident_tax: i64,
    pub other_deductions: i64,
    pub total_deductions: i64,
    pub net_salary: i64,
    pub total_working_days: i64,
    pub total_working_hours: f64,
    pub paid_leave_days: f64,
    pub absent_days: i64,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PayrollRow> for PayrollCalculation {
    fn from(row: PayrollRow) -> Self {
        PayrollCalculation {
            id: row.id,
            company_id: row.company_id,
            employee_id: row.employee_id,
            year: row.year,
            month: row.month,
            base_salary: row.base_salary,
            overtime_pay: row.overtime_pay,
            transportation: row.transportation,
            other_allowances: row.other_allowances,
            gross_salary: row.gross_salary,
            health_insurance: row.health_insurance,
            pension: row.pension,
            employment_insurance: row.employment_insurance,
            income_tax: row.income_tax,
            resident_tax: row.resident_tax,
            other_deductions: row.other_deductions,
            total_deductions: row.total_deductions,
            net_salary: row.net_salary,
            total_working_days: row.total_working_days,
            total_working_hours: row.total_working_hours,
            paid_leave_days: row.paid_leave_days,
            absent_days: row.absent_days,
            remarks: row.remarks,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl RecordRepository for SqliteRecordRepository {
    async fn count_working_time_since(
        &self,
        scope: &TenantScope,
        since: NaiveDate,
    ) -> Result<i64, DomainError> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM working_time_records WHERE company_id = ? AND work_date >= ?",
        )
        .bind(scope.company_id())
        .bind(since)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("counting working-time records"))
    }

    async fn leave_credits_for(
        &self,
        scope: &TenantScope,
        employee_id: EntityId,
    ) -> Result<Vec<LeaveCredit>, DomainError> {
        let rows: Vec<LeaveCreditRow> = sqlx::query_as(
            r#"
            SELECT id, company_id, employee_id, grant_date, days_granted, expiry_date,
                   days_used, days_remaining, fiscal_year, notes, created_at
            FROM leave_credits
            WHERE company_id = ? AND employee_id = ?
            ORDER BY grant_date DESC, id DESC
            "#,
        )
        .bind(scope.company_id())
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing leave credits"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn payroll_for(
        &self,
        scope: &TenantScope,
        employee_id: EntityId,
    ) -> Result<Vec<PayrollCalculation>, DomainError> {
        let rows: Vec<PayrollRow> = sqlx::query_as(
            r#"
            SELECT id, company_id, employee_id, year, month,
                   base_salary, overtime_pay, transportation, other_allowances, gross_salary,
                   health_insurance, pension, employment_insurance, income_tax, resident_tax,
                   other_deductions, total_deductions, net_salary,
                   total_working_days, total_working_hours, paid_leave_days, absent_days,
                   remarks, created_at, updated_at
            FROM payroll_calculations
            WHERE company_id = ? AND employee_id = ?
            ORDER BY year DESC, month DESC
            "#,
        )
        .bind(scope.company_id())
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing payroll history"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
