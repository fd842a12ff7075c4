// ============================================================================
// Roster Infrastructure - SQLite Employee Repository
// File: crates/roster-infrastructure/src/database/sqlite/employee_repo_impl.rs
// Description: Tenant-scoped employee storage; every statement filters on
//              the scope's company id
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::info;

use roster_core::domain::{Employee, EmployeeDraft, EmployeeStatus, TenantScope, WageType};
use roster_core::error::DomainError;
use roster_core::repositories::EmployeeRepository;
use roster_shared::EntityId;

use super::db_error;

const EMPLOYEE_COLUMNS: &str = "id, company_id, employee_code, name, name_kana, email, phone, \
     birth_date, gender, address, join_date, department, position, employment_type, status, \
     wage_type, base_wage, transportation_allowance, working_time_system, \
     standard_working_hours, standard_working_days, created_at, updated_at";

pub struct SqliteEmployeeRepository {
    pool: SqlitePool,
}

impl SqliteEmployeeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct EmployeeRow {
    pub id: i64,
    pub company_id: i64,
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
    pub status: String,
    pub wage_type: Option<String>,
    pub base_wage: i64,
    pub transportation_allowance: i64,
    pub working_time_system: Option<String>,
    pub standard_working_hours: f64,
    pub standard_working_days: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Employee {
            id: row.id,
            company_id: row.company_id,
            employee_code: row.employee_code,
            name: row.name,
            name_kana: row.name_kana,
            email: row.email,
            phone: row.phone,
            birth_date: row.birth_date,
            gender: row.gender,
            address: row.address,
            join_date: row.join_date,
            department: row.department,
            position: row.position,
            employment_type: row.employment_type,
            status: EmployeeStatus::from_str(&row.status).unwrap_or_default(),
            wage_type: row.wage_type.as_deref().and_then(WageType::from_str),
            base_wage: row.base_wage,
            transportation_allowance: row.transportation_allowance,
            working_time_system: row.working_time_system,
            standard_working_hours: row.standard_working_hours,
            standard_working_days: row.standard_working_days,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl EmployeeRepository for SqliteEmployeeRepository {
    async fn list(&self, scope: &TenantScope) -> Result<Vec<Employee>, DomainError> {
        let rows: Vec<EmployeeRow> = sqlx::query_as(&format!(
            "SELECT {} FROM employees WHERE company_id = ? \
             ORDER BY employee_code IS NULL, employee_code, id",
            EMPLOYEE_COLUMNS
        ))
        .bind(scope.company_id())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing employees"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find(&self, scope: &TenantScope, id: EntityId) -> Result<Option<Employee>, DomainError> {
        let row: Option<EmployeeRow> = sqlx::query_as(&format!(
            "SELECT {} FROM employees WHERE id = ? AND company_id = ?",
            EMPLOYEE_COLUMNS
        ))
        .bind(id)
        .bind(scope.company_id())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding employee"))?;

        Ok(row.map(Into::into))
    }

    async fn count_active(&self, scope: &TenantScope) -> Result<i64, DomainError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM employees WHERE company_id = ? AND status = 'active'")
            .bind(scope.company_id())
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("counting active employees"))
    }

    async fn count_active_all(&self) -> Result<i64, DomainError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM employees WHERE status = 'active'")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("counting all active employees"))
    }

    async fn create(
        &self,
        scope: &TenantScope,
        draft: &EmployeeDraft,
        ceiling: Option<i64>,
    ) -> Result<Employee, DomainError> {
        let now = Utc::now();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("starting employee transaction"))?;

        if let Some(max) = ceiling {
            let active: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM employees WHERE company_id = ? AND status = 'active'",
            )
            .bind(scope.company_id())
            .fetch_one(&mut *tx)
            .await
            .map_err(db_error("counting employees for ceiling"))?;

            if active >= max {
                return Err(DomainError::EmployeeLimitReached { max });
            }
        }

        let id = sqlx::query(
            r#"
            INSERT INTO employees (
                company_id, employee_code, name, name_kana, email, phone,
                birth_date, gender, address, join_date, department, position,
                employment_type, status, wage_type, base_wage, transportation_allowance,
                working_time_system, standard_working_hours, standard_working_days,
                created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 'active', ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(scope.company_id())
        .bind(&draft.employee_code)
        .bind(&draft.name)
        .bind(&draft.name_kana)
        .bind(&draft.email)
        .bind(&draft.phone)
        .bind(draft.birth_date)
        .bind(&draft.gender)
        .bind(&draft.address)
        .bind(draft.join_date)
        .bind(&draft.department)
        .bind(&draft.position)
        .bind(&draft.employment_type)
        .bind(draft.wage_type.map(|w| w.as_str()))
        .bind(draft.base_wage)
        .bind(draft.transportation_allowance)
        .bind(&draft.working_time_system)
        .bind(draft.standard_working_hours)
        .bind(draft.standard_working_days)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(db_error("inserting employee"))?
        .last_insert_rowid();

        tx.commit()
            .await
            .map_err(db_error("committing employee transaction"))?;

        info!("Employee {} created for company {}", id, scope.company_id());
        self.find(scope, id).await?.ok_or(DomainError::EmployeeNotFound)
    }

    async fn update(
        &self,
        scope: &TenantScope,
        id: EntityId,
        draft: &EmployeeDraft,
    ) -> Result<Employee, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE employees
            SET
                employee_code = ?,
                name = ?,
                name_kana = ?,
                email = ?,
                phone = ?,
                birth_date = ?,
                gender = ?,
                address = ?,
                join_date = ?,
                department = ?,
                position = ?,
                employment_type = ?,
                status = ?,
                wage_type = ?,
                base_wage = ?,
                transportation_allowance = ?,
                working_time_system = ?,
                standard_working_hours = ?,
                standard_working_days = ?,
                updated_at = ?
            WHERE id = ? AND company_id = ?
            "#,
        )
        .bind(&draft.employee_code)
        .bind(&draft.name)
        .bind(&draft.name_kana)
        .bind(&draft.email)
        .bind(&draft.phone)
        .bind(draft.birth_date)
        .bind(&draft.gender)
        .bind(&draft.address)
        .bind(draft.join_date)
        .bind(&draft.department)
        .bind(&draft.position)
        .bind(&draft.employment_type)
        .bind(draft.status.as_str())
        .bind(draft.wage_type.map(|w| w.as_str()))
        .bind(draft.base_wage)
        .bind(draft.transportation_allowance)
        .bind(&draft.working_time_system)
        .bind(draft.standard_working_hours)
        .bind(draft.standard_working_days)
        .bind(Utc::now())
        .bind(id)
        .bind(scope.company_id())
        .execute(&self.pool)
        .await
        .map_err(db_error("updating employee"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::EmployeeNotFound);
        }

        self.find(scope, id).await?.ok_or(DomainError::EmployeeNotFound)
    }
}
