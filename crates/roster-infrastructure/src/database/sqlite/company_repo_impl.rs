// ============================================================================
// Roster Infrastructure - SQLite Company Repository
// File: crates/roster-infrastructure/src/database/sqlite/company_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::{error, info};

use roster_core::domain::{Company, ContractTerms, NewCompany, NewUser};
use roster_core::error::DomainError;
use roster_core::repositories::CompanyRepository;
use roster_shared::EntityId;

use super::{db_error, unique_violation};

const COMPANY_COLUMNS: &str = "id, code, name, address, phone, email, is_active, created_at";

pub struct SqliteCompanyRepository {
    pool: SqlitePool,
}

impl SqliteCompanyRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct CompanyRow {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<CompanyRow> for Company {
    fn from(row: CompanyRow) -> Self {
        Company {
            id: row.id,
            code: row.code,
            name: row.name,
            address: row.address,
            phone: row.phone,
            email: row.email,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

/// Maps a failed onboarding insert to the field that clashed.
fn onboarding_error(e: sqlx::Error, company: &NewCompany, admin: &NewUser) -> DomainError {
    match unique_violation(&e) {
        Some(msg) if msg.contains("companies.code") => {
            DomainError::CompanyCodeAlreadyExists(company.code.clone())
        }
        Some(msg) if msg.contains("users.email") => DomainError::EmailAlreadyExists(admin.email.clone()),
        _ => {
            error!("Database error onboarding company {}: {}", company.code, e);
            DomainError::DatabaseError(e.to_string())
        }
    }
}

#[async_trait]
impl CompanyRepository for SqliteCompanyRepository {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Company>, DomainError> {
        let row: Option<CompanyRow> =
            sqlx::query_as(&format!("SELECT {} FROM companies WHERE id = ?", COMPANY_COLUMNS))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error("finding company by id"))?;

        Ok(row.map(Into::into))
    }

    async fn list_all(&self) -> Result<Vec<Company>, DomainError> {
        let rows: Vec<CompanyRow> = sqlx::query_as(&format!(
            "SELECT {} FROM companies ORDER BY created_at DESC, id DESC",
            COMPANY_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing companies"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<Company>, DomainError> {
        let rows: Vec<CompanyRow> = sqlx::query_as(&format!(
            "SELECT {} FROM companies ORDER BY created_at DESC, id DESC LIMIT ?",
            COMPANY_COLUMNS
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing recent companies"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count_active(&self) -> Result<i64, DomainError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM companies WHERE is_active = 1")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("counting active companies"))
    }

    async fn update(&self, company: &Company) -> Result<Company, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE companies
            SET
                name = ?,
                address = ?,
                phone = ?,
                email = ?,
                is_active = ?
            WHERE id = ?
            "#,
        )
        .bind(&company.name)
        .bind(&company.address)
        .bind(&company.phone)
        .bind(&company.email)
        .bind(company.is_active)
        .bind(company.id)
        .execute(&self.pool)
        .await
        .map_err(db_error("updating company"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::CompanyNotFound);
        }

        self.find_by_id(company.id).await?.ok_or(DomainError::CompanyNotFound)
    }

    async fn onboard(
        &self,
        company: &NewCompany,
        terms: &ContractTerms,
        admin: &NewUser,
    ) -> Result<Company, DomainError> {
        info!("Onboarding company: {}", company.code);
        let now = Utc::now();

        // Dropping the transaction without commit rolls every insert back.
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("starting onboarding transaction"))?;

        let company_id = sqlx::query(
            r#"
            INSERT INTO companies (code, name, address, phone, email, is_active, created_at)
            VALUES (?, ?, ?, ?, ?, 1, ?)
            "#,
        )
        .bind(&company.code)
        .bind(&company.name)
        .bind(&company.address)
        .bind(&company.phone)
        .bind(&company.email)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| onboarding_error(e, company, admin))?
        .last_insert_rowid();

        sqlx::query(
            r#"
            INSERT INTO contracts (
                company_id, plan_id, start_date, end_date, is_active,
                fee, billing_cycle, notes, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, 1, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(company_id)
        .bind(terms.plan_id)
        .bind(terms.start_date)
        .bind(terms.end_date)
        .bind(terms.fee)
        .bind(terms.billing_cycle.as_str())
        .bind(&terms.notes)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| onboarding_error(e, company, admin))?;

        sqlx::query(
            r#"
            INSERT INTO users (email, password_hash, name, role, company_id, is_active, created_at)
            VALUES (?, ?, ?, ?, ?, 1, ?)
            "#,
        )
        .bind(&admin.email)
        .bind(&admin.password_hash)
        .bind(&admin.name)
        .bind(admin.role.as_str())
        .bind(company_id)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| onboarding_error(e, company, admin))?;

        tx.commit()
            .await
            .map_err(db_error("committing onboarding transaction"))?;

        info!("Company onboarded successfully: {}", company_id);
        self.find_by_id(company_id)
            .await?
            .ok_or_else(|| DomainError::InternalError(format!("company {} vanished after insert", company_id)))
    }
}
