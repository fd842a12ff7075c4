// ============================================================================
// Roster Infrastructure - SQLite Contract Repository
// File: crates/roster-infrastructure/src/database/sqlite/contract_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::info;

use roster_core::domain::{
    BillingCycle, Contract, ContractTerms, ContractWithPlan, ExpiringContract,
};
use roster_core::error::DomainError;
use roster_core::repositories::ContractRepository;
use roster_shared::EntityId;

use super::plan_repo_impl::{PlanRow, PLAN_COLUMNS};
use super::db_error;

const CONTRACT_COLUMNS: &str = "c.id, c.company_id, c.plan_id, c.start_date, c.end_date, \
     c.is_active, c.fee, c.billing_cycle, c.notes, c.created_at, c.updated_at";

pub struct SqliteContractRepository {
    pool: SqlitePool,
}

impl SqliteContractRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<Contract>, DomainError> {
        let row: Option<ContractRow> = sqlx::query_as(&format!(
            "SELECT {} FROM contracts c WHERE c.id = ?",
            CONTRACT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding contract by id"))?;

        Ok(row.map(Into::into))
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct ContractRow {
    pub id: i64,
    pub company_id: i64,
    pub plan_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
    pub fee: Option<i64>,
    pub billing_cycle: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ContractRow> for Contract {
    fn from(row: ContractRow) -> Self {
        Contract {
            id: row.id,
            company_id: row.company_id,
            plan_id: row.plan_id,
            start_date: row.start_date,
            end_date: row.end_date,
            is_active: row.is_active,
            fee: row.fee,
            billing_cycle: BillingCycle::from_str(&row.billing_cycle).unwrap_or_default(),
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct ExpiringRow {
    #[sqlx(flatten)]
    pub contract: ContractRow,
    pub company_name: String,
    pub plan_display_name: String,
}

#[async_trait]
impl ContractRepository for SqliteContractRepository {
    async fn find_active_for_company(
        &self,
        company_id: EntityId,
    ) -> Result<Option<ContractWithPlan>, DomainError> {
        let row: Option<ContractRow> = sqlx::query_as(&format!(
            "SELECT {} FROM contracts c WHERE c.company_id = ? AND c.is_active = 1",
            CONTRACT_COLUMNS
        ))
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding active contract"))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let plan: PlanRow =
            sqlx::query_as(&format!("SELECT {} FROM plans WHERE id = ?", PLAN_COLUMNS))
                .bind(row.plan_id)
                .fetch_one(&self.pool)
                .await
                .map_err(db_error("loading contract plan"))?;

        Ok(Some(ContractWithPlan {
            contract: row.into(),
            plan: plan.into(),
        }))
    }

    async fn list_for_company(&self, company_id: EntityId) -> Result<Vec<Contract>, DomainError> {
        let rows: Vec<ContractRow> = sqlx::query_as(&format!(
            "SELECT {} FROM contracts c WHERE c.company_id = ? ORDER BY c.start_date DESC, c.id DESC",
            CONTRACT_COLUMNS
        ))
        .bind(company_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing company contracts"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count_current(&self, today: NaiveDate) -> Result<i64, DomainError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM contracts WHERE is_active = 1 AND end_date >= ?")
            .bind(today)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("counting current contracts"))
    }

    async fn list_expiring(
        &self,
        today: NaiveDate,
        until: NaiveDate,
    ) -> Result<Vec<ExpiringContract>, DomainError> {
        let rows: Vec<ExpiringRow> = sqlx::query_as(&format!(
            r#"
            SELECT {}, co.name AS company_name, p.display_name AS plan_display_name
            FROM contracts c
            JOIN companies co ON co.id = c.company_id
            JOIN plans p ON p.id = c.plan_id
            WHERE c.is_active = 1 AND c.end_date >= ? AND c.end_date <= ?
            ORDER BY c.end_date, c.id
            "#,
            CONTRACT_COLUMNS
        ))
        .bind(today)
        .bind(until)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing expiring contracts"))?;

        Ok(rows
            .into_iter()
            .map(|row| ExpiringContract {
                contract: row.contract.into(),
                company_name: row.company_name,
                plan_display_name: row.plan_display_name,
            })
            .collect())
    }

    async fn replace_active(
        &self,
        company_id: EntityId,
        terms: &ContractTerms,
    ) -> Result<Contract, DomainError> {
        let now = Utc::now();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("starting contract transaction"))?;

        let retired = sqlx::query(
            "UPDATE contracts SET is_active = 0, updated_at = ? WHERE company_id = ? AND is_active = 1",
        )
        .bind(now)
        .bind(company_id)
        .execute(&mut *tx)
        .await
        .map_err(db_error("retiring active contract"))?
        .rows_affected();

        let id = sqlx::query(
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
        .map_err(db_error("inserting contract"))?
        .last_insert_rowid();

        tx.commit()
            .await
            .map_err(db_error("committing contract transaction"))?;

        info!(
            "Contract {} active for company {} ({} retired)",
            id, company_id, retired
        );
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::InternalError(format!("contract {} vanished after insert", id)))
    }
}
