// ============================================================================
// Roster Infrastructure - SQLite Plan Repository
// File: crates/roster-infrastructure/src/database/sqlite/plan_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::info;

use roster_core::domain::Plan;
use roster_core::error::DomainError;
use roster_core::repositories::PlanRepository;
use roster_shared::EntityId;

use super::db_error;

pub(crate) const PLAN_COLUMNS: &str = "id, name, display_name, max_employees, monthly_fee, \
     yearly_fee, description, is_active, created_at";

pub struct SqlitePlanRepository {
    pool: SqlitePool,
}

impl SqlitePlanRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
pub(crate) struct PlanRow {
    pub id: i64,
    pub name: String,
    pub display_name: String,
    pub max_employees: i64,
    pub monthly_fee: i64,
    pub yearly_fee: Option<i64>,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<PlanRow> for Plan {
    fn from(row: PlanRow) -> Self {
        Plan {
            id: row.id,
            name: row.name,
            display_name: row.display_name,
            max_employees: row.max_employees,
            monthly_fee: row.monthly_fee,
            yearly_fee: row.yearly_fee,
            description: row.description,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl PlanRepository for SqlitePlanRepository {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Plan>, DomainError> {
        let row: Option<PlanRow> =
            sqlx::query_as(&format!("SELECT {} FROM plans WHERE id = ?", PLAN_COLUMNS))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error("finding plan by id"))?;

        Ok(row.map(Into::into))
    }

    async fn list_all(&self) -> Result<Vec<Plan>, DomainError> {
        let rows: Vec<PlanRow> =
            sqlx::query_as(&format!("SELECT {} FROM plans ORDER BY monthly_fee, id", PLAN_COLUMNS))
                .fetch_all(&self.pool)
                .await
                .map_err(db_error("listing plans"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_active(&self) -> Result<Vec<Plan>, DomainError> {
        let rows: Vec<PlanRow> = sqlx::query_as(&format!(
            "SELECT {} FROM plans WHERE is_active = 1 ORDER BY monthly_fee, id",
            PLAN_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing active plans"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(&self, plan: &Plan) -> Result<Plan, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE plans
            SET
                display_name = ?,
                max_employees = ?,
                monthly_fee = ?,
                yearly_fee = ?,
                description = ?,
                is_active = ?
            WHERE id = ?
            "#,
        )
        .bind(&plan.display_name)
        .bind(plan.max_employees)
        .bind(plan.monthly_fee)
        .bind(plan.yearly_fee)
        .bind(&plan.description)
        .bind(plan.is_active)
        .bind(plan.id)
        .execute(&self.pool)
        .await
        .map_err(db_error("updating plan"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::PlanNotFound);
        }
        info!("Plan {} saved", plan.id);

        self.find_by_id(plan.id).await?.ok_or(DomainError::PlanNotFound)
    }
}
