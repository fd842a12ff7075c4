// ============================================================================
// Roster Infrastructure - SQLite User Repository
// File: crates/roster-infrastructure/src/database/sqlite/user_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::{error, info};

use roster_core::domain::{NewUser, Role, User};
use roster_core::error::DomainError;
use roster_core::repositories::UserRepository;
use roster_shared::EntityId;

use super::{db_error, unique_violation};

const USER_COLUMNS: &str =
    "id, email, password_hash, name, role, company_id, is_active, created_at, last_login";

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct UserRow {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub role: String,
    pub company_id: Option<i64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = Role::from_str(&row.role).ok_or_else(|| {
            error!("User {} has unknown role {:?}", row.id, row.role);
            DomainError::InvalidPrincipal(format!("unknown role {}", row.role))
        })?;

        Ok(User {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            name: row.name,
            role,
            company_id: row.company_id,
            is_active: row.is_active,
            created_at: row.created_at,
            last_login: row.last_login,
        })
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error("finding user by id"))?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {} FROM users WHERE LOWER(email) = LOWER(?)",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding user by email"))?;

        row.map(User::try_from).transpose()
    }

    async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
        let id = sqlx::query(
            r#"
            INSERT INTO users (email, password_hash, name, role, company_id, is_active, created_at)
            VALUES (?, ?, ?, ?, NULL, 1, ?)
            "#,
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.name)
        .bind(user.role.as_str())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e: sqlx::Error| match unique_violation(&e) {
            Some(_) => DomainError::EmailAlreadyExists(user.email.clone()),
            None => {
                error!("Database error creating user: {}", e);
                DomainError::DatabaseError(e.to_string())
            }
        })?
        .last_insert_rowid();

        info!("User created: {}", id);
        self.find_by_id(id).await?.ok_or(DomainError::UserNotFound)
    }

    async fn record_login(&self, id: EntityId, at: DateTime<Utc>) -> Result<(), DomainError> {
        sqlx::query("UPDATE users SET last_login = ? WHERE id = ?")
            .bind(at)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("recording login"))?;
        Ok(())
    }
}
