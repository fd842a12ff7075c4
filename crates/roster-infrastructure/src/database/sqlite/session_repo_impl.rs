//! SQLite session store. `expires_at` is kept as Unix seconds so expiry is an
//! integer comparison.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use roster_core::error::DomainError;
use roster_core::repositories::SessionRepository;
use roster_shared::EntityId;

use super::db_error;

pub struct SqliteSessionRepository {
    pool: SqlitePool,
}

impl SqliteSessionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for SqliteSessionRepository {
    async fn create(
        &self,
        token_hash: &str,
        user_id: EntityId,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO sessions (token_hash, user_id, created_at, expires_at) VALUES (?, ?, ?, ?)",
        )
        .bind(token_hash)
        .bind(user_id)
        .bind(created_at)
        .bind(expires_at.timestamp())
        .execute(&self.pool)
        .await
        .map_err(db_error("creating session"))?;
        Ok(())
    }

    async fn find_user_id(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<EntityId>, DomainError> {
        sqlx::query_scalar("SELECT user_id FROM sessions WHERE token_hash = ? AND expires_at > ?")
            .bind(token_hash)
            .bind(now.timestamp())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("resolving session"))
    }

    async fn delete(&self, token_hash: &str) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM sessions WHERE token_hash = ?")
            .bind(token_hash)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting session"))?;
        Ok(())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(now.timestamp())
            .execute(&self.pool)
            .await
            .map_err(db_error("purging expired sessions"))?;
        Ok(result.rows_affected())
    }
}
