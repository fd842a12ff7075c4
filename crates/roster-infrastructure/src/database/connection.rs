//! Database connection pool

use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tracing::info;

use roster_shared::config::DatabaseSettings;

pub async fn create_pool(settings: &DatabaseSettings) -> Result<SqlitePool, sqlx::Error> {
    // Each connection to `:memory:` opens a separate empty database.
    let in_memory = settings.url.contains(":memory:");

    let mut options = SqliteConnectOptions::from_str(&settings.url)?
        .create_if_missing(true)
        .foreign_keys(true);
    if !in_memory {
        options = options.journal_mode(SqliteJournalMode::Wal);
    }

    let (max_connections, min_connections) = if in_memory {
        (1, 1)
    } else {
        (settings.max_connections, settings.min_connections)
    };

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .min_connections(min_connections)
        .acquire_timeout(Duration::from_secs(3))
        .idle_timeout((!in_memory).then(|| Duration::from_secs(600)))
        .max_lifetime((!in_memory).then(|| Duration::from_secs(1800)))
        .connect_with(options)
        .await
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Opens the pool and brings the schema up to date.
pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<SqlitePool> {
    let pool = create_pool(settings)
        .await
        .with_context(|| format!("failed to open database {}", settings.url))?;
    run_migrations(&pool)
        .await
        .context("failed to run database migrations")?;

    info!("Database ready: {}", settings.url);
    Ok(pool)
}
