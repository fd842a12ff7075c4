//! # Roster Infrastructure
//!
//! SQLite storage adapters for the roster core ports.

pub mod database;

pub use database::{
    connect, create_pool, run_migrations, SqliteCompanyRepository, SqliteContractRepository,
    SqliteEmployeeRepository, SqlitePlanRepository, SqliteRecordRepository,
    SqliteSessionRepository, SqliteUserRepository,
};
