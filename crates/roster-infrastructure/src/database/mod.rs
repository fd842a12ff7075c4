//! Database module (SQLite adapters)

pub mod connection;
pub mod sqlite;

pub use connection::{connect, create_pool, run_migrations};
pub use sqlite::{
    SqliteCompanyRepository, SqliteContractRepository, SqliteEmployeeRepository,
    SqlitePlanRepository, SqliteRecordRepository, SqliteSessionRepository, SqliteUserRepository,
};
