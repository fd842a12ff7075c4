//! SQLite repository implementations

pub mod company_repo_impl;
pub mod contract_repo_impl;
pub mod employee_repo_impl;
pub mod plan_repo_impl;
pub mod record_repo_impl;
pub mod session_repo_impl;
pub mod user_repo_impl;

pub use company_repo_impl::SqliteCompanyRepository;
pub use contract_repo_impl::SqliteContractRepository;
pub use employee_repo_impl::SqliteEmployeeRepository;
pub use plan_repo_impl::SqlitePlanRepository;
pub use record_repo_impl::SqliteRecordRepository;
pub use session_repo_impl::SqliteSessionRepository;
pub use user_repo_impl::SqliteUserRepository;

use roster_core::error::DomainError;
use tracing::error;

/// Logs a storage failure and converts it into a domain error.
pub(crate) fn db_error(action: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e: sqlx::Error| {
        error!("Database error {}: {}", action, e);
        DomainError::DatabaseError(e.to_string())
    }
}

/// Constraint message of a unique violation, e.g.
/// `UNIQUE constraint failed: users.email`.
pub(crate) fn unique_violation(e: &sqlx::Error) -> Option<String> {
    match e {
        sqlx::Error::Database(db) if db.is_unique_violation() => Some(db.message().to_string()),
        _ => None,
    }
}
