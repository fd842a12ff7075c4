//! Repository traits (ports)
//!
//! Tenant-owned data is only reachable through methods that take a
//! [`TenantScope`](crate::domain::TenantScope).

pub mod company_repository;
pub mod contract_repository;
pub mod employee_repository;
pub mod plan_repository;
pub mod record_repository;
pub mod session_repository;
pub mod user_repository;

pub use company_repository::CompanyRepository;
pub use contract_repository::ContractRepository;
pub use employee_repository::EmployeeRepository;
pub use plan_repository::PlanRepository;
pub use record_repository::RecordRepository;
pub use session_repository::SessionRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use company_repository::MockCompanyRepository;
#[cfg(test)]
pub use contract_repository::MockContractRepository;
#[cfg(test)]
pub use employee_repository::MockEmployeeRepository;
#[cfg(test)]
pub use plan_repository::MockPlanRepository;
#[cfg(test)]
pub use record_repository::MockRecordRepository;
#[cfg(test)]
pub use session_repository::MockSessionRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
