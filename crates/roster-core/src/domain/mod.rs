//! # Roster Core - Domain Module
//!
//! Domain entities for the HR/payroll administration service.

pub mod company;
pub mod contract;
pub mod employee;
pub mod plan;
pub mod principal;
pub mod records;
pub mod user;

// Re-export all entities and enums
pub use company::{Company, CompanyUpdate, NewCompany};
pub use contract::{BillingCycle, Contract, ContractTerms, ContractWithPlan, ExpiringContract};
pub use employee::{Employee, EmployeeDraft, EmployeeStatus, WageType};
pub use plan::{Plan, PlanUpdate};
pub use principal::{Principal, TenantScope};
pub use records::{LeaveCredit, PayrollCalculation, WorkingTimeRecord};
pub use user::{AdminAccount, NewUser, Role, User};
