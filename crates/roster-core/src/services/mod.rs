//! Domain services (business logic)

pub mod auth_service;
pub mod employee_service;
pub mod platform_service;

pub use auth_service::{AuthService, LoginResult};
pub use employee_service::{ContractStatus, EmployeeDetail, EmployeeService, TenantDashboard};
pub use platform_service::{
    CompanyDetail, ContractRequest, Onboarding, PlatformDashboard, PlatformService,
};
