//! Domain errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Account disabled")]
    UserNotActive,

    #[error("Company account disabled")]
    CompanyNotActive,

    #[error("No active contract")]
    ContractNotFound,

    #[error("Contract expired")]
    ContractExpired,

    #[error("Invalid principal: {0}")]
    InvalidPrincipal(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Company not found")]
    CompanyNotFound,

    #[error("Plan not found")]
    PlanNotFound,

    #[error("Plan not available: {0}")]
    PlanNotActive(String),

    #[error("Employee not found")]
    EmployeeNotFound,

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Company code already exists: {0}")]
    CompanyCodeAlreadyExists(String),

    #[error("Employee limit reached ({max} employees)")]
    EmployeeLimitReached { max: i64 },

    #[error("Password hash error: {0}")]
    PasswordHashError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Failures of the login gate. All of them send the user back to the
    /// login form.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidCredentials
                | DomainError::UserNotActive
                | DomainError::CompanyNotActive
                | DomainError::ContractNotFound
                | DomainError::ContractExpired
                | DomainError::InvalidPrincipal(_)
        )
    }

    /// Rejections that leave storage untouched and are reported back to the
    /// form as a message.
    pub fn is_business_rule(&self) -> bool {
        matches!(
            self,
            DomainError::EmailAlreadyExists(_)
                | DomainError::CompanyCodeAlreadyExists(_)
                | DomainError::EmployeeLimitReached { .. }
                | DomainError::PlanNotActive(_)
        )
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("Invalid {}", field),
                })
            })
            .collect();
        messages.sort();
        DomainError::ValidationError(messages.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "Name is required"))]
        name: String,
    }

    #[test]
    fn validation_errors_keep_messages() {
        let err: DomainError = Probe { name: String::new() }.validate().unwrap_err().into();
        assert_eq!(err.to_string(), "Validation error: Name is required");
    }

    #[test]
    fn classification() {
        assert!(DomainError::ContractExpired.is_authentication_failure());
        assert!(!DomainError::ContractExpired.is_business_rule());
        assert!(DomainError::EmployeeLimitReached { max: 10 }.is_business_rule());
        assert!(!DomainError::EmployeeNotFound.is_business_rule());
    }
}
