// ============================================================================
// Roster Core - Company Entity
// File: crates/roster-core/src/domain/company.rs
// Description: Tenant root
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use roster_shared::EntityId;

/// Company entity. Every tenant-scoped row hangs off `Company::id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: EntityId,
    pub code: String,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Company {
    /// Applies editable fields. The company code is immutable once issued.
    pub fn apply(&mut self, update: CompanyUpdate) {
        self.name = update.name;
        self.address = update.address;
        self.phone = update.phone;
        self.email = update.email;
        self.is_active = update.is_active;
    }
}

/// Company fields captured at onboarding.
#[derive(Debug, Clone, Validate)]
pub struct NewCompany {
    #[validate(length(min = 1, max = 50, message = "Company code must be between 1 and 50 characters"))]
    pub code: String,

    #[validate(length(min = 1, max = 200, message = "Company name must be between 1 and 200 characters"))]
    pub name: String,

    #[validate(length(max = 500, message = "Address too long"))]
    pub address: Option<String>,

    #[validate(length(max = 20, message = "Phone number too long"))]
    pub phone: Option<String>,

    #[validate(email(message = "Invalid company email"))]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Validate)]
pub struct CompanyUpdate {
    #[validate(length(min = 1, max = 200, message = "Company name must be between 1 and 200 characters"))]
    pub name: String,

    #[validate(length(max = 500, message = "Address too long"))]
    pub address: Option<String>,

    #[validate(length(max = 20, message = "Phone number too long"))]
    pub phone: Option<String>,

    #[validate(email(message = "Invalid company email"))]
    pub email: Option<String>,

    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Company {
        Company {
            id: 1,
            code: "TEST001".into(),
            name: "Test Co".into(),
            address: None,
            phone: None,
            email: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn apply_keeps_code() {
        let mut company = sample();
        company.apply(CompanyUpdate {
            name: "Renamed".into(),
            address: Some("Tokyo".into()),
            phone: None,
            email: None,
            is_active: false,
        });
        assert_eq!(company.code, "TEST001");
        assert_eq!(company.name, "Renamed");
        assert!(!company.is_active);
    }

    #[test]
    fn new_company_validation() {
        let ok = NewCompany {
            code: "C1".into(),
            name: "Acme".into(),
            address: None,
            phone: None,
            email: Some("info@acme.test".into()),
        };
        assert!(ok.validate().is_ok());

        let bad = NewCompany {
            code: String::new(),
            email: Some("not-an-email".into()),
            ..ok
        };
        let errors = bad.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("code"));
        assert!(errors.field_errors().contains_key("email"));
    }
}
