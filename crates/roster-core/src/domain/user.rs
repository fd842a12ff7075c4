//! User domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use roster_shared::EntityId;

/// Role tag as persisted in `users.role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SaasAdmin,
    CompanyAdmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SaasAdmin => "saas_admin",
            Role::CompanyAdmin => "company_admin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "saas_admin" => Some(Role::SaasAdmin),
            "company_admin" => Some(Role::CompanyAdmin),
            _ => None,
        }
    }
}

/// Authentication principal. Platform admins have no company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: Option<String>,
    pub role: Role,
    pub company_id: Option<EntityId>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

/// First company-admin account created during onboarding. The password is
/// still plaintext here; the service hashes it before it reaches storage.
#[derive(Debug, Clone, Validate)]
pub struct AdminAccount {
    #[validate(length(max = 100, message = "Admin name too long"))]
    pub name: Option<String>,

    #[validate(email(message = "Invalid admin email"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be between 8 and 128 characters"))]
    pub password: String,
}

/// User row to insert; `company_id` is filled in by the store when the
/// company is created in the same transaction.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_text() {
        assert_eq!(Role::from_str("saas_admin"), Some(Role::SaasAdmin));
        assert_eq!(Role::CompanyAdmin.as_str(), "company_admin");
        assert_eq!(Role::from_str("employee"), None);
    }

    #[test]
    fn admin_account_requires_real_email_and_password() {
        let account = AdminAccount {
            name: Some("Taro".into()),
            email: "admin@test.com".into(),
            password: "admin1234".into(),
        };
        assert!(account.validate().is_ok());

        let short = AdminAccount {
            password: "short".into(),
            ..account.clone()
        };
        assert!(short.validate().is_err());

        let bad_email = AdminAccount {
            email: "admin".into(),
            ..account
        };
        assert!(bad_email.validate().is_err());
    }
}
