// ============================================================================
// Roster Core - Principal
// File: crates/roster-core/src/domain/principal.rs
// Description: Resolved session identity and tenant scope
// ============================================================================

use serde::Serialize;

use roster_shared::EntityId;

use super::user::{Role, User};
use crate::error::DomainError;

/// Proof that the caller administers exactly one company.
///
/// Only [`Principal::from_user`] can build one, from a persisted
/// `company_admin` row, so tenant repositories never see a company id that
/// came from request input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TenantScope {
    company_id: EntityId,
}

impl TenantScope {
    pub fn company_id(&self) -> EntityId {
        self.company_id
    }
}

/// Who is making the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Principal {
    PlatformAdmin { user_id: EntityId },
    TenantAdmin { user_id: EntityId, scope: TenantScope },
}

impl Principal {
    pub fn from_user(user: &User) -> Result<Self, DomainError> {
        match (user.role, user.company_id) {
            (Role::SaasAdmin, _) => Ok(Principal::PlatformAdmin { user_id: user.id }),
            (Role::CompanyAdmin, Some(company_id)) => Ok(Principal::TenantAdmin {
                user_id: user.id,
                scope: TenantScope { company_id },
            }),
            (Role::CompanyAdmin, None) => Err(DomainError::InvalidPrincipal(format!(
                "company admin {} has no company",
                user.id
            ))),
        }
    }

    pub fn user_id(&self) -> EntityId {
        match self {
            Principal::PlatformAdmin { user_id } | Principal::TenantAdmin { user_id, .. } => *user_id,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Principal::PlatformAdmin { .. } => Role::SaasAdmin,
            Principal::TenantAdmin { .. } => Role::CompanyAdmin,
        }
    }

    pub fn tenant_scope(&self) -> Option<TenantScope> {
        match self {
            Principal::TenantAdmin { scope, .. } => Some(*scope),
            Principal::PlatformAdmin { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(role: Role, company_id: Option<EntityId>) -> User {
        User {
            id: 7,
            email: "u@test.com".into(),
            password_hash: String::new(),
            name: None,
            role,
            company_id,
            is_active: true,
            created_at: Utc::now(),
            last_login: None,
        }
    }

    #[test]
    fn company_admin_carries_scope() {
        let principal = Principal::from_user(&user(Role::CompanyAdmin, Some(3))).unwrap();
        assert_eq!(principal.role(), Role::CompanyAdmin);
        assert_eq!(principal.tenant_scope().map(|s| s.company_id()), Some(3));
        assert_eq!(principal.user_id(), 7);
    }

    #[test]
    fn platform_admin_has_no_scope_even_with_company() {
        let principal = Principal::from_user(&user(Role::SaasAdmin, Some(3))).unwrap();
        assert_eq!(principal, Principal::PlatformAdmin { user_id: 7 });
        assert!(principal.tenant_scope().is_none());
    }

    #[test]
    fn orphan_company_admin_is_rejected() {
        assert!(matches!(
            Principal::from_user(&user(Role::CompanyAdmin, None)),
            Err(DomainError::InvalidPrincipal(_))
        ));
    }
}
