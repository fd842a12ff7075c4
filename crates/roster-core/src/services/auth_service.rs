// ============================================================================
// Roster Core - Authentication Service
// File: crates/roster-core/src/services/auth_service.rs
// ============================================================================
//! Login gate, session resolution and logout

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use tracing::{error, info, warn};
use validator::Validate;

use roster_security::{PasswordService, SessionToken};
use roster_shared::utils::mask_email;

use crate::domain::{AdminAccount, NewUser, Principal, Role, User};
use crate::error::DomainError;
use crate::repositories::{
    CompanyRepository, ContractRepository, SessionRepository, UserRepository,
};

/// Authentication service for the login/logout flow
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    companies: Arc<dyn CompanyRepository>,
    contracts: Arc<dyn ContractRepository>,
    sessions: Arc<dyn SessionRepository>,
    session_ttl: Duration,
}

/// Result of successful login
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: User,
    pub principal: Principal,
    /// Raw token for the session cookie; only its digest is stored.
    pub token: SessionToken,
    pub expires_at: DateTime<Utc>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        companies: Arc<dyn CompanyRepository>,
        contracts: Arc<dyn ContractRepository>,
        sessions: Arc<dyn SessionRepository>,
        session_ttl_seconds: i64,
    ) -> Self {
        Self {
            users,
            companies,
            contracts,
            sessions,
            session_ttl: Duration::seconds(session_ttl_seconds),
        }
    }

    /// Login with email and password.
    ///
    /// Checks run in a fixed order and stop at the first failure: password,
    /// user active, company active, then (company admins only) an active
    /// contract that has not passed its end date.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        today: NaiveDate,
    ) -> Result<LoginResult, DomainError> {
        let masked = mask_email(email);
        info!("Login attempt for email: {}", masked);

        // 1. Find user by email
        let user = self.users.find_by_email(email.trim()).await?.ok_or_else(|| {
            warn!("Login failed: email not found: {}", masked);
            DomainError::InvalidCredentials
        })?;

        // 2. Verify password
        let password_valid = PasswordService::verify(password, &user.password_hash)
            .map_err(|e| {
                error!("Stored hash for user {} is unusable: {}", user.id, e);
                DomainError::InvalidCredentials
            })?;
        if !password_valid {
            warn!("Login failed: invalid password for: {}", masked);
            return Err(DomainError::InvalidCredentials);
        }

        // 3. User status
        if !user.is_active {
            warn!("Login failed: user {} is disabled", user.id);
            return Err(DomainError::UserNotActive);
        }

        // 4. Company status
        if !self.company_active(&user).await? {
            warn!("Login failed: company of user {} is disabled", user.id);
            return Err(DomainError::CompanyNotActive);
        }

        let principal = Principal::from_user(&user)?;

        // 5. Contract status
        if let Some(scope) = principal.tenant_scope() {
            let active = self
                .contracts
                .find_active_for_company(scope.company_id())
                .await?
                .ok_or_else(|| {
                    warn!("Login failed: company {} has no active contract", scope.company_id());
                    DomainError::ContractNotFound
                })?;
            if active.contract.is_expired_on(today) {
                warn!(
                    "Login failed: contract {} ended on {}",
                    active.contract.id, active.contract.end_date
                );
                return Err(DomainError::ContractExpired);
            }
        }

        // 6. Open session
        let now = Utc::now();
        let token = SessionToken::generate();
        let expires_at = now + self.session_ttl;
        self.sessions
            .create(&token.digest(), user.id, now, expires_at)
            .await?;

        if let Err(e) = self.users.record_login(user.id, now).await {
            error!("Failed to update last login: {}", e);
        }
        if let Err(e) = self.sessions.delete_expired(now).await {
            error!("Failed to purge expired sessions: {}", e);
        }

        info!("Login successful for: {} ({})", masked, principal.role().as_str());

        let user = User {
            last_login: Some(now),
            ..user
        };
        Ok(LoginResult {
            user,
            principal,
            token,
            expires_at,
        })
    }

    /// Resolves a session cookie value to a principal. Unknown, expired or
    /// malformed tokens resolve to `None`, as do sessions whose user or
    /// company has been disabled since login.
    pub async fn resolve(
        &self,
        raw_token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Principal>, DomainError> {
        let Some(token) = SessionToken::parse(raw_token) else {
            return Ok(None);
        };
        let Some(user_id) = self.sessions.find_user_id(&token.digest(), now).await? else {
            return Ok(None);
        };
        let user = match self.users.find_by_id(user_id).await? {
            Some(user) if user.is_active => user,
            _ => return Ok(None),
        };
        if !self.company_active(&user).await? {
            warn!("Session for user {} rejected: company disabled", user_id);
            return Ok(None);
        }

        match Principal::from_user(&user) {
            Ok(principal) => Ok(Some(principal)),
            Err(e) => {
                warn!("Session for user {} rejected: {}", user_id, e);
                Ok(None)
            }
        }
    }

    pub async fn logout(&self, raw_token: &str) -> Result<(), DomainError> {
        if let Some(token) = SessionToken::parse(raw_token) {
            self.sessions.delete(&token.digest()).await?;
            info!("Session closed");
        }
        Ok(())
    }

    /// Creates the platform admin account unless the email is already
    /// taken. Returns whether an account was created.
    pub async fn ensure_platform_admin(&self, account: AdminAccount) -> Result<bool, DomainError> {
        account.validate()?;
        let email = account.email.trim();
        if self.users.find_by_email(email).await?.is_some() {
            return Ok(false);
        }

        let password_hash = PasswordService::hash(&account.password)
            .map_err(|e| DomainError::PasswordHashError(e.to_string()))?;
        let user = self
            .users
            .create(&NewUser {
                email: email.to_string(),
                password_hash,
                name: account.name.clone(),
                role: Role::SaasAdmin,
            })
            .await?;
        info!("Platform admin created: {} (id {})", mask_email(&user.email), user.id);
        Ok(true)
    }

    /// Users without a company pass; a missing company counts as disabled.
    async fn company_active(&self, user: &User) -> Result<bool, DomainError> {
        let Some(company_id) = user.company_id else {
            return Ok(true);
        };
        Ok(self
            .companies
            .find_by_id(company_id)
            .await?
            .is_some_and(|c| c.is_active))
    }

    /// Landing page for a freshly authenticated principal.
    pub fn landing_path(role: Role) -> &'static str {
        match role {
            Role::SaasAdmin => "/saas/dashboard",
            Role::CompanyAdmin => "/company/dashboard",
        }
    }
}
