// ============================================================================
// Roster API - Principal Extractors
// File: crates/roster-api/src/extract.rs
// ============================================================================
//! Resolves the session cookie to a principal and guards role-specific
//! routes.

use axum::{extract::FromRequestParts, http::request::Parts};
use chrono::Utc;

use roster_core::{Principal, TenantScope};
use roster_shared::constants::SESSION_COOKIE;
use roster_shared::EntityId;

use crate::cookies::read_cookie;
use crate::error::ApiError;
use crate::flash::FlashLevel;
use crate::state::AppState;

/// The signed-in principal, if any.
#[derive(Debug, Clone)]
pub struct MaybePrincipal(pub Option<Principal>);

impl FromRequestParts<AppState> for MaybePrincipal {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(token) = read_cookie(&parts.headers, SESSION_COOKIE) else {
            return Ok(MaybePrincipal(None));
        };
        let principal = state.auth.resolve(token, Utc::now()).await?;
        Ok(MaybePrincipal(principal))
    }
}

/// Requires a platform (SaaS) administrator.
#[derive(Debug, Clone, Copy)]
pub struct PlatformAdmin {
    pub user_id: EntityId,
}

impl FromRequestParts<AppState> for PlatformAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match MaybePrincipal::from_request_parts(parts, state).await?.0 {
            Some(Principal::PlatformAdmin { user_id }) => Ok(PlatformAdmin { user_id }),
            Some(other) => Err(forbidden(parts, other.user_id())),
            None => Err(login_required(parts)),
        }
    }
}

/// Requires a company administrator; carries the company it may touch.
#[derive(Debug, Clone, Copy)]
pub struct TenantAdmin {
    pub user_id: EntityId,
    pub scope: TenantScope,
}

impl FromRequestParts<AppState> for TenantAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match MaybePrincipal::from_request_parts(parts, state).await?.0 {
            Some(Principal::TenantAdmin { user_id, scope }) => Ok(TenantAdmin { user_id, scope }),
            Some(other) => Err(forbidden(parts, other.user_id())),
            None => Err(login_required(parts)),
        }
    }
}

/// `/login?next=<original path and query>`
pub fn login_location(next: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("next", next)
        .finish();
    format!("/login?{}", query)
}

fn login_required(parts: &Parts) -> ApiError {
    let next = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    ApiError::redirect(login_location(next), FlashLevel::Info, "Please log in.")
}

fn forbidden(parts: &Parts, user_id: EntityId) -> ApiError {
    tracing::warn!("User {} denied access to {}", user_id, parts.uri.path());
    ApiError::redirect(
        "/",
        FlashLevel::Danger,
        "You do not have permission to access that page.",
    )
}
