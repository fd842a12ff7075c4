// ============================================================================
// Roster API - Auth Handlers
// File: crates/roster-api/src/handlers/auth.rs
// ============================================================================
//! Login, logout and the role-based entry redirect

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Form,
};
use serde::Serialize;

use roster_core::services::AuthService;
use roster_security::safe_redirect_target;
use roster_shared::constants::SESSION_COOKIE;
use roster_shared::today;

use crate::cookies::{clear_cookie, read_cookie, set_cookie};
use crate::error::ApiError;
use crate::extract::MaybePrincipal;
use crate::flash::{FlashLevel, FlashRedirect, IncomingFlash};
use crate::forms::{LoginForm, NextQuery};
use crate::response::View;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct LoginView {
    /// Echoed back so the form can post it again.
    pub next: Option<String>,
}

/// GET / - landing page by role, or the login form
pub async fn index(MaybePrincipal(principal): MaybePrincipal) -> FlashRedirect {
    match principal {
        Some(p) => FlashRedirect::to(AuthService::landing_path(p.role())),
        None => FlashRedirect::to("/login"),
    }
}

/// GET /login
pub async fn login_page(
    MaybePrincipal(principal): MaybePrincipal,
    Query(query): Query<NextQuery>,
    flash: IncomingFlash,
) -> Response {
    if principal.is_some() {
        return FlashRedirect::to("/").into_response();
    }
    View::new(LoginView { next: query.next }, flash).into_response()
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    Query(query): Query<NextQuery>,
    Form(form): Form<LoginForm>,
) -> Result<FlashRedirect, ApiError> {
    let result = state
        .auth
        .login(form.email.trim(), &form.password, today())
        .await
        .map_err(|e| ApiError::from_domain(e, "/login"))?;

    let target = query
        .next
        .as_deref()
        .and_then(safe_redirect_target)
        .unwrap_or_else(|| AuthService::landing_path(result.principal.role()))
        .to_string();

    let cookie = set_cookie(
        SESSION_COOKIE,
        result.token.as_str(),
        state.session.ttl_seconds,
        state.session.secure_cookie,
    );
    Ok(FlashRedirect::to(target).with_cookie(cookie))
}

/// GET /logout
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Result<FlashRedirect, ApiError> {
    if let Some(token) = read_cookie(&headers, SESSION_COOKIE) {
        state.auth.logout(token).await?;
    }
    Ok(FlashRedirect::to("/login")
        .with(FlashLevel::Success, "Logged out.")
        .with_cookie(clear_cookie(SESSION_COOKIE)))
}
