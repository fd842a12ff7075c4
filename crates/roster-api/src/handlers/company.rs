// ============================================================================
// Roster API - Company Admin Dashboard
// File: crates/roster-api/src/handlers/company.rs
// ============================================================================

use axum::extract::State;

use roster_core::services::TenantDashboard;
use roster_shared::today;

use crate::error::ApiError;
use crate::extract::TenantAdmin;
use crate::flash::IncomingFlash;
use crate::response::View;
use crate::state::AppState;

/// GET /company/dashboard
pub async fn dashboard(
    admin: TenantAdmin,
    State(state): State<AppState>,
    flash: IncomingFlash,
) -> Result<View<TenantDashboard>, ApiError> {
    let dashboard = state.employees.dashboard(&admin.scope, today()).await?;
    Ok(View::new(dashboard, flash))
}
