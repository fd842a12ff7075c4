use std::sync::Arc;

use roster_core::services::{AuthService, EmployeeService, PlatformService};
use roster_shared::config::SessionSettings;

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub platform: Arc<PlatformService>,
    pub employees: Arc<EmployeeService>,
    pub session: SessionSettings,
}
