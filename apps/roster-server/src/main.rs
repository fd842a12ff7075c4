use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use roster_api::{build_router, AppState};
use roster_core::services::{AuthService, EmployeeService, PlatformService};
use roster_core::AdminAccount;
use roster_infrastructure::{
    connect, SqliteCompanyRepository, SqliteContractRepository, SqliteEmployeeRepository,
    SqlitePlanRepository, SqliteRecordRepository, SqliteSessionRepository, SqliteUserRepository,
};
use roster_shared::config::{AppConfig, BootstrapSettings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    roster_shared::telemetry::init_telemetry(&config.logging)?;

    info!("{} starting ({})", config.app.name, config.app.env);
    if config.is_production() && !config.session.secure_cookie {
        warn!("Session cookies are sent without the Secure attribute");
    }

    // Connect to Database
    let pool = connect(&config.database).await?;

    // Repositories
    let users = Arc::new(SqliteUserRepository::new(pool.clone()));
    let companies = Arc::new(SqliteCompanyRepository::new(pool.clone()));
    let contracts = Arc::new(SqliteContractRepository::new(pool.clone()));
    let plans = Arc::new(SqlitePlanRepository::new(pool.clone()));
    let employees = Arc::new(SqliteEmployeeRepository::new(pool.clone()));
    let records = Arc::new(SqliteRecordRepository::new(pool.clone()));
    let sessions = Arc::new(SqliteSessionRepository::new(pool));

    // Services
    let auth = Arc::new(AuthService::new(
        users,
        companies.clone(),
        contracts.clone(),
        sessions,
        config.session.ttl_seconds,
    ));
    let platform = Arc::new(PlatformService::new(
        companies,
        plans,
        contracts.clone(),
        employees.clone(),
    ));
    let employee_service = Arc::new(EmployeeService::new(employees, contracts, records));

    bootstrap_admin(&auth, &config.bootstrap).await?;

    let state = AppState {
        auth,
        platform,
        employees: employee_service,
        session: config.session.clone(),
    };
    let app = build_router(state);

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Creates the configured platform admin on first start.
async fn bootstrap_admin(auth: &AuthService, settings: &BootstrapSettings) -> anyhow::Result<()> {
    let (Some(email), Some(password)) = (&settings.admin_email, &settings.admin_password) else {
        return Ok(());
    };
    let created = auth
        .ensure_platform_admin(AdminAccount {
            name: settings.admin_name.clone(),
            email: email.clone(),
            password: password.clone(),
        })
        .await
        .context("Failed to create platform admin")?;
    if created {
        info!("Bootstrap platform admin created");
    }
    Ok(())
}
