use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::handlers::{auth, company, employee, health, saas};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/", get(auth::index))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout));

    let platform_routes = Router::new()
        .route("/saas/dashboard", get(saas::dashboard))
        .route("/saas/companies", get(saas::companies))
        .route("/saas/company/add", get(saas::onboard_page).post(saas::onboard))
        .route(
            "/saas/company/{id}/edit",
            get(saas::edit_company_page).post(saas::edit_company),
        )
        .route("/saas/company/{id}/contract", post(saas::issue_contract))
        .route("/saas/plans", get(saas::plans))
        .route(
            "/saas/plan/edit/{id}",
            get(saas::edit_plan_page).post(saas::edit_plan),
        );

    let tenant_routes = Router::new()
        .route("/company/dashboard", get(company::dashboard))
        .route("/employees", get(employee::list))
        .route("/employee/add", get(employee::add_page).post(employee::add))
        .route(
            "/employee/{id}/edit",
            get(employee::edit_page).post(employee::edit),
        );

    Router::new()
        .merge(public_routes)
        .merge(platform_routes)
        .merge(tenant_routes)
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .with_state(state)
}
