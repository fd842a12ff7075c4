//! Repository tests against an in-memory SQLite database.

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;

use roster_core::domain::{
    BillingCycle, ContractTerms, EmployeeDraft, EmployeeStatus, NewCompany, NewUser, Principal,
    Role, TenantScope, User,
};
use roster_core::error::DomainError;
use roster_core::repositories::{
    CompanyRepository, ContractRepository, EmployeeRepository, PlanRepository, RecordRepository,
    SessionRepository, UserRepository,
};
use roster_infrastructure::{
    create_pool, run_migrations, SqliteCompanyRepository, SqliteContractRepository,
    SqliteEmployeeRepository, SqlitePlanRepository, SqliteRecordRepository,
    SqliteSessionRepository, SqliteUserRepository,
};
use roster_shared::config::DatabaseSettings;

async fn pool() -> SqlitePool {
    let settings = DatabaseSettings {
        url: "sqlite::memory:".into(),
        max_connections: 1,
        min_connections: 1,
    };
    let pool = create_pool(&settings).await.unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn scope(company_id: i64) -> TenantScope {
    let user = User {
        id: 1,
        email: "admin@test.com".into(),
        password_hash: String::new(),
        name: None,
        role: Role::CompanyAdmin,
        company_id: Some(company_id),
        is_active: true,
        created_at: Utc::now(),
        last_login: None,
    };
    Principal::from_user(&user).unwrap().tenant_scope().unwrap()
}

fn new_company(code: &str) -> NewCompany {
    NewCompany {
        code: code.into(),
        name: format!("{} Ltd", code),
        address: None,
        phone: None,
        email: None,
    }
}

fn admin(email: &str) -> NewUser {
    NewUser {
        email: email.into(),
        password_hash: "$argon2id$placeholder".into(),
        name: Some("Admin".into()),
        role: Role::CompanyAdmin,
    }
}

fn terms(plan_id: i64, start: NaiveDate, cycle: BillingCycle) -> ContractTerms {
    ContractTerms {
        plan_id,
        start_date: start,
        end_date: cycle.end_date_from(start),
        billing_cycle: cycle,
        fee: Some(5_000),
        notes: None,
    }
}

fn draft(code: &str) -> EmployeeDraft {
    EmployeeDraft {
        employee_code: Some(code.into()),
        name: format!("Employee {}", code),
        name_kana: None,
        email: None,
        phone: None,
        birth_date: None,
        gender: None,
        address: None,
        join_date: Some(date(2024, 4, 1)),
        department: None,
        position: None,
        employment_type: None,
        status: EmployeeStatus::Active,
        wage_type: None,
        base_wage: 200_000,
        transportation_allowance: 0,
        working_time_system: None,
        standard_working_hours: 8.0,
        standard_working_days: 5,
    }
}

async fn count(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn migrations_seed_default_plans() {
    let pool = pool().await;
    let plans = SqlitePlanRepository::new(pool).list_active().await.unwrap();
    let limits: Vec<(String, i64)> = plans.iter().map(|p| (p.name.clone(), p.max_employees)).collect();
    assert_eq!(
        limits,
        vec![
            ("basic".to_string(), 10),
            ("standard".to_string(), 50),
            ("premium".to_string(), 200)
        ]
    );
}

#[tokio::test]
async fn onboarding_persists_company_contract_and_admin() {
    let pool = pool().await;
    let companies = SqliteCompanyRepository::new(pool.clone());
    let contracts = SqliteContractRepository::new(pool.clone());
    let users = SqliteUserRepository::new(pool.clone());

    let company = companies
        .onboard(
            &new_company("ACME"),
            &terms(1, date(2024, 1, 10), BillingCycle::Yearly),
            &admin("admin@acme.test"),
        )
        .await
        .unwrap();
    assert!(company.is_active);

    let active = contracts.find_active_for_company(company.id).await.unwrap().unwrap();
    assert_eq!(active.contract.end_date, date(2025, 1, 9));
    assert_eq!(active.plan.name, "basic");

    let user = users.find_by_email("ADMIN@acme.test").await.unwrap().unwrap();
    assert_eq!(user.company_id, Some(company.id));
    assert_eq!(user.role, Role::CompanyAdmin);
}

#[tokio::test]
async fn duplicate_admin_email_rolls_back_onboarding() {
    let pool = pool().await;
    let companies = SqliteCompanyRepository::new(pool.clone());
    companies
        .onboard(
            &new_company("FIRST"),
            &terms(1, date(2024, 1, 10), BillingCycle::Monthly),
            &admin("taken@test.com"),
        )
        .await
        .unwrap();

    let err = companies
        .onboard(
            &new_company("SECOND"),
            &terms(1, date(2024, 1, 10), BillingCycle::Monthly),
            &admin("taken@test.com"),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::EmailAlreadyExists(_)));
    assert_eq!(count(&pool, "companies").await, 1);
    assert_eq!(count(&pool, "contracts").await, 1);
    assert_eq!(count(&pool, "users").await, 1);
}

#[tokio::test]
async fn duplicate_company_code_is_reported() {
    let pool = pool().await;
    let companies = SqliteCompanyRepository::new(pool.clone());
    let t = terms(1, date(2024, 1, 10), BillingCycle::Monthly);
    companies.onboard(&new_company("ACME"), &t, &admin("a@test.com")).await.unwrap();

    let err = companies
        .onboard(&new_company("ACME"), &t, &admin("b@test.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::CompanyCodeAlreadyExists(code) if code == "ACME"));
    assert_eq!(count(&pool, "users").await, 1);
}

#[tokio::test]
async fn replacing_contract_keeps_one_active() {
    let pool = pool().await;
    let companies = SqliteCompanyRepository::new(pool.clone());
    let contracts = SqliteContractRepository::new(pool.clone());
    let company = companies
        .onboard(
            &new_company("ACME"),
            &terms(1, date(2024, 1, 10), BillingCycle::Monthly),
            &admin("a@test.com"),
        )
        .await
        .unwrap();

    let renewed = contracts
        .replace_active(company.id, &terms(2, date(2024, 2, 10), BillingCycle::Yearly))
        .await
        .unwrap();
    assert!(renewed.is_active);

    let history = contracts.list_for_company(company.id).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history.iter().filter(|c| c.is_active).count(), 1);
    assert_eq!(history[0].id, renewed.id);

    let active = contracts.find_active_for_company(company.id).await.unwrap().unwrap();
    assert_eq!(active.plan.name, "standard");
}

#[tokio::test]
async fn store_rejects_second_active_contract() {
    let pool = pool().await;
    let companies = SqliteCompanyRepository::new(pool.clone());
    let company = companies
        .onboard(
            &new_company("ACME"),
            &terms(1, date(2024, 1, 10), BillingCycle::Monthly),
            &admin("a@test.com"),
        )
        .await
        .unwrap();

    let result = sqlx::query(
        "INSERT INTO contracts (company_id, plan_id, start_date, end_date, is_active, billing_cycle, created_at, updated_at) \
         VALUES (?, 1, '2024-03-01', '2024-03-31', 1, 'monthly', '2024-03-01T00:00:00Z', '2024-03-01T00:00:00Z')",
    )
    .bind(company.id)
    .execute(&pool)
    .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn contract_counts_and_expiry_window() {
    let pool = pool().await;
    let companies = SqliteCompanyRepository::new(pool.clone());
    let contracts = SqliteContractRepository::new(pool.clone());
    // Ends 2024-02-09
    companies
        .onboard(
            &new_company("SOON"),
            &terms(1, date(2024, 1, 10), BillingCycle::Monthly),
            &admin("soon@test.com"),
        )
        .await
        .unwrap();
    // Ends 2025-01-09
    companies
        .onboard(
            &new_company("LATER"),
            &terms(1, date(2024, 1, 10), BillingCycle::Yearly),
            &admin("later@test.com"),
        )
        .await
        .unwrap();

    assert_eq!(contracts.count_current(date(2024, 2, 1)).await.unwrap(), 2);
    assert_eq!(contracts.count_current(date(2024, 2, 10)).await.unwrap(), 1);

    let expiring = contracts
        .list_expiring(date(2024, 2, 1), date(2024, 3, 2))
        .await
        .unwrap();
    assert_eq!(expiring.len(), 1);
    assert_eq!(expiring[0].company_name, "SOON Ltd");
    assert_eq!(expiring[0].plan_display_name, "Basic");
}

#[tokio::test]
async fn employee_ceiling_counts_active_only() {
    let pool = pool().await;
    let companies = SqliteCompanyRepository::new(pool.clone());
    let employees = SqliteEmployeeRepository::new(pool.clone());
    let company = companies
        .onboard(
            &new_company("ACME"),
            &terms(1, date(2024, 1, 10), BillingCycle::Monthly),
            &admin("a@test.com"),
        )
        .await
        .unwrap();
    let tenant = scope(company.id);

    let first = employees.create(&tenant, &draft("E1"), Some(2)).await.unwrap();
    employees.create(&tenant, &draft("E2"), Some(2)).await.unwrap();

    let err = employees.create(&tenant, &draft("E3"), Some(2)).await.unwrap_err();
    assert!(matches!(err, DomainError::EmployeeLimitReached { max: 2 }));
    assert_eq!(count(&pool, "employees").await, 2);

    let terminated = EmployeeDraft {
        status: EmployeeStatus::Terminated,
        ..draft("E1")
    };
    employees.update(&tenant, first.id, &terminated).await.unwrap();
    assert_eq!(employees.count_active(&tenant).await.unwrap(), 1);
    employees.create(&tenant, &draft("E3"), Some(2)).await.unwrap();
    assert_eq!(employees.count_active_all().await.unwrap(), 2);
}

#[tokio::test]
async fn employees_are_invisible_across_tenants() {
    let pool = pool().await;
    let companies = SqliteCompanyRepository::new(pool.clone());
    let employees = SqliteEmployeeRepository::new(pool.clone());
    let t = terms(1, date(2024, 1, 10), BillingCycle::Monthly);
    let a = companies.onboard(&new_company("A"), &t, &admin("a@test.com")).await.unwrap();
    let b = companies.onboard(&new_company("B"), &t, &admin("b@test.com")).await.unwrap();

    let hired = employees.create(&scope(a.id), &draft("E1"), None).await.unwrap();
    let other = scope(b.id);

    assert!(employees.find(&other, hired.id).await.unwrap().is_none());
    assert!(employees.list(&other).await.unwrap().is_empty());
    assert!(matches!(
        employees.update(&other, hired.id, &draft("HIJACK")).await,
        Err(DomainError::EmployeeNotFound)
    ));

    let unchanged = employees.find(&scope(a.id), hired.id).await.unwrap().unwrap();
    assert_eq!(unchanged.employee_code.as_deref(), Some("E1"));
}

#[tokio::test]
async fn employees_are_listed_by_code() {
    let pool = pool().await;
    let companies = SqliteCompanyRepository::new(pool.clone());
    let employees = SqliteEmployeeRepository::new(pool.clone());
    let company = companies
        .onboard(
            &new_company("ACME"),
            &terms(1, date(2024, 1, 10), BillingCycle::Monthly),
            &admin("a@test.com"),
        )
        .await
        .unwrap();
    let tenant = scope(company.id);
    for code in ["E3", "E1", "E2"] {
        employees.create(&tenant, &draft(code), None).await.unwrap();
    }

    let codes: Vec<String> = employees
        .list(&tenant)
        .await
        .unwrap()
        .into_iter()
        .filter_map(|e| e.employee_code)
        .collect();
    assert_eq!(codes, vec!["E1", "E2", "E3"]);
}

#[tokio::test]
async fn records_are_read_within_tenant() {
    let pool = pool().await;
    let companies = SqliteCompanyRepository::new(pool.clone());
    let employees = SqliteEmployeeRepository::new(pool.clone());
    let records = SqliteRecordRepository::new(pool.clone());
    let t = terms(1, date(2024, 1, 10), BillingCycle::Monthly);
    let a = companies.onboard(&new_company("A"), &t, &admin("a@test.com")).await.unwrap();
    let b = companies.onboard(&new_company("B"), &t, &admin("b@test.com")).await.unwrap();
    let hired = employees.create(&scope(a.id), &draft("E1"), None).await.unwrap();

    for work_date in ["2024-04-30", "2024-05-01", "2024-05-02"] {
        sqlx::query(
            "INSERT INTO working_time_records (company_id, employee_id, work_date, created_at, updated_at) \
             VALUES (?, ?, ?, '2024-05-01T00:00:00Z', '2024-05-01T00:00:00Z')",
        )
        .bind(a.id)
        .bind(hired.id)
        .bind(work_date)
        .execute(&pool)
        .await
        .unwrap();
    }
    sqlx::query(
        "INSERT INTO leave_credits (company_id, employee_id, grant_date, days_granted, created_at) \
         VALUES (?, ?, '2024-10-01', 10.0, '2024-10-01T00:00:00Z')",
    )
    .bind(a.id)
    .bind(hired.id)
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query(
        "INSERT INTO payroll_calculations (company_id, employee_id, year, month, net_salary, created_at, updated_at) \
         VALUES (?, ?, 2024, 4, 180000, '2024-05-01T00:00:00Z', '2024-05-01T00:00:00Z')",
    )
    .bind(a.id)
    .bind(hired.id)
    .execute(&pool)
    .await
    .unwrap();

    let own = scope(a.id);
    assert_eq!(records.count_working_time_since(&own, date(2024, 5, 1)).await.unwrap(), 2);
    assert_eq!(records.leave_credits_for(&own, hired.id).await.unwrap().len(), 1);
    let payroll = records.payroll_for(&own, hired.id).await.unwrap();
    assert_eq!(payroll[0].net_salary, 180_000);

    let other = scope(b.id);
    assert_eq!(records.count_working_time_since(&other, date(2024, 5, 1)).await.unwrap(), 0);
    assert!(records.leave_credits_for(&other, hired.id).await.unwrap().is_empty());
    assert!(records.payroll_for(&other, hired.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn sessions_expire_and_can_be_deleted() {
    let pool = pool().await;
    let users = SqliteUserRepository::new(pool.clone());
    let sessions = SqliteSessionRepository::new(pool.clone());
    let root = users
        .create(&NewUser {
            role: Role::SaasAdmin,
            ..admin("root@test.com")
        })
        .await
        .unwrap();
    assert!(root.company_id.is_none());

    let now = Utc::now();
    sessions
        .create("live", root.id, now, now + chrono::Duration::hours(1))
        .await
        .unwrap();
    sessions
        .create("stale", root.id, now, now - chrono::Duration::seconds(1))
        .await
        .unwrap();

    assert_eq!(sessions.find_user_id("live", now).await.unwrap(), Some(root.id));
    assert_eq!(sessions.find_user_id("stale", now).await.unwrap(), None);
    assert_eq!(sessions.delete_expired(now).await.unwrap(), 1);

    sessions.delete("live").await.unwrap();
    assert_eq!(sessions.find_user_id("live", now).await.unwrap(), None);
}

#[tokio::test]
async fn platform_user_email_is_unique_case_insensitively() {
    let pool = pool().await;
    let users = SqliteUserRepository::new(pool);
    let root = NewUser {
        role: Role::SaasAdmin,
        ..admin("root@test.com")
    };
    users.create(&root).await.unwrap();

    let again = NewUser {
        email: "ROOT@test.com".into(),
        ..root
    };
    assert!(matches!(
        users.create(&again).await,
        Err(DomainError::EmailAlreadyExists(_))
    ));
}

#[tokio::test]
async fn company_and_plan_updates_round_trip() {
    let pool = pool().await;
    let companies = SqliteCompanyRepository::new(pool.clone());
    let plans = SqlitePlanRepository::new(pool.clone());
    let mut company = companies
        .onboard(
            &new_company("ACME"),
            &terms(1, date(2024, 1, 10), BillingCycle::Monthly),
            &admin("a@test.com"),
        )
        .await
        .unwrap();

    company.name = "Acme Holdings".into();
    company.is_active = false;
    let saved = companies.update(&company).await.unwrap();
    assert_eq!(saved.name, "Acme Holdings");
    assert!(!saved.is_active);
    assert_eq!(companies.count_active().await.unwrap(), 0);

    let mut basic = plans.find_by_id(1).await.unwrap().unwrap();
    basic.max_employees = 15;
    basic.is_active = false;
    plans.update(&basic).await.unwrap();
    assert_eq!(plans.list_active().await.unwrap().len(), 2);
    assert_eq!(plans.list_all().await.unwrap().len(), 3);
}
