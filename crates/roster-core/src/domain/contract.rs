// ============================================================================
// Roster Core - Contract Entity
// File: crates/roster-core/src/domain/contract.rs
// Description: Dated subscription binding a company to a plan
// ============================================================================

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use roster_shared::constants::{MONTHLY_TERM_DAYS, YEARLY_TERM_DAYS};
use roster_shared::EntityId;

use super::plan::Plan;

/// Billing cycle enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    Monthly,
    Yearly,
}

impl BillingCycle {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingCycle::Monthly => "monthly",
            BillingCycle::Yearly => "yearly",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "monthly" => Some(BillingCycle::Monthly),
            "yearly" => Some(BillingCycle::Yearly),
            _ => None,
        }
    }

    pub fn term_days(&self) -> i64 {
        match self {
            BillingCycle::Monthly => MONTHLY_TERM_DAYS,
            BillingCycle::Yearly => YEARLY_TERM_DAYS,
        }
    }

    /// Contract end date is always derived, never entered.
    pub fn end_date_from(&self, start_date: NaiveDate) -> NaiveDate {
        start_date + Duration::days(self.term_days())
    }
}

impl Default for BillingCycle {
    fn default() -> Self {
        BillingCycle::Monthly
    }
}

/// Contract entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
    pub id: EntityId,
    pub company_id: EntityId,
    pub plan_id: EntityId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
    /// Plan fee at signing time; later plan price changes do not touch it.
    pub fee: Option<i64>,
    pub billing_cycle: BillingCycle,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contract {
    pub fn is_expired_on(&self, today: NaiveDate) -> bool {
        self.end_date < today
    }

    /// Negative once the contract has lapsed.
    pub fn days_remaining(&self, today: NaiveDate) -> i64 {
        (self.end_date - today).num_days()
    }
}

/// Everything needed to insert a contract except the owning company.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractTerms {
    pub plan_id: EntityId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub billing_cycle: BillingCycle,
    pub fee: Option<i64>,
    pub notes: Option<String>,
}

impl ContractTerms {
    pub fn derive(
        plan: &Plan,
        start_date: NaiveDate,
        billing_cycle: BillingCycle,
        notes: Option<String>,
    ) -> Self {
        Self {
            plan_id: plan.id,
            start_date,
            end_date: billing_cycle.end_date_from(start_date),
            billing_cycle,
            fee: plan.fee_for(billing_cycle),
            notes,
        }
    }
}

/// Active contract joined with its plan, as read by dashboards and the
/// headcount check.
#[derive(Debug, Clone, Serialize)]
pub struct ContractWithPlan {
    pub contract: Contract,
    pub plan: Plan,
}

/// Active contract close to its end date, as listed on the platform
/// dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct ExpiringContract {
    pub contract: Contract,
    pub company_name: String,
    pub plan_display_name: String,
}
