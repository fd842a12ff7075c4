//! Subscription plan entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use roster_shared::EntityId;

use super::contract::BillingCycle;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub id: EntityId,
    /// Stable key such as `basic` or `premium`.
    pub name: String,
    pub display_name: String,
    pub max_employees: i64,
    pub monthly_fee: i64,
    pub yearly_fee: Option<i64>,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Plan {
    /// Fee charged per billing period, snapshotted onto contracts.
    pub fn fee_for(&self, cycle: BillingCycle) -> Option<i64> {
        match cycle {
            BillingCycle::Monthly => Some(self.monthly_fee),
            BillingCycle::Yearly => self.yearly_fee,
        }
    }

    pub fn apply(&mut self, update: PlanUpdate) {
        self.display_name = update.display_name;
        self.max_employees = update.max_employees;
        self.monthly_fee = update.monthly_fee;
        self.yearly_fee = update.yearly_fee;
        self.description = update.description;
        self.is_active = update.is_active;
    }
}

#[derive(Debug, Clone, Validate)]
pub struct PlanUpdate {
    #[validate(length(min = 1, max = 100, message = "Display name must be between 1 and 100 characters"))]
    pub display_name: String,

    #[validate(range(min = 1, message = "Employee limit must be at least 1"))]
    pub max_employees: i64,

    #[validate(range(min = 0, message = "Monthly fee cannot be negative"))]
    pub monthly_fee: i64,

    #[validate(range(min = 0, message = "Yearly fee cannot be negative"))]
    pub yearly_fee: Option<i64>,

    pub description: Option<String>,
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> Plan {
        Plan {
            id: 2,
            name: "standard".into(),
            display_name: "Standard".into(),
            max_employees: 50,
            monthly_fee: 15_000,
            yearly_fee: Some(150_000),
            description: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn fee_follows_cycle() {
        let plan = standard();
        assert_eq!(plan.fee_for(BillingCycle::Monthly), Some(15_000));
        assert_eq!(plan.fee_for(BillingCycle::Yearly), Some(150_000));

        let no_yearly = Plan { yearly_fee: None, ..plan };
        assert_eq!(no_yearly.fee_for(BillingCycle::Yearly), None);
    }

    #[test]
    fn update_rejects_zero_ceiling() {
        let update = PlanUpdate {
            display_name: "Tiny".into(),
            max_employees: 0,
            monthly_fee: 100,
            yearly_fee: None,
            description: None,
            is_active: true,
        };
        assert!(update.validate().is_err());
    }
}
