//! Fixed economic tables and deterministic derived functions.
//!
//! Handlers and the ticker read these tables; they never appear in
//! reducers, which only apply deltas already declared on events.

use std::collections::BTreeMap;

use spincycle_core::Money;

use crate::agent::LoanKind;
use crate::location::ServiceKind;
use crate::machine::MachineKind;

// Agent bootstrap.
pub const STARTING_CASH: Money = Money::from_cents(10_000_00);
pub const STARTING_CREDIT_LIMIT: Money = Money::from_cents(5_000_00);
pub const INITIAL_CREDIT_RATING: i64 = 50;
pub const INITIAL_SOCIAL_SCORE: i64 = 50;

// Labor.
pub const STATUTORY_WAGE_FLOOR: Money = Money::from_cents(7_25);
pub const FULL_TIME_HOURS_PER_WEEK: i64 = 40;
pub const SEVERANCE_WEEKS: i64 = 2;

// Pricing bounds (cents).
pub const MIN_SERVICE_PRICE: Money = Money::from_cents(1);
pub const MAX_SERVICE_PRICE: Money = Money::from_cents(100_00);

// Regulation.
pub const PREDATORY_PRICE_FRACTION: f64 = 0.5;
pub const PREDATORY_PRICING_FINE: Money = Money::from_cents(500_00);
pub const LABOR_VIOLATION_FINE: Money = Money::from_cents(250_00);
pub const FINE_DUE_WEEKS: u32 = 4;
pub const SCANDAL_INVESTIGATION_THRESHOLD: f64 = 1.5;
pub const COLLUSION_MESSAGE_THRESHOLD: usize = 3;
pub const COLLUSION_WINDOW_DAYS: u64 = 14;
pub const COLLUSION_PRICE_ALIGNMENT: Money = Money::from_cents(5);

// Weekly operating costs.
pub const UTILITIES_PER_MACHINE_WEEKLY: Money = Money::from_cents(12_00);

// Taxes.
pub const TAX_RATE: f64 = 0.15;

// Social deltas, fixed per action kind.
pub const CHARITY_SOCIAL_DELTA: i64 = 4;
pub const SCANDAL_RESOLUTION_SOCIAL_DELTA: i64 = 2;
pub const REGULATORY_REPORT_SOCIAL_DELTA: i64 = 1;
pub const PRINCIPLED_CHOICE_SOCIAL_DELTA: i64 = 3;
pub const EXPEDIENT_CHOICE_SOCIAL_DELTA: i64 = -5;

// Ethical-choice money legs.
pub const PRINCIPLED_CHOICE_COST: Money = Money::from_cents(500_00);
pub const EXPEDIENT_CHOICE_GAIN: Money = Money::from_cents(500_00);

// Scandal resolution: PR spend per point of severity.
pub const SCANDAL_RESOLUTION_COST_PER_SEVERITY: Money = Money::from_cents(2_000_00);

// Filing fees.
pub const REGULATORY_REPORT_FEE: Money = Money::from_cents(150_00);
pub const APPEAL_FILING_FEE: Money = Money::from_cents(100_00);

// Loyalty program.
pub const LOYALTY_SETUP_COST: Money = Money::from_cents(250_00);
pub const LOYALTY_MEMBERS_PER_LOCATION: u32 = 20;

// Vendor contracts.
pub const EXCLUSIVE_CONTRACT_DISCOUNT: f64 = 0.15;
pub const EXCLUSIVE_CONTRACT_WEEKS: u32 = 12;
pub const CONTRACT_CANCELLATION_PENALTY: Money = Money::from_cents(750_00);

// Default supplier.
pub const DEFAULT_VENDOR: &str = "DEFAULT_VENDOR";
pub const DEFAULT_SUPPLY_UNIT_PRICE: Money = Money::from_cents(2_50);

/// Terms for one loan product.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LoanProduct {
    pub kind: LoanKind,
    pub annual_rate: f64,
    /// None for revolving credit.
    pub term_weeks: Option<u32>,
    pub credit_floor: i64,
    /// Credit-rating movement on origination.
    pub rating_delta: i64,
}

pub const fn loan_product(kind: LoanKind) -> LoanProduct {
    match kind {
        LoanKind::LineOfCredit => LoanProduct {
            kind,
            annual_rate: 0.08,
            term_weeks: None,
            credit_floor: 40,
            rating_delta: -2,
        },
        LoanKind::Equipment => LoanProduct {
            kind,
            annual_rate: 0.06,
            term_weeks: Some(24),
            credit_floor: 35,
            rating_delta: -1,
        },
        LoanKind::Expansion => LoanProduct {
            kind,
            annual_rate: 0.07,
            term_weeks: Some(52),
            credit_floor: 55,
            rating_delta: -3,
        },
        LoanKind::Emergency => LoanProduct {
            kind,
            annual_rate: 0.12,
            term_weeks: Some(8),
            credit_floor: 20,
            rating_delta: -8,
        },
    }
}

/// Rating restored when a loan is paid off in full.
pub const PAYOFF_RATING_DELTA: i64 = 2;

/// Maintenance tiers and what they restore.
#[derive(Debug, Copy, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceTier {
    Routine,
    Deep,
    Overhaul,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ConditionRestore {
    Delta(f64),
    Full,
}

pub const fn maintenance_terms(tier: MaintenanceTier) -> (Money, ConditionRestore) {
    match tier {
        MaintenanceTier::Routine => (Money::from_cents(75_00), ConditionRestore::Delta(15.0)),
        MaintenanceTier::Deep => (Money::from_cents(200_00), ConditionRestore::Delta(35.0)),
        MaintenanceTier::Overhaul => (Money::from_cents(450_00), ConditionRestore::Full),
    }
}

/// Emergency repair of a broken machine: flat fee, restores to a floor.
pub const BREAKDOWN_REPAIR_COST: Money = Money::from_cents(300_00);
pub const BREAKDOWN_REPAIR_CONDITION: f64 = 60.0;

pub const fn equipment_unit_price(kind: MachineKind) -> Money {
    match kind {
        MachineKind::Washer => Money::from_cents(2_000_00),
        MachineKind::Dryer => Money::from_cents(1_500_00),
        MachineKind::Vending => Money::from_cents(800_00),
    }
}

/// Salvage on sale: 40% of list, scaled by remaining condition.
pub fn salvage_value(kind: MachineKind, condition: f64) -> Money {
    equipment_unit_price(kind).scale(0.4 * condition / 100.0)
}

/// Marginal cost to deliver one load of a service. The predatory-pricing
/// check compares posted prices against this table.
pub const fn cost_per_load(service: ServiceKind) -> Money {
    match service {
        ServiceKind::StandardWash => Money::from_cents(1_50),
        ServiceKind::PremiumWash => Money::from_cents(2_25),
        ServiceKind::Dry => Money::from_cents(1_00),
        ServiceKind::VendingItems => Money::from_cents(50),
    }
}

pub fn default_price_list() -> BTreeMap<ServiceKind, Money> {
    BTreeMap::from([
        (ServiceKind::StandardWash, Money::from_cents(3_00)),
        (ServiceKind::PremiumWash, Money::from_cents(4_75)),
        (ServiceKind::Dry, Money::from_cents(2_50)),
        (ServiceKind::VendingItems, Money::from_cents(2_00)),
    ])
}

// Daily throughput model.
pub const LOADS_PER_WASHER_PER_DAY: f64 = 6.0;
pub const PREMIUM_WASH_SHARE: f64 = 0.25;
pub const VENDING_SALES_PER_LOAD: f64 = 0.5;
pub const LOYALTY_MULTIPLIER_CAP: f64 = 1.5;
pub const LOYALTY_MULTIPLIER_PER_MEMBER: f64 = 0.02;
pub const WASH_LOADS_PER_SUPPLY_UNIT: u32 = 10;

// Daily cleanliness drift.
pub const CLEANLINESS_DECAY_PER_DAY: f64 = 1.5;
pub const CLEANLINESS_RECOVERY_PER_ATTENDANT: f64 = 2.0;

// Machine wear per day: base plus a per-load component.
pub const fn wear_base(kind: MachineKind) -> f64 {
    match kind {
        MachineKind::Washer => 1.1,
        MachineKind::Dryer => 0.8,
        MachineKind::Vending => 0.2,
    }
}

pub const fn wear_per_load(kind: MachineKind) -> f64 {
    match kind {
        MachineKind::Washer => 0.05,
        MachineKind::Dryer => 0.03,
        MachineKind::Vending => 0.0,
    }
}

/// Condition at or below which a machine breaks down.
pub const BROKEN_CONDITION_THRESHOLD: f64 = 10.0;

// Staff morale.
pub const MORALE_DRIFT_WEEKLY: i64 = -2;
pub const MORALE_BENEFITS_BONUS: i64 = 4;
pub const MORALE_QUIT_THRESHOLD: i64 = 20;
pub const BENEFITS_COST_PER_STAFF: Money = Money::from_cents(50_00);
pub const BENEFITS_WEEKS: u32 = 4;
pub const BENEFITS_MORALE_DELTA: i64 = 10;
pub const RAISE_MORALE_DELTA: i64 = 5;
pub const PAY_CUT_MORALE_DELTA: i64 = -10;
