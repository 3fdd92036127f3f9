//! A laundromat location: floor equipment, staff, pricing, suppliers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use spincycle_core::{ListingId, LocationId, MachineId, Money, StaffId, VendorId};

use crate::machine::MachineState;
use crate::staff::StaffMember;
use crate::vendor::VendorRelationship;

/// Services a location sells. Pricing, revenue and cost tables key on this.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    StandardWash,
    PremiumWash,
    Dry,
    VendingItems,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 4] = [
        ServiceKind::StandardWash,
        ServiceKind::PremiumWash,
        ServiceKind::Dry,
        ServiceKind::VendingItems,
    ];
}

/// Consumable stock held on site.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub detergent_units: u32,
    pub softener_units: u32,
}

/// An active marketing push. Expiry is derived from the week, not evented.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketingBoost {
    pub boost: f64,
    pub until_week: u32,
}

/// A storefront on the market, available to open as a new location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationListing {
    pub id: ListingId,
    pub zone: String,
    pub monthly_rent: Money,
    pub purchase_price: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationState {
    pub id: LocationId,
    pub zone: String,
    pub monthly_rent: Money,
    /// 0..=100.
    pub cleanliness: f64,
    pub equipment: BTreeMap<MachineId, MachineState>,
    #[serde(default)]
    pub inventory: Inventory,
    pub staff: BTreeMap<StaffId, StaffMember>,
    pub active_pricing: BTreeMap<ServiceKind, Money>,
    #[serde(default)]
    pub observed_competitor_prices: BTreeMap<ServiceKind, Money>,
    pub vendors: BTreeMap<VendorId, VendorRelationship>,
    #[serde(default)]
    pub marketing: Option<MarketingBoost>,
    /// Week until which provided benefits keep lifting morale.
    #[serde(default)]
    pub benefits_until_week: Option<u32>,
    /// Running totals for the week in progress; zeroed when the weekly
    /// fixed-costs event closes the week.
    #[serde(default)]
    pub weekly_revenue: Money,
    #[serde(default)]
    pub weekly_cogs: Money,
}

impl LocationState {
    pub fn new(id: LocationId, zone: impl Into<String>, monthly_rent: Money) -> Self {
        Self {
            id,
            zone: zone.into(),
            monthly_rent,
            cleanliness: 85.0,
            equipment: BTreeMap::new(),
            inventory: Inventory::default(),
            staff: BTreeMap::new(),
            active_pricing: BTreeMap::new(),
            observed_competitor_prices: BTreeMap::new(),
            vendors: BTreeMap::new(),
            marketing: None,
            benefits_until_week: None,
            weekly_revenue: Money::ZERO,
            weekly_cogs: Money::ZERO,
        }
    }

    pub fn operational_machines(&self) -> impl Iterator<Item = &MachineState> {
        self.equipment.values().filter(|m| m.is_operational())
    }

    pub fn marketing_multiplier(&self, current_week: u32) -> f64 {
        match self.marketing {
            Some(boost) if current_week < boost.until_week => 1.0 + boost.boost,
            _ => 1.0,
        }
    }

    pub fn has_active_benefits(&self, current_week: u32) -> bool {
        self.benefits_until_week
            .is_some_and(|until| current_week < until)
    }
}
