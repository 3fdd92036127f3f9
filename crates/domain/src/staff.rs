//! Staff members employed at a location.

use serde::{Deserialize, Serialize};
use spincycle_core::{Money, StaffId};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    Attendant,
    Technician,
    Manager,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: StaffId,
    pub name: String,
    pub role: StaffRole,
    pub hourly_rate: Money,
    /// 0..=100, moved only by declared morale deltas.
    pub morale: i64,
    pub hired_week: u32,
}

impl StaffMember {
    pub fn tenure_weeks(&self, current_week: u32) -> u32 {
        current_week.saturating_sub(self.hired_week)
    }
}
