//! Machines: washers, dryers, vending units.

use serde::{Deserialize, Serialize};
use spincycle_core::MachineId;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MachineKind {
    Washer,
    Dryer,
    Vending,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MachineStatus {
    Operational,
    Broken,
    InRepair,
}

/// A single machine on a location floor.
///
/// Condition only moves down between repair events; the broken threshold
/// is crossed by wear, and the status change is always carried by its own
/// event rather than inferred here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineState {
    pub id: MachineId,
    pub kind: MachineKind,
    pub status: MachineStatus,
    pub condition: f64,
    #[serde(default)]
    pub loads_since_service: u64,
}

impl MachineState {
    /// A factory-fresh machine.
    pub fn new(id: MachineId, kind: MachineKind) -> Self {
        Self {
            id,
            kind,
            status: MachineStatus::Operational,
            condition: 100.0,
            loads_since_service: 0,
        }
    }

    pub fn is_operational(&self) -> bool {
        self.status == MachineStatus::Operational
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_machine_is_pristine() {
        let m = MachineState::new(MachineId::new("MCH-1"), MachineKind::Washer);
        assert!(m.is_operational());
        assert_eq!(m.condition, 100.0);
        assert_eq!(m.loads_since_service, 0);
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&MachineStatus::InRepair).unwrap();
        assert_eq!(json, "\"in_repair\"");
    }
}
