//! Reputation artifacts: scandals, fines, alliances, dilemmas.

use serde::{Deserialize, Serialize};
use spincycle_core::{AgentId, AllianceId, DilemmaId, FineId, Money, ScandalId};

/// An active scandal weighing on revenue and regulatory standing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScandalMarker {
    pub id: ScandalId,
    pub description: String,
    /// 0..=1.
    pub severity: f64,
    pub start_week: u32,
    pub duration_weeks: u32,
    /// Severity shed each weekly decay event.
    pub weekly_decay: f64,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FineStatus {
    Open,
    Paid,
    Appealed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fine {
    pub id: FineId,
    pub description: String,
    pub amount: Money,
    pub issued_week: u32,
    pub due_week: u32,
    pub status: FineStatus,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllianceKind {
    Informal,
    Formal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alliance {
    pub id: AllianceId,
    pub partner: AgentId,
    pub kind: AllianceKind,
    pub start_week: u32,
}

/// A narrative dilemma awaiting the player's ethical choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dilemma {
    pub id: DilemmaId,
    pub title: String,
    pub description: String,
    pub triggered_week: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fine_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&FineStatus::Appealed).unwrap(),
            "\"appealed\""
        );
    }
}
