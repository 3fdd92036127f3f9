//! The agent snapshot: everything one player's fold produces.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use spincycle_core::{
    AgentId, Calendar, CommandError, CorrelationId, DilemmaId, InvestigationId, ListingId, LoanId,
    LocationId, MachineId, Money,
};

use crate::location::{LocationListing, LocationState};
use crate::machine::MachineState;
use crate::social::{Alliance, Dilemma, Fine, FineStatus, ScandalMarker};

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegulatoryStatus {
    #[default]
    Normal,
    Warning,
    UnderInvestigation,
    Penalized,
}

impl RegulatoryStatus {
    /// Ordering used by the regulator: never downgrade via a finding.
    pub const fn severity_rank(self) -> u8 {
        match self {
            RegulatoryStatus::Normal => 0,
            RegulatoryStatus::Warning => 1,
            RegulatoryStatus::UnderInvestigation => 2,
            RegulatoryStatus::Penalized => 3,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LoanKind {
    #[serde(rename = "LOC")]
    LineOfCredit,
    #[serde(rename = "EQUIPMENT")]
    Equipment,
    #[serde(rename = "EXPANSION")]
    Expansion,
    #[serde(rename = "EMERGENCY")]
    Emergency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: LoanId,
    pub kind: LoanKind,
    pub principal: Money,
    pub outstanding: Money,
    pub annual_rate: f64,
    /// None for revolving products.
    pub term_weeks: Option<u32>,
    pub taken_week: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investigation {
    pub id: InvestigationId,
    pub subject: String,
    pub opened_week: u32,
}

/// A buyout offer received from another agent, awaiting acceptance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyoutOffer {
    pub from: AgentId,
    pub offer: Money,
    pub received_week: u32,
}

/// Full state for one agent, derived by folding their stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    pub id: AgentId,
    pub name: String,
    pub calendar: Calendar,
    pub cash: Money,
    pub credit_limit: Money,
    pub loans: BTreeMap<LoanId, Loan>,
    /// 0..=100.
    pub social_score: i64,
    /// 0..=100.
    pub credit_rating: i64,
    pub active_scandals: Vec<ScandalMarker>,
    pub active_dilemmas: BTreeMap<DilemmaId, Dilemma>,
    /// Dilemmas already answered; they do not trigger again.
    #[serde(default)]
    pub resolved_dilemmas: Vec<DilemmaId>,
    pub loyalty_members: u32,
    /// Lifetime loads processed, the market-share proxy.
    #[serde(default)]
    pub market_share_loads: u64,
    pub tax_liability: Money,
    pub regulatory_status: RegulatoryStatus,
    pub investigations: Vec<Investigation>,
    pub alliances: Vec<Alliance>,
    pub pending_fines: Vec<Fine>,
    pub locations: BTreeMap<LocationId, LocationState>,
    pub available_listings: BTreeMap<ListingId, LocationListing>,
    #[serde(default)]
    pub pending_buyout_offers: BTreeMap<CorrelationId, BuyoutOffer>,
    #[serde(default)]
    pub private_notes: Vec<String>,
    #[serde(default)]
    pub last_audit_week: Option<u32>,
    /// Revenue and cost accumulated since the last tax liability event.
    #[serde(default)]
    pub revenue_since_audit: Money,
    #[serde(default)]
    pub cogs_since_audit: Money,
    #[serde(default)]
    pub created: bool,
    #[serde(default)]
    pub retired: bool,
}

impl AgentState {
    /// Fresh zero state for the fold's first step.
    pub fn zero(id: AgentId) -> Self {
        Self {
            id,
            name: String::new(),
            calendar: Calendar::default(),
            cash: Money::ZERO,
            credit_limit: Money::ZERO,
            loans: BTreeMap::new(),
            social_score: 0,
            credit_rating: 0,
            active_scandals: Vec::new(),
            active_dilemmas: BTreeMap::new(),
            resolved_dilemmas: Vec::new(),
            loyalty_members: 0,
            market_share_loads: 0,
            tax_liability: Money::ZERO,
            regulatory_status: RegulatoryStatus::Normal,
            investigations: Vec::new(),
            alliances: Vec::new(),
            pending_fines: Vec::new(),
            locations: BTreeMap::new(),
            available_listings: BTreeMap::new(),
            pending_buyout_offers: BTreeMap::new(),
            private_notes: Vec::new(),
            last_audit_week: None,
            revenue_since_audit: Money::ZERO,
            cogs_since_audit: Money::ZERO,
            created: false,
            retired: false,
        }
    }

    pub fn total_debt(&self) -> Money {
        self.loans.values().map(|l| l.outstanding).sum()
    }

    /// Line-of-credit headroom: limit minus what is already drawn on
    /// revolving products.
    pub fn available_credit(&self) -> Money {
        let drawn: Money = self
            .loans
            .values()
            .filter(|l| l.kind == LoanKind::LineOfCredit)
            .map(|l| l.outstanding)
            .sum();
        (self.credit_limit - drawn).max(Money::ZERO)
    }

    /// Funds a command may spend: cash plus undrawn credit capacity.
    pub fn spendable(&self) -> Money {
        self.cash + self.available_credit()
    }

    /// Validation helper: commands fail when cash plus available credit
    /// cannot cover the required amount.
    pub fn ensure_affordable(&self, required: Money) -> Result<(), CommandError> {
        if self.spendable() < required {
            return Err(CommandError::InsufficientFunds {
                required: required.to_string(),
                available: self.spendable().to_string(),
            });
        }
        Ok(())
    }

    pub fn total_scandal_severity(&self) -> f64 {
        self.active_scandals.iter().map(|s| s.severity).sum()
    }

    pub fn location(&self, id: &LocationId) -> Result<&LocationState, CommandError> {
        self.locations
            .get(id)
            .ok_or_else(|| CommandError::LocationNotFound(id.to_string()))
    }

    pub fn machine(
        &self,
        location_id: &LocationId,
        machine_id: &MachineId,
    ) -> Result<&MachineState, CommandError> {
        self.location(location_id)?
            .equipment
            .get(machine_id)
            .ok_or_else(|| CommandError::MachineNotFound(machine_id.to_string()))
    }

    pub fn open_fine(&self, id: &spincycle_core::FineId) -> Option<&Fine> {
        self.pending_fines
            .iter()
            .find(|f| f.id == *id && f.status == FineStatus::Open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spincycle_core::LoanId;

    fn agent_with_credit() -> AgentState {
        let mut state = AgentState::zero(AgentId::new("A"));
        state.cash = Money::from_cents(100_00);
        state.credit_limit = Money::from_cents(500_00);
        state
    }

    #[test]
    fn spendable_includes_undrawn_credit() {
        let state = agent_with_credit();
        assert_eq!(state.spendable(), Money::from_cents(600_00));
        assert!(state.ensure_affordable(Money::from_cents(600_00)).is_ok());
        assert!(state.ensure_affordable(Money::from_cents(600_01)).is_err());
    }

    #[test]
    fn drawn_credit_reduces_headroom() {
        let mut state = agent_with_credit();
        state.loans.insert(
            LoanId::new("LN-1"),
            Loan {
                id: LoanId::new("LN-1"),
                kind: LoanKind::LineOfCredit,
                principal: Money::from_cents(200_00),
                outstanding: Money::from_cents(200_00),
                annual_rate: 0.08,
                term_weeks: None,
                taken_week: 0,
            },
        );
        assert_eq!(state.available_credit(), Money::from_cents(300_00));
        assert_eq!(state.total_debt(), Money::from_cents(200_00));
    }

    #[test]
    fn missing_location_is_a_typed_error() {
        let state = agent_with_credit();
        let err = state.location(&LocationId::new("LOC_404")).unwrap_err();
        assert_eq!(err.kind(), "location_not_found");
    }
}
