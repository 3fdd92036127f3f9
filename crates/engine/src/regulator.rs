//! Regulator: inspects newly appended events and emits consequences.
//!
//! The regulator never mutates state. It reads the projected snapshot
//! (and peer snapshots, for collusion) and returns consequence drafts
//! for the engine to append. Each check carries a duplicate guard so a
//! replayed trigger produces at most one consequence set.

use spincycle_core::{AgentId, FineId, InvestigationId, Money};
use spincycle_domain::economy;
use spincycle_domain::{AgentState, FineStatus, RegulatoryStatus, ServiceKind};
use spincycle_events::{EventDraft, EventPayload, GameEvent};
use tracing::info;

use crate::context::IdSource;

/// Read access to other agents' projected snapshots, for checks that
/// compare across streams.
pub trait SnapshotSource {
    fn snapshot(&self, agent_id: &AgentId) -> Option<AgentState>;
}

#[derive(Debug, Default)]
pub struct Regulator;

impl Regulator {
    pub fn new() -> Self {
        Self
    }

    /// Inspect a freshly appended batch. `state` is the snapshot with
    /// the batch already applied; `recent` is the tail of the agent's
    /// stream (including the batch) for windowed checks.
    pub fn inspect(
        &self,
        state: &AgentState,
        new_events: &[GameEvent],
        recent: &[GameEvent],
        peers: &dyn SnapshotSource,
        ids: &mut IdSource,
    ) -> Vec<EventDraft> {
        let mut drafts = Vec::new();
        for event in new_events {
            match &event.payload {
                EventPayload::PriceSet {
                    location_id,
                    service,
                    price,
                } => {
                    self.check_predatory_pricing(
                        state,
                        location_id,
                        *service,
                        *price,
                        ids,
                        &mut drafts,
                    );
                }
                EventPayload::StaffHired {
                    staff_id,
                    hourly_rate,
                    ..
                }
                | EventPayload::StaffWageAdjusted {
                    staff_id,
                    new_rate: hourly_rate,
                    ..
                } => {
                    self.check_wage_floor(state, staff_id, *hourly_rate, ids, &mut drafts);
                }
                EventPayload::AgentMessageSent { to, .. } => {
                    self.check_collusion(state, to, recent, peers, ids, &mut drafts);
                }
                EventPayload::ScandalStarted { .. } => {
                    self.check_scandal_escalation(state, &mut drafts);
                }
                _ => {}
            }
        }
        drafts
    }

    fn check_predatory_pricing(
        &self,
        state: &AgentState,
        location_id: &spincycle_core::LocationId,
        service: ServiceKind,
        price: Money,
        ids: &mut IdSource,
        drafts: &mut Vec<EventDraft>,
    ) {
        let floor = economy::cost_per_load(service).scale(economy::PREDATORY_PRICE_FRACTION);
        if price >= floor {
            return;
        }
        let description = format!("predatory pricing of {service:?} at {location_id}");
        let already_cited = state.pending_fines.iter().any(|f| {
            f.status == FineStatus::Open
                && f.description == description
                && f.issued_week == state.calendar.week
        });
        if already_cited {
            return;
        }
        info!(agent = %state.id, %location_id, %price, "predatory pricing finding");
        drafts.push(EventDraft::new(
            state.id.clone(),
            EventPayload::RegulatoryFinding {
                fine_id: FineId::new(ids.mint("FIN")),
                description,
                amount: economy::PREDATORY_PRICING_FINE,
                due_week: state.calendar.week + economy::FINE_DUE_WEEKS,
            },
        ));
        if state.regulatory_status.severity_rank() < RegulatoryStatus::Warning.severity_rank() {
            drafts.push(EventDraft::new(
                state.id.clone(),
                EventPayload::RegulatoryStatusUpdated {
                    status: RegulatoryStatus::Warning,
                },
            ));
        }
    }

    fn check_wage_floor(
        &self,
        state: &AgentState,
        staff_id: &spincycle_core::StaffId,
        rate: Money,
        ids: &mut IdSource,
        drafts: &mut Vec<EventDraft>,
    ) {
        if rate >= economy::STATUTORY_WAGE_FLOOR {
            return;
        }
        let description = format!("wage below statutory floor for {staff_id}");
        let already_cited = state
            .pending_fines
            .iter()
            .any(|f| f.status == FineStatus::Open && f.description == description);
        if already_cited {
            return;
        }
        info!(agent = %state.id, %staff_id, %rate, "labor violation finding");
        drafts.push(EventDraft::new(
            state.id.clone(),
            EventPayload::RegulatoryFinding {
                fine_id: FineId::new(ids.mint("FIN")),
                description,
                amount: economy::LABOR_VIOLATION_FINE,
                due_week: state.calendar.week + economy::FINE_DUE_WEEKS,
            },
        ));
    }

    fn check_collusion(
        &self,
        state: &AgentState,
        counterpart: &AgentId,
        recent: &[GameEvent],
        peers: &dyn SnapshotSource,
        ids: &mut IdSource,
        drafts: &mut Vec<EventDraft>,
    ) {
        let window_start = state
            .calendar
            .absolute_day()
            .saturating_sub(economy::COLLUSION_WINDOW_DAYS);
        let messages = recent
            .iter()
            .filter(|e| {
                spincycle_core::Calendar::new(e.week, e.day).absolute_day() >= window_start
                    && matches!(
                        &e.payload,
                        EventPayload::AgentMessageSent { to, .. } if to == counterpart
                    )
            })
            .count();
        if messages < economy::COLLUSION_MESSAGE_THRESHOLD {
            return;
        }

        let Some(peer) = peers.snapshot(counterpart) else {
            return;
        };
        let aligned = match (standard_wash_price(state), standard_wash_price(&peer)) {
            (Some(ours), Some(theirs)) => {
                let gap = if ours > theirs { ours - theirs } else { theirs - ours };
                gap <= economy::COLLUSION_PRICE_ALIGNMENT
            }
            _ => false,
        };
        if !aligned {
            return;
        }

        let subject = format!("collusion with {counterpart}");
        if state.investigations.iter().any(|i| i.subject == subject) {
            return;
        }
        info!(agent = %state.id, %counterpart, messages, "collusion investigation opened");
        drafts.push(EventDraft::new(
            state.id.clone(),
            EventPayload::InvestigationStarted {
                investigation_id: InvestigationId::new(ids.mint("INV")),
                subject,
            },
        ));
        // An alliance with the counterpart does not survive the opening
        // of a collusion file; both streams see the breach.
        if let Some(alliance) = state.alliances.iter().find(|a| a.partner == *counterpart) {
            let reason = "collusion investigation opened".to_string();
            drafts.push(EventDraft::new(
                state.id.clone(),
                EventPayload::AllianceBreached {
                    alliance_id: alliance.id.clone(),
                    reason: reason.clone(),
                },
            ));
            drafts.push(EventDraft::new(
                counterpart.clone(),
                EventPayload::AllianceBreached {
                    alliance_id: alliance.id.clone(),
                    reason,
                },
            ));
        }
    }

    fn check_scandal_escalation(&self, state: &AgentState, drafts: &mut Vec<EventDraft>) {
        if state.total_scandal_severity() <= economy::SCANDAL_INVESTIGATION_THRESHOLD {
            return;
        }
        if state.regulatory_status.severity_rank()
            >= RegulatoryStatus::UnderInvestigation.severity_rank()
        {
            return;
        }
        info!(agent = %state.id, severity = state.total_scandal_severity(), "scandal escalation");
        drafts.push(EventDraft::new(
            state.id.clone(),
            EventPayload::RegulatoryStatusUpdated {
                status: RegulatoryStatus::UnderInvestigation,
            },
        ));
    }
}

fn standard_wash_price(state: &AgentState) -> Option<Money> {
    state
        .locations
        .values()
        .filter_map(|l| l.active_pricing.get(&ServiceKind::StandardWash).copied())
        .min()
}
