//! Regulatory consequence reducers.

use spincycle_core::FoldError;
use spincycle_domain::{AgentState, Fine, FineStatus, Investigation};
use spincycle_events::{kinds, EventPayload, GameEvent};

use crate::registry::ReducerRegistry;

use super::mismatch;

pub fn register(reg: &mut ReducerRegistry) {
    reg.register(
        kinds::REGULATORY_FINDING,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::RegulatoryFinding {
                fine_id,
                description,
                amount,
                due_week,
            } = &event.payload
            else {
                return Err(mismatch(event.kind()));
            };
            state.pending_fines.push(Fine {
                id: fine_id.clone(),
                description: description.clone(),
                amount: *amount,
                issued_week: event.week,
                due_week: *due_week,
                status: FineStatus::Open,
            });
            Ok(state)
        },
    );

    reg.register(
        kinds::REGULATORY_STATUS_UPDATED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::RegulatoryStatusUpdated { status } = &event.payload else {
                return Err(mismatch(event.kind()));
            };
            state.regulatory_status = *status;
            Ok(state)
        },
    );

    reg.register(
        kinds::INVESTIGATION_STARTED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::InvestigationStarted {
                investigation_id,
                subject,
            } = &event.payload
            else {
                return Err(mismatch(event.kind()));
            };
            state.investigations.push(Investigation {
                id: investigation_id.clone(),
                subject: subject.clone(),
                opened_week: event.week,
            });
            Ok(state)
        },
    );

    reg.register(
        kinds::REGULATORY_REPORT_FILED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::RegulatoryReportFiled { .. } = &event.payload else {
                return Err(mismatch(event.kind()));
            };
            state.last_audit_week = Some(event.week);
            Ok(state)
        },
    );

    reg.register(
        kinds::FINE_PAID,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::FinePaid { fine_id, .. } = &event.payload else {
                return Err(mismatch(event.kind()));
            };
            state.pending_fines.retain(|f| f.id != *fine_id);
            Ok(state)
        },
    );

    reg.register(
        kinds::FINE_APPEALED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::FineAppealed { fine_id, .. } = &event.payload else {
                return Err(mismatch(event.kind()));
            };
            if let Some(fine) = state.pending_fines.iter_mut().find(|f| f.id == *fine_id) {
                fine.status = FineStatus::Appealed;
            }
            Ok(state)
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::stamp_event;
    use spincycle_core::{AgentId, Calendar, FineId, Money};
    use spincycle_domain::RegulatoryStatus;

    fn reg() -> ReducerRegistry {
        let mut reg = ReducerRegistry::new();
        register(&mut reg);
        reg
    }

    #[test]
    fn finding_then_payment_clears_the_fine() {
        let reg = reg();
        let mut state = AgentState::zero(AgentId::new("A"));
        let id = state.id.clone();

        let finding = stamp_event(
            &id,
            Calendar::new(2, 0),
            EventPayload::RegulatoryFinding {
                fine_id: FineId::new("FIN-1"),
                description: "predatory pricing".into(),
                amount: Money::from_cents(500_00),
                due_week: 6,
            },
        );
        state = reg.reduce(state, &finding).unwrap();
        assert_eq!(state.pending_fines.len(), 1);
        assert_eq!(state.pending_fines[0].issued_week, 2);

        let paid = stamp_event(
            &id,
            Calendar::new(3, 0),
            EventPayload::FinePaid {
                fine_id: FineId::new("FIN-1"),
                amount: Money::from_cents(500_00),
            },
        );
        state = reg.reduce(state, &paid).unwrap();
        assert!(state.pending_fines.is_empty());
    }

    #[test]
    fn status_update_overwrites() {
        let reg = reg();
        let mut state = AgentState::zero(AgentId::new("A"));
        let event = stamp_event(
            &state.id.clone(),
            Calendar::default(),
            EventPayload::RegulatoryStatusUpdated {
                status: RegulatoryStatus::Warning,
            },
        );
        state = reg.reduce(state, &event).unwrap();
        assert_eq!(state.regulatory_status, RegulatoryStatus::Warning);
    }
}
