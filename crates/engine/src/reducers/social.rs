//! Social standing, scandal and narrative reducers.

use spincycle_core::FoldError;
use spincycle_domain::{AgentState, Dilemma, ScandalMarker};
use spincycle_events::{kinds, EventPayload, GameEvent};

use crate::registry::ReducerRegistry;

use super::{clamp_score, mismatch};

pub fn register(reg: &mut ReducerRegistry) {
    // Money and score legs travel as separate events.
    reg.register(
        kinds::CHARITY_INITIATED,
        |state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::CharityInitiated { .. } = &event.payload else {
                return Err(mismatch(event.kind()));
            };
            Ok(state)
        },
    );

    reg.register(
        kinds::SOCIAL_SCORE_ADJUSTED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::SocialScoreAdjusted { delta, .. } = &event.payload else {
                return Err(mismatch(event.kind()));
            };
            state.social_score = clamp_score(state.social_score + delta);
            Ok(state)
        },
    );

    reg.register(
        kinds::SCANDAL_STARTED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::ScandalStarted {
                scandal_id,
                description,
                severity,
                duration_weeks,
                weekly_decay,
            } = &event.payload
            else {
                return Err(mismatch(event.kind()));
            };
            state.active_scandals.push(ScandalMarker {
                id: scandal_id.clone(),
                description: description.clone(),
                severity: severity.clamp(0.0, 1.0),
                start_week: event.week,
                duration_weeks: *duration_weeks,
                weekly_decay: *weekly_decay,
            });
            Ok(state)
        },
    );

    reg.register(
        kinds::SCANDAL_RESOLVED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::ScandalResolved { scandal_id, .. } = &event.payload else {
                return Err(mismatch(event.kind()));
            };
            state.active_scandals.retain(|s| s.id != *scandal_id);
            Ok(state)
        },
    );

    reg.register(
        kinds::SCANDAL_MARKER_DECAYED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::ScandalMarkerDecayed { scandal_id, decay } = &event.payload else {
                return Err(mismatch(event.kind()));
            };
            if let Some(marker) = state.active_scandals.iter_mut().find(|s| s.id == *scandal_id)
            {
                marker.severity -= decay;
            }
            // At or below zero the marker is spent and removed.
            state.active_scandals.retain(|s| s.severity > 0.0);
            Ok(state)
        },
    );

    reg.register(
        kinds::ETHICAL_CHOICE_MADE,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::EthicalChoiceMade { dilemma_id, .. } = &event.payload else {
                return Err(mismatch(event.kind()));
            };
            state.active_dilemmas.remove(dilemma_id);
            if !state.resolved_dilemmas.contains(dilemma_id) {
                state.resolved_dilemmas.push(dilemma_id.clone());
            }
            Ok(state)
        },
    );

    reg.register(
        kinds::DILEMMA_TRIGGERED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::DilemmaTriggered {
                dilemma_id,
                title,
                description,
            } = &event.payload
            else {
                return Err(mismatch(event.kind()));
            };
            state.active_dilemmas.insert(
                dilemma_id.clone(),
                Dilemma {
                    id: dilemma_id.clone(),
                    title: title.clone(),
                    description: description.clone(),
                    triggered_week: event.week,
                },
            );
            Ok(state)
        },
    );

    reg.register(
        kinds::LOYALTY_PROGRAM_SUBSCRIBED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::LoyaltyProgramSubscribed { members_added, .. } = &event.payload
            else {
                return Err(mismatch(event.kind()));
            };
            state.loyalty_members += members_added;
            Ok(state)
        },
    );

    // Reviews are narrative; their revenue influence flows through the
    // state the ticker already reads (cleanliness, condition, prices).
    reg.register(
        kinds::CUSTOMER_REVIEW_SUBMITTED,
        |state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::CustomerReviewSubmitted { .. } = &event.payload else {
                return Err(mismatch(event.kind()));
            };
            Ok(state)
        },
    );
}
