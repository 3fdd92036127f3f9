//! Inter-agent event reducers.
//!
//! Each inter-agent command lands as a correlated pair, one event per
//! stream. These reducers only ever touch the stream they run on; the
//! core makes no cross-stream atomicity promise.

use spincycle_core::FoldError;
use spincycle_domain::{AgentState, Alliance, BuyoutOffer};
use spincycle_events::{kinds, EventPayload, GameEvent};

use crate::registry::ReducerRegistry;

use super::mismatch;

pub fn register(reg: &mut ReducerRegistry) {
    reg.register(
        kinds::BUYOUT_PROPOSED,
        |state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::BuyoutProposed { .. } = &event.payload else {
                return Err(mismatch(event.kind()));
            };
            Ok(state)
        },
    );

    reg.register(
        kinds::BUYOUT_OFFER_RECEIVED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::BuyoutOfferReceived {
                correlation_id,
                from,
                offer,
            } = &event.payload
            else {
                return Err(mismatch(event.kind()));
            };
            state.pending_buyout_offers.insert(
                correlation_id.clone(),
                BuyoutOffer {
                    from: from.clone(),
                    offer: *offer,
                    received_week: event.week,
                },
            );
            Ok(state)
        },
    );

    reg.register(
        kinds::BUYOUT_ACCEPTED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::BuyoutAccepted { correlation_id, .. } = &event.payload else {
                return Err(mismatch(event.kind()));
            };
            state.pending_buyout_offers.remove(correlation_id);
            Ok(state)
        },
    );

    reg.register(
        kinds::BUYOUT_CONCLUDED,
        |state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::BuyoutConcluded { .. } = &event.payload else {
                return Err(mismatch(event.kind()));
            };
            Ok(state)
        },
    );

    reg.register(
        kinds::ALLIANCE_FORMED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::AllianceFormed {
                alliance_id,
                partner,
                kind,
            } = &event.payload
            else {
                return Err(mismatch(event.kind()));
            };
            state.alliances.push(Alliance {
                id: alliance_id.clone(),
                partner: partner.clone(),
                kind: *kind,
                start_week: event.week,
            });
            Ok(state)
        },
    );

    reg.register(
        kinds::ALLIANCE_BREACHED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::AllianceBreached { alliance_id, .. } = &event.payload else {
                return Err(mismatch(event.kind()));
            };
            state.alliances.retain(|a| a.id != *alliance_id);
            Ok(state)
        },
    );

    // Message events double as the agent's private communications log.
    reg.register(
        kinds::AGENT_MESSAGE_SENT,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::AgentMessageSent { to, body, .. } = &event.payload else {
                return Err(mismatch(event.kind()));
            };
            state.private_notes.push(format!("to {to}: {body}"));
            Ok(state)
        },
    );

    reg.register(
        kinds::AGENT_MESSAGE_RECEIVED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::AgentMessageReceived { from, body, .. } = &event.payload else {
                return Err(mismatch(event.kind()));
            };
            state.private_notes.push(format!("from {from}: {body}"));
            Ok(state)
        },
    );
}
