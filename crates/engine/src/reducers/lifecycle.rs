//! Agent, location and listing lifecycle reducers.

use spincycle_core::FoldError;
use spincycle_domain::{AgentState, LocationListing, LocationState};
use spincycle_events::{kinds, EventPayload, GameEvent};

use crate::registry::ReducerRegistry;

use super::mismatch;

pub fn register(reg: &mut ReducerRegistry) {
    reg.register(
        kinds::AGENT_CREATED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::AgentCreated {
                name,
                starting_cash,
                credit_limit,
                credit_rating,
                social_score,
            } = &event.payload
            else {
                return Err(mismatch(event.kind()));
            };
            state.name = name.clone();
            state.cash = *starting_cash;
            state.credit_limit = *credit_limit;
            state.credit_rating = *credit_rating;
            state.social_score = *social_score;
            state.created = true;
            Ok(state)
        },
    );

    reg.register(
        kinds::AGENT_RETIRED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::AgentRetired { .. } = &event.payload else {
                return Err(mismatch(event.kind()));
            };
            state.retired = true;
            Ok(state)
        },
    );

    reg.register(
        kinds::LOCATION_OPENED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::LocationOpened {
                location_id,
                zone,
                monthly_rent,
                listing_id,
            } = &event.payload
            else {
                return Err(mismatch(event.kind()));
            };
            state.locations.insert(
                location_id.clone(),
                LocationState::new(location_id.clone(), zone.clone(), *monthly_rent),
            );
            if let Some(listing_id) = listing_id {
                state.available_listings.remove(listing_id);
            }
            Ok(state)
        },
    );

    reg.register(
        kinds::LOCATION_CLOSED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::LocationClosed { location_id } = &event.payload else {
                return Err(mismatch(event.kind()));
            };
            state.locations.remove(location_id);
            Ok(state)
        },
    );

    reg.register(
        kinds::LISTING_POSTED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::LocationListingPosted {
                listing_id,
                zone,
                monthly_rent,
                purchase_price,
            } = &event.payload
            else {
                return Err(mismatch(event.kind()));
            };
            state.available_listings.insert(
                listing_id.clone(),
                LocationListing {
                    id: listing_id.clone(),
                    zone: zone.clone(),
                    monthly_rent: *monthly_rent,
                    purchase_price: *purchase_price,
                },
            );
            Ok(state)
        },
    );
}
