//! Pricing, marketing and competitor-observation reducers.

use spincycle_core::FoldError;
use spincycle_domain::{AgentState, MarketingBoost};
use spincycle_events::{kinds, EventPayload, GameEvent};

use crate::registry::ReducerRegistry;

use super::mismatch;

pub fn register(reg: &mut ReducerRegistry) {
    reg.register(
        kinds::PRICE_SET,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::PriceSet {
                location_id,
                service,
                price,
            } = &event.payload
            else {
                return Err(mismatch(event.kind()));
            };
            if let Some(location) = state.locations.get_mut(location_id) {
                location.active_pricing.insert(*service, *price);
            }
            Ok(state)
        },
    );

    reg.register(
        kinds::MARKETING_BOOST_APPLIED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::MarketingBoostApplied {
                location_id,
                boost,
                until_week,
                ..
            } = &event.payload
            else {
                return Err(mismatch(event.kind()));
            };
            if let Some(location) = state.locations.get_mut(location_id) {
                location.marketing = Some(MarketingBoost {
                    boost: *boost,
                    until_week: *until_week,
                });
            }
            Ok(state)
        },
    );

    reg.register(
        kinds::COMPETITOR_PRICE_CHANGED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::CompetitorPriceChanged {
                location_id,
                service,
                price,
            } = &event.payload
            else {
                return Err(mismatch(event.kind()));
            };
            if let Some(location) = state.locations.get_mut(location_id) {
                location
                    .observed_competitor_prices
                    .insert(*service, *price);
            }
            Ok(state)
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::stamp_event;
    use spincycle_core::{AgentId, Calendar, LocationId, Money};
    use spincycle_domain::{LocationState, ServiceKind};

    #[test]
    fn price_set_overwrites_the_active_price() {
        let mut registry = ReducerRegistry::new();
        register(&mut registry);

        let mut state = AgentState::zero(AgentId::new("A"));
        let loc = LocationId::new("LOC_001");
        state.locations.insert(
            loc.clone(),
            LocationState::new(loc.clone(), "downtown", Money::from_cents(120_000)),
        );

        for cents in [300, 375] {
            let event = stamp_event(
                &state.id.clone(),
                Calendar::default(),
                EventPayload::PriceSet {
                    location_id: loc.clone(),
                    service: ServiceKind::StandardWash,
                    price: Money::from_cents(cents),
                },
            );
            state = registry.reduce(state, &event).unwrap();
        }
        assert_eq!(
            state.locations[&loc].active_pricing[&ServiceKind::StandardWash],
            Money::from_cents(375)
        );
    }
}
