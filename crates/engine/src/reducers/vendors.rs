//! Vendor relationship reducers.

use spincycle_core::{Calendar, FoldError};
use spincycle_domain::{AgentState, VendorRelationship};
use spincycle_events::{kinds, EventPayload, GameEvent};

use crate::registry::ReducerRegistry;

use super::mismatch;

pub fn register(reg: &mut ReducerRegistry) {
    reg.register(
        kinds::VENDOR_RELATIONSHIP_ESTABLISHED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::VendorRelationshipEstablished {
                location_id,
                vendor_id,
                unit_price,
            } = &event.payload
            else {
                return Err(mismatch(event.kind()));
            };
            if let Some(location) = state.locations.get_mut(location_id) {
                location.vendors.insert(
                    vendor_id.clone(),
                    VendorRelationship::new(vendor_id.clone(), *unit_price, event.week),
                );
            }
            Ok(state)
        },
    );

    // The initiation is pure record; terms move via VendorTermsUpdated.
    reg.register(
        kinds::VENDOR_NEGOTIATION_INITIATED,
        |state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::VendorNegotiationInitiated { .. } = &event.payload else {
                return Err(mismatch(event.kind()));
            };
            Ok(state)
        },
    );

    reg.register(
        kinds::VENDOR_NEGOTIATION_RESOLVED,
        |state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::VendorNegotiationResolved { .. } = &event.payload else {
                return Err(mismatch(event.kind()));
            };
            Ok(state)
        },
    );

    reg.register(
        kinds::VENDOR_TERMS_UPDATED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::VendorTermsUpdated {
                location_id,
                vendor_id,
                new_unit_price,
            } = &event.payload
            else {
                return Err(mismatch(event.kind()));
            };
            if let Some(vendor) = state
                .locations
                .get_mut(location_id)
                .and_then(|l| l.vendors.get_mut(vendor_id))
            {
                vendor.unit_price = *new_unit_price;
            }
            Ok(state)
        },
    );

    reg.register(
        kinds::EXCLUSIVE_CONTRACT_SIGNED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::ExclusiveContractSigned {
                location_id,
                vendor_id,
                until_week,
                ..
            } = &event.payload
            else {
                return Err(mismatch(event.kind()));
            };
            if let Some(vendor) = state
                .locations
                .get_mut(location_id)
                .and_then(|l| l.vendors.get_mut(vendor_id))
            {
                vendor.exclusive_until_week = Some(*until_week);
            }
            Ok(state)
        },
    );

    reg.register(
        kinds::VENDOR_CONTRACT_CANCELLED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::VendorContractCancelled {
                location_id,
                vendor_id,
                ..
            } = &event.payload
            else {
                return Err(mismatch(event.kind()));
            };
            if let Some(vendor) = state
                .locations
                .get_mut(location_id)
                .and_then(|l| l.vendors.get_mut(vendor_id))
            {
                vendor.exclusive_until_week = None;
            }
            Ok(state)
        },
    );

    reg.register(
        kinds::VENDOR_PRICE_FLUCTUATED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::VendorPriceFluctuated {
                location_id,
                vendor_id,
                new_unit_price,
            } = &event.payload
            else {
                return Err(mismatch(event.kind()));
            };
            if let Some(vendor) = state
                .locations
                .get_mut(location_id)
                .and_then(|l| l.vendors.get_mut(vendor_id))
            {
                vendor.unit_price = *new_unit_price;
            }
            Ok(state)
        },
    );

    reg.register(
        kinds::DELIVERY_DISRUPTION_STARTED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::DeliveryDisruptionStarted {
                location_id,
                vendor_id,
                duration_days,
            } = &event.payload
            else {
                return Err(mismatch(event.kind()));
            };
            let ends = Calendar::new(event.week, event.day).absolute_day() + u64::from(*duration_days);
            if let Some(vendor) = state
                .locations
                .get_mut(location_id)
                .and_then(|l| l.vendors.get_mut(vendor_id))
            {
                vendor.disrupted = true;
                vendor.disrupted_until_day = Some(ends);
            }
            Ok(state)
        },
    );

    reg.register(
        kinds::DELIVERY_DISRUPTION_ENDED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::DeliveryDisruptionEnded {
                location_id,
                vendor_id,
            } = &event.payload
            else {
                return Err(mismatch(event.kind()));
            };
            if let Some(vendor) = state
                .locations
                .get_mut(location_id)
                .and_then(|l| l.vendors.get_mut(vendor_id))
            {
                vendor.disrupted = false;
                vendor.disrupted_until_day = None;
            }
            Ok(state)
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::stamp_event;
    use spincycle_core::{AgentId, LocationId, Money, VendorId};
    use spincycle_domain::LocationState;

    fn reg() -> ReducerRegistry {
        let mut reg = ReducerRegistry::new();
        register(&mut reg);
        reg
    }

    fn seeded() -> (AgentState, LocationId, VendorId) {
        let mut state = AgentState::zero(AgentId::new("A"));
        let loc = LocationId::new("LOC_001");
        let vendor = VendorId::new("V-1");
        let mut location = LocationState::new(loc.clone(), "downtown", Money::from_cents(120_000));
        location.vendors.insert(
            vendor.clone(),
            VendorRelationship::new(vendor.clone(), Money::from_cents(250), 0),
        );
        state.locations.insert(loc.clone(), location);
        (state, loc, vendor)
    }

    #[test]
    fn disruption_start_and_end_toggle_the_flag() {
        let reg = reg();
        let (mut state, loc, vendor) = seeded();

        let started = stamp_event(
            &state.id.clone(),
            Calendar::new(2, 3),
            EventPayload::DeliveryDisruptionStarted {
                location_id: loc.clone(),
                vendor_id: vendor.clone(),
                duration_days: 3,
            },
        );
        state = reg.reduce(state, &started).unwrap();
        let rel = &state.locations[&loc].vendors[&vendor];
        assert!(rel.disrupted);
        assert_eq!(rel.disrupted_until_day, Some(Calendar::new(2, 3).absolute_day() + 3));

        let ended = stamp_event(
            &state.id.clone(),
            Calendar::new(2, 6),
            EventPayload::DeliveryDisruptionEnded {
                location_id: loc.clone(),
                vendor_id: vendor.clone(),
            },
        );
        state = reg.reduce(state, &ended).unwrap();
        assert!(!state.locations[&loc].vendors[&vendor].disrupted);
    }

    #[test]
    fn terms_update_moves_the_unit_price() {
        let reg = reg();
        let (mut state, loc, vendor) = seeded();
        let event = stamp_event(
            &state.id.clone(),
            Calendar::default(),
            EventPayload::VendorTermsUpdated {
                location_id: loc.clone(),
                vendor_id: vendor.clone(),
                new_unit_price: Money::from_cents(212),
            },
        );
        state = reg.reduce(state, &event).unwrap();
        assert_eq!(
            state.locations[&loc].vendors[&vendor].unit_price,
            Money::from_cents(212)
        );
    }
}
