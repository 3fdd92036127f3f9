//! Seed events for a newly created agent.
//!
//! The starting package is ordinary events on the log, not special
//! state: a funded agent, one location, the house vendor, a small
//! machine floor and the default price list.

use spincycle_core::{AgentId, LocationId, MachineId, VendorId};
use spincycle_domain::economy;
use spincycle_domain::MachineKind;
use spincycle_events::{EventDraft, EventPayload};

use crate::context::IdSource;

/// The first location every agent opens with.
pub const STARTING_LOCATION: &str = "LOC_001";
pub const STARTING_ZONE: &str = "downtown";
pub const STARTING_MONTHLY_RENT_CENTS: i64 = 1_200_00;

const STARTING_FLOOR: [MachineKind; 4] = [
    MachineKind::Washer,
    MachineKind::Washer,
    MachineKind::Dryer,
    MachineKind::Vending,
];

pub fn seed_drafts(agent_id: &AgentId, name: &str, ids: &mut IdSource) -> Vec<EventDraft> {
    let location_id = LocationId::new(STARTING_LOCATION);
    let vendor_id = VendorId::new(economy::DEFAULT_VENDOR);

    let mut drafts = vec![
        EventDraft::new(
            agent_id.clone(),
            EventPayload::AgentCreated {
                name: name.to_string(),
                starting_cash: economy::STARTING_CASH,
                credit_limit: economy::STARTING_CREDIT_LIMIT,
                credit_rating: economy::INITIAL_CREDIT_RATING,
                social_score: economy::INITIAL_SOCIAL_SCORE,
            },
        ),
        EventDraft::new(
            agent_id.clone(),
            EventPayload::LocationOpened {
                location_id: location_id.clone(),
                zone: STARTING_ZONE.to_string(),
                monthly_rent: spincycle_core::Money::from_cents(STARTING_MONTHLY_RENT_CENTS),
                listing_id: None,
            },
        ),
        EventDraft::new(
            agent_id.clone(),
            EventPayload::VendorRelationshipEstablished {
                location_id: location_id.clone(),
                vendor_id: vendor_id.clone(),
                unit_price: economy::DEFAULT_SUPPLY_UNIT_PRICE,
            },
        ),
    ];

    // The starter floor ships with the lease; no purchase transfer.
    for kind in STARTING_FLOOR {
        drafts.push(EventDraft::new(
            agent_id.clone(),
            EventPayload::EquipmentPurchased {
                location_id: location_id.clone(),
                machine_id: MachineId::new(ids.mint("MCH")),
                kind,
                unit_price: economy::equipment_unit_price(kind),
                vendor_id: vendor_id.clone(),
            },
        ));
    }

    for (service, price) in economy::default_price_list() {
        drafts.push(EventDraft::new(
            agent_id.clone(),
            EventPayload::PriceSet {
                location_id: location_id.clone(),
                service,
                price,
            },
        ));
    }
    drafts
}

#[cfg(test)]
mod tests {
    use super::*;
    use spincycle_core::Calendar;

    #[test]
    fn seed_is_deterministic_per_agent() {
        let agent = AgentId::new("A");
        let a = seed_drafts(&agent, "Suds", &mut IdSource::seeded(&agent, Calendar::default(), 0));
        let b = seed_drafts(&agent, "Suds", &mut IdSource::seeded(&agent, Calendar::default(), 0));
        assert_eq!(a, b);
    }

    #[test]
    fn seed_opens_one_location_with_four_machines_and_full_pricing() {
        let agent = AgentId::new("A");
        let drafts = seed_drafts(&agent, "Suds", &mut IdSource::seeded(&agent, Calendar::default(), 0));
        let machines = drafts
            .iter()
            .filter(|d| matches!(d.payload, EventPayload::EquipmentPurchased { .. }))
            .count();
        let prices = drafts
            .iter()
            .filter(|d| matches!(d.payload, EventPayload::PriceSet { .. }))
            .count();
        assert_eq!(machines, 4);
        assert_eq!(prices, 4);
    }
}
