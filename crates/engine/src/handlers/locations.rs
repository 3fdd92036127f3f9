//! Expansion handlers.

use spincycle_core::{CommandError, LocationId, VendorId};
use spincycle_domain::economy;
use spincycle_domain::AgentState;
use spincycle_events::{Command, CommandPayload, EventDraft, EventPayload, TransferKind};

use crate::context::CommandContext;

use super::own;

pub fn open_new_location(
    state: &AgentState,
    cmd: &Command,
    ctx: &mut CommandContext,
) -> Result<Vec<EventDraft>, CommandError> {
    let CommandPayload::OpenNewLocation { listing_id } = &cmd.payload else {
        return Err(CommandError::invalid(
            "payload does not match OPEN_NEW_LOCATION",
        ));
    };

    let listing = state
        .available_listings
        .get(listing_id)
        .ok_or_else(|| CommandError::invalid(format!("unknown listing {listing_id}")))?;
    state.ensure_affordable(listing.purchase_price)?;

    let location_id = LocationId::new(ctx.mint_id("LOC"));
    let mut drafts = vec![
        own(
            cmd,
            EventPayload::LocationOpened {
                location_id: location_id.clone(),
                zone: listing.zone.clone(),
                monthly_rent: listing.monthly_rent,
                listing_id: Some(listing_id.clone()),
            },
        ),
        own(
            cmd,
            EventPayload::FundsTransferred {
                kind: TransferKind::Expense,
                amount: listing.purchase_price,
                memo: format!("purchase of {location_id} ({})", listing.zone),
            },
        ),
        own(
            cmd,
            EventPayload::VendorRelationshipEstablished {
                location_id: location_id.clone(),
                vendor_id: VendorId::new(economy::DEFAULT_VENDOR),
                unit_price: economy::DEFAULT_SUPPLY_UNIT_PRICE,
            },
        ),
    ];
    // New floors open at the house price list.
    for (service, price) in economy::default_price_list() {
        drafts.push(own(
            cmd,
            EventPayload::PriceSet {
                location_id: location_id.clone(),
                service,
                price,
            },
        ));
    }
    Ok(drafts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::{command_ctx, seeded_agent};
    use spincycle_core::{ListingId, Money};
    use spincycle_domain::LocationListing;

    fn with_listing(price_cents: i64) -> AgentState {
        let mut state = seeded_agent();
        state.available_listings.insert(
            ListingId::new("LST-1"),
            LocationListing {
                id: ListingId::new("LST-1"),
                zone: "riverside".into(),
                monthly_rent: Money::from_cents(90_000),
                purchase_price: Money::from_cents(price_cents),
            },
        );
        state
    }

    #[test]
    fn opening_consumes_funds_and_seeds_defaults() {
        let state = with_listing(6_000_00);
        let cmd = Command::new(
            state.id.clone(),
            CommandPayload::OpenNewLocation {
                listing_id: ListingId::new("LST-1"),
            },
        );
        let drafts = open_new_location(&state, &cmd, &mut command_ctx(&state)).unwrap();
        // Opened + transfer + vendor + four default prices.
        assert_eq!(drafts.len(), 7);
    }

    #[test]
    fn unaffordable_listing_is_rejected() {
        let state = with_listing(99_000_000_00);
        let cmd = Command::new(
            state.id.clone(),
            CommandPayload::OpenNewLocation {
                listing_id: ListingId::new("LST-1"),
            },
        );
        let err = open_new_location(&state, &cmd, &mut command_ctx(&state)).unwrap_err();
        assert_eq!(err.kind(), "insufficient_funds");
    }
}
