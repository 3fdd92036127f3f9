//! Vendor relationship handlers.

use spincycle_core::CommandError;
use spincycle_domain::economy;
use spincycle_domain::{AgentState, NegotiationOutcome};
use spincycle_events::{Command, CommandPayload, EventDraft, EventPayload, TransferKind};

use crate::context::CommandContext;

use super::own;

pub fn negotiate_vendor_deal(
    state: &AgentState,
    cmd: &Command,
    ctx: &mut CommandContext,
) -> Result<Vec<EventDraft>, CommandError> {
    let CommandPayload::NegotiateVendorDeal {
        location_id,
        vendor_id,
        requested_discount,
    } = &cmd.payload
    else {
        return Err(CommandError::invalid(
            "payload does not match NEGOTIATE_VENDOR_DEAL",
        ));
    };

    let location = state.location(location_id)?;
    let relationship = location
        .vendors
        .get(vendor_id)
        .ok_or_else(|| CommandError::VendorNotFound(vendor_id.to_string()))?;

    if !(0.0..=0.5).contains(requested_discount) {
        return Err(CommandError::invalid("requested discount must be in [0, 0.5]"));
    }

    let (outcome, granted) =
        relationship.evaluate_discount_request(ctx.week(), *requested_discount);

    let mut drafts = vec![
        own(
            cmd,
            EventPayload::VendorNegotiationInitiated {
                location_id: location_id.clone(),
                vendor_id: vendor_id.clone(),
                requested_discount: *requested_discount,
            },
        ),
        own(
            cmd,
            EventPayload::VendorNegotiationResolved {
                location_id: location_id.clone(),
                vendor_id: vendor_id.clone(),
                outcome,
                granted_discount: granted,
            },
        ),
    ];
    if outcome != NegotiationOutcome::Rejected && granted > 0.0 {
        drafts.push(own(
            cmd,
            EventPayload::VendorTermsUpdated {
                location_id: location_id.clone(),
                vendor_id: vendor_id.clone(),
                new_unit_price: relationship.unit_price.scale(1.0 - granted),
            },
        ));
    }
    Ok(drafts)
}

pub fn sign_exclusive_contract(
    state: &AgentState,
    cmd: &Command,
    ctx: &mut CommandContext,
) -> Result<Vec<EventDraft>, CommandError> {
    let CommandPayload::SignExclusiveContract {
        location_id,
        vendor_id,
    } = &cmd.payload
    else {
        return Err(CommandError::invalid(
            "payload does not match SIGN_EXCLUSIVE_CONTRACT",
        ));
    };

    let location = state.location(location_id)?;
    let relationship = location
        .vendors
        .get(vendor_id)
        .ok_or_else(|| CommandError::VendorNotFound(vendor_id.to_string()))?;

    // One exclusive supplier per location, and never two contracts on
    // the same relationship.
    for (other_id, other) in &location.vendors {
        if other.has_active_exclusive(ctx.week()) {
            return Err(CommandError::ContractViolation(format!(
                "{other_id} already holds the exclusive at {location_id}"
            )));
        }
    }

    let until_week = ctx.week() + economy::EXCLUSIVE_CONTRACT_WEEKS;
    Ok(vec![
        own(
            cmd,
            EventPayload::ExclusiveContractSigned {
                location_id: location_id.clone(),
                vendor_id: vendor_id.clone(),
                discount: economy::EXCLUSIVE_CONTRACT_DISCOUNT,
                until_week,
            },
        ),
        own(
            cmd,
            EventPayload::VendorTermsUpdated {
                location_id: location_id.clone(),
                vendor_id: vendor_id.clone(),
                new_unit_price: relationship
                    .unit_price
                    .scale(1.0 - economy::EXCLUSIVE_CONTRACT_DISCOUNT),
            },
        ),
    ])
}

pub fn cancel_vendor_contract(
    state: &AgentState,
    cmd: &Command,
    ctx: &mut CommandContext,
) -> Result<Vec<EventDraft>, CommandError> {
    let CommandPayload::CancelVendorContract {
        location_id,
        vendor_id,
    } = &cmd.payload
    else {
        return Err(CommandError::invalid(
            "payload does not match CANCEL_VENDOR_CONTRACT",
        ));
    };

    let location = state.location(location_id)?;
    let relationship = location
        .vendors
        .get(vendor_id)
        .ok_or_else(|| CommandError::VendorNotFound(vendor_id.to_string()))?;

    if !relationship.has_active_exclusive(ctx.week()) {
        return Err(CommandError::ContractViolation(format!(
            "no active exclusive contract with {vendor_id}"
        )));
    }
    let penalty = economy::CONTRACT_CANCELLATION_PENALTY;
    state.ensure_affordable(penalty)?;

    Ok(vec![
        own(
            cmd,
            EventPayload::VendorContractCancelled {
                location_id: location_id.clone(),
                vendor_id: vendor_id.clone(),
                penalty,
            },
        ),
        own(
            cmd,
            EventPayload::FundsTransferred {
                kind: TransferKind::Penalty,
                amount: penalty,
                memo: format!("early cancellation with {vendor_id}"),
            },
        ),
        own(
            cmd,
            EventPayload::VendorTermsUpdated {
                location_id: location_id.clone(),
                vendor_id: vendor_id.clone(),
                new_unit_price: relationship
                    .unit_price
                    .scale(1.0 / (1.0 - economy::EXCLUSIVE_CONTRACT_DISCOUNT)),
            },
        ),
    ])
}
