//! Pricing, marketing and loyalty handlers.

use spincycle_core::{CommandError, Money};
use spincycle_domain::economy;
use spincycle_domain::AgentState;
use spincycle_events::{Command, CommandPayload, EventDraft, EventPayload, TransferKind};

use crate::context::CommandContext;

use super::own;

pub fn set_price(
    state: &AgentState,
    cmd: &Command,
    _ctx: &mut CommandContext,
) -> Result<Vec<EventDraft>, CommandError> {
    let CommandPayload::SetPrice {
        location_id,
        service,
        new_price,
    } = &cmd.payload
    else {
        return Err(CommandError::invalid("payload does not match SET_PRICE"));
    };

    state.location(location_id)?;
    let price = Money::from_dollars(*new_price);
    if price < economy::MIN_SERVICE_PRICE || price > economy::MAX_SERVICE_PRICE {
        return Err(CommandError::invalid(format!(
            "price {price} outside [{}, {}]",
            economy::MIN_SERVICE_PRICE,
            economy::MAX_SERVICE_PRICE
        )));
    }

    Ok(vec![own(
        cmd,
        EventPayload::PriceSet {
            location_id: location_id.clone(),
            service: *service,
            price,
        },
    )])
}

pub fn invest_in_marketing(
    state: &AgentState,
    cmd: &Command,
    ctx: &mut CommandContext,
) -> Result<Vec<EventDraft>, CommandError> {
    let CommandPayload::InvestInMarketing { location_id, spend } = &cmd.payload else {
        return Err(CommandError::invalid(
            "payload does not match INVEST_IN_MARKETING",
        ));
    };

    state.location(location_id)?;
    let spend = Money::from_dollars(*spend);
    if spend <= Money::ZERO {
        return Err(CommandError::invalid("marketing spend must be positive"));
    }
    state.ensure_affordable(spend)?;

    // Diminishing cap: every $1000 buys +0.1 demand, at most +0.5.
    let boost = (spend.as_dollars() / 10_000.0).min(0.5);

    Ok(vec![
        own(
            cmd,
            EventPayload::MarketingBoostApplied {
                location_id: location_id.clone(),
                spend,
                boost,
                until_week: ctx.week() + 4,
            },
        ),
        own(
            cmd,
            EventPayload::FundsTransferred {
                kind: TransferKind::Expense,
                amount: spend,
                memo: format!("marketing campaign at {location_id}"),
            },
        ),
    ])
}

pub fn subscribe_loyalty_program(
    state: &AgentState,
    cmd: &Command,
    _ctx: &mut CommandContext,
) -> Result<Vec<EventDraft>, CommandError> {
    let CommandPayload::SubscribeLoyaltyProgram = &cmd.payload else {
        return Err(CommandError::invalid(
            "payload does not match SUBSCRIBE_LOYALTY_PROGRAM",
        ));
    };

    if state.locations.is_empty() {
        return Err(CommandError::invalid("no locations to enroll"));
    }
    state.ensure_affordable(economy::LOYALTY_SETUP_COST)?;

    let members_added =
        economy::LOYALTY_MEMBERS_PER_LOCATION * state.locations.len() as u32;

    Ok(vec![
        own(
            cmd,
            EventPayload::LoyaltyProgramSubscribed {
                members_added,
                cost: economy::LOYALTY_SETUP_COST,
            },
        ),
        own(
            cmd,
            EventPayload::FundsTransferred {
                kind: TransferKind::Expense,
                amount: economy::LOYALTY_SETUP_COST,
                memo: "loyalty program setup".into(),
            },
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::{command_ctx, seeded_agent};
    use spincycle_core::LocationId;
    use spincycle_domain::ServiceKind;

    fn set_price_cmd(price: f64) -> Command {
        Command::new(
            spincycle_core::AgentId::new("A"),
            CommandPayload::SetPrice {
                location_id: LocationId::new("LOC_001"),
                service: ServiceKind::StandardWash,
                new_price: price,
            },
        )
    }

    #[test]
    fn minimum_price_is_accepted() {
        let state = seeded_agent();
        let cmd = set_price_cmd(0.01);
        let drafts = set_price(&state, &cmd, &mut command_ctx(&state)).unwrap();
        assert_eq!(drafts.len(), 1);
        match &drafts[0].payload {
            EventPayload::PriceSet { price, .. } => assert_eq!(*price, Money::from_cents(1)),
            other => panic!("unexpected draft: {other:?}"),
        }
    }

    #[test]
    fn out_of_range_price_is_rejected() {
        let state = seeded_agent();
        let cmd = set_price_cmd(250.0);
        let err = set_price(&state, &cmd, &mut command_ctx(&state)).unwrap_err();
        assert_eq!(err.kind(), "invalid_state");
    }

    #[test]
    fn unknown_location_is_rejected() {
        let state = seeded_agent();
        let cmd = Command::new(
            state.id.clone(),
            CommandPayload::SetPrice {
                location_id: LocationId::new("LOC_404"),
                service: ServiceKind::Dry,
                new_price: 2.0,
            },
        );
        let err = set_price(&state, &cmd, &mut command_ctx(&state)).unwrap_err();
        assert_eq!(err.kind(), "location_not_found");
    }

    #[test]
    fn marketing_spend_must_be_affordable() {
        let state = seeded_agent();
        let cmd = Command::new(
            state.id.clone(),
            CommandPayload::InvestInMarketing {
                location_id: LocationId::new("LOC_001"),
                spend: 1_000_000.0,
            },
        );
        let err = invest_in_marketing(&state, &cmd, &mut command_ctx(&state)).unwrap_err();
        assert_eq!(err.kind(), "insufficient_funds");
    }
}
