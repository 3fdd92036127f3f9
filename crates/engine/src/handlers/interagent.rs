//! Inter-agent handlers.
//!
//! Each of these emits a correlated pair: one event on the issuer's
//! stream and a mirror on the counterpart's, sharing the context's
//! correlation id. Ordering holds within each stream; callers needing
//! cross-stream atomicity must coordinate outside the core.

use spincycle_core::{AllianceId, CommandError, Money};
use spincycle_domain::AgentState;
use spincycle_events::{Command, CommandPayload, EventDraft, EventPayload, TransferKind};

use crate::context::CommandContext;

use super::own;

pub fn enter_alliance(
    state: &AgentState,
    cmd: &Command,
    ctx: &mut CommandContext,
) -> Result<Vec<EventDraft>, CommandError> {
    let CommandPayload::EnterAlliance { partner, kind } = &cmd.payload else {
        return Err(CommandError::invalid("payload does not match ENTER_ALLIANCE"));
    };

    if *partner == cmd.agent_id {
        return Err(CommandError::invalid("cannot ally with yourself"));
    }
    if state.alliances.iter().any(|a| a.partner == *partner) {
        return Err(CommandError::invalid(format!("already allied with {partner}")));
    }

    let alliance_id = AllianceId::new(ctx.mint_id("ALL"));
    Ok(vec![
        own(
            cmd,
            EventPayload::AllianceFormed {
                alliance_id: alliance_id.clone(),
                partner: partner.clone(),
                kind: *kind,
            },
        ),
        EventDraft::new(
            partner.clone(),
            EventPayload::AllianceFormed {
                alliance_id,
                partner: cmd.agent_id.clone(),
                kind: *kind,
            },
        ),
    ])
}

pub fn propose_buyout(
    state: &AgentState,
    cmd: &Command,
    ctx: &mut CommandContext,
) -> Result<Vec<EventDraft>, CommandError> {
    let CommandPayload::ProposeBuyout { target, offer } = &cmd.payload else {
        return Err(CommandError::invalid("payload does not match PROPOSE_BUYOUT"));
    };

    if *target == cmd.agent_id {
        return Err(CommandError::invalid("cannot buy yourself out"));
    }
    let offer = Money::from_dollars(*offer);
    if offer <= Money::ZERO {
        return Err(CommandError::invalid("offer must be positive"));
    }
    state.ensure_affordable(offer)?;

    let correlation_id = ctx.correlation_id();
    Ok(vec![
        own(
            cmd,
            EventPayload::BuyoutProposed {
                correlation_id: correlation_id.clone(),
                target: target.clone(),
                offer,
            },
        ),
        EventDraft::new(
            target.clone(),
            EventPayload::BuyoutOfferReceived {
                correlation_id,
                from: cmd.agent_id.clone(),
                offer,
            },
        ),
    ])
}

pub fn accept_buyout_offer(
    state: &AgentState,
    cmd: &Command,
    _ctx: &mut CommandContext,
) -> Result<Vec<EventDraft>, CommandError> {
    let CommandPayload::AcceptBuyoutOffer { correlation_id } = &cmd.payload else {
        return Err(CommandError::invalid(
            "payload does not match ACCEPT_BUYOUT_OFFER",
        ));
    };

    let offer = state
        .pending_buyout_offers
        .get(correlation_id)
        .ok_or_else(|| CommandError::invalid(format!("no pending offer {correlation_id}")))?;

    let mut drafts = vec![
        own(
            cmd,
            EventPayload::BuyoutAccepted {
                correlation_id: correlation_id.clone(),
                buyer: offer.from.clone(),
                price: offer.offer,
            },
        ),
        own(
            cmd,
            EventPayload::FundsTransferred {
                kind: TransferKind::Revenue,
                amount: offer.offer,
                memo: format!("buyout proceeds from {}", offer.from),
            },
        ),
    ];
    // Selling the business closes every floor and retires the agent.
    for location_id in state.locations.keys() {
        drafts.push(own(
            cmd,
            EventPayload::LocationClosed {
                location_id: location_id.clone(),
            },
        ));
    }
    drafts.push(own(
        cmd,
        EventPayload::AgentRetired {
            reason: format!("acquired by {}", offer.from),
        },
    ));
    drafts.push(EventDraft::new(
        offer.from.clone(),
        EventPayload::BuyoutConcluded {
            correlation_id: correlation_id.clone(),
            seller: cmd.agent_id.clone(),
            price: offer.offer,
        },
    ));
    drafts.push(EventDraft::new(
        offer.from.clone(),
        EventPayload::FundsTransferred {
            kind: TransferKind::Expense,
            amount: offer.offer,
            memo: format!("buyout of {}", cmd.agent_id),
        },
    ));
    Ok(drafts)
}

pub fn communicate_to_agent(
    _state: &AgentState,
    cmd: &Command,
    ctx: &mut CommandContext,
) -> Result<Vec<EventDraft>, CommandError> {
    let CommandPayload::CommunicateToAgent { to, message } = &cmd.payload else {
        return Err(CommandError::invalid(
            "payload does not match COMMUNICATE_TO_AGENT",
        ));
    };

    if *to == cmd.agent_id {
        return Err(CommandError::invalid("cannot message yourself"));
    }
    if message.trim().is_empty() {
        return Err(CommandError::invalid("message cannot be empty"));
    }

    let correlation_id = ctx.correlation_id();
    Ok(vec![
        own(
            cmd,
            EventPayload::AgentMessageSent {
                correlation_id: correlation_id.clone(),
                to: to.clone(),
                body: message.clone(),
            },
        ),
        EventDraft::new(
            to.clone(),
            EventPayload::AgentMessageReceived {
                correlation_id,
                from: cmd.agent_id.clone(),
                body: message.clone(),
            },
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::{command_ctx, seeded_agent};
    use spincycle_core::{AgentId, CorrelationId};
    use spincycle_domain::{AllianceKind, BuyoutOffer};

    #[test]
    fn communication_mirrors_with_one_correlation_id() {
        let state = seeded_agent();
        let cmd = Command::new(
            state.id.clone(),
            CommandPayload::CommunicateToAgent {
                to: AgentId::new("B"),
                message: "shall we coordinate?".into(),
            },
        );
        let drafts = communicate_to_agent(&state, &cmd, &mut command_ctx(&state)).unwrap();
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].stream, AgentId::new("A"));
        assert_eq!(drafts[1].stream, AgentId::new("B"));

        let (sent_corr, received_corr) = match (&drafts[0].payload, &drafts[1].payload) {
            (
                EventPayload::AgentMessageSent { correlation_id: a, .. },
                EventPayload::AgentMessageReceived { correlation_id: b, .. },
            ) => (a.clone(), b.clone()),
            other => panic!("unexpected drafts: {other:?}"),
        };
        assert_eq!(sent_corr, received_corr);
    }

    #[test]
    fn accepting_a_buyout_retires_the_seller() {
        let mut state = seeded_agent();
        let corr = CorrelationId::new("corr-1");
        state.pending_buyout_offers.insert(
            corr.clone(),
            BuyoutOffer {
                from: AgentId::new("B"),
                offer: Money::from_cents(80_000_00),
                received_week: 0,
            },
        );
        let cmd = Command::new(
            state.id.clone(),
            CommandPayload::AcceptBuyoutOffer {
                correlation_id: corr,
            },
        );
        let drafts = accept_buyout_offer(&state, &cmd, &mut command_ctx(&state)).unwrap();
        assert!(drafts
            .iter()
            .any(|d| matches!(d.payload, EventPayload::AgentRetired { .. })));
        assert!(drafts
            .iter()
            .any(|d| d.stream == AgentId::new("B")
                && matches!(d.payload, EventPayload::BuyoutConcluded { .. })));
    }

    #[test]
    fn duplicate_alliance_is_rejected() {
        let mut state = seeded_agent();
        state.alliances.push(spincycle_domain::Alliance {
            id: spincycle_core::AllianceId::new("ALL-1"),
            partner: AgentId::new("B"),
            kind: AllianceKind::Informal,
            start_week: 0,
        });
        let cmd = Command::new(
            state.id.clone(),
            CommandPayload::EnterAlliance {
                partner: AgentId::new("B"),
                kind: AllianceKind::Formal,
            },
        );
        assert!(enter_alliance(&state, &cmd, &mut command_ctx(&state)).is_err());
    }
}
