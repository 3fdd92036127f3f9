//! Social, ethics and regulatory-facing handlers.

use spincycle_core::{CommandError, Money};
use spincycle_domain::economy;
use spincycle_domain::{AgentState, FineStatus, RegulatoryStatus};
use spincycle_events::{
    Command, CommandPayload, EthicalChoice, EventDraft, EventPayload, TransferKind,
};

use crate::context::CommandContext;

use super::own;

pub fn initiate_charity(
    state: &AgentState,
    cmd: &Command,
    _ctx: &mut CommandContext,
) -> Result<Vec<EventDraft>, CommandError> {
    let CommandPayload::InitiateCharity { cause, amount } = &cmd.payload else {
        return Err(CommandError::invalid(
            "payload does not match INITIATE_CHARITY",
        ));
    };

    let amount = Money::from_dollars(*amount);
    if amount <= Money::ZERO {
        return Err(CommandError::invalid("donation must be positive"));
    }
    state.ensure_affordable(amount)?;

    Ok(vec![
        own(
            cmd,
            EventPayload::CharityInitiated {
                cause: cause.clone(),
                amount,
            },
        ),
        own(
            cmd,
            EventPayload::FundsTransferred {
                kind: TransferKind::Expense,
                amount,
                memo: format!("donation to {cause}"),
            },
        ),
        own(
            cmd,
            EventPayload::SocialScoreAdjusted {
                delta: economy::CHARITY_SOCIAL_DELTA,
                reason: "charitable giving".into(),
            },
        ),
    ])
}

pub fn resolve_scandal(
    state: &AgentState,
    cmd: &Command,
    _ctx: &mut CommandContext,
) -> Result<Vec<EventDraft>, CommandError> {
    let CommandPayload::ResolveScandal { scandal_id } = &cmd.payload else {
        return Err(CommandError::invalid("payload does not match RESOLVE_SCANDAL"));
    };

    let marker = state
        .active_scandals
        .iter()
        .find(|s| s.id == *scandal_id)
        .ok_or_else(|| CommandError::invalid(format!("unknown scandal {scandal_id}")))?;

    let cost = economy::SCANDAL_RESOLUTION_COST_PER_SEVERITY.scale(marker.severity);
    state.ensure_affordable(cost)?;

    Ok(vec![
        own(
            cmd,
            EventPayload::ScandalResolved {
                scandal_id: scandal_id.clone(),
                cost,
            },
        ),
        own(
            cmd,
            EventPayload::FundsTransferred {
                kind: TransferKind::Expense,
                amount: cost,
                memo: format!("crisis PR for {scandal_id}"),
            },
        ),
        own(
            cmd,
            EventPayload::SocialScoreAdjusted {
                delta: economy::SCANDAL_RESOLUTION_SOCIAL_DELTA,
                reason: "scandal addressed publicly".into(),
            },
        ),
    ])
}

pub fn make_ethical_choice(
    state: &AgentState,
    cmd: &Command,
    _ctx: &mut CommandContext,
) -> Result<Vec<EventDraft>, CommandError> {
    let CommandPayload::MakeEthicalChoice { dilemma_id, choice } = &cmd.payload else {
        return Err(CommandError::invalid(
            "payload does not match MAKE_ETHICAL_CHOICE",
        ));
    };

    if !state.active_dilemmas.contains_key(dilemma_id) {
        return Err(CommandError::invalid(format!("no active dilemma {dilemma_id}")));
    }

    let mut drafts = vec![own(
        cmd,
        EventPayload::EthicalChoiceMade {
            dilemma_id: dilemma_id.clone(),
            choice: *choice,
        },
    )];
    match choice {
        EthicalChoice::Principled => {
            state.ensure_affordable(economy::PRINCIPLED_CHOICE_COST)?;
            drafts.push(own(
                cmd,
                EventPayload::FundsTransferred {
                    kind: TransferKind::Expense,
                    amount: economy::PRINCIPLED_CHOICE_COST,
                    memo: format!("doing right by {dilemma_id}"),
                },
            ));
            drafts.push(own(
                cmd,
                EventPayload::SocialScoreAdjusted {
                    delta: economy::PRINCIPLED_CHOICE_SOCIAL_DELTA,
                    reason: "principled choice".into(),
                },
            ));
        }
        EthicalChoice::Expedient => {
            drafts.push(own(
                cmd,
                EventPayload::FundsTransferred {
                    kind: TransferKind::Revenue,
                    amount: economy::EXPEDIENT_CHOICE_GAIN,
                    memo: format!("shortcut taken on {dilemma_id}"),
                },
            ));
            drafts.push(own(
                cmd,
                EventPayload::SocialScoreAdjusted {
                    delta: economy::EXPEDIENT_CHOICE_SOCIAL_DELTA,
                    reason: "expedient choice".into(),
                },
            ));
        }
    }
    Ok(drafts)
}

pub fn file_regulatory_report(
    state: &AgentState,
    cmd: &Command,
    _ctx: &mut CommandContext,
) -> Result<Vec<EventDraft>, CommandError> {
    let CommandPayload::FileRegulatoryReport = &cmd.payload else {
        return Err(CommandError::invalid(
            "payload does not match FILE_REGULATORY_REPORT",
        ));
    };

    state.ensure_affordable(economy::REGULATORY_REPORT_FEE)?;

    let mut drafts = vec![
        own(
            cmd,
            EventPayload::RegulatoryReportFiled {
                filing_fee: economy::REGULATORY_REPORT_FEE,
            },
        ),
        own(
            cmd,
            EventPayload::FundsTransferred {
                kind: TransferKind::Expense,
                amount: economy::REGULATORY_REPORT_FEE,
                memo: "compliance report filing".into(),
            },
        ),
        own(
            cmd,
            EventPayload::SocialScoreAdjusted {
                delta: economy::REGULATORY_REPORT_SOCIAL_DELTA,
                reason: "voluntary compliance report".into(),
            },
        ),
    ];
    // A clean filing lifts a standing warning.
    if state.regulatory_status == RegulatoryStatus::Warning {
        drafts.push(own(
            cmd,
            EventPayload::RegulatoryStatusUpdated {
                status: RegulatoryStatus::Normal,
            },
        ));
    }
    Ok(drafts)
}

pub fn file_appeal(
    state: &AgentState,
    cmd: &Command,
    _ctx: &mut CommandContext,
) -> Result<Vec<EventDraft>, CommandError> {
    let CommandPayload::FileAppeal { fine_id } = &cmd.payload else {
        return Err(CommandError::invalid("payload does not match FILE_APPEAL"));
    };

    let fine = state
        .pending_fines
        .iter()
        .find(|f| f.id == *fine_id)
        .ok_or_else(|| CommandError::invalid(format!("unknown fine {fine_id}")))?;
    if fine.status != FineStatus::Open {
        return Err(CommandError::invalid(format!("fine {fine_id} is not open")));
    }
    state.ensure_affordable(economy::APPEAL_FILING_FEE)?;

    Ok(vec![
        own(
            cmd,
            EventPayload::FineAppealed {
                fine_id: fine_id.clone(),
                filing_fee: economy::APPEAL_FILING_FEE,
            },
        ),
        own(
            cmd,
            EventPayload::FundsTransferred {
                kind: TransferKind::Expense,
                amount: economy::APPEAL_FILING_FEE,
                memo: format!("appeal of {fine_id}"),
            },
        ),
    ])
}
