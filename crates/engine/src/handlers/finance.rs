//! Loan and debt handlers.

use spincycle_core::{CommandError, FineId, LoanId, Money};
use spincycle_domain::economy::{self, loan_product, PAYOFF_RATING_DELTA};
use spincycle_domain::{AgentState, LoanKind};
use spincycle_events::{Command, CommandPayload, EventDraft, EventPayload, TransferKind};

use crate::context::CommandContext;

use super::own;

pub fn take_loan(
    state: &AgentState,
    cmd: &Command,
    ctx: &mut CommandContext,
) -> Result<Vec<EventDraft>, CommandError> {
    let CommandPayload::TakeLoan { kind, amount, .. } = &cmd.payload else {
        return Err(CommandError::invalid("payload does not match TAKE_LOAN"));
    };

    let principal = Money::from_dollars(*amount);
    if principal <= Money::ZERO {
        return Err(CommandError::invalid("principal must be positive"));
    }

    let product = loan_product(*kind);
    if state.credit_rating < product.credit_floor {
        return Err(CommandError::CreditError {
            rating: state.credit_rating,
            floor: product.credit_floor,
        });
    }
    if *kind == LoanKind::LineOfCredit && principal > state.available_credit() {
        return Err(CommandError::invalid(format!(
            "draw {principal} exceeds available credit {}",
            state.available_credit()
        )));
    }

    let loan_id = LoanId::new(ctx.mint_id("LN"));
    Ok(vec![
        own(
            cmd,
            EventPayload::LoanTaken {
                loan_id: loan_id.clone(),
                kind: *kind,
                principal,
                annual_rate: product.annual_rate,
                term_weeks: product.term_weeks,
                rating_delta: product.rating_delta,
            },
        ),
        own(
            cmd,
            EventPayload::FundsTransferred {
                kind: TransferKind::Loan,
                amount: principal,
                memo: format!("loan disbursement {loan_id}"),
            },
        ),
    ])
}

pub fn make_debt_payment(
    state: &AgentState,
    cmd: &Command,
    _ctx: &mut CommandContext,
) -> Result<Vec<EventDraft>, CommandError> {
    let CommandPayload::MakeDebtPayment { debt_id, amount } = &cmd.payload else {
        return Err(CommandError::invalid(
            "payload does not match MAKE_DEBT_PAYMENT",
        ));
    };

    let amount = Money::from_dollars(*amount);
    if amount <= Money::ZERO {
        return Err(CommandError::invalid("payment must be positive"));
    }

    // The id names either a loan or a pending fine.
    if let Some(loan) = state.loans.get(&LoanId::new(debt_id.clone())) {
        if amount > state.cash {
            return Err(CommandError::InsufficientFunds {
                required: amount.to_string(),
                available: state.cash.to_string(),
            });
        }
        if amount > loan.outstanding {
            return Err(CommandError::invalid(format!(
                "payment {amount} exceeds outstanding {}",
                loan.outstanding
            )));
        }
        let remaining = loan.outstanding - amount;
        let rating_delta = if remaining <= Money::ZERO {
            PAYOFF_RATING_DELTA
        } else {
            0
        };
        return Ok(vec![
            own(
                cmd,
                EventPayload::DebtPaymentProcessed {
                    loan_id: loan.id.clone(),
                    amount,
                    remaining,
                    rating_delta,
                },
            ),
            own(
                cmd,
                EventPayload::FundsTransferred {
                    kind: TransferKind::Payment,
                    amount,
                    memo: format!("debt payment {}", loan.id),
                },
            ),
        ]);
    }

    let fine_id = FineId::new(debt_id.clone());
    if let Some(fine) = state.open_fine(&fine_id) {
        if amount != fine.amount {
            return Err(CommandError::invalid(format!(
                "fines settle in full: {} due",
                fine.amount
            )));
        }
        if amount > state.cash {
            return Err(CommandError::InsufficientFunds {
                required: amount.to_string(),
                available: state.cash.to_string(),
            });
        }
        return Ok(vec![
            own(
                cmd,
                EventPayload::FinePaid {
                    fine_id: fine.id.clone(),
                    amount,
                },
            ),
            own(
                cmd,
                EventPayload::FundsTransferred {
                    kind: TransferKind::Fine,
                    amount,
                    memo: format!("fine settlement {}", fine.id),
                },
            ),
        ]);
    }

    Err(CommandError::invalid(format!("unknown debt id {debt_id}")))
}
