//! Cash, loan and tax reducers.

use spincycle_core::{FoldError, Money};
use spincycle_domain::{AgentState, Loan};
use spincycle_events::{kinds, EventPayload, GameEvent};

use crate::registry::ReducerRegistry;

use super::{clamp_score, mismatch};

pub fn register(reg: &mut ReducerRegistry) {
    reg.register(
        kinds::FUNDS_TRANSFERRED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::FundsTransferred { kind, amount, .. } = &event.payload else {
                return Err(mismatch(event.kind()));
            };
            // Validation already happened in the producing handler; a
            // negative balance here is drawn credit, not an error.
            if kind.credits() {
                state.cash += *amount;
            } else {
                state.cash -= *amount;
            }
            Ok(state)
        },
    );

    reg.register(
        kinds::LOAN_TAKEN,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::LoanTaken {
                loan_id,
                kind,
                principal,
                annual_rate,
                term_weeks,
                rating_delta,
            } = &event.payload
            else {
                return Err(mismatch(event.kind()));
            };
            state.loans.insert(
                loan_id.clone(),
                Loan {
                    id: loan_id.clone(),
                    kind: *kind,
                    principal: *principal,
                    outstanding: *principal,
                    annual_rate: *annual_rate,
                    term_weeks: *term_weeks,
                    taken_week: event.week,
                },
            );
            state.credit_rating = clamp_score(state.credit_rating + rating_delta);
            Ok(state)
        },
    );

    reg.register(
        kinds::DEBT_PAYMENT_PROCESSED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::DebtPaymentProcessed {
                loan_id,
                remaining,
                rating_delta,
                ..
            } = &event.payload
            else {
                return Err(mismatch(event.kind()));
            };
            if *remaining <= Money::ZERO {
                state.loans.remove(loan_id);
            } else if let Some(loan) = state.loans.get_mut(loan_id) {
                loan.outstanding = *remaining;
            }
            state.credit_rating = clamp_score(state.credit_rating + rating_delta);
            Ok(state)
        },
    );

    reg.register(
        kinds::INTEREST_ACCRUED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::InterestAccrued { loan_id, amount } = &event.payload else {
                return Err(mismatch(event.kind()));
            };
            if let Some(loan) = state.loans.get_mut(loan_id) {
                loan.outstanding += *amount;
            }
            Ok(state)
        },
    );

    reg.register(
        kinds::TAX_LIABILITY_CALCULATED,
        |mut state: AgentState, event: &GameEvent| -> Result<AgentState, FoldError> {
            let EventPayload::TaxLiabilityCalculated { amount, .. } = &event.payload else {
                return Err(mismatch(event.kind()));
            };
            state.tax_liability += *amount;
            state.revenue_since_audit = Money::ZERO;
            state.cogs_since_audit = Money::ZERO;
            state.last_audit_week = Some(event.week);
            Ok(state)
        },
    );
}
