//! Vendor relationships and the deterministic negotiation table.

use serde::{Deserialize, Serialize};
use spincycle_core::{Money, VendorId};

/// How many payment outcomes the relationship remembers.
pub const PAYMENT_HISTORY_TAIL: usize = 12;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegotiationOutcome {
    Accepted,
    Countered,
    Rejected,
}

/// Standing between one location and one supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorRelationship {
    pub id: VendorId,
    pub tier: u8,
    /// Week the current tier was reached; weeks-at-tier is derived.
    pub tier_since_week: u32,
    /// Bounded tail of payment outcomes, newest last. `true` = paid on time.
    #[serde(default)]
    pub payment_history: Vec<bool>,
    /// Week the exclusive window ends, if one is signed.
    #[serde(default)]
    pub exclusive_until_week: Option<u32>,
    pub unit_price: Money,
    #[serde(default)]
    pub disrupted: bool,
    /// Absolute day the current disruption ends, when one is active.
    #[serde(default)]
    pub disrupted_until_day: Option<u64>,
}

impl VendorRelationship {
    pub fn new(id: VendorId, unit_price: Money, week: u32) -> Self {
        Self {
            id,
            tier: 1,
            tier_since_week: week,
            payment_history: Vec::new(),
            exclusive_until_week: None,
            unit_price,
            disrupted: false,
            disrupted_until_day: None,
        }
    }

    pub fn weeks_at_tier(&self, current_week: u32) -> u32 {
        current_week.saturating_sub(self.tier_since_week)
    }

    pub fn record_payment(&mut self, on_time: bool) {
        self.payment_history.push(on_time);
        if self.payment_history.len() > PAYMENT_HISTORY_TAIL {
            let excess = self.payment_history.len() - PAYMENT_HISTORY_TAIL;
            self.payment_history.drain(..excess);
        }
    }

    /// Fraction of remembered payments made on time; neutral 0.5 when
    /// there is no history yet.
    pub fn payment_score(&self) -> f64 {
        if self.payment_history.is_empty() {
            return 0.5;
        }
        let on_time = self.payment_history.iter().filter(|p| **p).count();
        on_time as f64 / self.payment_history.len() as f64
    }

    pub fn has_active_exclusive(&self, current_week: u32) -> bool {
        self.exclusive_until_week
            .is_some_and(|until| current_week < until)
    }

    /// Discount the relationship has earned so far. Tier, loyalty and
    /// payment record each contribute; the cap keeps late-game vendors
    /// from giving goods away.
    pub fn earned_discount(&self, current_week: u32) -> f64 {
        let loyalty = self.weeks_at_tier(current_week).min(10) as f64;
        let earned = 0.05 * f64::from(self.tier) + 0.01 * loyalty + 0.10 * self.payment_score();
        earned.min(0.40)
    }

    /// Deterministic negotiation: the requested discount is granted when
    /// within the earned allowance, countered at the allowance when the
    /// ask is less than twice it, and rejected beyond that.
    pub fn evaluate_discount_request(
        &self,
        current_week: u32,
        requested: f64,
    ) -> (NegotiationOutcome, f64) {
        let allowance = self.earned_discount(current_week);
        if requested <= allowance {
            (NegotiationOutcome::Accepted, requested)
        } else if requested <= allowance * 2.0 {
            (NegotiationOutcome::Countered, allowance)
        } else {
            (NegotiationOutcome::Rejected, 0.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relationship() -> VendorRelationship {
        VendorRelationship::new(VendorId::new("V1"), Money::from_cents(250), 0)
    }

    #[test]
    fn payment_history_is_bounded() {
        let mut rel = relationship();
        for i in 0..20 {
            rel.record_payment(i % 2 == 0);
        }
        assert_eq!(rel.payment_history.len(), PAYMENT_HISTORY_TAIL);
    }

    #[test]
    fn empty_history_scores_neutral() {
        assert_eq!(relationship().payment_score(), 0.5);
    }

    #[test]
    fn modest_request_is_accepted_verbatim() {
        let mut rel = relationship();
        rel.tier = 3;
        let (outcome, granted) = rel.evaluate_discount_request(5, 0.10);
        assert_eq!(outcome, NegotiationOutcome::Accepted);
        assert_eq!(granted, 0.10);
    }

    #[test]
    fn greedy_request_is_countered_at_allowance() {
        let rel = relationship();
        let allowance = rel.earned_discount(0);
        let (outcome, granted) = rel.evaluate_discount_request(0, allowance * 1.5);
        assert_eq!(outcome, NegotiationOutcome::Countered);
        assert_eq!(granted, allowance);
    }

    #[test]
    fn outrageous_request_is_rejected() {
        let rel = relationship();
        let (outcome, granted) = rel.evaluate_discount_request(0, 0.5);
        assert_eq!(outcome, NegotiationOutcome::Rejected);
        assert_eq!(granted, 0.0);
    }

    #[test]
    fn exclusive_window_expires() {
        let mut rel = relationship();
        rel.exclusive_until_week = Some(8);
        assert!(rel.has_active_exclusive(7));
        assert!(!rel.has_active_exclusive(8));
    }
}
