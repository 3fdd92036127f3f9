//! Money as an integer count of cents.
//!
//! All balances, prices and transfers are stored in the smallest unit so
//! folds stay free of float drift. Command payloads carry dollars as f64;
//! conversion happens once, at the handler boundary.

use serde::{Deserialize, Serialize};

/// An amount of money in cents. May be negative (debt, drawn credit).
#[derive(
    Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Convert from dollars, rounding half away from zero to whole cents.
    pub fn from_dollars(dollars: f64) -> Self {
        Self((dollars * 100.0).round() as i64)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub fn as_dollars(self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Scale by a dimensionless factor, rounding to whole cents.
    pub fn scale(self, factor: f64) -> Self {
        Self((self.0 as f64 * factor).round() as i64)
    }

    pub fn min(self, other: Money) -> Money {
        Money(self.0.min(other.0))
    }

    pub fn max(self, other: Money) -> Money {
        Money(self.0.max(other.0))
    }
}

impl core::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl core::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl core::ops::Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl core::ops::SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl core::ops::Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl core::ops::Mul<i64> for Money {
    type Output = Money;

    fn mul(self, rhs: i64) -> Money {
        Money(self.0 * rhs)
    }
}

impl core::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        Money(iter.map(|m| m.0).sum())
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(f, "{sign}${}.{:02}", abs / 100, abs % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn dollars_round_trip_at_cent_precision() {
        assert_eq!(Money::from_dollars(3.75).cents(), 375);
        assert_eq!(Money::from_dollars(0.01).cents(), 1);
        assert_eq!(Money::from_dollars(100.0).cents(), 10_000);
    }

    #[test]
    fn display_formats_cents() {
        assert_eq!(Money::from_cents(375).to_string(), "$3.75");
        assert_eq!(Money::from_cents(-125).to_string(), "-$1.25");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
    }

    proptest! {
        #[test]
        fn addition_is_commutative(a in -1_000_000i64..1_000_000, b in -1_000_000i64..1_000_000) {
            prop_assert_eq!(
                Money::from_cents(a) + Money::from_cents(b),
                Money::from_cents(b) + Money::from_cents(a)
            );
        }

        #[test]
        fn scale_by_one_is_identity(cents in -1_000_000i64..1_000_000) {
            prop_assert_eq!(Money::from_cents(cents).scale(1.0), Money::from_cents(cents));
        }
    }
}
