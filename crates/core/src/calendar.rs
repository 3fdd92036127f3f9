//! Business calendar: weeks of seven days, months of four weeks.

use serde::{Deserialize, Serialize};

pub const DAYS_PER_WEEK: u8 = 7;
pub const WEEKS_PER_MONTH: u32 = 4;

/// Position in simulation time. Day runs 0..7 within the week.
#[derive(
    Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Calendar {
    pub week: u32,
    pub day: u8,
}

impl Calendar {
    pub const fn new(week: u32, day: u8) -> Self {
        Self { week, day }
    }

    /// Advance by one day, rolling into the next week at day 7.
    pub fn next_day(self) -> Calendar {
        let day = self.day + 1;
        if day >= DAYS_PER_WEEK {
            Calendar {
                week: self.week + 1,
                day: 0,
            }
        } else {
            Calendar {
                week: self.week,
                day,
            }
        }
    }

    /// True when this position sits on a week boundary (the advance that
    /// produced it rolled the week).
    pub const fn is_week_boundary(self) -> bool {
        self.day == 0 && self.week > 0
    }

    /// True when this position opens a month: a week boundary whose week
    /// number is a whole number of months.
    pub const fn is_month_boundary(self) -> bool {
        self.is_week_boundary() && self.week % WEEKS_PER_MONTH == 0
    }

    /// Total days elapsed since week 0, day 0.
    pub const fn absolute_day(self) -> u64 {
        self.week as u64 * DAYS_PER_WEEK as u64 + self.day as u64
    }
}

impl core::fmt::Display for Calendar {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "w{}d{}", self.week, self.day)
    }
}
