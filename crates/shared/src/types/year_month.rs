//! Calendar-month value for invoice schedules and projection windows.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A calendar month (year + month), ordered chronologically.
///
/// Invoice schedules are keyed by month, not by date: an installment
/// belongs to "March 2026" and only derives a concrete due date once
/// combined with a card's billing due day.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a year-month; returns `None` when the month is out of
    /// [1, 12] or the year is outside chrono's representable range.
    #[must_use]
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    /// The month containing the given date.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The year.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// The month number, 1-based.
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// This month advanced by `months` calendar months.
    ///
    /// Saturates at the edge of chrono's date range rather than wrapping.
    #[must_use]
    pub fn plus_months(self, months: u32) -> Self {
        let zero_based = i64::from(self.year) * 12 + i64::from(self.month) - 1 + i64::from(months);
        let year = i32::try_from(zero_based.div_euclid(12)).unwrap_or(i32::MAX);
        let month = u32::try_from(zero_based.rem_euclid(12) + 1).unwrap_or(12);
        Self::new(year, month).unwrap_or(Self {
            year: NaiveDate::MAX.year(),
            month: 12,
        })
    }

    /// The given day of this month, clamped to the month's last day.
    ///
    /// Clamping only matters for days 29-31; billing due days are capped at
    /// 28 so invoice dates are never clamped in practice.
    #[must_use]
    pub fn day(self, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, day).unwrap_or_else(|| self.last_day())
    }

    /// The first day of this month.
    #[must_use]
    pub fn first_day(self) -> NaiveDate {
        // `new` verified (year, month, 1) is representable.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// The last day of this month.
    #[must_use]
    pub fn last_day(self) -> NaiveDate {
        self.plus_months(1)
            .first_day()
            .pred_opt()
            .unwrap_or(NaiveDate::MAX)
    }

    /// Returns true if the given date falls within this month.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
