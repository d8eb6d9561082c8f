//! Recurring-transaction domain types and frequency arithmetic.

use chrono::{Days, Months, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use saldo_shared::types::{CategoryId, RecurringTransactionId, WalletId};
use serde::{Deserialize, Serialize};

use crate::wallet::TransactionType;

/// End-date sentinel for recurrences created without an explicit end.
#[must_use]
pub fn default_end_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2100, 12, 31).unwrap_or(NaiveDate::MAX)
}

/// Time-of-day stamped onto generated occurrences.
///
/// Occurrences land at the end of their due day so same-day catch-up sorts
/// after transactions entered by hand.
#[must_use]
pub fn occurrence_time() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN)
}

/// How often a recurring transaction fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Every day.
    Daily,
    /// Every 7 days.
    Weekly,
    /// Every calendar month, same day-of-month (clamped at month end).
    Monthly,
    /// Every calendar year.
    Yearly,
}

impl Frequency {
    /// The given date advanced by exactly one period.
    ///
    /// Month and year stepping clamp the day-of-month the way the calendar
    /// requires (Jan 31 -> Feb 28, Feb 29 -> Feb 28 on non-leap years).
    /// Saturates at the end of the representable date range.
    #[must_use]
    pub fn advance(self, date: NaiveDate) -> NaiveDate {
        let next = match self {
            Self::Daily => date.checked_add_days(Days::new(1)),
            Self::Weekly => date.checked_add_days(Days::new(7)),
            Self::Monthly => date.checked_add_months(Months::new(1)),
            Self::Yearly => date.checked_add_months(Months::new(12)),
        };
        next.unwrap_or(NaiveDate::MAX)
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Daily => write!(f, "day"),
            Self::Weekly => write!(f, "week"),
            Self::Monthly => write!(f, "month"),
            Self::Yearly => write!(f, "year"),
        }
    }
}

/// Lifecycle status of a recurring transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceStatus {
    /// Still generating occurrences.
    Active,
    /// Stopped, either explicitly or by passing its end date. Terminal.
    Inactive,
}

/// A recurring income or expense template.
///
/// `next_due_date` never regresses; each processed occurrence advances it by
/// exactly one frequency period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringTransaction {
    /// Unique identifier.
    pub id: RecurringTransactionId,
    /// The wallet occurrences are recorded against.
    pub wallet_id: WalletId,
    /// The category occurrences are filed under.
    pub category_id: CategoryId,
    /// Income or expense.
    pub kind: TransactionType,
    /// Amount of each occurrence, always positive.
    pub amount: Decimal,
    /// First due date.
    pub start_date: NaiveDate,
    /// Last date an occurrence may fall on (inclusive).
    pub end_date: NaiveDate,
    /// Due date of the next occurrence to generate.
    pub next_due_date: NaiveDate,
    /// Generation frequency.
    pub frequency: Frequency,
    /// Lifecycle status.
    pub status: RecurrenceStatus,
    /// Description copied onto every occurrence.
    pub description: String,
}

/// An unpersisted view of a future occurrence.
///
/// Produced by the pure projections; never written to storage and carries
/// no id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingTransaction {
    /// The wallet the occurrence would be recorded against.
    pub wallet_id: WalletId,
    /// The category the occurrence would be filed under.
    pub category_id: CategoryId,
    /// Income or expense.
    pub kind: TransactionType,
    /// When the occurrence would fall due.
    pub date: NaiveDateTime,
    /// The occurrence amount.
    pub amount: Decimal,
    /// Description copied from the template.
    pub description: String,
}
