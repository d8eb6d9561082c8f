//! Recurring-transaction scheduler.
//!
//! Generates the pending ledger transactions a recurrence owes ("catch-up"),
//! walks templates through their active/inactive lifecycle, and projects
//! future occurrences without touching storage.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use saldo_shared::types::money::round_cents;
use saldo_shared::types::{CategoryId, RecurringTransactionId, WalletId, YearMonth};
use saldo_shared::Clock;
use tracing::{info, warn};

use super::error::RecurringError;
use super::types::{
    default_end_date, occurrence_time, Frequency, RecurrenceStatus, RecurringTransaction,
    UpcomingTransaction,
};
use crate::storage::Storage;
use crate::wallet::error::WalletError;
use crate::wallet::service::WalletLedger;
use crate::wallet::types::{TransactionStatus, TransactionType};

/// Recurring-transaction scheduler service.
pub struct RecurringScheduler;

impl RecurringScheduler {
    /// Creates a recurring transaction starting (and first due) at
    /// `start_date`.
    ///
    /// `end_date` defaults to the far-future sentinel when not given. The
    /// window must be at least one frequency period long, and new
    /// recurrences cannot start in the past.
    #[allow(clippy::too_many_arguments)]
    pub fn add_recurring_transaction<S: Storage, C: Clock>(
        store: &mut S,
        clock: &C,
        wallet_id: WalletId,
        category_id: CategoryId,
        kind: TransactionType,
        amount: Decimal,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        description: &str,
        frequency: Frequency,
    ) -> Result<RecurringTransactionId, RecurringError> {
        if store.wallet(wallet_id).is_none() {
            return Err(RecurringError::WalletNotFound(wallet_id));
        }
        if amount <= Decimal::ZERO {
            return Err(RecurringError::NonPositiveAmount);
        }

        let end_date = end_date.unwrap_or_else(default_end_date);
        if start_date < clock.today() {
            return Err(RecurringError::StartDateInPast);
        }
        Self::validate_window(start_date, end_date, frequency)?;

        let recurring = RecurringTransaction {
            id: RecurringTransactionId::new(),
            wallet_id,
            category_id,
            kind,
            amount: round_cents(amount),
            start_date,
            end_date,
            next_due_date: start_date,
            frequency,
            status: RecurrenceStatus::Active,
            description: description.to_string(),
        };
        let id = recurring.id;
        store.save_recurring_transaction(recurring);

        info!(recurring = %id, wallet = %wallet_id, ?frequency, "recurring transaction created");
        Ok(id)
    }

    /// Applies an edited recurring transaction.
    ///
    /// The window is re-validated against the stored start date; editing
    /// cannot move a recurrence's start.
    pub fn update_recurring_transaction<S: Storage>(
        store: &mut S,
        updated: RecurringTransaction,
    ) -> Result<(), RecurringError> {
        let existing = store
            .recurring_transaction(updated.id)
            .ok_or(RecurringError::RecurringTransactionNotFound(updated.id))?;
        if store.wallet(updated.wallet_id).is_none() {
            return Err(RecurringError::WalletNotFound(updated.wallet_id));
        }
        if updated.amount <= Decimal::ZERO {
            return Err(RecurringError::NonPositiveAmount);
        }
        Self::validate_window(existing.start_date, updated.end_date, updated.frequency)?;

        let id = updated.id;
        let merged = RecurringTransaction {
            start_date: existing.start_date,
            amount: round_cents(updated.amount),
            ..updated
        };
        store.save_recurring_transaction(merged);

        info!(recurring = %id, "recurring transaction updated");
        Ok(())
    }

    /// Stops an active recurring transaction.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyStopped` when the recurrence is already inactive.
    pub fn stop_recurring_transaction<S: Storage>(
        store: &mut S,
        id: RecurringTransactionId,
    ) -> Result<(), RecurringError> {
        let mut recurring = store
            .recurring_transaction(id)
            .ok_or(RecurringError::RecurringTransactionNotFound(id))?;
        if recurring.status == RecurrenceStatus::Inactive {
            return Err(RecurringError::AlreadyStopped(id));
        }

        recurring.status = RecurrenceStatus::Inactive;
        store.save_recurring_transaction(recurring);

        info!(recurring = %id, "recurring transaction stopped");
        Ok(())
    }

    /// Deletes a recurring transaction outright; no further catch-up runs
    /// for it.
    pub fn delete_recurring_transaction<S: Storage>(
        store: &mut S,
        id: RecurringTransactionId,
    ) -> Result<(), RecurringError> {
        if store.recurring_transaction(id).is_none() {
            return Err(RecurringError::RecurringTransactionNotFound(id));
        }
        store.delete_recurring_transaction(id);

        info!(recurring = %id, "recurring transaction deleted");
        Ok(())
    }

    /// Catch-up batch job.
    ///
    /// For every active recurrence, generates one pending ledger
    /// transaction per missed due date (due "today" included), advancing
    /// `next_due_date` one period per occurrence. A recurrence whose
    /// advanced due date passes its end date goes inactive immediately,
    /// even mid-batch. Each entity is saved at most once per run.
    ///
    /// Returns the number of transactions generated.
    pub fn process_recurring_transactions<S: Storage, C: Clock>(
        store: &mut S,
        clock: &C,
    ) -> usize {
        let today = clock.today();
        let mut generated_total = 0;

        for mut recurring in store.recurring_by_status(RecurrenceStatus::Active) {
            let mut changed = false;

            while recurring.status == RecurrenceStatus::Active && recurring.next_due_date <= today
            {
                if recurring.next_due_date > recurring.end_date {
                    // Stale row past its end date: retire without generating.
                    recurring.status = RecurrenceStatus::Inactive;
                    changed = true;
                    break;
                }

                match Self::materialize(store, &recurring) {
                    Ok(()) => generated_total += 1,
                    Err(err) => {
                        warn!(
                            recurring = %recurring.id,
                            error = %err,
                            "failed to generate occurrence, skipping"
                        );
                    }
                }

                recurring.next_due_date = recurring.frequency.advance(recurring.next_due_date);
                changed = true;
                if recurring.next_due_date > recurring.end_date {
                    recurring.status = RecurrenceStatus::Inactive;
                    break;
                }
            }

            if changed {
                store.save_recurring_transaction(recurring);
            }
        }

        generated_total
    }

    /// Projects upcoming occurrences with dates inside the given month
    /// window (inclusive on both ends).
    ///
    /// Pure: nothing is persisted and no template advances.
    pub fn upcoming_by_month<S: Storage>(
        store: &S,
        from: YearMonth,
        to: YearMonth,
    ) -> Vec<UpcomingTransaction> {
        Self::upcoming_between(store, from.first_day(), to.last_day())
    }

    /// Projects upcoming occurrences with dates inside the given year
    /// window (inclusive on both ends).
    pub fn upcoming_by_year<S: Storage>(
        store: &S,
        from_year: i32,
        to_year: i32,
    ) -> Vec<UpcomingTransaction> {
        let window_start =
            NaiveDate::from_ymd_opt(from_year, 1, 1).unwrap_or(NaiveDate::MIN);
        let window_end =
            NaiveDate::from_ymd_opt(to_year, 12, 31).unwrap_or(NaiveDate::MAX);
        Self::upcoming_between(store, window_start, window_end)
    }

    fn upcoming_between<S: Storage>(
        store: &S,
        window_start: NaiveDate,
        window_end: NaiveDate,
    ) -> Vec<UpcomingTransaction> {
        let mut upcoming = Vec::new();

        for recurring in store.recurring_by_status(RecurrenceStatus::Active) {
            let mut due = recurring.next_due_date;
            while due <= window_end && due <= recurring.end_date {
                if due >= window_start {
                    upcoming.push(UpcomingTransaction {
                        wallet_id: recurring.wallet_id,
                        category_id: recurring.category_id,
                        kind: recurring.kind,
                        date: due.and_time(occurrence_time()),
                        amount: recurring.amount,
                        description: recurring.description.clone(),
                    });
                }
                let next = recurring.frequency.advance(due);
                if next == due {
                    break;
                }
                due = next;
            }
        }

        upcoming
    }

    fn materialize<S: Storage>(
        store: &mut S,
        recurring: &RecurringTransaction,
    ) -> Result<(), WalletError> {
        let date = recurring.next_due_date.and_time(occurrence_time());
        match recurring.kind {
            TransactionType::Income => WalletLedger::add_income(
                store,
                recurring.wallet_id,
                recurring.category_id,
                date,
                recurring.amount,
                &recurring.description,
                TransactionStatus::Pending,
            )
            .map(|_| ()),
            TransactionType::Expense => WalletLedger::add_expense(
                store,
                recurring.wallet_id,
                recurring.category_id,
                date,
                recurring.amount,
                &recurring.description,
                TransactionStatus::Pending,
            )
            .map(|_| ()),
        }
    }

    fn validate_window(
        start: NaiveDate,
        end: NaiveDate,
        frequency: Frequency,
    ) -> Result<(), RecurringError> {
        if end < start {
            return Err(RecurringError::EndBeforeStart);
        }
        if end < frequency.advance(start) {
            return Err(RecurringError::WindowTooShort(frequency));
        }
        Ok(())
    }
}
