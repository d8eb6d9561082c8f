//! Credit-card debt engine.
//!
//! Registers debts as exact installment schedules, pays invoices against a
//! wallet with optional rebate offsetting, and enforces the available-credit
//! invariant: pending installments never exceed a card's limit as a result
//! of an engine operation.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use saldo_shared::types::money::round_cents;
use saldo_shared::types::{CategoryId, CreditCardId, CreditId, DebtId, PaymentId, WalletId, YearMonth};
use tracing::{info, warn};

use super::error::CreditCardError;
use super::installment::split_installments;
use super::types::{
    invoice_due_time, CreditCard, CreditCardCredit, CreditCardDebt, CreditCardPayment,
    CreditType, MAX_BILLING_DAY, MAX_INSTALLMENTS,
};
use crate::storage::Storage;

/// Credit-card debt engine service.
pub struct CreditCardEngine;

impl CreditCardEngine {
    /// Registers a new credit card.
    #[allow(clippy::too_many_arguments)]
    pub fn add_credit_card<S: Storage>(
        store: &mut S,
        name: &str,
        operator: &str,
        billing_due_day: u32,
        closing_day: u32,
        max_debt: Decimal,
        last_four_digits: &str,
        default_billing_wallet: Option<WalletId>,
    ) -> Result<CreditCardId, CreditCardError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CreditCardError::EmptyName);
        }
        if store.credit_card_by_name(name).is_some() {
            return Err(CreditCardError::NameInUse(name.to_string()));
        }
        Self::validate_card_fields(billing_due_day, closing_day, max_debt, last_four_digits)?;
        if let Some(wallet_id) = default_billing_wallet {
            if store.wallet(wallet_id).is_none() {
                return Err(CreditCardError::WalletNotFound(wallet_id));
            }
        }

        let card = CreditCard {
            id: CreditCardId::new(),
            name: name.to_string(),
            operator: operator.to_string(),
            max_debt: round_cents(max_debt),
            closing_day,
            billing_due_day,
            last_four_digits: last_four_digits.to_string(),
            default_billing_wallet,
            available_rebate: Decimal::ZERO,
            archived: false,
        };
        let id = card.id;
        store.save_credit_card(card);

        info!(card = %id, name, "credit card created");
        Ok(id)
    }

    /// Archives a card. Always permitted and reversible.
    pub fn archive_credit_card<S: Storage>(
        store: &mut S,
        id: CreditCardId,
    ) -> Result<(), CreditCardError> {
        let mut card = store
            .credit_card(id)
            .ok_or(CreditCardError::CardNotFound(id))?;
        card.archived = true;
        store.save_credit_card(card);

        info!(card = %id, "credit card archived");
        Ok(())
    }

    /// Restores an archived card.
    pub fn unarchive_credit_card<S: Storage>(
        store: &mut S,
        id: CreditCardId,
    ) -> Result<(), CreditCardError> {
        let mut card = store
            .credit_card(id)
            .ok_or(CreditCardError::CardNotFound(id))?;
        card.archived = false;
        store.save_credit_card(card);

        info!(card = %id, "credit card unarchived");
        Ok(())
    }

    /// Deletes a card that has no registered debts.
    pub fn delete_credit_card<S: Storage>(
        store: &mut S,
        id: CreditCardId,
    ) -> Result<(), CreditCardError> {
        if store.credit_card(id).is_none() {
            return Err(CreditCardError::CardNotFound(id));
        }
        if store.debt_count_by_card(id) > 0 {
            return Err(CreditCardError::HasDebts(id));
        }

        store.delete_credit_card(id);

        info!(card = %id, "credit card deleted");
        Ok(())
    }

    /// The card's spending headroom: credit limit minus all pending
    /// installment amounts.
    pub fn available_credit<S: Storage>(
        store: &S,
        id: CreditCardId,
    ) -> Result<Decimal, CreditCardError> {
        let card = store
            .credit_card(id)
            .ok_or(CreditCardError::CardNotFound(id))?;
        Ok(card.max_debt - store.pending_total_by_card(id))
    }

    /// Registers a debt and its installment schedule, atomically.
    ///
    /// Installment `k` falls due on `invoice_month + (k - 1)` months at the
    /// card's billing due day, end of day. The installment amounts come
    /// from [`split_installments`] and sum exactly to the debt total.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientCredit` when the total exceeds the card's
    /// available credit; nothing is persisted in that case.
    #[allow(clippy::too_many_arguments)]
    pub fn add_debt<S: Storage>(
        store: &mut S,
        card_id: CreditCardId,
        category_id: CategoryId,
        register_date: NaiveDateTime,
        invoice_month: YearMonth,
        amount: Decimal,
        installments: u32,
        description: &str,
    ) -> Result<DebtId, CreditCardError> {
        let card = store
            .credit_card(card_id)
            .ok_or(CreditCardError::CardNotFound(card_id))?;
        if store.category(category_id).is_none() {
            return Err(CreditCardError::CategoryNotFound(category_id));
        }
        if amount <= Decimal::ZERO {
            return Err(CreditCardError::NonPositiveAmount);
        }
        if !(1..=MAX_INSTALLMENTS).contains(&installments) {
            return Err(CreditCardError::InstallmentsOutOfRange {
                got: installments,
                max: MAX_INSTALLMENTS,
            });
        }
        let amount = round_cents(amount);

        let available = card.max_debt - store.pending_total_by_card(card_id);
        if amount > available {
            return Err(CreditCardError::InsufficientCredit(card_id));
        }

        let debt = CreditCardDebt {
            id: DebtId::new(),
            card_id,
            category_id,
            description: description.to_string(),
            amount,
            installments,
            register_date,
        };
        let id = debt.id;

        store.atomically(|s| {
            s.save_debt(debt);
            for (offset, part) in (0u32..).zip(split_installments(amount, installments)) {
                let due_date = invoice_month
                    .plus_months(offset)
                    .day(card.billing_due_day)
                    .and_time(invoice_due_time());
                s.save_payment(CreditCardPayment {
                    id: PaymentId::new(),
                    debt_id: id,
                    card_id,
                    installment_number: offset + 1,
                    amount: part,
                    due_date,
                    wallet_id: None,
                });
            }
            Ok::<_, CreditCardError>(())
        })?;

        info!(card = %card_id, debt = %id, %amount, installments, "debt registered");
        Ok(id)
    }

    /// Applies an edited debt, rebuilding its unpaid installments.
    ///
    /// Paid installments are sunk: they keep their amounts and dates, and
    /// only `new_total - paid_amount` is redistributed across the unpaid
    /// slots (first unpaid slot absorbs the remainder), rescheduled from
    /// `new_invoice_month`. The remaining amount is validated against the
    /// target card's available credit after releasing this debt's own
    /// prior pending reservation.
    pub fn update_debt<S: Storage>(
        store: &mut S,
        updated: CreditCardDebt,
        new_invoice_month: YearMonth,
    ) -> Result<(), CreditCardError> {
        let existing = store
            .debt(updated.id)
            .ok_or(CreditCardError::DebtNotFound(updated.id))?;
        let card = store
            .credit_card(updated.card_id)
            .ok_or(CreditCardError::CardNotFound(updated.card_id))?;
        if store.category(updated.category_id).is_none() {
            return Err(CreditCardError::CategoryNotFound(updated.category_id));
        }
        if updated.amount <= Decimal::ZERO {
            return Err(CreditCardError::NonPositiveAmount);
        }
        if !(1..=MAX_INSTALLMENTS).contains(&updated.installments) {
            return Err(CreditCardError::InstallmentsOutOfRange {
                got: updated.installments,
                max: MAX_INSTALLMENTS,
            });
        }
        let new_total = round_cents(updated.amount);

        let payments = store.payments_by_debt(existing.id);
        let paid_count = payments.iter().filter(|p| !p.is_pending()).count();
        let paid_count = u32::try_from(paid_count).unwrap_or(u32::MAX);
        let paid_amount: Decimal = payments
            .iter()
            .filter(|p| !p.is_pending())
            .map(|p| p.amount)
            .sum();
        let own_pending: Decimal = payments
            .iter()
            .filter(|p| p.is_pending())
            .map(|p| p.amount)
            .sum();

        if updated.installments < paid_count {
            return Err(CreditCardError::InstallmentsBelowPaid {
                requested: updated.installments,
                paid: paid_count,
            });
        }
        let remaining = new_total - paid_amount;
        if remaining < Decimal::ZERO {
            return Err(CreditCardError::AmountBelowPaid { paid: paid_amount });
        }
        let unpaid_slots = updated.installments - paid_count;
        if unpaid_slots == 0 && !remaining.is_zero() {
            return Err(CreditCardError::DebtFullyPaid(existing.id));
        }

        // Release this debt's own reservation when staying on the same card;
        // moving cards reserves the full remaining amount on the target.
        let target_available = card.max_debt - store.pending_total_by_card(updated.card_id);
        let released = if updated.card_id == existing.card_id {
            own_pending
        } else {
            Decimal::ZERO
        };
        if remaining > target_available + released {
            return Err(CreditCardError::InsufficientCredit(updated.card_id));
        }

        let debt_id = existing.id;
        store.atomically(|s| {
            for payment in payments.iter().filter(|p| p.is_pending()) {
                s.delete_payment(payment.id);
            }
            if unpaid_slots > 0 {
                for (offset, part) in (0u32..).zip(split_installments(remaining, unpaid_slots)) {
                    let installment_number = paid_count + offset + 1;
                    let due_date = new_invoice_month
                        .plus_months(installment_number - 1)
                        .day(card.billing_due_day)
                        .and_time(invoice_due_time());
                    s.save_payment(CreditCardPayment {
                        id: PaymentId::new(),
                        debt_id,
                        card_id: updated.card_id,
                        installment_number,
                        amount: part,
                        due_date,
                        wallet_id: None,
                    });
                }
            }
            s.save_debt(CreditCardDebt {
                id: debt_id,
                card_id: updated.card_id,
                category_id: updated.category_id,
                description: updated.description.clone(),
                amount: new_total,
                installments: updated.installments,
                register_date: updated.register_date,
            });
            Ok::<_, CreditCardError>(())
        })?;

        info!(debt = %debt_id, %new_total, "debt updated");
        Ok(())
    }

    /// Deletes a debt and its installments, refunding paid installments to
    /// the wallets that paid them.
    pub fn delete_debt<S: Storage>(store: &mut S, id: DebtId) -> Result<(), CreditCardError> {
        let debt = store.debt(id).ok_or(CreditCardError::DebtNotFound(id))?;
        let payments = store.payments_by_debt(id);

        store.atomically(|s| {
            for payment in payments {
                if let Some(wallet_id) = payment.wallet_id {
                    if let Some(mut wallet) = s.wallet(wallet_id) {
                        wallet.apply(payment.amount);
                        s.save_wallet(wallet);
                    } else {
                        warn!(
                            payment = %payment.id,
                            wallet = %wallet_id,
                            "paying wallet no longer exists, refund skipped"
                        );
                    }
                }
                s.delete_payment(payment.id);
            }
            s.delete_debt(debt.id);
            Ok::<_, CreditCardError>(())
        })?;

        info!(debt = %id, "debt deleted");
        Ok(())
    }

    /// Pays a card's invoice for the given month from a wallet, atomically.
    ///
    /// All pending installments due in that month are marked paid from the
    /// wallet, which is debited by the invoice total minus the rebate
    /// actually used. The rebate used is clamped to the invoice total, so
    /// paying an already-settled invoice is a no-op success that touches
    /// neither the wallet nor the rebate.
    ///
    /// Returns the net amount debited from the wallet.
    pub fn pay_invoice<S: Storage>(
        store: &mut S,
        card_id: CreditCardId,
        wallet_id: WalletId,
        month: YearMonth,
        rebate_to_use: Decimal,
    ) -> Result<Decimal, CreditCardError> {
        let mut wallet = store
            .wallet(wallet_id)
            .ok_or(CreditCardError::WalletNotFound(wallet_id))?;
        let mut card = store
            .credit_card(card_id)
            .ok_or(CreditCardError::CardNotFound(card_id))?;
        if rebate_to_use < Decimal::ZERO {
            return Err(CreditCardError::NegativeRebate);
        }
        let rebate_to_use = round_cents(rebate_to_use);
        if rebate_to_use > card.available_rebate {
            return Err(CreditCardError::InsufficientRebate(card_id));
        }

        let pending = store.pending_payments_by_invoice(card_id, month);
        let total: Decimal = pending.iter().map(|p| p.amount).sum();
        let rebate_used = rebate_to_use.min(total);
        let net = total - rebate_used;

        store.atomically(|s| {
            for mut payment in pending {
                payment.wallet_id = Some(wallet_id);
                s.save_payment(payment);
            }
            if !net.is_zero() {
                wallet.apply(-net);
                s.save_wallet(wallet);
            }
            if !rebate_used.is_zero() {
                card.available_rebate -= rebate_used;
                s.save_credit_card(card);
            }
            Ok::<_, CreditCardError>(())
        })?;

        info!(card = %card_id, wallet = %wallet_id, %month, %net, "invoice paid");
        Ok(net)
    }

    /// Applies a cashback/refund credit to a card, increasing its
    /// available rebate.
    pub fn add_credit<S: Storage>(
        store: &mut S,
        card_id: CreditCardId,
        date: NaiveDateTime,
        amount: Decimal,
        kind: CreditType,
        description: &str,
    ) -> Result<CreditId, CreditCardError> {
        let mut card = store
            .credit_card(card_id)
            .ok_or(CreditCardError::CardNotFound(card_id))?;
        if amount <= Decimal::ZERO {
            return Err(CreditCardError::NonPositiveAmount);
        }
        let amount = round_cents(amount);

        let credit = CreditCardCredit {
            id: CreditId::new(),
            card_id,
            kind,
            amount,
            date,
            description: description.to_string(),
        };
        let id = credit.id;

        store.atomically(|s| {
            s.save_credit(credit);
            card.available_rebate += amount;
            s.save_credit_card(card);
            Ok::<_, CreditCardError>(())
        })?;

        info!(card = %card_id, %amount, ?kind, "credit applied");
        Ok(id)
    }

    fn validate_card_fields(
        billing_due_day: u32,
        closing_day: u32,
        max_debt: Decimal,
        last_four_digits: &str,
    ) -> Result<(), CreditCardError> {
        if !(1..=MAX_BILLING_DAY).contains(&billing_due_day) {
            return Err(CreditCardError::InvalidBillingDay {
                got: billing_due_day,
                max: MAX_BILLING_DAY,
            });
        }
        if !(1..=MAX_BILLING_DAY).contains(&closing_day) {
            return Err(CreditCardError::InvalidClosingDay {
                got: closing_day,
                max: MAX_BILLING_DAY,
            });
        }
        if max_debt <= Decimal::ZERO {
            return Err(CreditCardError::NonPositiveLimit);
        }
        if last_four_digits.len() != 4
            || !last_four_digits.chars().all(|c| c.is_ascii_digit())
        {
            return Err(CreditCardError::InvalidLastFourDigits(
                last_four_digits.to_string(),
            ));
        }
        Ok(())
    }
}
