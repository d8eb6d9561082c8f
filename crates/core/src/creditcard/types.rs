//! Credit-card domain types.

use chrono::{NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use saldo_shared::types::{CategoryId, CreditCardId, CreditId, DebtId, PaymentId, WalletId};
use serde::{Deserialize, Serialize};

/// Upper bound on the number of installments of a single debt.
pub const MAX_INSTALLMENTS: u32 = 999;

/// Upper bound on billing due day and closing day.
///
/// Capping at 28 keeps every invoice date valid in every month.
pub const MAX_BILLING_DAY: u32 = 28;

/// Time-of-day stamped onto invoice due dates (end of the due day).
#[must_use]
pub fn invoice_due_time() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN)
}

/// A credit card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditCard {
    /// Unique identifier.
    pub id: CreditCardId,
    /// Display name, unique among cards.
    pub name: String,
    /// Card operator/network name.
    pub operator: String,
    /// Credit limit; pending installments may never exceed it.
    pub max_debt: Decimal,
    /// Day of month the invoice closes, in [1, `MAX_BILLING_DAY`].
    pub closing_day: u32,
    /// Day of month the invoice is due, in [1, `MAX_BILLING_DAY`].
    pub billing_due_day: u32,
    /// Last four digits of the card number.
    pub last_four_digits: String,
    /// Wallet preselected when paying this card's invoices.
    pub default_billing_wallet: Option<WalletId>,
    /// Accumulated cashback/refund credit usable against invoices.
    pub available_rebate: Decimal,
    /// Whether the card is archived (soft-disabled).
    pub archived: bool,
}

/// A registered debt, split into installments at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditCardDebt {
    /// Unique identifier.
    pub id: DebtId,
    /// The card the debt was made on.
    pub card_id: CreditCardId,
    /// The category the debt is filed under.
    pub category_id: CategoryId,
    /// Free-form description.
    pub description: String,
    /// Total amount, always positive; installment amounts sum to it exactly.
    pub amount: Decimal,
    /// Number of installments, in [1, `MAX_INSTALLMENTS`].
    pub installments: u32,
    /// When the debt was registered.
    pub register_date: NaiveDateTime,
}

/// One scheduled installment of a debt, tied to an invoice month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditCardPayment {
    /// Unique identifier.
    pub id: PaymentId,
    /// The debt this installment belongs to.
    pub debt_id: DebtId,
    /// The card the debt was made on (denormalized for invoice queries).
    pub card_id: CreditCardId,
    /// 1-based installment number within the debt.
    pub installment_number: u32,
    /// Installment amount.
    pub amount: Decimal,
    /// Invoice due date (end of the billing due day).
    pub due_date: NaiveDateTime,
    /// The wallet that paid this installment; `None` while pending.
    pub wallet_id: Option<WalletId>,
}

impl CreditCardPayment {
    /// Returns true while the installment has not been paid.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.wallet_id.is_none()
    }
}

/// Origin of a credit-card credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreditType {
    /// Cashback from the operator.
    Cashback,
    /// Refund of a prior charge.
    Refund,
}

/// A credit applied to a card, feeding its available rebate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditCardCredit {
    /// Unique identifier.
    pub id: CreditId,
    /// The card the credit was applied to.
    pub card_id: CreditCardId,
    /// Cashback or refund.
    pub kind: CreditType,
    /// Credited amount, always positive.
    pub amount: Decimal,
    /// When the credit was received.
    pub date: NaiveDateTime,
    /// Free-form description.
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_payment_pending_follows_wallet_ref() {
        let mut payment = CreditCardPayment {
            id: PaymentId::new(),
            debt_id: DebtId::new(),
            card_id: CreditCardId::new(),
            installment_number: 1,
            amount: dec!(10.00),
            due_date: NaiveDateTime::default(),
            wallet_id: None,
        };
        assert!(payment.is_pending());

        payment.wallet_id = Some(WalletId::new());
        assert!(!payment.is_pending());
    }
}
