//! Credit-card engine error types.

use rust_decimal::Decimal;
use saldo_shared::types::{CategoryId, CreditCardId, DebtId, WalletId};
use saldo_shared::ErrorKind;
use thiserror::Error;

/// Errors that can occur during credit-card operations.
#[derive(Debug, Error)]
pub enum CreditCardError {
    /// Credit card not found.
    #[error("Credit card not found: {0}")]
    CardNotFound(CreditCardId),

    /// Wallet not found.
    #[error("Wallet not found: {0}")]
    WalletNotFound(WalletId),

    /// Category not found.
    #[error("Category not found: {0}")]
    CategoryNotFound(CategoryId),

    /// Debt not found.
    #[error("Debt not found: {0}")]
    DebtNotFound(DebtId),

    /// Card name cannot be empty.
    #[error("Credit card name cannot be empty")]
    EmptyName,

    /// Card name already in use.
    #[error("Credit card with name {0} already exists")]
    NameInUse(String),

    /// Billing due day out of range.
    #[error("Billing due day must be in the range [1, {max}], got {got}")]
    InvalidBillingDay {
        /// The rejected day.
        got: u32,
        /// The inclusive upper bound.
        max: u32,
    },

    /// Closing day out of range.
    #[error("Closing day must be in the range [1, {max}], got {got}")]
    InvalidClosingDay {
        /// The rejected day.
        got: u32,
        /// The inclusive upper bound.
        max: u32,
    },

    /// Credit limit must be positive.
    #[error("Credit limit must be positive")]
    NonPositiveLimit,

    /// Last four digits must be exactly four decimal digits.
    #[error("Last four digits must be exactly 4 digits, got {0:?}")]
    InvalidLastFourDigits(String),

    /// Amount must be greater than zero.
    #[error("Amount must be greater than zero")]
    NonPositiveAmount,

    /// Rebate to use must be non-negative.
    #[error("Rebate must be non-negative")]
    NegativeRebate,

    /// Installment count out of range.
    #[error("Installments must be in the range [1, {max}], got {got}")]
    InstallmentsOutOfRange {
        /// The rejected count.
        got: u32,
        /// The inclusive upper bound.
        max: u32,
    },

    /// Installment count cannot drop below the installments already paid.
    #[error("Cannot reduce installments to {requested}: {paid} already paid")]
    InstallmentsBelowPaid {
        /// Requested new installment count.
        requested: u32,
        /// Number of installments already paid.
        paid: u32,
    },

    /// New debt total cannot drop below the amount already paid.
    #[error("New total is below the {paid} already paid on this debt")]
    AmountBelowPaid {
        /// Amount already paid toward the debt.
        paid: Decimal,
    },

    /// Every installment is paid; the debt's amount can no longer change.
    #[error("Debt {0} is fully paid and its amount can no longer change")]
    DebtFullyPaid(DebtId),

    /// The debt would exceed the card's available credit.
    #[error("Credit card {0} does not have enough available credit")]
    InsufficientCredit(CreditCardId),

    /// The requested rebate exceeds the card's accumulated rebate.
    #[error("Credit card {0} does not have enough rebate")]
    InsufficientRebate(CreditCardId),

    /// The card still has registered debts.
    #[error("Credit card {0} has debts and cannot be deleted")]
    HasDebts(CreditCardId),
}

impl CreditCardError {
    /// Classifies this error into the shared failure taxonomy.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::CardNotFound(_)
            | Self::WalletNotFound(_)
            | Self::CategoryNotFound(_)
            | Self::DebtNotFound(_) => ErrorKind::NotFound,
            Self::EmptyName
            | Self::InvalidBillingDay { .. }
            | Self::InvalidClosingDay { .. }
            | Self::NonPositiveLimit
            | Self::InvalidLastFourDigits(_)
            | Self::NonPositiveAmount
            | Self::NegativeRebate
            | Self::InstallmentsOutOfRange { .. }
            | Self::InstallmentsBelowPaid { .. }
            | Self::AmountBelowPaid { .. } => ErrorKind::InvalidArgument,
            Self::NameInUse(_) => ErrorKind::AlreadyExists,
            Self::DebtFullyPaid(_) => ErrorKind::AlreadyInState,
            Self::InsufficientCredit(_) | Self::InsufficientRebate(_) => {
                ErrorKind::InsufficientCredit
            }
            Self::HasDebts(_) => ErrorKind::InUse,
        }
    }
}
