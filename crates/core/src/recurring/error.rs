//! Recurring-scheduler error types.

use saldo_shared::types::{RecurringTransactionId, WalletId};
use saldo_shared::ErrorKind;
use thiserror::Error;

use super::types::Frequency;

/// Errors that can occur during recurring-transaction operations.
#[derive(Debug, Error)]
pub enum RecurringError {
    /// Recurring transaction not found.
    #[error("Recurring transaction not found: {0}")]
    RecurringTransactionNotFound(RecurringTransactionId),

    /// Wallet not found.
    #[error("Wallet not found: {0}")]
    WalletNotFound(WalletId),

    /// Amount must be greater than zero.
    #[error("Amount must be greater than zero")]
    NonPositiveAmount,

    /// Start date lies in the past at creation time.
    #[error("Start date cannot be before today")]
    StartDateInPast,

    /// End date precedes the start date.
    #[error("End date cannot be before start date")]
    EndBeforeStart,

    /// The window is shorter than one frequency period.
    #[error("End date must be at least one {0} after the start date")]
    WindowTooShort(Frequency),

    /// The recurrence has already been stopped.
    #[error("Recurring transaction {0} has already ended")]
    AlreadyStopped(RecurringTransactionId),
}

impl RecurringError {
    /// Classifies this error into the shared failure taxonomy.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::RecurringTransactionNotFound(_) | Self::WalletNotFound(_) => ErrorKind::NotFound,
            Self::NonPositiveAmount
            | Self::StartDateInPast
            | Self::EndBeforeStart
            | Self::WindowTooShort(_) => ErrorKind::InvalidArgument,
            Self::AlreadyStopped(_) => ErrorKind::AlreadyInState,
        }
    }
}
