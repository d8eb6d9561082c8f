//! Wallet ledger error types.

use saldo_shared::types::{TransactionId, WalletId};
use saldo_shared::ErrorKind;
use thiserror::Error;

/// Errors that can occur during wallet ledger operations.
#[derive(Debug, Error)]
pub enum WalletError {
    /// Wallet not found.
    #[error("Wallet not found: {0}")]
    WalletNotFound(WalletId),

    /// Transaction not found.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(TransactionId),

    /// Wallet name cannot be empty.
    #[error("Wallet name cannot be empty")]
    EmptyName,

    /// Wallet name already in use.
    #[error("Wallet with name {0} already exists")]
    NameInUse(String),

    /// Amount must be greater than zero.
    #[error("Amount must be greater than zero")]
    NonPositiveAmount,

    /// Sender and receiver of a transfer must differ.
    #[error("Sender and receiver wallets must be different")]
    SameSourceAndDestination,

    /// Transaction is already confirmed.
    #[error("Transaction {0} is already confirmed")]
    AlreadyConfirmed(TransactionId),

    /// Wallet still has transactions or transfers.
    #[error("Wallet {0} has transactions and cannot be deleted")]
    HasTransactions(WalletId),
}

impl WalletError {
    /// Classifies this error into the shared failure taxonomy.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::WalletNotFound(_) | Self::TransactionNotFound(_) => ErrorKind::NotFound,
            Self::EmptyName | Self::NonPositiveAmount | Self::SameSourceAndDestination => {
                ErrorKind::InvalidArgument
            }
            Self::NameInUse(_) => ErrorKind::AlreadyExists,
            Self::AlreadyConfirmed(_) => ErrorKind::AlreadyInState,
            Self::HasTransactions(_) => ErrorKind::InUse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            WalletError::WalletNotFound(WalletId::new()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(WalletError::NonPositiveAmount.kind(), ErrorKind::InvalidArgument);
        assert_eq!(
            WalletError::NameInUse("Checking".to_string()).kind(),
            ErrorKind::AlreadyExists
        );
        assert_eq!(
            WalletError::AlreadyConfirmed(TransactionId::new()).kind(),
            ErrorKind::AlreadyInState
        );
        assert_eq!(
            WalletError::HasTransactions(WalletId::new()).kind(),
            ErrorKind::InUse
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            WalletError::SameSourceAndDestination.to_string(),
            "Sender and receiver wallets must be different"
        );
        assert_eq!(
            WalletError::NonPositiveAmount.to_string(),
            "Amount must be greater than zero"
        );
    }
}
