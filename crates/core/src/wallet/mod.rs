//! Wallet ledger: balance-consistent transaction and transfer handling.
//!
//! Owns the invariant that a wallet's cached balance reflects every
//! confirmed transaction and every transfer involving it:
//! - Wallet lifecycle (create, rename, archive, delete)
//! - Income/expense recording with pending/confirmed status
//! - Combined-effect updates across wallets, types, statuses, and amounts
//! - Atomic wallet-to-wallet transfers
//! - Error types for ledger operations

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::WalletError;
pub use service::WalletLedger;
pub use types::{
    Transfer, TransactionStatus, TransactionType, Wallet, WalletKind, WalletTransaction,
};
