//! Wallet ledger domain types.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use saldo_shared::types::{CategoryId, TransactionId, TransferId, WalletId};
use serde::{Deserialize, Serialize};

/// Classification of a wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalletKind {
    /// Checking account.
    Checking,
    /// Savings account.
    Savings,
    /// Physical cash.
    Cash,
    /// Brokerage/investment account.
    Investment,
    /// Anything else.
    Other,
}

/// A wallet holding a cached balance.
///
/// `balance` is derived state: it changes only through confirmed-transaction
/// application/reversal and transfers, all of which go through
/// [`super::WalletLedger`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    /// Unique identifier.
    pub id: WalletId,
    /// Display name, unique among wallets.
    pub name: String,
    /// Cached balance; may be negative.
    pub balance: Decimal,
    /// Whether the wallet is archived (soft-disabled).
    pub archived: bool,
    /// The wallet classification.
    pub kind: WalletKind,
}

impl Wallet {
    /// Applies a signed balance delta.
    pub fn apply(&mut self, delta: Decimal) {
        self.balance += delta;
    }
}

/// Direction of a wallet transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money entering the wallet.
    Income,
    /// Money leaving the wallet.
    Expense,
}

impl TransactionType {
    /// The signed balance effect of an amount under this direction.
    #[must_use]
    pub fn signed(self, amount: Decimal) -> Decimal {
        match self {
            Self::Income => amount,
            Self::Expense => -amount,
        }
    }
}

/// Lifecycle status of a wallet transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Recorded but not yet affecting the wallet balance.
    Pending,
    /// Applied to the wallet balance.
    Confirmed,
}

/// A single income or expense on a wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletTransaction {
    /// Unique identifier.
    pub id: TransactionId,
    /// The wallet this transaction belongs to.
    pub wallet_id: WalletId,
    /// The category this transaction is filed under.
    pub category_id: CategoryId,
    /// Income or expense.
    pub kind: TransactionType,
    /// Pending or confirmed.
    pub status: TransactionStatus,
    /// When the transaction happened (or is due, for pending rows).
    pub date: NaiveDateTime,
    /// The amount, always positive; direction comes from `kind`.
    pub amount: Decimal,
    /// Free-form description.
    pub description: String,
}

impl WalletTransaction {
    /// The signed effect this transaction currently has on its wallet's
    /// balance: zero while pending, `±amount` once confirmed.
    #[must_use]
    pub fn balance_effect(&self) -> Decimal {
        match self.status {
            TransactionStatus::Pending => Decimal::ZERO,
            TransactionStatus::Confirmed => self.kind.signed(self.amount),
        }
    }
}

/// A completed wallet-to-wallet transfer.
///
/// Transfers have no pending state: both balance effects are applied at
/// creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Unique identifier.
    pub id: TransferId,
    /// The wallet the money left.
    pub sender_id: WalletId,
    /// The wallet the money entered.
    pub receiver_id: WalletId,
    /// When the transfer happened.
    pub date: NaiveDateTime,
    /// The transferred amount, always positive.
    pub amount: Decimal,
    /// Free-form description.
    pub description: String,
}
