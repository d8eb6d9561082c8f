//! Storage collaborator contracts.
//!
//! The engine issues load/save calls against one narrow repository trait per
//! entity; how rows are actually persisted (tables, columns, files) is the
//! backend's concern. [`Storage`] bundles the repositories and adds the
//! atomic write scope every multi-entity mutation runs under.

pub mod memory;

use rust_decimal::Decimal;
use saldo_shared::types::{
    CategoryId, CreditCardId, DebtId, PaymentId, RecurringTransactionId, TransactionId,
    TransferId, WalletId, YearMonth,
};

use crate::category::Category;
use crate::creditcard::types::{CreditCard, CreditCardCredit, CreditCardDebt, CreditCardPayment};
use crate::recurring::types::{RecurrenceStatus, RecurringTransaction};
use crate::wallet::types::{Transfer, Wallet, WalletTransaction};

pub use memory::MemoryStore;

/// Wallet persistence.
pub trait WalletRepository {
    /// Finds a wallet by id.
    fn wallet(&self, id: WalletId) -> Option<Wallet>;
    /// Finds a wallet by its (unique) name.
    fn wallet_by_name(&self, name: &str) -> Option<Wallet>;
    /// All wallets, ordered by id.
    fn wallets(&self) -> Vec<Wallet>;
    /// Inserts or replaces a wallet.
    fn save_wallet(&mut self, wallet: Wallet);
    /// Removes a wallet.
    fn delete_wallet(&mut self, id: WalletId);
}

/// Category persistence.
pub trait CategoryRepository {
    /// Finds a category by id.
    fn category(&self, id: CategoryId) -> Option<Category>;
    /// Inserts or replaces a category.
    fn save_category(&mut self, category: Category);
}

/// Wallet-transaction persistence.
pub trait TransactionRepository {
    /// Finds a transaction by id.
    fn transaction(&self, id: TransactionId) -> Option<WalletTransaction>;
    /// All transactions on a wallet, ordered by id.
    fn transactions_by_wallet(&self, wallet: WalletId) -> Vec<WalletTransaction>;
    /// Number of transactions on a wallet.
    fn transaction_count_by_wallet(&self, wallet: WalletId) -> usize;
    /// Inserts or replaces a transaction.
    fn save_transaction(&mut self, transaction: WalletTransaction);
    /// Removes a transaction.
    fn delete_transaction(&mut self, id: TransactionId);
}

/// Transfer persistence.
pub trait TransferRepository {
    /// Finds a transfer by id.
    fn transfer(&self, id: TransferId) -> Option<Transfer>;
    /// Number of transfers a wallet participates in, as sender or receiver.
    fn transfer_count_by_wallet(&self, wallet: WalletId) -> usize;
    /// Inserts or replaces a transfer.
    fn save_transfer(&mut self, transfer: Transfer);
}

/// Recurring-transaction persistence.
pub trait RecurringTransactionRepository {
    /// Finds a recurring transaction by id.
    fn recurring_transaction(&self, id: RecurringTransactionId) -> Option<RecurringTransaction>;
    /// All recurring transactions in the given status, ordered by id.
    fn recurring_by_status(&self, status: RecurrenceStatus) -> Vec<RecurringTransaction>;
    /// Inserts or replaces a recurring transaction.
    fn save_recurring_transaction(&mut self, recurring: RecurringTransaction);
    /// Removes a recurring transaction.
    fn delete_recurring_transaction(&mut self, id: RecurringTransactionId);
}

/// Credit-card persistence.
pub trait CreditCardRepository {
    /// Finds a card by id.
    fn credit_card(&self, id: CreditCardId) -> Option<CreditCard>;
    /// Finds a card by its (unique) name.
    fn credit_card_by_name(&self, name: &str) -> Option<CreditCard>;
    /// Inserts or replaces a card.
    fn save_credit_card(&mut self, card: CreditCard);
    /// Removes a card.
    fn delete_credit_card(&mut self, id: CreditCardId);
}

/// Credit-card debt persistence.
pub trait DebtRepository {
    /// Finds a debt by id.
    fn debt(&self, id: DebtId) -> Option<CreditCardDebt>;
    /// Number of debts registered on a card.
    fn debt_count_by_card(&self, card: CreditCardId) -> usize;
    /// Inserts or replaces a debt.
    fn save_debt(&mut self, debt: CreditCardDebt);
    /// Removes a debt.
    fn delete_debt(&mut self, id: DebtId);
}

/// Credit-card payment (installment) persistence.
pub trait PaymentRepository {
    /// All payments of a debt, ordered by installment number.
    fn payments_by_debt(&self, debt: DebtId) -> Vec<CreditCardPayment>;
    /// All pending payments on a card, ordered by due date.
    fn pending_payments_by_card(&self, card: CreditCardId) -> Vec<CreditCardPayment>;
    /// Pending payments on a card due in the given invoice month.
    fn pending_payments_by_invoice(
        &self,
        card: CreditCardId,
        month: YearMonth,
    ) -> Vec<CreditCardPayment>;
    /// Sum of all pending payment amounts on a card.
    fn pending_total_by_card(&self, card: CreditCardId) -> Decimal {
        self.pending_payments_by_card(card)
            .iter()
            .map(|p| p.amount)
            .sum()
    }
    /// Inserts or replaces a payment.
    fn save_payment(&mut self, payment: CreditCardPayment);
    /// Removes a payment.
    fn delete_payment(&mut self, id: PaymentId);
}

/// Credit-card credit persistence.
pub trait CreditRepository {
    /// All credits applied to a card, ordered by id.
    fn credits_by_card(&self, card: CreditCardId) -> Vec<CreditCardCredit>;
    /// Inserts a credit row.
    fn save_credit(&mut self, credit: CreditCardCredit);
}

/// The full storage collaborator the engine operates against.
///
/// Implementations must make [`Storage::atomically`] all-or-nothing: when
/// the closure returns `Err`, every write it performed is discarded, so a
/// failed multi-entity operation leaves no partial state behind.
pub trait Storage:
    WalletRepository
    + CategoryRepository
    + TransactionRepository
    + TransferRepository
    + RecurringTransactionRepository
    + CreditCardRepository
    + DebtRepository
    + PaymentRepository
    + CreditRepository
{
    /// Runs `op` as a single storage transaction.
    fn atomically<T, E>(&mut self, op: impl FnOnce(&mut Self) -> Result<T, E>) -> Result<T, E>
    where
        Self: Sized;
}
