//! In-memory reference implementation of the storage contracts.
//!
//! Backs the engine in tests and in callers that persist snapshots through
//! their own means. Entities live in `BTreeMap`s keyed by their (time-
//! ordered) ids, so listing queries come back in creation order and every
//! run is deterministic.

use std::collections::BTreeMap;

use saldo_shared::types::{
    CategoryId, CreditCardId, CreditId, DebtId, PaymentId, RecurringTransactionId, TransactionId,
    TransferId, WalletId, YearMonth,
};
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::creditcard::types::{CreditCard, CreditCardCredit, CreditCardDebt, CreditCardPayment};
use crate::recurring::types::{RecurrenceStatus, RecurringTransaction};
use crate::wallet::types::{Transfer, Wallet, WalletTransaction};

use super::{
    CategoryRepository, CreditCardRepository, CreditRepository, DebtRepository,
    PaymentRepository, RecurringTransactionRepository, Storage, TransactionRepository,
    TransferRepository, WalletRepository,
};

/// In-memory store over `BTreeMap`s.
///
/// `atomically` is snapshot/rollback: the whole store is cloned before the
/// operation and restored if it fails. Fine at desktop scale; a database
/// backend would map it onto a real transaction instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryStore {
    wallets: BTreeMap<WalletId, Wallet>,
    categories: BTreeMap<CategoryId, Category>,
    transactions: BTreeMap<TransactionId, WalletTransaction>,
    transfers: BTreeMap<TransferId, Transfer>,
    recurring: BTreeMap<RecurringTransactionId, RecurringTransaction>,
    cards: BTreeMap<CreditCardId, CreditCard>,
    debts: BTreeMap<DebtId, CreditCardDebt>,
    payments: BTreeMap<PaymentId, CreditCardPayment>,
    credits: BTreeMap<CreditId, CreditCardCredit>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl WalletRepository for MemoryStore {
    fn wallet(&self, id: WalletId) -> Option<Wallet> {
        self.wallets.get(&id).cloned()
    }

    fn wallet_by_name(&self, name: &str) -> Option<Wallet> {
        self.wallets.values().find(|w| w.name == name).cloned()
    }

    fn wallets(&self) -> Vec<Wallet> {
        self.wallets.values().cloned().collect()
    }

    fn save_wallet(&mut self, wallet: Wallet) {
        self.wallets.insert(wallet.id, wallet);
    }

    fn delete_wallet(&mut self, id: WalletId) {
        self.wallets.remove(&id);
    }
}

impl CategoryRepository for MemoryStore {
    fn category(&self, id: CategoryId) -> Option<Category> {
        self.categories.get(&id).cloned()
    }

    fn save_category(&mut self, category: Category) {
        self.categories.insert(category.id, category);
    }
}

impl TransactionRepository for MemoryStore {
    fn transaction(&self, id: TransactionId) -> Option<WalletTransaction> {
        self.transactions.get(&id).cloned()
    }

    fn transactions_by_wallet(&self, wallet: WalletId) -> Vec<WalletTransaction> {
        self.transactions
            .values()
            .filter(|t| t.wallet_id == wallet)
            .cloned()
            .collect()
    }

    fn transaction_count_by_wallet(&self, wallet: WalletId) -> usize {
        self.transactions
            .values()
            .filter(|t| t.wallet_id == wallet)
            .count()
    }

    fn save_transaction(&mut self, transaction: WalletTransaction) {
        self.transactions.insert(transaction.id, transaction);
    }

    fn delete_transaction(&mut self, id: TransactionId) {
        self.transactions.remove(&id);
    }
}

impl TransferRepository for MemoryStore {
    fn transfer(&self, id: TransferId) -> Option<Transfer> {
        self.transfers.get(&id).cloned()
    }

    fn transfer_count_by_wallet(&self, wallet: WalletId) -> usize {
        self.transfers
            .values()
            .filter(|t| t.sender_id == wallet || t.receiver_id == wallet)
            .count()
    }

    fn save_transfer(&mut self, transfer: Transfer) {
        self.transfers.insert(transfer.id, transfer);
    }
}

impl RecurringTransactionRepository for MemoryStore {
    fn recurring_transaction(&self, id: RecurringTransactionId) -> Option<RecurringTransaction> {
        self.recurring.get(&id).cloned()
    }

    fn recurring_by_status(&self, status: RecurrenceStatus) -> Vec<RecurringTransaction> {
        self.recurring
            .values()
            .filter(|r| r.status == status)
            .cloned()
            .collect()
    }

    fn save_recurring_transaction(&mut self, recurring: RecurringTransaction) {
        self.recurring.insert(recurring.id, recurring);
    }

    fn delete_recurring_transaction(&mut self, id: RecurringTransactionId) {
        self.recurring.remove(&id);
    }
}

impl CreditCardRepository for MemoryStore {
    fn credit_card(&self, id: CreditCardId) -> Option<CreditCard> {
        self.cards.get(&id).cloned()
    }

    fn credit_card_by_name(&self, name: &str) -> Option<CreditCard> {
        self.cards.values().find(|c| c.name == name).cloned()
    }

    fn save_credit_card(&mut self, card: CreditCard) {
        self.cards.insert(card.id, card);
    }

    fn delete_credit_card(&mut self, id: CreditCardId) {
        self.cards.remove(&id);
    }
}

impl DebtRepository for MemoryStore {
    fn debt(&self, id: DebtId) -> Option<CreditCardDebt> {
        self.debts.get(&id).cloned()
    }

    fn debt_count_by_card(&self, card: CreditCardId) -> usize {
        self.debts.values().filter(|d| d.card_id == card).count()
    }

    fn save_debt(&mut self, debt: CreditCardDebt) {
        self.debts.insert(debt.id, debt);
    }

    fn delete_debt(&mut self, id: DebtId) {
        self.debts.remove(&id);
    }
}

impl PaymentRepository for MemoryStore {
    fn payments_by_debt(&self, debt: DebtId) -> Vec<CreditCardPayment> {
        let mut payments: Vec<_> = self
            .payments
            .values()
            .filter(|p| p.debt_id == debt)
            .cloned()
            .collect();
        payments.sort_by_key(|p| p.installment_number);
        payments
    }

    fn pending_payments_by_card(&self, card: CreditCardId) -> Vec<CreditCardPayment> {
        let mut payments: Vec<_> = self
            .payments
            .values()
            .filter(|p| p.card_id == card && p.is_pending())
            .cloned()
            .collect();
        payments.sort_by_key(|p| p.due_date);
        payments
    }

    fn pending_payments_by_invoice(
        &self,
        card: CreditCardId,
        month: YearMonth,
    ) -> Vec<CreditCardPayment> {
        self.pending_payments_by_card(card)
            .into_iter()
            .filter(|p| month.contains(p.due_date.date()))
            .collect()
    }

    fn save_payment(&mut self, payment: CreditCardPayment) {
        self.payments.insert(payment.id, payment);
    }

    fn delete_payment(&mut self, id: PaymentId) {
        self.payments.remove(&id);
    }
}

impl CreditRepository for MemoryStore {
    fn credits_by_card(&self, card: CreditCardId) -> Vec<CreditCardCredit> {
        self.credits
            .values()
            .filter(|c| c.card_id == card)
            .cloned()
            .collect()
    }

    fn save_credit(&mut self, credit: CreditCardCredit) {
        self.credits.insert(credit.id, credit);
    }
}

impl Storage for MemoryStore {
    fn atomically<T, E>(&mut self, op: impl FnOnce(&mut Self) -> Result<T, E>) -> Result<T, E> {
        let snapshot = self.clone();
        let result = op(self);
        if result.is_err() {
            *self = snapshot;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::types::WalletKind;
    use rust_decimal_macros::dec;

    fn wallet(name: &str) -> Wallet {
        Wallet {
            id: WalletId::new(),
            name: name.to_string(),
            balance: dec!(0.00),
            archived: false,
            kind: WalletKind::Checking,
        }
    }

    #[test]
    fn test_wallet_round_trip() {
        let mut store = MemoryStore::new();
        let w = wallet("Checking");
        let id = w.id;
        store.save_wallet(w.clone());

        assert_eq!(store.wallet(id), Some(w));
        assert!(store.wallet_by_name("Checking").is_some());
        assert!(store.wallet_by_name("Savings").is_none());

        store.delete_wallet(id);
        assert!(store.wallet(id).is_none());
    }

    #[test]
    fn test_atomically_rolls_back_on_error() {
        let mut store = MemoryStore::new();
        store.save_wallet(wallet("Keep"));

        let result: Result<(), &str> = store.atomically(|s| {
            let keep = s.wallet_by_name("Keep").map(|w| w.id).unwrap();
            s.save_wallet(wallet("Discard"));
            s.delete_wallet(keep);
            Err("boom")
        });

        assert!(result.is_err());
        assert!(store.wallet_by_name("Keep").is_some());
        assert!(store.wallet_by_name("Discard").is_none());
    }

    #[test]
    fn test_atomically_commits_on_success() {
        let mut store = MemoryStore::new();
        let result: Result<(), &str> = store.atomically(|s| {
            s.save_wallet(wallet("Committed"));
            Ok(())
        });

        assert!(result.is_ok());
        assert!(store.wallet_by_name("Committed").is_some());
    }
}
