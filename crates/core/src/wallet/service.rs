//! Wallet ledger service.
//!
//! Every balance mutation in the system funnels through this service, which
//! is what keeps the cached `Wallet::balance` consistent with the confirmed
//! transactions and transfers that produced it. All validation happens
//! before the first write; multi-entity writes run inside
//! [`Storage::atomically`].

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use saldo_shared::types::money::round_cents;
use saldo_shared::types::{CategoryId, TransactionId, TransferId, WalletId};
use tracing::info;

use super::error::WalletError;
use super::types::{
    Transfer, TransactionStatus, TransactionType, Wallet, WalletKind, WalletTransaction,
};
use crate::storage::Storage;

/// Wallet ledger service.
///
/// Stateless: every operation takes the storage collaborator explicitly, so
/// the single-writer model of the engine is visible in the signatures.
pub struct WalletLedger;

impl WalletLedger {
    /// Creates a new wallet with the given starting balance.
    ///
    /// # Errors
    ///
    /// Returns `EmptyName` when the trimmed name is empty and `NameInUse`
    /// when another wallet already has it.
    pub fn create_wallet<S: Storage>(
        store: &mut S,
        name: &str,
        kind: WalletKind,
        initial_balance: Decimal,
    ) -> Result<WalletId, WalletError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(WalletError::EmptyName);
        }
        if store.wallet_by_name(name).is_some() {
            return Err(WalletError::NameInUse(name.to_string()));
        }

        let wallet = Wallet {
            id: WalletId::new(),
            name: name.to_string(),
            balance: round_cents(initial_balance),
            archived: false,
            kind,
        };
        let id = wallet.id;
        store.save_wallet(wallet);

        info!(wallet = %id, name, "wallet created");
        Ok(id)
    }

    /// Renames a wallet.
    pub fn rename_wallet<S: Storage>(
        store: &mut S,
        id: WalletId,
        new_name: &str,
    ) -> Result<(), WalletError> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(WalletError::EmptyName);
        }
        let mut wallet = store.wallet(id).ok_or(WalletError::WalletNotFound(id))?;
        if store
            .wallet_by_name(new_name)
            .is_some_and(|other| other.id != id)
        {
            return Err(WalletError::NameInUse(new_name.to_string()));
        }

        wallet.name = new_name.to_string();
        store.save_wallet(wallet);

        info!(wallet = %id, new_name, "wallet renamed");
        Ok(())
    }

    /// Archives a wallet (soft-disable; historical rows keep pointing at it).
    pub fn archive_wallet<S: Storage>(store: &mut S, id: WalletId) -> Result<(), WalletError> {
        let mut wallet = store.wallet(id).ok_or(WalletError::WalletNotFound(id))?;
        wallet.archived = true;
        store.save_wallet(wallet);

        info!(wallet = %id, "wallet archived");
        Ok(())
    }

    /// Restores an archived wallet.
    pub fn unarchive_wallet<S: Storage>(store: &mut S, id: WalletId) -> Result<(), WalletError> {
        let mut wallet = store.wallet(id).ok_or(WalletError::WalletNotFound(id))?;
        wallet.archived = false;
        store.save_wallet(wallet);

        info!(wallet = %id, "wallet unarchived");
        Ok(())
    }

    /// Deletes a wallet that has no transactions or transfers.
    ///
    /// # Errors
    ///
    /// Returns `HasTransactions` while any transaction or transfer still
    /// references the wallet; archive instead of deleting in that case.
    pub fn delete_wallet<S: Storage>(store: &mut S, id: WalletId) -> Result<(), WalletError> {
        if store.wallet(id).is_none() {
            return Err(WalletError::WalletNotFound(id));
        }
        if store.transaction_count_by_wallet(id) > 0 || store.transfer_count_by_wallet(id) > 0 {
            return Err(WalletError::HasTransactions(id));
        }

        store.delete_wallet(id);

        info!(wallet = %id, "wallet deleted");
        Ok(())
    }

    /// Records an income on a wallet and returns the new transaction id.
    ///
    /// The balance changes immediately when `status` is `Confirmed`;
    /// pending incomes only affect the balance once confirmed.
    pub fn add_income<S: Storage>(
        store: &mut S,
        wallet_id: WalletId,
        category_id: CategoryId,
        date: NaiveDateTime,
        amount: Decimal,
        description: &str,
        status: TransactionStatus,
    ) -> Result<TransactionId, WalletError> {
        Self::add_transaction(
            store,
            wallet_id,
            category_id,
            TransactionType::Income,
            date,
            amount,
            description,
            status,
        )
    }

    /// Records an expense on a wallet and returns the new transaction id.
    pub fn add_expense<S: Storage>(
        store: &mut S,
        wallet_id: WalletId,
        category_id: CategoryId,
        date: NaiveDateTime,
        amount: Decimal,
        description: &str,
        status: TransactionStatus,
    ) -> Result<TransactionId, WalletError> {
        Self::add_transaction(
            store,
            wallet_id,
            category_id,
            TransactionType::Expense,
            date,
            amount,
            description,
            status,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn add_transaction<S: Storage>(
        store: &mut S,
        wallet_id: WalletId,
        category_id: CategoryId,
        kind: TransactionType,
        date: NaiveDateTime,
        amount: Decimal,
        description: &str,
        status: TransactionStatus,
    ) -> Result<TransactionId, WalletError> {
        let mut wallet = store
            .wallet(wallet_id)
            .ok_or(WalletError::WalletNotFound(wallet_id))?;
        if amount <= Decimal::ZERO {
            return Err(WalletError::NonPositiveAmount);
        }
        let amount = round_cents(amount);

        let transaction = WalletTransaction {
            id: TransactionId::new(),
            wallet_id,
            category_id,
            kind,
            status,
            date,
            amount,
            description: description.to_string(),
        };
        let id = transaction.id;

        store.atomically(|s| {
            s.save_transaction(transaction);
            if status == TransactionStatus::Confirmed {
                wallet.apply(kind.signed(amount));
                s.save_wallet(wallet);
            }
            Ok::<_, WalletError>(())
        })?;

        info!(wallet = %wallet_id, %amount, ?kind, ?status, "transaction added");
        Ok(id)
    }

    /// Applies an edited transaction, adjusting wallet balances for the
    /// combined effect of the change.
    ///
    /// Wallet, type, status, and amount may all change in one call: the
    /// prior confirmed effect (if any) is reverted from the prior wallet
    /// and the new confirmed effect (if any) is applied to the new wallet.
    /// Wallets whose balance does not change are not saved.
    pub fn update_transaction<S: Storage>(
        store: &mut S,
        updated: WalletTransaction,
    ) -> Result<(), WalletError> {
        let prior = store
            .transaction(updated.id)
            .ok_or(WalletError::TransactionNotFound(updated.id))?;
        if updated.amount <= Decimal::ZERO {
            return Err(WalletError::NonPositiveAmount);
        }
        if store.wallet(updated.wallet_id).is_none() {
            return Err(WalletError::WalletNotFound(updated.wallet_id));
        }

        let mut updated = updated;
        updated.amount = round_cents(updated.amount);
        let id = updated.id;

        let prior_effect = prior.balance_effect();
        let new_effect = updated.balance_effect();

        store.atomically(|s| {
            if prior.wallet_id == updated.wallet_id {
                let delta = new_effect - prior_effect;
                if !delta.is_zero() {
                    let mut wallet = s
                        .wallet(updated.wallet_id)
                        .ok_or(WalletError::WalletNotFound(updated.wallet_id))?;
                    wallet.apply(delta);
                    s.save_wallet(wallet);
                }
            } else {
                if !prior_effect.is_zero() {
                    let mut prior_wallet = s
                        .wallet(prior.wallet_id)
                        .ok_or(WalletError::WalletNotFound(prior.wallet_id))?;
                    prior_wallet.apply(-prior_effect);
                    s.save_wallet(prior_wallet);
                }
                if !new_effect.is_zero() {
                    let mut new_wallet = s
                        .wallet(updated.wallet_id)
                        .ok_or(WalletError::WalletNotFound(updated.wallet_id))?;
                    new_wallet.apply(new_effect);
                    s.save_wallet(new_wallet);
                }
            }
            s.save_transaction(updated);
            Ok::<_, WalletError>(())
        })?;

        info!(transaction = %id, "transaction updated");
        Ok(())
    }

    /// Deletes a transaction, reversing its balance effect if confirmed.
    pub fn delete_transaction<S: Storage>(
        store: &mut S,
        id: TransactionId,
    ) -> Result<(), WalletError> {
        let transaction = store
            .transaction(id)
            .ok_or(WalletError::TransactionNotFound(id))?;

        let effect = transaction.balance_effect();
        let wallet_id = transaction.wallet_id;

        store.atomically(|s| {
            if !effect.is_zero() {
                let mut wallet = s
                    .wallet(wallet_id)
                    .ok_or(WalletError::WalletNotFound(wallet_id))?;
                wallet.apply(-effect);
                s.save_wallet(wallet);
            }
            s.delete_transaction(id);
            Ok::<_, WalletError>(())
        })?;

        info!(transaction = %id, wallet = %wallet_id, "transaction deleted");
        Ok(())
    }

    /// Confirms a pending transaction, applying its balance effect.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyConfirmed` when the transaction is not pending.
    pub fn confirm_transaction<S: Storage>(
        store: &mut S,
        id: TransactionId,
    ) -> Result<(), WalletError> {
        let mut transaction = store
            .transaction(id)
            .ok_or(WalletError::TransactionNotFound(id))?;
        if transaction.status == TransactionStatus::Confirmed {
            return Err(WalletError::AlreadyConfirmed(id));
        }

        transaction.status = TransactionStatus::Confirmed;
        let wallet_id = transaction.wallet_id;
        let effect = transaction.balance_effect();

        store.atomically(|s| {
            let mut wallet = s
                .wallet(wallet_id)
                .ok_or(WalletError::WalletNotFound(wallet_id))?;
            wallet.apply(effect);
            s.save_wallet(wallet);
            s.save_transaction(transaction);
            Ok::<_, WalletError>(())
        })?;

        info!(transaction = %id, wallet = %wallet_id, "transaction confirmed");
        Ok(())
    }

    /// Moves money between two wallets, atomically.
    ///
    /// Transfers apply immediately to both balances; there is no pending
    /// state. Balances are allowed to go negative.
    pub fn transfer_money<S: Storage>(
        store: &mut S,
        sender_id: WalletId,
        receiver_id: WalletId,
        date: NaiveDateTime,
        amount: Decimal,
        description: &str,
    ) -> Result<TransferId, WalletError> {
        if sender_id == receiver_id {
            return Err(WalletError::SameSourceAndDestination);
        }
        if amount <= Decimal::ZERO {
            return Err(WalletError::NonPositiveAmount);
        }
        let amount = round_cents(amount);

        let mut sender = store
            .wallet(sender_id)
            .ok_or(WalletError::WalletNotFound(sender_id))?;
        let mut receiver = store
            .wallet(receiver_id)
            .ok_or(WalletError::WalletNotFound(receiver_id))?;

        let transfer = Transfer {
            id: TransferId::new(),
            sender_id,
            receiver_id,
            date,
            amount,
            description: description.to_string(),
        };
        let id = transfer.id;

        store.atomically(|s| {
            sender.apply(-amount);
            receiver.apply(amount);
            s.save_wallet(sender);
            s.save_wallet(receiver);
            s.save_transfer(transfer);
            Ok::<_, WalletError>(())
        })?;

        info!(sender = %sender_id, receiver = %receiver_id, %amount, "transfer completed");
        Ok(id)
    }
}
