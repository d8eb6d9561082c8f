//! Property tests for the wallet balance invariant.
//!
//! For any sequence of ledger operations, every wallet's cached balance
//! must equal the sum of the signed effects of its confirmed transactions
//! plus its net transfers, recomputed from the persisted rows.

use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use rust_decimal::Decimal;
use saldo_shared::types::{CategoryId, TransactionId, WalletId};

use super::service::WalletLedger;
use super::types::{TransactionStatus, WalletKind};
use crate::storage::{MemoryStore, TransactionRepository, WalletRepository};

/// A randomly generated ledger operation.
///
/// Operations that target an existing transaction pick one by index so the
/// generator never has to know which ids a run produced.
#[derive(Debug, Clone)]
enum Op {
    Income { second_wallet: bool, cents: i64, confirmed: bool },
    Expense { second_wallet: bool, cents: i64, confirmed: bool },
    Transfer { reverse: bool, cents: i64 },
    Confirm { pick: usize },
    Delete { pick: usize },
    ChangeAmount { pick: usize, cents: i64 },
    MoveToOtherWallet { pick: usize },
}

fn cents_strategy() -> impl Strategy<Value = i64> {
    1i64..=100_000
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<bool>(), cents_strategy(), any::<bool>()).prop_map(
            |(second_wallet, cents, confirmed)| Op::Income {
                second_wallet,
                cents,
                confirmed
            }
        ),
        (any::<bool>(), cents_strategy(), any::<bool>()).prop_map(
            |(second_wallet, cents, confirmed)| Op::Expense {
                second_wallet,
                cents,
                confirmed
            }
        ),
        (any::<bool>(), cents_strategy())
            .prop_map(|(reverse, cents)| Op::Transfer { reverse, cents }),
        (0usize..32).prop_map(|pick| Op::Confirm { pick }),
        (0usize..32).prop_map(|pick| Op::Delete { pick }),
        (0usize..32, cents_strategy())
            .prop_map(|(pick, cents)| Op::ChangeAmount { pick, cents }),
        (0usize..32).prop_map(|pick| Op::MoveToOtherWallet { pick }),
    ]
}

fn amount(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

fn op_date() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 1, 15)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn pick_existing(ids: &[TransactionId], pick: usize) -> Option<TransactionId> {
    if ids.is_empty() {
        None
    } else {
        Some(ids[pick % ids.len()])
    }
}

/// Sum of the signed effects of a wallet's persisted rows.
fn confirmed_effects(store: &MemoryStore, wallet: WalletId) -> Decimal {
    store
        .transactions_by_wallet(wallet)
        .iter()
        .map(super::types::WalletTransaction::balance_effect)
        .sum()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Balance consistency under arbitrary operation sequences.
    #[test]
    fn prop_balance_matches_recomputation(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let mut store = MemoryStore::new();
        let category = CategoryId::new();
        let wallet_a =
            WalletLedger::create_wallet(&mut store, "A", WalletKind::Checking, amount(10_000))
                .unwrap();
        let wallet_b =
            WalletLedger::create_wallet(&mut store, "B", WalletKind::Savings, amount(5_000))
                .unwrap();

        let mut tx_ids: Vec<TransactionId> = Vec::new();
        // Net transfer effect per wallet, tracked alongside the run.
        let mut net_transfer_a = Decimal::ZERO;
        let mut net_transfer_b = Decimal::ZERO;

        for op in ops {
            match op {
                Op::Income { second_wallet, cents, confirmed } => {
                    let wallet = if second_wallet { wallet_b } else { wallet_a };
                    let status = if confirmed {
                        TransactionStatus::Confirmed
                    } else {
                        TransactionStatus::Pending
                    };
                    let id = WalletLedger::add_income(
                        &mut store, wallet, category, op_date(), amount(cents), "income", status,
                    )
                    .unwrap();
                    tx_ids.push(id);
                }
                Op::Expense { second_wallet, cents, confirmed } => {
                    let wallet = if second_wallet { wallet_b } else { wallet_a };
                    let status = if confirmed {
                        TransactionStatus::Confirmed
                    } else {
                        TransactionStatus::Pending
                    };
                    let id = WalletLedger::add_expense(
                        &mut store, wallet, category, op_date(), amount(cents), "expense", status,
                    )
                    .unwrap();
                    tx_ids.push(id);
                }
                Op::Transfer { reverse, cents } => {
                    let (from, to) = if reverse {
                        (wallet_b, wallet_a)
                    } else {
                        (wallet_a, wallet_b)
                    };
                    WalletLedger::transfer_money(
                        &mut store, from, to, op_date(), amount(cents), "transfer",
                    )
                    .unwrap();
                    let delta = amount(cents);
                    if reverse {
                        net_transfer_b -= delta;
                        net_transfer_a += delta;
                    } else {
                        net_transfer_a -= delta;
                        net_transfer_b += delta;
                    }
                }
                Op::Confirm { pick } => {
                    if let Some(id) = pick_existing(&tx_ids, pick) {
                        // Confirming an already-confirmed row is a legal
                        // rejection; balances must be untouched either way.
                        let _ = WalletLedger::confirm_transaction(&mut store, id);
                    }
                }
                Op::Delete { pick } => {
                    if let Some(id) = pick_existing(&tx_ids, pick) {
                        WalletLedger::delete_transaction(&mut store, id).unwrap();
                        tx_ids.retain(|t| *t != id);
                    }
                }
                Op::ChangeAmount { pick, cents } => {
                    if let Some(id) = pick_existing(&tx_ids, pick) {
                        let mut updated = store.transaction(id).unwrap();
                        updated.amount = amount(cents);
                        WalletLedger::update_transaction(&mut store, updated).unwrap();
                    }
                }
                Op::MoveToOtherWallet { pick } => {
                    if let Some(id) = pick_existing(&tx_ids, pick) {
                        let mut updated = store.transaction(id).unwrap();
                        updated.wallet_id = if updated.wallet_id == wallet_a {
                            wallet_b
                        } else {
                            wallet_a
                        };
                        WalletLedger::update_transaction(&mut store, updated).unwrap();
                    }
                }
            }
        }

        let expected_a = amount(10_000) + confirmed_effects(&store, wallet_a) + net_transfer_a;
        let expected_b = amount(5_000) + confirmed_effects(&store, wallet_b) + net_transfer_b;

        prop_assert_eq!(store.wallet(wallet_a).unwrap().balance, expected_a);
        prop_assert_eq!(store.wallet(wallet_b).unwrap().balance, expected_b);
    }
}
