//! Ledger consistency engine for Saldo.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. It keeps a wallet's cached balance consistent with the
//! transactions that produced it, generates recurring obligations on a
//! catch-up schedule, and distributes credit-card debt into installments
//! under a credit-limit invariant.
//!
//! # Modules
//!
//! - `wallet` - Wallet ledger: balance-consistent transaction and transfer handling
//! - `recurring` - Recurring-transaction catch-up scheduling and projections
//! - `creditcard` - Credit-card debt, installment, invoice, and rebate accounting
//! - `category` - Minimal category entity referenced by transactions and debts
//! - `storage` - Repository collaborator contracts and the in-memory reference store

pub mod category;
pub mod creditcard;
pub mod recurring;
pub mod storage;
pub mod wallet;
