//! Credit-card debt, installment, invoice, and rebate accounting.
//!
//! - Card lifecycle and validation
//! - Debt registration with exact installment distribution
//! - Invoice payment with rebate offsetting and wallet debit
//! - Available-credit invariant enforcement

pub mod error;
pub mod installment;
pub mod service;
pub mod types;

#[cfg(test)]
mod installment_props;

pub use error::CreditCardError;
pub use installment::split_installments;
pub use service::CreditCardEngine;
pub use types::{
    CreditCard, CreditCardCredit, CreditCardDebt, CreditCardPayment, CreditType,
    MAX_BILLING_DAY, MAX_INSTALLMENTS,
};
