//! Recurring-transaction catch-up scheduling and projections.
//!
//! - Frequency-period date stepping (daily/weekly/monthly/yearly)
//! - Catch-up generation of pending ledger transactions
//! - Active/inactive lifecycle with automatic termination past the end date
//! - Pure forward projections of upcoming occurrences

pub mod error;
pub mod service;
pub mod types;

pub use error::RecurringError;
pub use service::RecurringScheduler;
pub use types::{Frequency, RecurrenceStatus, RecurringTransaction, UpcomingTransaction};
