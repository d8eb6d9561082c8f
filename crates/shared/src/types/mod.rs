//! Common types used across the engine.

pub mod id;
pub mod money;
pub mod year_month;

pub use id::*;
pub use year_month::YearMonth;
