//! Cent-precision money helpers.
//!
//! CRITICAL: Never use floating-point for money calculations. Amounts are
//! `rust_decimal::Decimal` everywhere; these helpers pin values to two
//! decimal places with the rounding each call site needs.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Number of decimal places carried by every persisted amount.
pub const CENT_PLACES: u32 = 2;

/// Rounds to cents, half away from zero.
///
/// Applied to every amount on entry so persisted values never carry more
/// than two decimal places.
#[must_use]
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CENT_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to cents toward negative infinity.
///
/// The installment base uses this so the per-installment floor never
/// exceeds an exact division, leaving the remainder for the first
/// installment.
#[must_use]
pub fn floor_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CENT_PLACES, RoundingStrategy::ToNegativeInfinity)
}
