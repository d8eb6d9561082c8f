//! Installment distribution.
//!
//! Splitting a debt across installments must reconcile to the cent: the
//! per-installment base is the total divided by the count, floored to
//! cents, and whatever remainder that leaves lands on the first
//! installment. The sum of the parts always equals the total exactly.

use rust_decimal::Decimal;

use saldo_shared::types::money::floor_cents;

/// Splits `total` into `installments` cent-exact parts.
///
/// Installment 1 absorbs the rounding remainder; installments 2..n all get
/// the floored base. With one installment the whole total lands on it.
///
/// `installments` must be at least 1; the service layer validates the
/// range before calling.
#[must_use]
pub fn split_installments(total: Decimal, installments: u32) -> Vec<Decimal> {
    let count = Decimal::from(installments.max(1));
    let base = floor_cents(total / count);
    let remainder = total - base * count;

    let mut amounts = vec![base; installments.max(1) as usize];
    if let Some(first) = amounts.first_mut() {
        *first += remainder;
    }
    amounts
}
