//! Property tests for the installment distribution invariant.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::installment::split_installments;
use super::types::MAX_INSTALLMENTS;

fn total_strategy() -> impl Strategy<Value = Decimal> {
    // Cent totals from 0.01 up to 1,000,000.00.
    (1i64..=100_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// The parts always sum exactly to the total, for every count in range.
    #[test]
    fn prop_parts_sum_to_total(
        total in total_strategy(),
        installments in 1u32..=MAX_INSTALLMENTS,
    ) {
        let parts = split_installments(total, installments);

        prop_assert_eq!(parts.len(), installments as usize);
        let sum: Decimal = parts.iter().copied().sum();
        prop_assert_eq!(sum, total);
    }

    /// Installments 2..n are all equal, and the first absorbs at least as
    /// much as any of them.
    #[test]
    fn prop_first_installment_absorbs_remainder(
        total in total_strategy(),
        installments in 2u32..=MAX_INSTALLMENTS,
    ) {
        let parts = split_installments(total, installments);

        let tail = &parts[1..];
        prop_assert!(tail.windows(2).all(|w| w[0] == w[1]));
        prop_assert!(parts[0] >= tail[0]);
        // The remainder is less than one cent per tail installment.
        prop_assert!(parts[0] - tail[0] < Decimal::new(i64::from(installments), 2));
    }

    /// No part is negative and every part is cent-precise.
    #[test]
    fn prop_parts_are_canonical(
        total in total_strategy(),
        installments in 1u32..=MAX_INSTALLMENTS,
    ) {
        for part in split_installments(total, installments) {
            prop_assert!(part >= Decimal::ZERO);
            prop_assert_eq!(part, part.round_dp(2));
        }
    }
}
