//! Property-based tests for cross rates and credit rounding.

use proptest::prelude::*;
use remit_shared::types::Money;
use rust_decimal::Decimal;

use super::cross_rate;

/// Positive reference rates between 0.0001 and 1000.0000.
fn rate_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=10_000_000i64).prop_map(|n| Decimal::new(n, 4))
}

/// Positive amounts at money scale, up to 1,000,000.00.
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=100_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A currency's rate against itself is exactly one.
    #[test]
    fn prop_cross_rate_self_is_one(rate in rate_strategy()) {
        prop_assert_eq!(cross_rate(rate, rate, 10), Some(Decimal::ONE));
    }

    /// Cross rates of positive inputs are positive.
    #[test]
    fn prop_cross_rate_positive(from in rate_strategy(), to in rate_strategy()) {
        let factor = cross_rate(from, to, 10).unwrap();
        prop_assert!(factor > Decimal::ZERO);
    }

    /// Flooring a converted amount never credits more than the exact value
    /// and loses less than one minor unit.
    #[test]
    fn prop_floor_never_over_credits(
        amount in amount_strategy(),
        from in rate_strategy(),
        to in rate_strategy(),
    ) {
        let factor = cross_rate(from, to, 10).unwrap();
        let exact = amount * factor;
        let credited = Money::floor(exact).amount();

        prop_assert!(credited <= exact);
        prop_assert!(exact - credited < Decimal::new(1, 2));
    }

    /// Lower precision never moves the rate further than half a unit in
    /// the last kept digit, relative to the higher-precision rate.
    #[test]
    fn prop_precision_is_monotone(from in rate_strategy(), to in rate_strategy()) {
        let fine = cross_rate(from, to, 10).unwrap();
        let coarse = cross_rate(from, to, 6).unwrap();
        let tolerance = fine.abs() * Decimal::new(1, 5);
        prop_assert!((fine - coarse).abs() <= tolerance);
    }
}
