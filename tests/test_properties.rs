//! Property-based tests for the statistics core.

use proptest::prelude::*;
use rivalry_core::{
    is_significant, normal_cdf, standard_deviation, SeasonStatistics, DEFAULT_ALPHA,
};

fn season() -> impl Strategy<Value = SeasonStatistics> {
    (0u64..200, 0u64..200).prop_flat_map(|(games, losers_games)| {
        (0..=games, 0..=losers_games).prop_map(move |(correct, wins)| {
            SeasonStatistics::new(games, correct, wins, losers_games)
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_std_dev_non_negative(values in prop::collection::vec(-1000i32..1000, 1..50)) {
        let values: Vec<f64> = values.into_iter().map(f64::from).collect();
        let sd = standard_deviation(&values).unwrap();
        prop_assert!(sd >= 0.0);
    }

    #[test]
    fn prop_std_dev_zero_iff_all_equal(values in prop::collection::vec(-1000i32..1000, 1..50)) {
        let all_equal = values.iter().all(|v| *v == values[0]);
        let values: Vec<f64> = values.into_iter().map(f64::from).collect();
        let sd = standard_deviation(&values).unwrap();
        prop_assert_eq!(sd == 0.0, all_equal, "sd = {}", sd);
    }

    #[test]
    fn prop_constant_sequence_has_zero_deviation(value in -1000i32..1000, len in 1usize..50) {
        let values = vec![f64::from(value); len];
        prop_assert_eq!(standard_deviation(&values).unwrap(), 0.0);
    }

    #[test]
    fn prop_significance_symmetric((successes, total) in (1u64..10_000).prop_flat_map(|t| (0..=t, Just(t)))) {
        let a = is_significant(successes, total, DEFAULT_ALPHA).unwrap();
        let b = is_significant(total - successes, total, DEFAULT_ALPHA).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_cdf_symmetric(z in -10.0f64..10.0) {
        prop_assert!((normal_cdf(z) + normal_cdf(-z) - 1.0).abs() < 1e-8);
    }

    #[test]
    fn prop_cdf_in_unit_interval_and_monotone(a in -8.0f64..8.0, b in -8.0f64..8.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!((0.0..=1.0).contains(&normal_cdf(lo)));
        prop_assert!(normal_cdf(lo) <= normal_cdf(hi) + 1e-7);
    }

    #[test]
    fn prop_aggregation_order_independent(seasons in prop::collection::vec(season(), 0..30)) {
        let forward: SeasonStatistics = seasons.iter().sum();
        let backward: SeasonStatistics = seasons.iter().rev().sum();

        let mut running = SeasonStatistics::default();
        for s in &seasons {
            running += *s;
        }

        prop_assert_eq!(forward, backward);
        prop_assert_eq!(forward, running);
        prop_assert!(forward.check().is_ok());
    }
}

#[test]
fn test_cdf_at_zero() {
    assert!((normal_cdf(0.0) - 0.5).abs() < 1e-6);
}
