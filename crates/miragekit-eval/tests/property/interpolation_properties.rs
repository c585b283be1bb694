use std::collections::BTreeMap;

use miragekit_core::models::{level_key, MetricVector, PolicyKind, PolicyTable, RetentionLevels};
use miragekit_eval::{bracket, interpolate, raw_validity, Bracket};
use proptest::prelude::*;

fn arb_vector() -> impl Strategy<Value = MetricVector> {
    (0.0..=1.0f64, 0.0..=1.0f64, 0.0..=1.0f64).prop_map(|(pivot, primary, decoy)| MetricVector {
        pivot_preservation_rate: pivot,
        primary_full_rate: primary,
        decoy_full_rate: decoy,
        contract_satisfied_rate: None,
    })
}

/// Distinct levels on a percent grid, each with a random vector.
fn arb_table() -> impl Strategy<Value = (RetentionLevels, PolicyTable)> {
    prop::collection::btree_set(0u32..=100, 1..6).prop_flat_map(|percents| {
        let levels: Vec<f64> = percents.iter().map(|p| f64::from(*p) / 100.0).collect();
        prop::collection::vec(arb_vector(), levels.len()).prop_map(move |vectors| {
            let raw: BTreeMap<String, MetricVector> = levels
                .iter()
                .zip(vectors)
                .map(|(level, v)| (level_key(*level), v))
                .collect();
            let levels = RetentionLevels::new(levels.clone()).unwrap();
            let table = PolicyTable::from_raw(PolicyKind::Recency, raw, &levels).unwrap();
            (levels, table)
        })
    })
}

fn within(value: f64, a: f64, b: f64) -> bool {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    value >= lo - 1e-12 && value <= hi + 1e-12
}

proptest! {
    #[test]
    fn stored_levels_are_returned_verbatim((levels, table) in arb_table()) {
        for level in levels.iter() {
            let v = interpolate(level, &levels, &table).unwrap();
            prop_assert_eq!(v, *table.get(level).unwrap());
        }
    }

    #[test]
    fn interpolated_fields_stay_between_neighbours(
        (levels, table) in arb_table(),
        retention in 0.0..=1.0f64,
    ) {
        let v = interpolate(retention, &levels, &table).unwrap();
        if let Bracket::Between { lower, upper, .. } = bracket(retention, &levels) {
            let lo = table.get(lower).unwrap();
            let hi = table.get(upper).unwrap();
            prop_assert!(within(v.pivot_preservation_rate, lo.pivot_preservation_rate, hi.pivot_preservation_rate));
            prop_assert!(within(v.primary_full_rate, lo.primary_full_rate, hi.primary_full_rate));
            prop_assert!(within(v.decoy_full_rate, lo.decoy_full_rate, hi.decoy_full_rate));
        }
    }

    #[test]
    fn retention_outside_range_clamps(
        (levels, table) in arb_table(),
        below in 0.0..=1.0f64,
        above in 0.0..=1.0f64,
    ) {
        let below = below * levels.lowest();
        let above = levels.highest() + above * (1.0 - levels.highest());
        prop_assert_eq!(
            interpolate(below, &levels, &table).unwrap(),
            *table.get(levels.lowest()).unwrap()
        );
        prop_assert_eq!(
            interpolate(above, &levels, &table).unwrap(),
            *table.get(levels.highest()).unwrap()
        );
    }

    #[test]
    fn interpolation_is_deterministic(
        (levels, table) in arb_table(),
        retention in 0.0..=1.0f64,
    ) {
        let first = interpolate(retention, &levels, &table).unwrap();
        let second = interpolate(retention, &levels, &table).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn raw_validity_dominates_both_rates(
        (levels, table) in arb_table(),
        retention in 0.0..=1.0f64,
    ) {
        let v = interpolate(retention, &levels, &table).unwrap();
        let raw = raw_validity(&v);
        prop_assert!(raw >= v.primary_full_rate);
        prop_assert!(raw >= v.decoy_full_rate);
        prop_assert!(raw == v.primary_full_rate || raw == v.decoy_full_rate);
    }
}
