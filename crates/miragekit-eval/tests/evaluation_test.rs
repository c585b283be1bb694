//! End-to-end evaluation over the golden benchmark.

use miragekit_core::config::ThresholdsConfig;
use miragekit_core::errors::IntegrityError;
use miragekit_core::models::{
    BenchmarkDocument, BenchmarkSuite, ContractState, Explainer, HealthState, SeverityBand,
};
use miragekit_eval::Evaluator;

fn golden_suite() -> BenchmarkSuite {
    let doc: BenchmarkDocument = test_fixtures::load_fixture("benchmark.json");
    BenchmarkSuite::try_from(doc).unwrap()
}

#[test]
fn levels_are_sorted_on_load() {
    let suite = golden_suite();
    assert_eq!(suite.levels.as_slice(), &[0.2, 0.5, 0.8, 1.0]);
}

#[test]
fn low_retention_raises_session_mirage_on_recency() {
    let evaluator = Evaluator::default();
    let eval = evaluator.evaluate(&golden_suite(), 0.2).unwrap();

    let recency = &eval.policies.recency;
    assert_eq!(recency.derived.raw_validity, 0.97);
    assert!(eval.session_mirage);
    assert!(recency.contradiction);
    assert_eq!(recency.health, HealthState::Critical);
    assert_eq!(recency.contract.state, ContractState::NotApplicable);
    assert_eq!(eval.explainer, Explainer::Low);

    let guarded = &eval.policies.l2_guarded;
    assert!(!guarded.contradiction);
    assert_eq!(guarded.health, HealthState::Degraded);
    assert_eq!(guarded.contract.state, ContractState::Satisfied);
    assert_eq!(guarded.contract.d_pre, 2);
    assert_eq!(guarded.contract.d_pre_band, SeverityBand::Warning);
}

#[test]
fn below_lowest_level_matches_lowest_level() {
    let evaluator = Evaluator::default();
    let suite = golden_suite();
    let at_floor = evaluator.evaluate(&suite, 0.2).unwrap();
    let below = evaluator.evaluate(&suite, 0.0).unwrap();
    assert_eq!(at_floor.policies, below.policies);
    assert_eq!(below.retention, 0.0);
}

#[test]
fn full_retention_is_healthy_for_both_policies() {
    let eval = Evaluator::default().evaluate(&golden_suite(), 1.0).unwrap();
    assert!(!eval.session_mirage);
    assert_eq!(eval.explainer, Explainer::High);
    for (_, policy) in eval.policies.iter() {
        assert_eq!(policy.health, HealthState::Healthy);
        assert!(!policy.contradiction);
    }
    assert_eq!(eval.policies.l2_guarded.contract.d_pre, 3);
    assert_eq!(
        eval.policies.l2_guarded.contract.label(),
        "\u{2726} Contract Satisfied \u{00b7} d_pre = 3"
    );
}

#[test]
fn between_levels_interpolates_each_field() {
    let eval = Evaluator::default().evaluate(&golden_suite(), 0.65).unwrap();
    let recency = &eval.policies.recency.derived;
    assert!((recency.metrics.pivot_preservation_rate - 0.3).abs() < 1e-9);
    assert!((recency.metrics.primary_full_rate - 0.3).abs() < 1e-9);
    assert!((recency.metrics.decoy_full_rate - 0.7).abs() < 1e-9);
    assert!((recency.raw_validity - 0.7).abs() < 1e-9);
    assert_eq!(eval.explainer, Explainer::Mid);
}

#[test]
fn custom_thresholds_change_the_verdict() {
    let thresholds = ThresholdsConfig {
        session_mirage_raw_validity: 0.99,
        ..ThresholdsConfig::default()
    };
    let eval = Evaluator::new(thresholds).evaluate(&golden_suite(), 0.2).unwrap();
    assert!(!eval.session_mirage);
}

#[test]
fn nan_retention_is_an_integrity_error() {
    let err = Evaluator::default()
        .evaluate(&golden_suite(), f64::NAN)
        .unwrap_err();
    assert!(matches!(err, IntegrityError::InvalidRetention { .. }));
}

#[test]
fn evaluation_serializes_policy_keys() {
    let eval = Evaluator::default().evaluate(&golden_suite(), 0.5).unwrap();
    let json = serde_json::to_value(&eval).unwrap();
    assert_eq!(json["policies"]["recency"]["health"], "critical");
    assert_eq!(json["policies"]["l2_guarded"]["contract"]["state"], "satisfied");
    assert_eq!(json["session_mirage"], true);
}
