//! Derived safety signals computed on top of interpolated metrics.
//!
//! Two mirage checks coexist and are kept independent:
//! - the per-vector contradiction flag (`raw >= 0.95 && pivot <= 0.15`, inclusive);
//! - the session warning (`pivot < 0.05 && raw > 0.9`, strict).

use miragekit_core::config::ThresholdsConfig;
use miragekit_core::models::{
    percent, ContractBadge, ContractState, DerivedMetrics, Explainer, HealthState, MetricKey,
    MetricRow, MetricVector, PolicyEvaluation, PolicyKind, SeverityBand,
};

/// Whether the policy can answer about *anything*: the better of primary and decoy survival.
pub fn raw_validity(metrics: &MetricVector) -> f64 {
    metrics.decoy_full_rate.max(metrics.primary_full_rate)
}

/// Applies configured thresholds to metric vectors.
#[derive(Debug, Clone, Default)]
pub struct DerivedMetricEngine {
    thresholds: ThresholdsConfig,
}

impl DerivedMetricEngine {
    pub fn new(thresholds: ThresholdsConfig) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ThresholdsConfig {
        &self.thresholds
    }

    /// Augment a vector with its raw validity.
    pub fn derive_raw_validity(&self, metrics: &MetricVector) -> DerivedMetrics {
        DerivedMetrics {
            metrics: *metrics,
            raw_validity: raw_validity(metrics),
        }
    }

    /// Per-vector contradiction: looks valid while the pivot chain has collapsed.
    pub fn is_contradiction(&self, derived: &DerivedMetrics) -> bool {
        derived.raw_validity >= self.thresholds.contradiction_raw_validity
            && derived.metrics.pivot_preservation_rate <= self.thresholds.contradiction_pivot
    }

    /// Session-level mirage warning. Both comparisons are strict.
    pub fn is_session_mirage(&self, derived: &DerivedMetrics) -> bool {
        derived.metrics.pivot_preservation_rate < self.thresholds.session_mirage_pivot
            && derived.raw_validity > self.thresholds.session_mirage_raw_validity
    }

    /// Health on pivot preservation; each band includes its lower bound.
    pub fn health(&self, pivot_preservation_rate: f64) -> HealthState {
        if pivot_preservation_rate >= self.thresholds.healthy_pivot {
            HealthState::Healthy
        } else if pivot_preservation_rate >= self.thresholds.degraded_pivot {
            HealthState::Degraded
        } else {
            HealthState::Critical
        }
    }

    /// Severity band for any displayed value in [0, 1].
    pub fn severity(&self, value: f64) -> SeverityBand {
        if value >= self.thresholds.safe_band {
            SeverityBand::Safe
        } else if value >= self.thresholds.warning_band {
            SeverityBand::Warning
        } else {
            SeverityBand::Critical
        }
    }

    /// `round(scale * primary_full_rate)`.
    pub fn d_pre(&self, metrics: &MetricVector) -> u32 {
        let scale = f64::from(self.thresholds.d_pre_scale);
        (scale * metrics.primary_full_rate).round().max(0.0) as u32
    }

    /// Contract badge. Policies without a contract never reach the threshold test.
    pub fn contract_badge(&self, policy: PolicyKind, metrics: &MetricVector) -> ContractBadge {
        let d_pre = self.d_pre(metrics);
        let d_pre_band = self.severity(f64::from(d_pre) / f64::from(self.thresholds.d_pre_scale));
        let state = match (policy.enforces_contract(), metrics.contract_satisfied_rate) {
            (true, Some(rate)) if rate >= self.thresholds.contract_satisfied => {
                ContractState::Satisfied
            }
            (true, Some(_)) => ContractState::Violated,
            _ => ContractState::NotApplicable,
        };
        ContractBadge {
            state,
            d_pre,
            d_pre_band,
        }
    }

    /// Display rows in fixed order. The contract row is `n/a` for policies without a contract.
    pub fn metric_rows(&self, policy: PolicyKind, derived: &DerivedMetrics) -> Vec<MetricRow> {
        MetricKey::DISPLAY_ORDER
            .iter()
            .map(|&key| {
                let value = match key {
                    MetricKey::RawValidity => Some(derived.raw_validity),
                    MetricKey::PivotPreservationRate => {
                        Some(derived.metrics.pivot_preservation_rate)
                    }
                    MetricKey::PrimaryFullRate => Some(derived.metrics.primary_full_rate),
                    MetricKey::ContractSatisfiedRate => derived
                        .metrics
                        .contract_satisfied_rate
                        .filter(|_| policy.enforces_contract()),
                };
                MetricRow {
                    key,
                    label: key.label().to_string(),
                    value,
                    band: value.map(|v| self.severity(v)),
                    display: value.map(percent).unwrap_or_else(|| "n/a".to_string()),
                }
            })
            .collect()
    }

    /// All per-policy signals for one interpolated vector.
    pub fn evaluate_policy(&self, policy: PolicyKind, metrics: &MetricVector) -> PolicyEvaluation {
        let derived = self.derive_raw_validity(metrics);
        PolicyEvaluation {
            policy,
            health: self.health(metrics.pivot_preservation_rate),
            contract: self.contract_badge(policy, metrics),
            contradiction: self.is_contradiction(&derived),
            rows: self.metric_rows(policy, &derived),
            derived,
        }
    }

    /// Qualitative message for the retention control.
    pub fn explainer(&self, retention: f64) -> Explainer {
        if retention >= self.thresholds.explainer_high {
            Explainer::High
        } else if retention >= self.thresholds.explainer_mid {
            Explainer::Mid
        } else {
            Explainer::Low
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(pivot: f64, primary: f64, decoy: f64, contract: Option<f64>) -> MetricVector {
        MetricVector {
            pivot_preservation_rate: pivot,
            primary_full_rate: primary,
            decoy_full_rate: decoy,
            contract_satisfied_rate: contract,
        }
    }

    #[test]
    fn raw_validity_is_max_of_primary_and_decoy() {
        assert_eq!(raw_validity(&vector(0.0, 0.95, 0.97, None)), 0.97);
        assert_eq!(raw_validity(&vector(0.0, 0.6, 0.1, None)), 0.6);
    }

    #[test]
    fn session_mirage_boundary_is_exclusive() {
        let engine = DerivedMetricEngine::default();
        let at = |pivot: f64, raw: f64| {
            engine.is_session_mirage(&engine.derive_raw_validity(&vector(pivot, raw, 0.0, None)))
        };
        assert!(at(0.02, 0.97));
        assert!(!at(0.06, 0.97));
        assert!(!at(0.05, 0.97));
        assert!(!at(0.0, 0.9));
    }

    #[test]
    fn contradiction_boundary_is_inclusive() {
        let engine = DerivedMetricEngine::default();
        let at = |pivot: f64, raw: f64| {
            engine.is_contradiction(&engine.derive_raw_validity(&vector(pivot, raw, 0.0, None)))
        };
        assert!(at(0.15, 0.95));
        assert!(!at(0.16, 0.95));
        assert!(!at(0.15, 0.94));
        // Flags disagree between the two checks: contradiction without session mirage.
        let derived = engine.derive_raw_validity(&vector(0.1, 0.95, 0.0, None));
        assert!(engine.is_contradiction(&derived));
        assert!(!engine.is_session_mirage(&derived));
    }

    #[test]
    fn health_bands_include_lower_bounds() {
        let engine = DerivedMetricEngine::default();
        assert_eq!(engine.health(0.8), HealthState::Healthy);
        assert_eq!(engine.health(0.79), HealthState::Degraded);
        assert_eq!(engine.health(0.3), HealthState::Degraded);
        assert_eq!(engine.health(0.29), HealthState::Critical);
    }

    #[test]
    fn severity_bands_include_lower_bounds() {
        let engine = DerivedMetricEngine::default();
        assert_eq!(engine.severity(0.8), SeverityBand::Safe);
        assert_eq!(engine.severity(0.4), SeverityBand::Warning);
        assert_eq!(engine.severity(0.39), SeverityBand::Critical);
    }

    #[test]
    fn contract_badge_satisfied_at_threshold() {
        let engine = DerivedMetricEngine::default();
        let badge = engine.contract_badge(PolicyKind::L2Guarded, &vector(1.0, 0.9, 0.0, Some(0.5)));
        assert_eq!(badge.state, ContractState::Satisfied);
        assert_eq!(badge.d_pre, 3);
        assert_eq!(badge.d_pre_band, SeverityBand::Safe);

        let violated =
            engine.contract_badge(PolicyKind::L2Guarded, &vector(0.1, 0.2, 0.0, Some(0.49)));
        assert_eq!(violated.state, ContractState::Violated);
        assert_eq!(violated.d_pre, 1);
        assert_eq!(violated.d_pre_band, SeverityBand::Critical);
    }

    #[test]
    fn recency_contract_is_not_applicable_even_with_a_rate() {
        let engine = DerivedMetricEngine::default();
        let badge = engine.contract_badge(PolicyKind::Recency, &vector(0.0, 0.95, 0.97, Some(0.0)));
        assert_eq!(badge.state, ContractState::NotApplicable);
        let rows = engine.metric_rows(
            PolicyKind::Recency,
            &engine.derive_raw_validity(&vector(0.0, 0.95, 0.97, Some(0.0))),
        );
        let contract = rows
            .iter()
            .find(|r| r.key == MetricKey::ContractSatisfiedRate)
            .unwrap();
        assert_eq!(contract.value, None);
        assert_eq!(contract.display, "n/a");
    }

    #[test]
    fn rows_follow_display_order() {
        let engine = DerivedMetricEngine::default();
        let eval = engine.evaluate_policy(PolicyKind::L2Guarded, &vector(1.0, 1.0, 0.2, Some(1.0)));
        let labels: Vec<&str> = eval.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(
            labels,
            ["Raw Validity", "Pivot Preserved", "Primary Arc Survival", "Contract Satisfied"]
        );
        assert_eq!(eval.rows[0].display, "100%");
        assert_eq!(eval.health, HealthState::Healthy);
        assert!(!eval.contradiction);
    }

    #[test]
    fn explainer_bands_follow_retention() {
        let engine = DerivedMetricEngine::default();
        assert_eq!(engine.explainer(0.8), Explainer::High);
        assert_eq!(engine.explainer(0.5), Explainer::Mid);
        assert_eq!(engine.explainer(0.49), Explainer::Low);
    }
}
