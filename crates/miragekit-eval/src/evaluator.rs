//! Evaluate both policies of a benchmark at one retention value.

use miragekit_core::config::ThresholdsConfig;
use miragekit_core::errors::IntegrityError;
use miragekit_core::models::{BenchmarkSuite, Evaluation, PolicyPair};

use crate::derived::DerivedMetricEngine;
use crate::interpolation::interpolate;

/// Stateless evaluator: the same suite and retention always yield the same result.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    engine: DerivedMetricEngine,
}

impl Evaluator {
    pub fn new(thresholds: ThresholdsConfig) -> Self {
        Self {
            engine: DerivedMetricEngine::new(thresholds),
        }
    }

    pub fn engine(&self) -> &DerivedMetricEngine {
        &self.engine
    }

    /// Interpolate and derive every signal for both policies at `retention`.
    ///
    /// The session mirage warning is raised from the ungoverned (recency)
    /// policy; the guarded policy only contributes its own contradiction flag.
    pub fn evaluate(
        &self,
        suite: &BenchmarkSuite,
        retention: f64,
    ) -> Result<Evaluation, IntegrityError> {
        let recency = interpolate(retention, &suite.levels, &suite.policies.recency)?;
        let l2_guarded = interpolate(retention, &suite.levels, &suite.policies.l2_guarded)?;
        let policies = PolicyPair::new(recency, l2_guarded)
            .map(|policy, metrics| self.engine.evaluate_policy(policy, &metrics));

        let session_mirage = self.engine.is_session_mirage(&policies.recency.derived);
        tracing::debug!(
            retention,
            session_mirage,
            recency_pivot = policies.recency.derived.metrics.pivot_preservation_rate,
            l2_guarded_pivot = policies.l2_guarded.derived.metrics.pivot_preservation_rate,
            "evaluated retention"
        );

        Ok(Evaluation {
            retention,
            session_mirage,
            explainer: self.engine.explainer(retention),
            policies,
        })
    }
}
