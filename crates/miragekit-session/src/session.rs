//! Evaluation session over one loaded benchmark and certificate.

use std::path::Path;

use chrono::{DateTime, Utc};
use miragekit_audit::{summarize, ChunkClassifier};
use miragekit_core::config::MiragekitConfig;
use miragekit_core::constants::MAX_RETENTION_PERCENT;
use miragekit_core::errors::{IntegrityError, MiragekitError, MiragekitResult};
use miragekit_core::models::{
    BenchmarkSuite, Certificate, ComparisonSummary, Evaluation, WitnessView,
};
use miragekit_eval::Evaluator;
use miragekit_observability::tracing_setup::events;
use miragekit_observability::{audit_span, evaluation_span};
use uuid::Uuid;

use crate::dispatcher::SinkDispatcher;
use crate::integrity::{IntegrityChecker, IntegrityReport, ReplaySummary};
use crate::loader::{load_documents, LoadedDocuments};

/// Immutable tables plus everything needed to evaluate and publish.
///
/// Evaluations are pure functions of the retention value; the session holds
/// no mutable evaluation state and can be shared across threads.
#[derive(Debug)]
pub struct MirageSession {
    id: Uuid,
    loaded_at: DateTime<Utc>,
    suite: BenchmarkSuite,
    certificate: Certificate,
    certificate_raw: serde_json::Value,
    config: MiragekitConfig,
    evaluator: Evaluator,
    comparison: ComparisonSummary,
    dispatcher: SinkDispatcher,
}

impl MirageSession {
    /// Build a session from already-loaded documents.
    pub fn new(
        documents: LoadedDocuments,
        config: MiragekitConfig,
        dispatcher: SinkDispatcher,
    ) -> MiragekitResult<Self> {
        let classifier = ChunkClassifier::new(&config.classifier)?;
        let comparison = {
            let _span = audit_span!(documents.certificate.full_context.pivot_id).entered();
            summarize(&documents.certificate, &classifier)
        };
        let session = Self {
            id: Uuid::new_v4(),
            loaded_at: Utc::now(),
            evaluator: Evaluator::new(config.thresholds.clone()),
            suite: documents.suite,
            certificate: documents.certificate,
            certificate_raw: documents.certificate_raw,
            config,
            comparison,
            dispatcher,
        };
        events::documents_loaded(
            &session.id.to_string(),
            session.suite.levels.len(),
            &session.certificate.full_context.pivot_id,
        );
        Ok(session)
    }

    /// Load both documents and build a session. A load failure is published to
    /// the sinks once and returned; nothing is evaluated.
    pub async fn load(
        benchmark_path: &Path,
        certificate_path: &Path,
        config: MiragekitConfig,
        dispatcher: SinkDispatcher,
    ) -> MiragekitResult<Self> {
        match load_documents(benchmark_path, certificate_path).await {
            Ok(documents) => Self::new(documents, config, dispatcher),
            Err(MiragekitError::Load(error)) => {
                dispatcher.publish_load_error(&error);
                Err(MiragekitError::Load(error))
            }
            Err(other) => Err(other),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn suite(&self) -> &BenchmarkSuite {
        &self.suite
    }

    pub fn certificate(&self) -> &Certificate {
        &self.certificate
    }

    pub fn config(&self) -> &MiragekitConfig {
        &self.config
    }

    /// Evaluate without publishing.
    pub fn evaluate_quiet(&self, retention: f64) -> Result<Evaluation, IntegrityError> {
        let _span = evaluation_span!(retention).entered();
        let evaluation = self.evaluator.evaluate(&self.suite, retention)?;
        let contradictions = evaluation
            .policies
            .iter()
            .filter(|(_, p)| p.contradiction)
            .count();
        events::evaluation_completed(retention, evaluation.session_mirage, contradictions);
        Ok(evaluation)
    }

    /// Evaluate at `retention` and publish the result and the mirage warning state.
    pub fn evaluate(&self, retention: f64) -> Result<Evaluation, IntegrityError> {
        let evaluation = self.evaluate_quiet(retention)?;
        if evaluation.session_mirage {
            let recency = &evaluation.policies.recency.derived;
            events::mirage_detected(
                retention,
                recency.metrics.pivot_preservation_rate,
                recency.raw_validity,
            );
        }
        self.dispatcher.publish_evaluation(&evaluation);
        self.dispatcher.publish_mirage_warning(evaluation.session_mirage);
        Ok(evaluation)
    }

    /// Evaluate at an integer percent of the retention control, `0..=100`.
    pub fn evaluate_percent(&self, percent: u8) -> Result<Evaluation, IntegrityError> {
        self.evaluate(percent_to_retention(percent)?)
    }

    /// Evaluate every `step` percent from `start` to `end` inclusive, without publishing.
    pub fn sweep(&self, start: u8, end: u8, step: u8) -> Result<Vec<Evaluation>, IntegrityError> {
        percent_to_retention(start)?;
        percent_to_retention(end)?;
        (start..=end)
            .step_by(usize::from(step.max(1)))
            .map(|percent| self.evaluate_quiet(f64::from(percent) / 100.0))
            .collect()
    }

    /// Kept/dropped audit of both policies, computed once at load.
    pub fn comparison(&self) -> &ComparisonSummary {
        &self.comparison
    }

    pub fn witness_view(&self) -> WitnessView {
        WitnessView::new(&self.suite.witness, &self.certificate.full_context.w)
    }

    /// Publish the retention-independent results: comparison and witness.
    pub fn publish_static(&self) {
        self.dispatcher.publish_comparison(&self.comparison);
        self.dispatcher.publish_witness(&self.witness_view());
    }

    /// The certificate exactly as loaded, pretty-printed.
    pub fn certificate_json(&self) -> MiragekitResult<String> {
        Ok(serde_json::to_string_pretty(&self.certificate_raw)?)
    }

    /// Cross-check this session's benchmark and certificate against release artifacts.
    pub fn integrity_report(
        &self,
        replay: &ReplaySummary,
        certificate_copy: Option<&serde_json::Value>,
    ) -> IntegrityReport {
        IntegrityChecker::new(self.config.integrity.clone()).run(
            &self.suite,
            replay,
            certificate_copy.map(|copy| (&self.certificate_raw, copy)),
        )
    }
}

fn percent_to_retention(percent: u8) -> Result<f64, IntegrityError> {
    let retention = f64::from(percent) / 100.0;
    if percent > MAX_RETENTION_PERCENT {
        return Err(IntegrityError::InvalidRetention { value: retention });
    }
    Ok(retention)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_control_covers_zero_to_one_hundred() {
        assert_eq!(percent_to_retention(0).unwrap(), 0.0);
        assert_eq!(percent_to_retention(20).unwrap(), 0.2);
        assert_eq!(percent_to_retention(100).unwrap(), 1.0);
        assert!(matches!(
            percent_to_retention(101),
            Err(IntegrityError::InvalidRetention { .. })
        ));
    }
}
