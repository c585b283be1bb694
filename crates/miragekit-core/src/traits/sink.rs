//! Output sink for evaluation results, with no-op defaults.

use crate::errors::LoadError;
use crate::models::{ComparisonSummary, Evaluation, WitnessView};

/// Receives everything the evaluator publishes.
///
/// Renderers implement only the methods they care about. The evaluator never
/// looks anything up in a renderer; it writes to the sinks it was given.
pub trait EvaluationSink: Send + Sync {
    /// A fresh evaluation for the current retention value.
    fn on_evaluation(&self, _evaluation: &Evaluation) {}

    /// Whether the session-level mirage warning should be visible.
    fn on_mirage_warning(&self, _visible: bool) {}

    /// The kept/dropped chunk audit for both policies.
    fn on_comparison(&self, _summary: &ComparisonSummary) {}

    /// Qualitative witness fields.
    fn on_witness(&self, _witness: &WitnessView) {}

    /// A source document failed to load; no evaluation will follow.
    fn on_load_error(&self, _error: &LoadError) {}
}
