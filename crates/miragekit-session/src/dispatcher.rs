//! SinkDispatcher: synchronous fan-out of results to output sinks.

use std::sync::Arc;

use miragekit_core::errors::LoadError;
use miragekit_core::models::{ComparisonSummary, Evaluation, WitnessView};
use miragekit_core::traits::EvaluationSink;
use miragekit_observability::tracing_setup::events;

/// Ordered list of output sinks.
///
/// A sink that panics is logged and skipped; later sinks still receive the result.
#[derive(Default, Clone)]
pub struct SinkDispatcher {
    sinks: Vec<Arc<dyn EvaluationSink>>,
}

impl SinkDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, sink: Arc<dyn EvaluationSink>) {
        self.sinks.push(sink);
    }

    /// Builder-style [`SinkDispatcher::register`].
    pub fn with_sink(mut self, sink: Arc<dyn EvaluationSink>) -> Self {
        self.register(sink);
        self
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    fn emit<F: Fn(&dyn EvaluationSink)>(&self, method: &str, f: F) {
        for (index, sink) in self.sinks.iter().enumerate() {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(sink.as_ref());
            }));
            if result.is_err() {
                events::sink_panicked(index, method);
            }
        }
    }

    pub fn publish_evaluation(&self, evaluation: &Evaluation) {
        self.emit("on_evaluation", |s| s.on_evaluation(evaluation));
    }

    pub fn publish_mirage_warning(&self, visible: bool) {
        self.emit("on_mirage_warning", |s| s.on_mirage_warning(visible));
    }

    pub fn publish_comparison(&self, summary: &ComparisonSummary) {
        self.emit("on_comparison", |s| s.on_comparison(summary));
    }

    pub fn publish_witness(&self, witness: &WitnessView) {
        self.emit("on_witness", |s| s.on_witness(witness));
    }

    pub fn publish_load_error(&self, error: &LoadError) {
        self.emit("on_load_error", |s| s.on_load_error(error));
    }
}

impl std::fmt::Debug for SinkDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SinkDispatcher")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct Counting(AtomicUsize);

    impl EvaluationSink for Counting {
        fn on_mirage_warning(&self, _visible: bool) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct Panicking;

    impl EvaluationSink for Panicking {
        fn on_mirage_warning(&self, _visible: bool) {
            panic!("sink failure");
        }
    }

    #[test]
    fn empty_dispatcher_is_a_no_op() {
        let dispatcher = SinkDispatcher::new();
        assert_eq!(dispatcher.sink_count(), 0);
        dispatcher.publish_mirage_warning(true);
    }

    #[test]
    fn panicking_sink_does_not_block_later_sinks() {
        let counter = Arc::new(Counting(AtomicUsize::new(0)));
        let dispatcher = SinkDispatcher::new()
            .with_sink(Arc::new(Panicking))
            .with_sink(counter.clone());
        dispatcher.publish_mirage_warning(true);
        dispatcher.publish_mirage_warning(false);
        assert_eq!(counter.0.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn unimplemented_methods_default_to_no_op() {
        let counter = Arc::new(Counting(AtomicUsize::new(0)));
        let dispatcher = SinkDispatcher::new().with_sink(counter.clone());
        dispatcher.publish_load_error(&LoadError::Parse {
            document: "benchmark",
            reason: "eof".into(),
        });
        assert_eq!(counter.0.load(Ordering::SeqCst), 0);
    }
}
