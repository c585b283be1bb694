use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use miragekit_core::errors::LoadError;
use miragekit_core::models::{ComparisonSummary, Evaluation, WitnessView};
use miragekit_core::traits::EvaluationSink;

use super::write_locked;
use crate::render;

/// Human-readable output. Load failures go to the error stream.
pub struct TextSink {
    out: Mutex<Box<dyn Write + Send>>,
    err: Mutex<Box<dyn Write + Send>>,
    /// Last rendered mirage warning state; only transitions are printed.
    mirage_visible: AtomicBool,
}

impl TextSink {
    pub fn new(out: Box<dyn Write + Send>, err: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
            err: Mutex::new(err),
            mirage_visible: AtomicBool::new(false),
        }
    }

    pub fn stdio() -> Self {
        Self::new(Box::new(std::io::stdout()), Box::new(std::io::stderr()))
    }
}

impl EvaluationSink for TextSink {
    fn on_evaluation(&self, evaluation: &Evaluation) {
        write_locked(&self.out, &render::evaluation(evaluation));
    }

    fn on_mirage_warning(&self, visible: bool) {
        let was_visible = self.mirage_visible.swap(visible, Ordering::SeqCst);
        match (was_visible, visible) {
            (false, true) => write_locked(&self.out, &format!("{}\n", render::MIRAGE_WARNING)),
            (true, false) => write_locked(&self.out, "Mirage warning cleared\n"),
            _ => {}
        }
    }

    fn on_comparison(&self, summary: &ComparisonSummary) {
        write_locked(&self.out, &render::comparison(summary));
    }

    fn on_witness(&self, witness: &WitnessView) {
        write_locked(&self.out, &render::witness(witness));
    }

    fn on_load_error(&self, error: &LoadError) {
        write_locked(
            &self.err,
            &format!("MirageKit could not load its data: {error}\n"),
        );
    }
}
