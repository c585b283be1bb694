use std::io::Write;
use std::sync::Mutex;

use miragekit_core::errors::LoadError;
use miragekit_core::models::{ComparisonSummary, Evaluation, WitnessView};
use miragekit_core::traits::EvaluationSink;
use serde::Serialize;

use super::write_locked;

/// One JSON object per line, tagged by record type.
#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum JsonRecord<'a> {
    Evaluation(&'a Evaluation),
    MirageWarning { visible: bool },
    Comparison(&'a ComparisonSummary),
    Witness(&'a WitnessView),
    LoadError { document: &'a str, message: String },
}

/// Machine-readable output as JSON lines.
pub struct JsonSink {
    out: Mutex<Box<dyn Write + Send>>,
}

impl JsonSink {
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }

    fn emit(&self, record: &JsonRecord<'_>) {
        match serde_json::to_string(record) {
            Ok(line) => write_locked(&self.out, &format!("{line}\n")),
            Err(e) => tracing::warn!(error = %e, "failed to serialize output record"),
        }
    }
}

impl EvaluationSink for JsonSink {
    fn on_evaluation(&self, evaluation: &Evaluation) {
        self.emit(&JsonRecord::Evaluation(evaluation));
    }

    fn on_mirage_warning(&self, visible: bool) {
        self.emit(&JsonRecord::MirageWarning { visible });
    }

    fn on_comparison(&self, summary: &ComparisonSummary) {
        self.emit(&JsonRecord::Comparison(summary));
    }

    fn on_witness(&self, witness: &WitnessView) {
        self.emit(&JsonRecord::Witness(witness));
    }

    fn on_load_error(&self, error: &LoadError) {
        self.emit(&JsonRecord::LoadError {
            document: error.document(),
            message: error.to_string(),
        });
    }
}
