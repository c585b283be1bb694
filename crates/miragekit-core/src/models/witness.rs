use serde::{Deserialize, Serialize};

/// Qualitative record accompanying the benchmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Witness {
    /// Free-text thesis.
    pub claim: String,
    /// A single benchmark number quoted as an example of semantic regret.
    pub semantic_regret_example: f64,
    /// Ordered annotations.
    #[serde(default)]
    pub notes: Vec<String>,
}

/// Display-ready witness fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WitnessView {
    pub claim: String,
    /// Final entry of the certificate's `W` sequence to one decimal, if any.
    pub final_weight: Option<String>,
    /// Semantic regret example to three decimals.
    pub semantic_regret: String,
    pub notes: Vec<String>,
}

impl WitnessView {
    /// Combine the benchmark witness with the certificate's weight sequence.
    pub fn new(witness: &Witness, weights: &[f64]) -> Self {
        Self {
            claim: witness.claim.clone(),
            final_weight: weights.last().map(|w| format!("{w:.1}")),
            semantic_regret: format!("{:.3}", witness.semantic_regret_example),
            notes: witness.notes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_formats_weight_and_regret() {
        let witness = Witness {
            claim: "validity is not correctness".into(),
            semantic_regret_example: 0.41666,
            notes: vec!["first".into(), "second".into()],
        };
        let view = WitnessView::new(&witness, &[1.0, 2.5, 7.04]);
        assert_eq!(view.final_weight.as_deref(), Some("7.0"));
        assert_eq!(view.semantic_regret, "0.417");
        assert_eq!(view.notes, vec!["first", "second"]);

        let empty = WitnessView::new(&witness, &[]);
        assert_eq!(empty.final_weight, None);
    }
}
