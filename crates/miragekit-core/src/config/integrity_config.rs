use serde::{Deserialize, Serialize};

use super::defaults;

/// Artifact integrity check configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrityConfig {
    /// Fractions at which the headline claims are re-asserted against the replay.
    pub headline_fractions: Vec<f64>,
    /// Maximum absolute difference between a benchmark metric and its replay row.
    pub replay_tolerance: f64,
}

impl Default for IntegrityConfig {
    fn default() -> Self {
        Self {
            headline_fractions: defaults::DEFAULT_HEADLINE_FRACTIONS.to_vec(),
            replay_tolerance: defaults::DEFAULT_REPLAY_TOLERANCE,
        }
    }
}
