use serde::{Deserialize, Serialize};

use super::defaults;

/// Naming conventions recognized by the chunk classifier.
///
/// A prefix matches case-insensitively when it is followed by `_` or `-`,
/// so `hc` matches `hc_003` and `HC-7` but not `hcx_1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub predecessor_prefixes: Vec<String>,
    pub noise_prefixes: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            predecessor_prefixes: defaults::DEFAULT_PREDECESSOR_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
            noise_prefixes: defaults::DEFAULT_NOISE_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}
