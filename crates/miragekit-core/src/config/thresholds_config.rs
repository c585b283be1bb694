use serde::{Deserialize, Serialize};

use super::defaults;

/// Thresholds used by the derived-metric engine.
///
/// The contradiction flag and the session mirage warning are separate pairs
/// and are evaluated independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdsConfig {
    /// Contradiction flag fires when raw validity is at least this value...
    pub contradiction_raw_validity: f64,
    /// ...and pivot preservation is at most this value.
    pub contradiction_pivot: f64,
    /// Session warning fires when pivot preservation is strictly below this value...
    pub session_mirage_pivot: f64,
    /// ...and raw validity is strictly above this value.
    pub session_mirage_raw_validity: f64,
    /// Lower bound (inclusive) of the healthy band.
    pub healthy_pivot: f64,
    /// Lower bound (inclusive) of the degraded band.
    pub degraded_pivot: f64,
    /// Lower bound (inclusive) of the safe severity band.
    pub safe_band: f64,
    /// Lower bound (inclusive) of the warning severity band.
    pub warning_band: f64,
    /// Contract counts as satisfied at or above this rate.
    pub contract_satisfied: f64,
    /// Multiplier applied to primary survival to derive `d_pre`.
    pub d_pre_scale: u32,
    /// Retention at or above which the explainer reports both policies safe.
    pub explainer_high: f64,
    /// Retention at or above which the explainer reports the degradation zone.
    pub explainer_mid: f64,
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            contradiction_raw_validity: defaults::DEFAULT_CONTRADICTION_RAW_VALIDITY,
            contradiction_pivot: defaults::DEFAULT_CONTRADICTION_PIVOT,
            session_mirage_pivot: defaults::DEFAULT_SESSION_MIRAGE_PIVOT,
            session_mirage_raw_validity: defaults::DEFAULT_SESSION_MIRAGE_RAW_VALIDITY,
            healthy_pivot: defaults::DEFAULT_HEALTHY_PIVOT,
            degraded_pivot: defaults::DEFAULT_DEGRADED_PIVOT,
            safe_band: defaults::DEFAULT_SAFE_BAND,
            warning_band: defaults::DEFAULT_WARNING_BAND,
            contract_satisfied: defaults::DEFAULT_CONTRACT_SATISFIED,
            d_pre_scale: defaults::DEFAULT_D_PRE_SCALE,
            explainer_high: defaults::DEFAULT_EXPLAINER_HIGH,
            explainer_mid: defaults::DEFAULT_EXPLAINER_MID,
        }
    }
}

impl ThresholdsConfig {
    /// Name/value pairs of every threshold that must lie in [0, 1].
    pub(crate) fn unit_interval_fields(&self) -> [(&'static str, f64); 11] {
        [
            ("contradiction_raw_validity", self.contradiction_raw_validity),
            ("contradiction_pivot", self.contradiction_pivot),
            ("session_mirage_pivot", self.session_mirage_pivot),
            ("session_mirage_raw_validity", self.session_mirage_raw_validity),
            ("healthy_pivot", self.healthy_pivot),
            ("degraded_pivot", self.degraded_pivot),
            ("safe_band", self.safe_band),
            ("warning_band", self.warning_band),
            ("contract_satisfied", self.contract_satisfied),
            ("explainer_high", self.explainer_high),
            ("explainer_mid", self.explainer_mid),
        ]
    }
}
