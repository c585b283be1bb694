//! Output of one evaluation tick, as handed to renderers.

use serde::{Deserialize, Serialize};

use super::metric_vector::MetricVector;
use super::policy::{PolicyKind, PolicyPair};

/// Format a rate in [0, 1] as a whole percentage, e.g. `0.974` → `"97%"`.
pub fn percent(value: f64) -> String {
    format!("{}%", (value * 100.0).round() as i64)
}

/// Interpolated metrics augmented with the derived raw validity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    #[serde(flatten)]
    pub metrics: MetricVector,
    /// `max(decoy_full_rate, primary_full_rate)`.
    pub raw_validity: f64,
}

/// Three-way health classification on pivot preservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    Degraded,
    Critical,
}

impl HealthState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Degraded => "degraded",
            Self::Critical => "critical",
        }
    }
}

/// Severity band for any displayed number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityBand {
    Safe,
    Warning,
    Critical,
}

impl SeverityBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractState {
    Satisfied,
    Violated,
    /// The policy enforces no contract; the threshold is never evaluated.
    NotApplicable,
}

/// Contract status plus the `d_pre` proxy shown beside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractBadge {
    pub state: ContractState,
    pub d_pre: u32,
    /// Severity of `d_pre` relative to its scale.
    pub d_pre_band: SeverityBand,
}

impl ContractBadge {
    pub fn label(&self) -> String {
        match self.state {
            ContractState::Satisfied => {
                format!("\u{2726} Contract Satisfied \u{00b7} d_pre = {}", self.d_pre)
            }
            ContractState::Violated => {
                format!("\u{2727} Contract Violated \u{00b7} d_pre = {}", self.d_pre)
            }
            ContractState::NotApplicable => {
                format!("Contract n/a \u{00b7} d_pre = {}", self.d_pre)
            }
        }
    }
}

/// Metrics shown per policy, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    RawValidity,
    PivotPreservationRate,
    PrimaryFullRate,
    ContractSatisfiedRate,
}

impl MetricKey {
    pub const DISPLAY_ORDER: [MetricKey; 4] = [
        MetricKey::RawValidity,
        MetricKey::PivotPreservationRate,
        MetricKey::PrimaryFullRate,
        MetricKey::ContractSatisfiedRate,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::RawValidity => "raw_validity",
            Self::PivotPreservationRate => "pivot_preservation_rate",
            Self::PrimaryFullRate => "primary_full_rate",
            Self::ContractSatisfiedRate => "contract_satisfied_rate",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::RawValidity => "Raw Validity",
            Self::PivotPreservationRate => "Pivot Preserved",
            Self::PrimaryFullRate => "Primary Arc Survival",
            Self::ContractSatisfiedRate => "Contract Satisfied",
        }
    }
}

/// One displayed metric. `value` and `band` are `None` when not applicable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRow {
    pub key: MetricKey,
    pub label: String,
    pub value: Option<f64>,
    pub band: Option<SeverityBand>,
    /// `"97%"`, or `"n/a"`.
    pub display: String,
}

/// Everything derived for one policy at one retention value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyEvaluation {
    pub policy: PolicyKind,
    pub derived: DerivedMetrics,
    pub health: HealthState,
    pub contract: ContractBadge,
    /// Per-vector contradiction flag: high raw validity over collapsed pivot preservation.
    pub contradiction: bool,
    pub rows: Vec<MetricRow>,
}

/// Qualitative message keyed on the retention control alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Explainer {
    High,
    Mid,
    Low,
}

impl Explainer {
    pub fn message(&self) -> &'static str {
        match self {
            Self::High => "Both methods safe at this retention. Drag left to see divergence.",
            Self::Mid => "Degradation zone. Predecessor support thinning.",
            Self::Low => "Mirage active. Naive solver substituted pivot identity.",
        }
    }
}

/// Result of evaluating both policies at one retention value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Retention fraction in [0, 1].
    pub retention: f64,
    pub policies: PolicyPair<PolicyEvaluation>,
    /// Session-level mirage warning, raised from the ungoverned policy.
    pub session_mirage: bool,
    pub explainer: Explainer,
}
