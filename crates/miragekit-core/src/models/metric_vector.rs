use serde::{Deserialize, Serialize};

use crate::errors::IntegrityError;

/// Stored benchmark metrics for one policy at one retention level.
///
/// `raw_validity` is never stored; it is always derived.
/// The three survival rates are required. `contract_satisfied_rate` may be
/// `None` only for policies that enforce no contract.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricVector {
    pub pivot_preservation_rate: f64,
    pub primary_full_rate: f64,
    pub decoy_full_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_satisfied_rate: Option<f64>,
}

impl MetricVector {
    /// Field names in fixture order.
    pub const FIELDS: [&'static str; 4] = [
        "pivot_preservation_rate",
        "primary_full_rate",
        "decoy_full_rate",
        "contract_satisfied_rate",
    ];

    /// Value of a stored field by name. Unknown names and an absent contract rate yield `None`.
    pub fn field(&self, name: &str) -> Option<f64> {
        match name {
            "pivot_preservation_rate" => Some(self.pivot_preservation_rate),
            "primary_full_rate" => Some(self.primary_full_rate),
            "decoy_full_rate" => Some(self.decoy_full_rate),
            "contract_satisfied_rate" => self.contract_satisfied_rate,
            _ => None,
        }
    }

    /// Reject any present field that is non-finite or outside [0, 1].
    pub fn validate(&self, policy: &str, level: &str) -> Result<(), IntegrityError> {
        for field in Self::FIELDS {
            if let Some(value) = self.field(field) {
                if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                    return Err(IntegrityError::MetricOutOfRange {
                        policy: policy.to_string(),
                        level: level.to_string(),
                        field,
                        value,
                    });
                }
            }
        }
        Ok(())
    }
}
