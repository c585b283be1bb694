use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::level::RetentionLevels;
use super::metric_vector::MetricVector;
use super::policy::PolicyPair;
use super::policy_table::PolicyTable;
use super::witness::Witness;
use crate::errors::IntegrityError;

/// Benchmark document exactly as it appears on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkDocument {
    pub retention_levels: Vec<f64>,
    pub policies: PolicyPair<BTreeMap<String, MetricVector>>,
    pub witness: Witness,
}

/// Validated, immutable benchmark: sorted levels and one complete table per policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkSuite {
    pub levels: RetentionLevels,
    pub policies: PolicyPair<PolicyTable>,
    pub witness: Witness,
}

impl TryFrom<BenchmarkDocument> for BenchmarkSuite {
    type Error = IntegrityError;

    fn try_from(doc: BenchmarkDocument) -> Result<Self, Self::Error> {
        let levels = RetentionLevels::new(doc.retention_levels)?;
        let policies = doc
            .policies
            .try_map(|policy, raw| PolicyTable::from_raw(policy, raw, &levels))?;
        Ok(Self {
            levels,
            policies,
            witness: doc.witness,
        })
    }
}
