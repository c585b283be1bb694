use std::collections::BTreeMap;

use serde::Serialize;

use super::level::{level_key, RetentionLevels};
use super::metric_vector::MetricVector;
use super::policy::PolicyKind;
use crate::errors::IntegrityError;

/// Validated mapping from retention level to metrics for one policy.
///
/// Keys are canonicalized with [`level_key`], so a fixture key written as
/// `"0.50"` and a lookup for level `0.5` meet at `"0.5"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PolicyTable {
    #[serde(skip)]
    policy: PolicyKind,
    entries: BTreeMap<String, MetricVector>,
}

impl PolicyTable {
    /// Validate a raw fixture table against the declared level set.
    ///
    /// Every metric must lie in [0, 1], every declared level must have an
    /// entry, and the contract rate must be present at all levels or at none.
    /// A contract-enforcing policy must carry it everywhere.
    pub fn from_raw(
        policy: PolicyKind,
        raw: BTreeMap<String, MetricVector>,
        levels: &RetentionLevels,
    ) -> Result<Self, IntegrityError> {
        let mut entries = BTreeMap::new();
        for (key, vector) in raw {
            let level = key
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|l| l.is_finite())
                .ok_or_else(|| IntegrityError::LevelKeyNotNumeric {
                    policy: policy.to_string(),
                    key: key.clone(),
                })?;
            let canonical = level_key(level);
            vector.validate(policy.as_str(), &canonical)?;
            entries.insert(canonical, vector);
        }

        for level in levels.iter() {
            let key = level_key(level);
            if !entries.contains_key(&key) {
                return Err(IntegrityError::LookupMiss {
                    policy: policy.to_string(),
                    level: key,
                });
            }
        }

        let with_contract = entries
            .values()
            .filter(|v| v.contract_satisfied_rate.is_some())
            .count();
        if with_contract != 0 && with_contract != entries.len() {
            return Err(IntegrityError::InconsistentContractRate {
                policy: policy.to_string(),
            });
        }
        if policy.enforces_contract() {
            if let Some(level) = entries
                .iter()
                .find(|(_, v)| v.contract_satisfied_rate.is_none())
                .map(|(k, _)| k.clone())
            {
                return Err(IntegrityError::MissingMetric {
                    policy: policy.to_string(),
                    level,
                    field: "contract_satisfied_rate",
                });
            }
        }

        Ok(Self { policy, entries })
    }

    /// Policy this table belongs to.
    pub fn policy(&self) -> PolicyKind {
        self.policy
    }

    /// Metrics at `level`, if the table has that level.
    pub fn get(&self, level: f64) -> Option<&MetricVector> {
        self.entries.get(&level_key(level))
    }

    /// Metrics at `level`, or a lookup-miss integrity error.
    pub fn lookup(&self, level: f64) -> Result<&MetricVector, IntegrityError> {
        self.get(level).ok_or_else(|| IntegrityError::LookupMiss {
            policy: self.policy.to_string(),
            level: level_key(level),
        })
    }

    /// Whether every entry carries a contract-satisfaction rate.
    pub fn reports_contract(&self) -> bool {
        self.entries
            .values()
            .all(|v| v.contract_satisfied_rate.is_some())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by canonical key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricVector)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
