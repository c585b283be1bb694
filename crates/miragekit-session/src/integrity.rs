//! Release artifact integrity checks.
//!
//! Three checks, each producing findings instead of failing:
//! - replay consistency: every benchmark cell matches its replay row within tolerance;
//! - headline regression: at each headline fraction the guarded policy is perfect
//!   and the recency policy has fully collapsed;
//! - certificate sync: two certificate copies are structurally identical.

use chrono::{DateTime, Utc};
use miragekit_core::config::IntegrityConfig;
use miragekit_core::models::{level_key, BenchmarkSuite, MetricVector, PolicyKind};
use miragekit_observability::integrity_span;
use miragekit_observability::tracing_setup::events;
use serde::{Deserialize, Serialize};

/// One `(policy, fraction)` row of an offline replay run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayRow {
    pub policy: PolicyKind,
    pub fraction: f64,
    pub pivot_preservation_rate: f64,
    pub primary_full_rate: f64,
    pub decoy_full_rate: f64,
    #[serde(default)]
    pub contract_satisfied_rate: Option<f64>,
}

impl ReplayRow {
    fn field(&self, name: &str) -> Option<f64> {
        match name {
            "pivot_preservation_rate" => Some(self.pivot_preservation_rate),
            "primary_full_rate" => Some(self.primary_full_rate),
            "decoy_full_rate" => Some(self.decoy_full_rate),
            "contract_satisfied_rate" => self.contract_satisfied_rate,
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplaySummary {
    pub summary: Vec<ReplayRow>,
}

impl ReplaySummary {
    /// Row for `policy` at `fraction`, matched on the canonical level key.
    pub fn row(&self, policy: PolicyKind, fraction: f64) -> Option<&ReplayRow> {
        let key = level_key(fraction);
        self.summary
            .iter()
            .find(|row| row.policy == policy && level_key(row.fraction) == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrityCheck {
    ReplayConsistency,
    HeadlineRegression,
    CertificateSync,
}

impl IntegrityCheck {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReplayConsistency => "replay_consistency",
            Self::HeadlineRegression => "headline_regression",
            Self::CertificateSync => "certificate_sync",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrityFinding {
    pub check: IntegrityCheck,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrityReport {
    pub generated_at: DateTime<Utc>,
    pub checks_run: Vec<IntegrityCheck>,
    pub findings: Vec<IntegrityFinding>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn findings_for(&self, check: IntegrityCheck) -> impl Iterator<Item = &IntegrityFinding> {
        self.findings.iter().filter(move |f| f.check == check)
    }
}

/// blake3 fingerprint of a JSON value. Object keys serialize in sorted order,
/// so formatting and key order in the source file do not affect the result.
pub fn fingerprint(value: &serde_json::Value) -> Result<String, serde_json::Error> {
    let bytes = serde_json::to_vec(value)?;
    Ok(blake3::hash(&bytes).to_hex().to_string())
}

#[derive(Debug, Clone, Default)]
pub struct IntegrityChecker {
    config: IntegrityConfig,
}

impl IntegrityChecker {
    pub fn new(config: IntegrityConfig) -> Self {
        Self { config }
    }

    fn close(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.config.replay_tolerance
    }

    /// Every `(policy, level)` cell of the benchmark must have a replay row whose
    /// fields agree within tolerance. Fields absent from the benchmark are skipped.
    pub fn check_replay_consistency(
        &self,
        suite: &BenchmarkSuite,
        replay: &ReplaySummary,
    ) -> Vec<IntegrityFinding> {
        let mut findings = Vec::new();
        for (policy, table) in suite.policies.iter() {
            for level in suite.levels.iter() {
                let Some(expected) = table.get(level) else {
                    continue;
                };
                let Some(row) = replay.row(policy, level) else {
                    findings.push(IntegrityFinding {
                        check: IntegrityCheck::ReplayConsistency,
                        message: format!("missing replay row for {policy} at {}", level_key(level)),
                    });
                    continue;
                };
                for field in MetricVector::FIELDS {
                    let Some(value) = expected.field(field) else {
                        continue;
                    };
                    match row.field(field) {
                        Some(replayed) if self.close(value, replayed) => {}
                        Some(replayed) => findings.push(IntegrityFinding {
                            check: IntegrityCheck::ReplayConsistency,
                            message: format!(
                                "{policy} {field} at {}: benchmark {value} vs replay {replayed}",
                                level_key(level)
                            ),
                        }),
                        None => findings.push(IntegrityFinding {
                            check: IntegrityCheck::ReplayConsistency,
                            message: format!(
                                "{policy} {field} at {}: missing from replay",
                                level_key(level)
                            ),
                        }),
                    }
                }
            }
        }
        findings
    }

    /// Guarded policy perfect and recency collapsed at every headline fraction.
    pub fn check_headline(&self, replay: &ReplaySummary) -> Vec<IntegrityFinding> {
        let expectations: [(PolicyKind, &[&str], f64); 2] = [
            (
                PolicyKind::L2Guarded,
                &["pivot_preservation_rate", "primary_full_rate", "contract_satisfied_rate"],
                1.0,
            ),
            (
                PolicyKind::Recency,
                &["pivot_preservation_rate", "primary_full_rate"],
                0.0,
            ),
        ];
        let mut findings = Vec::new();
        for &fraction in &self.config.headline_fractions {
            for (policy, fields, target) in expectations {
                let Some(row) = replay.row(policy, fraction) else {
                    findings.push(IntegrityFinding {
                        check: IntegrityCheck::HeadlineRegression,
                        message: format!(
                            "missing replay row for {policy} at {}",
                            level_key(fraction)
                        ),
                    });
                    continue;
                };
                for field in fields {
                    let actual = row.field(field);
                    if !actual.is_some_and(|v| self.close(v, target)) {
                        findings.push(IntegrityFinding {
                            check: IntegrityCheck::HeadlineRegression,
                            message: format!(
                                "{policy} {field} at {}: expected {target}, found {}",
                                level_key(fraction),
                                actual.map_or_else(|| "nothing".to_string(), |v| v.to_string())
                            ),
                        });
                    }
                }
            }
        }
        findings
    }

    /// Two certificate copies must fingerprint identically.
    pub fn check_certificate_sync(
        &self,
        primary: &serde_json::Value,
        copy: &serde_json::Value,
    ) -> Vec<IntegrityFinding> {
        match (fingerprint(primary), fingerprint(copy)) {
            (Ok(a), Ok(b)) if a == b => Vec::new(),
            (Ok(a), Ok(b)) => vec![IntegrityFinding {
                check: IntegrityCheck::CertificateSync,
                message: format!("certificate copies differ ({} vs {})", &a[..12], &b[..12]),
            }],
            (Err(e), _) | (_, Err(e)) => vec![IntegrityFinding {
                check: IntegrityCheck::CertificateSync,
                message: format!("certificate could not be fingerprinted: {e}"),
            }],
        }
    }

    /// Run the replay and headline checks, plus certificate sync when a copy is given.
    pub fn run(
        &self,
        suite: &BenchmarkSuite,
        replay: &ReplaySummary,
        certificates: Option<(&serde_json::Value, &serde_json::Value)>,
    ) -> IntegrityReport {
        let mut checks_run = Vec::new();
        let mut findings = Vec::new();

        let mut record = |check: IntegrityCheck, found: Vec<IntegrityFinding>| {
            let _span = integrity_span!(check.as_str()).entered();
            for finding in &found {
                events::integrity_violation(check.as_str(), &finding.message);
            }
            checks_run.push(check);
            findings.extend(found);
        };

        record(
            IntegrityCheck::ReplayConsistency,
            self.check_replay_consistency(suite, replay),
        );
        record(IntegrityCheck::HeadlineRegression, self.check_headline(replay));
        if let Some((primary, copy)) = certificates {
            record(
                IntegrityCheck::CertificateSync,
                self.check_certificate_sync(primary, copy),
            );
        }

        IntegrityReport {
            generated_at: Utc::now(),
            checks_run,
            findings,
        }
    }
}
