//! Fixture loader: fetch both source documents concurrently, then parse and validate.
//!
//! Both reads must succeed before anything is parsed; the first failure aborts
//! the load and no partial session is built.

use std::path::Path;

use miragekit_core::constants::{BENCHMARK_DOCUMENT, CERTIFICATE_DOCUMENT, REPLAY_DOCUMENT};
use miragekit_core::errors::{LoadError, MiragekitError, MiragekitResult};
use miragekit_core::models::{BenchmarkDocument, BenchmarkSuite, Certificate, CertificateDocument};
use miragekit_observability::load_span;
use miragekit_observability::tracing_setup::events;
use tracing::Instrument;

use crate::integrity::ReplaySummary;

/// Validated benchmark and certificate, plus the certificate as it appeared on disk.
#[derive(Debug, Clone)]
pub struct LoadedDocuments {
    pub suite: BenchmarkSuite,
    pub certificate: Certificate,
    /// Untouched certificate JSON, kept for dumps and sync checks.
    pub certificate_raw: serde_json::Value,
}

async fn read_document(document: &'static str, path: &Path) -> Result<String, LoadError> {
    tokio::fs::read_to_string(path)
        .instrument(load_span!(document, path.display()))
        .await
        .map_err(|e| LoadError::Read {
            document,
            path: path.display().to_string(),
            reason: e.to_string(),
        })
}

fn parse_json<T: serde::de::DeserializeOwned>(
    document: &'static str,
    json: &str,
) -> Result<T, LoadError> {
    serde_json::from_str(json).map_err(|e| LoadError::Parse {
        document,
        reason: e.to_string(),
    })
}

/// Parse and validate a benchmark document.
pub fn parse_benchmark(json: &str) -> MiragekitResult<BenchmarkSuite> {
    let doc: BenchmarkDocument = parse_json(BENCHMARK_DOCUMENT, json)?;
    Ok(BenchmarkSuite::try_from(doc)?)
}

/// Parse and validate a certificate document, returning the raw JSON alongside.
pub fn parse_certificate(json: &str) -> MiragekitResult<(Certificate, serde_json::Value)> {
    let raw: serde_json::Value = parse_json(CERTIFICATE_DOCUMENT, json)?;
    let doc: CertificateDocument = serde_json::from_value(raw.clone()).map_err(|e| {
        LoadError::Parse {
            document: CERTIFICATE_DOCUMENT,
            reason: e.to_string(),
        }
    })?;
    Ok((Certificate::try_from(doc)?, raw))
}

fn report_parse_failure(err: &MiragekitError) {
    if let MiragekitError::Load(e) = err {
        events::load_failed(e.document(), &e.to_string());
    }
}

/// Read both documents concurrently, then parse and validate them.
pub async fn load_documents(
    benchmark_path: &Path,
    certificate_path: &Path,
) -> MiragekitResult<LoadedDocuments> {
    let (benchmark_json, certificate_json) = tokio::try_join!(
        read_document(BENCHMARK_DOCUMENT, benchmark_path),
        read_document(CERTIFICATE_DOCUMENT, certificate_path),
    )
    .inspect_err(|e| events::load_failed(e.document(), &e.to_string()))?;

    let suite = parse_benchmark(&benchmark_json).inspect_err(report_parse_failure)?;
    let (certificate, certificate_raw) =
        parse_certificate(&certificate_json).inspect_err(report_parse_failure)?;
    Ok(LoadedDocuments {
        suite,
        certificate,
        certificate_raw,
    })
}

/// Read and parse a replay summary document for integrity checks.
pub async fn load_replay(path: &Path) -> MiragekitResult<ReplaySummary> {
    let json = read_document(REPLAY_DOCUMENT, path).await?;
    Ok(parse_json(REPLAY_DOCUMENT, &json)?)
}

/// Read an additional certificate copy as raw JSON for the sync check.
pub async fn load_certificate_raw(path: &Path) -> MiragekitResult<serde_json::Value> {
    let json = read_document(CERTIFICATE_DOCUMENT, path).await?;
    Ok(parse_json(CERTIFICATE_DOCUMENT, &json)?)
}

#[cfg(test)]
mod tests {
    use miragekit_core::errors::IntegrityError;

    use super::*;

    #[test]
    fn malformed_benchmark_is_a_load_error() {
        let err = parse_benchmark("{ not json").unwrap_err();
        match err {
            MiragekitError::Load(e) => assert_eq!(e.document(), "benchmark"),
            other => panic!("expected load error, got {other:?}"),
        }
    }

    #[test]
    fn out_of_range_metric_is_an_integrity_error() {
        let json = r#"{
            "retention_levels": [0.5],
            "policies": {
                "recency": {"0.5": {"pivot_preservation_rate": 1.2, "primary_full_rate": 0.1, "decoy_full_rate": 0.1}},
                "l2_guarded": {"0.5": {"pivot_preservation_rate": 1.0, "primary_full_rate": 1.0, "decoy_full_rate": 0.0, "contract_satisfied_rate": 1.0}}
            },
            "witness": {"claim": "c", "semantic_regret_example": 0.1}
        }"#;
        let err = parse_benchmark(json).unwrap_err();
        assert!(matches!(
            err,
            MiragekitError::Integrity(IntegrityError::MetricOutOfRange { .. })
        ));
        assert!(err.is_terminal());
    }

    #[test]
    fn guarded_table_without_contract_rate_fails_the_load() {
        let json = r#"{
            "retention_levels": [0.2, 1.0],
            "policies": {
                "recency": {
                    "0.2": {"pivot_preservation_rate": 0.0, "primary_full_rate": 0.95, "decoy_full_rate": 0.97},
                    "1.0": {"pivot_preservation_rate": 1.0, "primary_full_rate": 1.0, "decoy_full_rate": 0.0}
                },
                "l2_guarded": {
                    "0.2": {"pivot_preservation_rate": 0.7, "primary_full_rate": 0.7, "decoy_full_rate": 0.05},
                    "1.0": {"pivot_preservation_rate": 1.0, "primary_full_rate": 1.0, "decoy_full_rate": 0.0}
                }
            },
            "witness": {"claim": "c", "semantic_regret_example": 0.1}
        }"#;
        let err = parse_benchmark(json).unwrap_err();
        assert!(matches!(
            err,
            MiragekitError::Integrity(IntegrityError::MissingMetric {
                ref policy,
                ref level,
                field: "contract_satisfied_rate",
            }) if policy == "l2_guarded" && level == "0.2"
        ));
    }

    #[test]
    fn missing_survival_rate_is_a_parse_error() {
        let json = r#"{
            "retention_levels": [1.0],
            "policies": {
                "recency": {"1.0": {"pivot_preservation_rate": 1.0, "decoy_full_rate": 0.0}},
                "l2_guarded": {"1.0": {"pivot_preservation_rate": 1.0, "primary_full_rate": 1.0, "decoy_full_rate": 0.0, "contract_satisfied_rate": 1.0}}
            },
            "witness": {"claim": "c", "semantic_regret_example": 0.1}
        }"#;
        match parse_benchmark(json).unwrap_err() {
            MiragekitError::Load(e) => {
                assert_eq!(e.document(), "benchmark");
                assert!(e.to_string().contains("primary_full_rate"), "{e}");
            }
            other => panic!("expected load error, got {other:?}"),
        }
    }

    #[test]
    fn certificate_keeps_raw_json() {
        let json = test_fixtures::load_fixture_str("certificate.json");
        let (certificate, raw) = parse_certificate(&json).unwrap();
        assert_eq!(certificate.full_context.pivot_id, "PIVOT_A");
        assert_eq!(raw["full_context"]["W"][3], 4.5);
    }
}
