/// Data-integrity violations in a loaded benchmark or certificate.
///
/// These are never defaulted away: a silently zero-filled metric would hide
/// exactly the measurement error the evaluator exists to expose.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntegrityError {
    #[error("retention level set is empty")]
    EmptyLevels,

    #[error("retention level {level} is outside [0, 1]")]
    LevelOutOfRange { level: f64 },

    #[error("policy {policy}: table key {key:?} is not a decimal level")]
    LevelKeyNotNumeric { policy: String, key: String },

    #[error("policy {policy} at level {level}: {field} = {value} is outside [0, 1]")]
    MetricOutOfRange {
        policy: String,
        level: String,
        field: &'static str,
        value: f64,
    },

    #[error("policy {policy}: no metrics for level {level}")]
    LookupMiss { policy: String, level: String },

    #[error("policy {policy} at level {level}: required metric {field} is missing")]
    MissingMetric {
        policy: String,
        level: String,
        field: &'static str,
    },

    #[error("policy {policy}: contract_satisfied_rate is present at some levels but not others")]
    InconsistentContractRate { policy: String },

    #[error("certificate is missing required field {field}")]
    MissingCertificateField { field: String },

    #[error("retention value {value} is not a finite fraction in [0, 1]")]
    InvalidRetention { value: f64 },
}
