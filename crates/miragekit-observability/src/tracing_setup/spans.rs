//! Span definitions per phase: document load, evaluation, chunk audit, integrity checks.

/// Create a span around loading one source document.
#[macro_export]
macro_rules! load_span {
    ($document:expr, $path:expr) => {
        tracing::info_span!("miragekit.load", document = %$document, path = %$path)
    };
}

/// Create a span around one evaluation tick.
#[macro_export]
macro_rules! evaluation_span {
    ($retention:expr) => {
        tracing::info_span!("miragekit.evaluation", retention = $retention)
    };
}

/// Create a span around summarizing a certificate.
#[macro_export]
macro_rules! audit_span {
    ($pivot_id:expr) => {
        tracing::info_span!("miragekit.audit", pivot_id = %$pivot_id)
    };
}

/// Create a span around one artifact integrity check.
#[macro_export]
macro_rules! integrity_span {
    ($check:expr) => {
        tracing::info_span!("miragekit.integrity", check = %$check)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const LOAD: &str = "miragekit.load";
    pub const EVALUATION: &str = "miragekit.evaluation";
    pub const AUDIT: &str = "miragekit.audit";
    pub const INTEGRITY: &str = "miragekit.integrity";
}
