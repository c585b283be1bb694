//! Structured log events for key session operations.
//!
//! Each function emits a `tracing` event with an `event` field naming it.

/// Both source documents were fetched, parsed and validated.
pub fn documents_loaded(session_id: &str, levels: usize, pivot_id: &str) {
    tracing::info!(
        event = "documents_loaded",
        session_id = %session_id,
        levels = levels,
        pivot_id = %pivot_id,
        "documents loaded"
    );
}

/// A source document failed to load; the session will not start.
pub fn load_failed(document: &str, reason: &str) {
    tracing::error!(
        event = "load_failed",
        document = %document,
        reason = %reason,
        "load failed"
    );
}

pub fn evaluation_completed(retention: f64, session_mirage: bool, contradictions: usize) {
    tracing::debug!(
        event = "evaluation_completed",
        retention = retention,
        session_mirage = session_mirage,
        contradictions = contradictions,
        "evaluation completed"
    );
}

/// The ungoverned policy looks valid while its pivot chain has collapsed.
pub fn mirage_detected(retention: f64, pivot_preservation_rate: f64, raw_validity: f64) {
    tracing::warn!(
        event = "mirage_detected",
        retention = retention,
        pivot_preservation_rate = pivot_preservation_rate,
        raw_validity = raw_validity,
        "mirage detected"
    );
}

pub fn integrity_violation(check: &str, detail: &str) {
    tracing::warn!(
        event = "integrity_violation",
        check = %check,
        detail = %detail,
        "integrity violation"
    );
}

/// An output sink panicked; the remaining sinks still receive the result.
pub fn sink_panicked(sink_index: usize, method: &str) {
    tracing::error!(
        event = "sink_panicked",
        sink_index = sink_index,
        method = %method,
        "output sink panicked"
    );
}
