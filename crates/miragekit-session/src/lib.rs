//! # miragekit-session
//!
//! Ties the workspace together: loads the benchmark and certificate
//! documents, evaluates retention values on demand, publishes every result
//! through registered output sinks, and cross-checks release artifacts.

pub mod dispatcher;
pub mod integrity;
pub mod loader;
pub mod session;

pub use dispatcher::SinkDispatcher;
pub use integrity::{
    IntegrityCheck, IntegrityChecker, IntegrityFinding, IntegrityReport, ReplayRow, ReplaySummary,
};
pub use loader::{
    load_certificate_raw, load_documents, load_replay, parse_benchmark, parse_certificate,
    LoadedDocuments,
};
pub use session::MirageSession;
