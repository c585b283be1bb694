/// MirageKit version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Upper bound of the retention control, in percent.
pub const MAX_RETENTION_PERCENT: u8 = 100;

/// Document names used in load errors and log events.
pub const BENCHMARK_DOCUMENT: &str = "benchmark";
pub const CERTIFICATE_DOCUMENT: &str = "certificate";
pub const REPLAY_DOCUMENT: &str = "replay";
