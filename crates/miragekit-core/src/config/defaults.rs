// Single source of truth for all default values.

// --- Contradiction flag (per policy vector) ---
pub const DEFAULT_CONTRADICTION_RAW_VALIDITY: f64 = 0.95;
pub const DEFAULT_CONTRADICTION_PIVOT: f64 = 0.15;

// --- Session mirage warning (strict comparisons) ---
pub const DEFAULT_SESSION_MIRAGE_PIVOT: f64 = 0.05;
pub const DEFAULT_SESSION_MIRAGE_RAW_VALIDITY: f64 = 0.9;

// --- Health bands on pivot preservation ---
pub const DEFAULT_HEALTHY_PIVOT: f64 = 0.8;
pub const DEFAULT_DEGRADED_PIVOT: f64 = 0.3;

// --- Severity bands for any displayed metric ---
pub const DEFAULT_SAFE_BAND: f64 = 0.8;
pub const DEFAULT_WARNING_BAND: f64 = 0.4;

// --- Contract badge ---
pub const DEFAULT_CONTRACT_SATISFIED: f64 = 0.5;
pub const DEFAULT_D_PRE_SCALE: u32 = 3;

// --- Explainer bands on the retention control ---
pub const DEFAULT_EXPLAINER_HIGH: f64 = 0.8;
pub const DEFAULT_EXPLAINER_MID: f64 = 0.5;

// --- Chunk classifier naming conventions ---
pub const DEFAULT_PREDECESSOR_PREFIXES: &[&str] = &["hc", "pred", "predecessor"];
pub const DEFAULT_NOISE_PREFIXES: &[&str] = &["n", "noise", "filler"];

// --- Artifact integrity ---
pub const DEFAULT_HEADLINE_FRACTIONS: &[f64] = &[0.65, 0.5, 0.4];
pub const DEFAULT_REPLAY_TOLERANCE: f64 = 1e-12;

// --- Documents ---
pub const DEFAULT_BENCHMARK_FILENAME: &str = "data_miragekit.json";
pub const DEFAULT_CERTIFICATE_FILENAME: &str = "data_certificate.json";

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
