//! # miragekit-core
//!
//! Foundation crate for MirageKit.
//! Defines the benchmark and certificate data model, the derived output types
//! handed to renderers, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::MiragekitConfig;
pub use errors::{ConfigError, IntegrityError, LoadError, MiragekitError, MiragekitResult};
pub use models::{
    BenchmarkSuite, Certificate, MetricVector, PolicyKind, PolicyPair, PolicyTable,
    RetentionLevels, Witness,
};
pub use traits::EvaluationSink;
