//! Configuration system for MirageKit.
//! TOML-based, resolved as: environment > config file > compiled defaults.

pub mod classifier_config;
pub mod defaults;
pub mod integrity_config;
pub mod miragekit_config;
pub mod observability_config;
pub mod thresholds_config;

pub use classifier_config::ClassifierConfig;
pub use integrity_config::IntegrityConfig;
pub use miragekit_config::MiragekitConfig;
pub use observability_config::ObservabilityConfig;
pub use thresholds_config::ThresholdsConfig;
