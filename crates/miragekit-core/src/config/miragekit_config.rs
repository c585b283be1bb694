//! Top-level MirageKit configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{ClassifierConfig, IntegrityConfig, ObservabilityConfig, ThresholdsConfig};
use crate::errors::ConfigError;

/// Environment variable overriding `observability.log_level`.
pub const ENV_LOG_LEVEL: &str = "MIRAGEKIT_LOG_LEVEL";
/// Environment variable overriding `observability.json_logs`.
pub const ENV_JSON_LOGS: &str = "MIRAGEKIT_JSON_LOGS";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`MIRAGEKIT_*`)
/// 2. Config file passed to [`MiragekitConfig::load`]
/// 3. Compiled defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MiragekitConfig {
    pub thresholds: ThresholdsConfig,
    pub classifier: ClassifierConfig,
    pub integrity: IntegrityConfig,
    pub observability: ObservabilityConfig,
}

impl MiragekitConfig {
    /// Load configuration from an optional TOML file plus the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Apply `MIRAGEKIT_*` overrides using the given variable lookup.
    /// Unparseable boolean values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            if !level.trim().is_empty() {
                self.observability.log_level = level.trim().to_string();
            }
        }
        if let Some(json) = lookup(ENV_JSON_LOGS) {
            match json.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => self.observability.json_logs = true,
                "0" | "false" | "no" => self.observability.json_logs = false,
                _ => {}
            }
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in self.thresholds.unit_interval_fields() {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ValidationFailed {
                    field: format!("thresholds.{field}"),
                    message: "must be between 0.0 and 1.0".to_string(),
                });
            }
        }
        if self.thresholds.degraded_pivot > self.thresholds.healthy_pivot {
            return Err(ConfigError::ValidationFailed {
                field: "thresholds.degraded_pivot".to_string(),
                message: "must not exceed thresholds.healthy_pivot".to_string(),
            });
        }
        if self.thresholds.warning_band > self.thresholds.safe_band {
            return Err(ConfigError::ValidationFailed {
                field: "thresholds.warning_band".to_string(),
                message: "must not exceed thresholds.safe_band".to_string(),
            });
        }
        if self.thresholds.d_pre_scale == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "thresholds.d_pre_scale".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        let prefix_lists = [
            ("classifier.predecessor_prefixes", &self.classifier.predecessor_prefixes),
            ("classifier.noise_prefixes", &self.classifier.noise_prefixes),
        ];
        for (field, prefixes) in prefix_lists {
            if prefixes.is_empty() || prefixes.iter().any(|p| p.trim().is_empty()) {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must contain at least one non-empty prefix".to_string(),
                });
            }
        }
        let tolerance = self.integrity.replay_tolerance;
        if tolerance.is_nan() || tolerance < 0.0 {
            return Err(ConfigError::ValidationFailed {
                field: "integrity.replay_tolerance".to_string(),
                message: "must be a non-negative number".to_string(),
            });
        }
        Ok(())
    }
}
