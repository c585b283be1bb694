//! Chunk role classifier.
//!
//! Rules run in a fixed order and the first match wins:
//! 1. the pivot id itself
//! 2. membership in the merged protected set
//! 3. predecessor naming convention
//! 4. noise naming convention
//! 5. fallback to context
//!
//! A protected chunk named like noise is therefore a predecessor.

pub mod naming;

use std::collections::HashSet;
use std::sync::LazyLock;

use miragekit_core::config::ClassifierConfig;
use miragekit_core::errors::ConfigError;
use miragekit_core::models::{ChunkRole, ClassifiedChunk};

pub use naming::NamingConvention;

static DEFAULT_CLASSIFIER: LazyLock<ChunkClassifier> = LazyLock::new(|| {
    ChunkClassifier::new(&ClassifierConfig::default())
        .expect("default classifier prefixes are literal and non-empty")
});

/// Classifies chunk ids using configured naming conventions.
#[derive(Debug, Clone)]
pub struct ChunkClassifier {
    predecessor: NamingConvention,
    noise: NamingConvention,
}

impl ChunkClassifier {
    pub fn new(config: &ClassifierConfig) -> Result<Self, ConfigError> {
        let compile = |field: &str, prefixes: &[String]| {
            NamingConvention::new(prefixes).map_err(|e| ConfigError::ValidationFailed {
                field: field.to_string(),
                message: e.to_string(),
            })
        };
        Ok(Self {
            predecessor: compile("classifier.predecessor_prefixes", &config.predecessor_prefixes)?,
            noise: compile("classifier.noise_prefixes", &config.noise_prefixes)?,
        })
    }

    /// Role of `id` given the pivot and the merged protected set.
    pub fn classify(&self, id: &str, pivot_id: &str, protected: &HashSet<String>) -> ChunkRole {
        if id == pivot_id {
            return ChunkRole::Pivot;
        }
        if protected.contains(id) {
            return ChunkRole::Predecessor;
        }
        if self.predecessor.matches(id) {
            return ChunkRole::Predecessor;
        }
        if self.noise.matches(id) {
            return ChunkRole::Noise;
        }
        ChunkRole::Context
    }

    /// Classify a list of ids, preserving order.
    pub fn classify_all<S: AsRef<str>>(
        &self,
        ids: &[S],
        pivot_id: &str,
        protected: &HashSet<String>,
    ) -> Vec<ClassifiedChunk> {
        ids.iter()
            .map(|id| {
                let id = id.as_ref();
                ClassifiedChunk {
                    id: id.to_string(),
                    role: self.classify(id, pivot_id, protected),
                }
            })
            .collect()
    }
}

impl Default for ChunkClassifier {
    fn default() -> Self {
        DEFAULT_CLASSIFIER.clone()
    }
}

/// Classify with the default naming conventions.
pub fn classify(id: &str, pivot_id: &str, protected: &HashSet<String>) -> ChunkRole {
    DEFAULT_CLASSIFIER.classify(id, pivot_id, protected)
}
