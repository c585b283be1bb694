//! Test fixture loader for MirageKit golden documents.
//!
//! Golden files live in `golden/` next to this crate's manifest:
//! - `benchmark.json`: benchmark table with levels listed out of order
//! - `certificate.json`: audit certificate with token accounting for both policies
//! - `certificate_no_tokens.json`: same audit, guarded policy missing `tokens_after`
//! - `replay_summary.json`: replay rows matching `benchmark.json`

use serde::de::DeserializeOwned;
use std::path::PathBuf;

/// Root directory of the golden fixtures.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("golden")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let content = load_fixture_str(relative_path);
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {relative_path}: {e}"))
}

/// Load a fixture file as raw JSON Value.
pub fn load_fixture_value(relative_path: &str) -> serde_json::Value {
    load_fixture(relative_path)
}

/// Load a fixture file as text.
///
/// # Panics
/// Panics if the file doesn't exist.
pub fn load_fixture_str(relative_path: &str) -> String {
    let path = fixture_path(relative_path);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixture_path(relative_path).exists()
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// List all JSON files in the fixture directory, sorted by name.
pub fn list_fixtures() -> Vec<PathBuf> {
    let dir = fixtures_root();
    let mut paths: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                Some(path)
            } else {
                None
            }
        })
        .collect();
    paths.sort();
    paths
}
