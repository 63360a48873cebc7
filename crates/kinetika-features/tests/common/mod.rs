//! Common test utilities for kinetika-features integration tests.

use kinetika_features::{EnabledFeatureSet, FeatureGate, FeatureRestrictionMap};
use std::path::PathBuf;
use tempfile::TempDir;

/// A restriction table written to a temporary directory.
pub struct TableFixture {
    /// Keeps the directory alive for the duration of the test
    _dir: TempDir,
    /// Path of the written TOML file
    pub path: PathBuf,
}

impl TableFixture {
    /// Writes `content` to `restrictions.toml` in a fresh temp dir.
    pub fn new(content: &str) -> Self {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("restrictions.toml");
        std::fs::write(&path, content).expect("write restriction table");
        Self { _dir: dir, path }
    }

    /// Loads the written table into a gate.
    pub fn gate(&self) -> FeatureGate {
        FeatureGate::new(FeatureRestrictionMap::from_file(&self.path).expect("valid table"))
    }
}

/// Shorthand for an enabled-feature set.
pub fn features(keys: &[&str]) -> EnabledFeatureSet {
    keys.iter().copied().collect()
}

/// A small table with one permission gated by two features.
pub const OVERLAPPING_TABLE: &str = r#"
[[features]]
key = "core.rooms"
patterns = ["room.*"]

[[features]]
key = "core.ems_devices"
patterns = ["room.device_assign", "device.*"]
"#;
