//! The feature restriction table.
//!
//! Maps each [`FeatureKey`] to the permission patterns that require it.
//! Entries keep the order they were defined in. Once built, a
//! [`FeatureRestrictionMap`] cannot be changed; share it behind an `Arc`
//! (see [`FeatureGate`](crate::FeatureGate)).
//!
//! On disk the table is TOML:
//!
//! ```toml
//! [[features]]
//! key = "core.multi_studio"
//! patterns = ["studio.*"]
//!
//! [[features]]
//! key = "finance.invoicing"
//! patterns = ["finance.invoice.*", "finance.credit_note.*"]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::{Error, FeatureKey, PermissionPattern, Result};

// ============================================================================
// FeatureRestriction
// ============================================================================

/// One table entry: a feature and the permissions it gates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRestriction {
    feature: FeatureKey,
    patterns: Vec<PermissionPattern>,
}

impl FeatureRestriction {
    /// The gating feature.
    pub fn feature(&self) -> &FeatureKey {
        &self.feature
    }

    /// Patterns in definition order.
    pub fn patterns(&self) -> &[PermissionPattern] {
        &self.patterns
    }

    /// Whether `permission_key` requires this entry's feature.
    pub fn restricts(&self, permission_key: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(permission_key))
    }
}

// ============================================================================
// FeatureRestrictionMap
// ============================================================================

/// Ordered, read-only `feature -> [patterns]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureRestrictionMap {
    entries: Vec<FeatureRestriction>,
}

impl FeatureRestrictionMap {
    /// Starts building a map.
    pub fn builder() -> RestrictionMapBuilder {
        RestrictionMapBuilder::default()
    }

    /// Entries in definition order.
    pub fn entries(&self) -> &[FeatureRestriction] {
        &self.entries
    }

    /// Number of features in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up the entry for `feature`.
    pub fn get(&self, feature: &str) -> Option<&FeatureRestriction> {
        self.entries.iter().find(|e| e.feature.as_str() == feature)
    }

    /// All feature keys in definition order.
    pub fn feature_keys(&self) -> impl Iterator<Item = &FeatureKey> {
        self.entries.iter().map(|e| &e.feature)
    }

    /// Features whose patterns match `permission_key`, in definition order.
    ///
    /// Empty means the permission is not gated by any feature.
    pub fn restricting_features(&self, permission_key: &str) -> Vec<&FeatureKey> {
        self.entries
            .iter()
            .filter(|e| e.restricts(permission_key))
            .map(|e| &e.feature)
            .collect()
    }

    /// Parses a TOML restriction table.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: RestrictionFile =
            toml::from_str(content).map_err(|e| Error::Parse(e.to_string()))?;
        let mut builder = Self::builder();
        for entry in file.features {
            builder = builder.feature(entry.key, entry.patterns);
        }
        builder.build()
    }

    /// Reads and parses a TOML restriction table from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| kinetika_core::Error::io_with_path(e, path))?;
        let map = Self::from_toml_str(&content)?;
        log::debug!(
            "Loaded {} feature restrictions from {}",
            map.len(),
            path.display()
        );
        Ok(map)
    }

    /// Renders the table back to TOML, preserving order.
    pub fn to_toml_string(&self) -> Result<String> {
        let file = RestrictionFile {
            features: self
                .entries
                .iter()
                .map(|e| RestrictionEntry {
                    key: e.feature.to_string(),
                    patterns: e.patterns.iter().map(ToString::to_string).collect(),
                })
                .collect(),
        };
        toml::to_string_pretty(&file).map_err(|e| Error::Parse(e.to_string()))
    }

    /// Builds a map from trusted static data without validation.
    pub(crate) fn from_static(table: &[(&str, &[&str])]) -> Self {
        Self {
            entries: table
                .iter()
                .map(|(feature, patterns)| FeatureRestriction {
                    feature: FeatureKey::new(*feature),
                    patterns: patterns.iter().map(|p| PermissionPattern::parse(p)).collect(),
                })
                .collect(),
        }
    }
}

// A misspelled field must fail the load, not silently drop a restriction.
#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RestrictionFile {
    #[serde(default)]
    features: Vec<RestrictionEntry>,
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RestrictionEntry {
    key: String,
    patterns: Vec<String>,
}

// ============================================================================
// RestrictionMapBuilder
// ============================================================================

/// Accumulates entries and validates them into a [`FeatureRestrictionMap`].
#[derive(Debug, Default)]
pub struct RestrictionMapBuilder {
    entries: Vec<(String, Vec<String>)>,
}

impl RestrictionMapBuilder {
    /// Appends a feature and its patterns.
    pub fn feature<K, I, P>(mut self, key: K, patterns: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.entries
            .push((key.into(), patterns.into_iter().map(Into::into).collect()));
        self
    }

    /// Validates and freezes the table.
    ///
    /// Rejects empty feature keys, empty patterns and repeated features.
    /// A feature with no patterns is allowed and gates nothing.
    pub fn build(self) -> Result<FeatureRestrictionMap> {
        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(self.entries.len());

        for (index, (key, patterns)) in self.entries.into_iter().enumerate() {
            if key.is_empty() {
                return Err(Error::EmptyFeatureKey { index });
            }
            if !seen.insert(key.clone()) {
                return Err(Error::DuplicateFeature { feature: key });
            }
            if patterns.iter().any(String::is_empty) {
                return Err(Error::EmptyPattern { feature: key });
            }
            entries.push(FeatureRestriction {
                feature: FeatureKey::new(key),
                patterns: patterns.iter().map(|p| PermissionPattern::parse(p)).collect(),
            });
        }

        Ok(FeatureRestrictionMap { entries })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_map() -> FeatureRestrictionMap {
        FeatureRestrictionMap::builder()
            .feature("core.multi_studio", ["studio.*"])
            .feature("core.rooms", ["room.*", "schedule.room_view"])
            .feature("marketing.automation", ["room.broadcast"])
            .build()
            .unwrap()
    }

    // ------------------------------------------------------------------------
    // Builder validation
    // ------------------------------------------------------------------------

    #[test]
    fn test_build_preserves_order() {
        let map = sample_map();
        let keys: Vec<&str> = map.feature_keys().map(FeatureKey::as_str).collect();
        assert_eq!(
            keys,
            vec!["core.multi_studio", "core.rooms", "marketing.automation"]
        );
    }

    #[test]
    fn test_build_rejects_duplicate_feature() {
        let err = FeatureRestrictionMap::builder()
            .feature("core.rooms", ["room.*"])
            .feature("core.rooms", ["room.read"])
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateFeature { feature } if feature == "core.rooms"));
    }

    #[test]
    fn test_build_rejects_empty_key() {
        let err = FeatureRestrictionMap::builder()
            .feature("core.rooms", ["room.*"])
            .feature("", ["x.read"])
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::EmptyFeatureKey { index: 1 }));
    }

    #[test]
    fn test_build_rejects_empty_pattern() {
        let err = FeatureRestrictionMap::builder()
            .feature("finance.pos", ["finance.pos.*", ""])
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::EmptyPattern { .. }));
    }

    #[test]
    fn test_build_allows_feature_without_patterns() {
        let map = FeatureRestrictionMap::builder()
            .feature("core.beta", Vec::<String>::new())
            .build()
            .unwrap();
        assert_eq!(map.len(), 1);
        assert!(map.restricting_features("anything").is_empty());
    }

    // ------------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------------

    #[test]
    fn test_restricting_features_single() {
        let map = sample_map();
        let found = map.restricting_features("studio.update");
        assert_eq!(found, vec![&FeatureKey::new("core.multi_studio")]);
    }

    #[test]
    fn test_restricting_features_multiple_in_order() {
        let map = sample_map();
        let found: Vec<&str> = map
            .restricting_features("room.broadcast")
            .into_iter()
            .map(FeatureKey::as_str)
            .collect();
        assert_eq!(found, vec!["core.rooms", "marketing.automation"]);
    }

    #[test]
    fn test_restricting_features_none() {
        assert!(sample_map().restricting_features("coach.create").is_empty());
    }

    #[test]
    fn test_get_entry() {
        let map = sample_map();
        let entry = map.get("core.rooms").unwrap();
        assert_eq!(entry.patterns().len(), 2);
        assert!(entry.restricts("schedule.room_view"));
        assert!(map.get("finance.pos").is_none());
    }

    // ------------------------------------------------------------------------
    // TOML
    // ------------------------------------------------------------------------

    #[test]
    fn test_from_toml_str() {
        let toml_str = r#"
            [[features]]
            key = "finance.invoicing"
            patterns = ["finance.invoice.*"]

            [[features]]
            key = "finance.reports"
            patterns = ["finance.report.*"]
        "#;
        let map = FeatureRestrictionMap::from_toml_str(toml_str).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.entries()[0].feature().as_str(), "finance.invoicing");
        assert!(map.entries()[0].restricts("finance.invoice.create"));
    }

    #[test]
    fn test_from_toml_str_empty_document() {
        let map = FeatureRestrictionMap::from_toml_str("").unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_from_toml_str_malformed() {
        let err = FeatureRestrictionMap::from_toml_str("[[features]]\npatterns = 3").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_from_toml_str_rejects_misspelled_patterns_field() {
        let toml_str = "[[features]]\nkey = \"core.multi_studio\"\npattern = [\"studio.*\"]\n";
        let err = FeatureRestrictionMap::from_toml_str(toml_str).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_from_toml_str_rejects_misspelled_table_name() {
        let toml_str = "[[feature]]\nkey = \"core.multi_studio\"\npatterns = [\"studio.*\"]\n";
        let err = FeatureRestrictionMap::from_toml_str(toml_str).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_from_toml_str_requires_patterns() {
        let err = FeatureRestrictionMap::from_toml_str("[[features]]\nkey = \"core.beta\"\n")
            .unwrap_err();
        assert!(matches!(err, Error::Parse(_)));

        let map =
            FeatureRestrictionMap::from_toml_str("[[features]]\nkey = \"core.beta\"\npatterns = []\n")
                .unwrap();
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_from_toml_str_duplicate_is_rejected() {
        let toml_str = r#"
            [[features]]
            key = "core.rooms"
            patterns = ["room.*"]

            [[features]]
            key = "core.rooms"
            patterns = []
        "#;
        assert!(FeatureRestrictionMap::from_toml_str(toml_str).is_err());
    }

    #[test]
    fn test_to_toml_string_reloads_identically() {
        let map = sample_map();
        let reloaded = FeatureRestrictionMap::from_toml_str(&map.to_toml_string().unwrap()).unwrap();
        assert_eq!(reloaded, map);
    }

    #[test]
    fn test_from_file_missing() {
        let err = FeatureRestrictionMap::from_file("/nonexistent/restrictions.toml").unwrap_err();
        assert!(matches!(err, Error::Core(_)));
        assert!(err.to_string().contains("/nonexistent/restrictions.toml"));
    }

    #[test]
    fn test_from_file_reads_table() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("restrictions.toml");
        std::fs::write(&path, "[[features]]\nkey = \"core.rooms\"\npatterns = [\"room.*\"]\n")
            .unwrap();

        let map = FeatureRestrictionMap::from_file(&path).unwrap();
        assert_eq!(map.restricting_features("room.read").len(), 1);
    }
}
