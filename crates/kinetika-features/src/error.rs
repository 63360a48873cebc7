//! Error types for kinetika-features
//!
//! The gate itself never fails. These errors come from building or loading
//! a restriction map.

use thiserror::Error;

/// Result type alias for kinetika-features operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while constructing a restriction map
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from kinetika-core
    #[error("Core error: {0}")]
    Core(#[from] kinetika_core::Error),

    /// A feature entry has an empty key.
    #[error("feature entry #{index} has an empty key")]
    EmptyFeatureKey {
        /// Position of the entry in the table
        index: usize,
    },

    /// A feature lists an empty permission pattern.
    #[error("feature '{feature}' lists an empty permission pattern")]
    EmptyPattern {
        /// Feature that carries the empty pattern
        feature: String,
    },

    /// The same feature key appears twice.
    #[error("feature '{feature}' is defined more than once")]
    DuplicateFeature {
        /// The repeated feature key
        feature: String,
    },

    /// The restriction table could not be parsed.
    #[error("failed to parse restriction table: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_feature_display() {
        let e = Error::DuplicateFeature {
            feature: "finance.pos".to_string(),
        };
        assert_eq!(e.to_string(), "feature 'finance.pos' is defined more than once");
    }

    #[test]
    fn test_core_error_conversion() {
        let core = kinetika_core::Error::config("bad path");
        let e: Error = core.into();
        assert_eq!(
            e.to_string(),
            "Core error: Configuration error: bad path"
        );
    }
}
