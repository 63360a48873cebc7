//! Feature key identifier.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Identifier of a purchasable or toggleable product feature.
///
/// Feature keys are dotted strings such as `finance.pos` or `core.rooms`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureKey(String);

impl FeatureKey {
    /// Creates a feature key from a string.
    ///
    /// # Examples
    ///
    /// ```
    /// use kinetika_features::FeatureKey;
    ///
    /// let key = FeatureKey::new("finance.pos");
    /// assert_eq!(key.as_str(), "finance.pos");
    /// ```
    pub fn new<S: Into<String>>(key: S) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for FeatureKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for FeatureKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for FeatureKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for FeatureKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}
