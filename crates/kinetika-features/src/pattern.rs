//! Permission patterns.
//!
//! A pattern is either an exact permission key (`coach.read`) or a wildcard
//! ending in `.*` (`studio.*`). A wildcard matches any key that starts with
//! the pattern minus its trailing `*`, so `studio.*` matches `studio.create`
//! and the bare `studio.` but not `studios` or `studio`.
//!
//! Matching is a literal string-prefix test. Nothing requires the remainder
//! after the prefix to be non-empty or free of further dots.

use serde::{Deserialize, Serialize};
use std::fmt;

const WILDCARD_SUFFIX: &str = ".*";

/// A permission key, or a family of keys sharing a prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PermissionPattern {
    /// Matches exactly one permission key.
    Exact(String),
    /// Matches every key starting with `prefix` (which keeps its trailing dot).
    Prefix {
        /// Literal prefix, e.g. `studio.` for the pattern `studio.*`
        prefix: String,
    },
}

impl PermissionPattern {
    /// Parses a pattern string.
    ///
    /// # Examples
    ///
    /// ```
    /// use kinetika_features::PermissionPattern;
    ///
    /// let p = PermissionPattern::parse("room.*");
    /// assert!(p.is_wildcard());
    /// assert!(p.matches("room.create"));
    /// assert!(!p.matches("roomX"));
    ///
    /// let exact = PermissionPattern::parse("coach.read");
    /// assert!(exact.matches("coach.read"));
    /// assert!(!exact.matches("coach.read.all"));
    /// ```
    pub fn parse(pattern: &str) -> Self {
        if pattern.ends_with(WILDCARD_SUFFIX) {
            // Keep the dot: "room.*" -> "room."
            let prefix = &pattern[..pattern.len() - 1];
            Self::Prefix {
                prefix: prefix.to_string(),
            }
        } else {
            Self::Exact(pattern.to_string())
        }
    }

    /// Whether `permission_key` falls under this pattern.
    pub fn matches(&self, permission_key: &str) -> bool {
        match self {
            Self::Exact(key) => permission_key == key,
            Self::Prefix { prefix } => permission_key.starts_with(prefix.as_str()),
        }
    }

    /// Whether this is a `prefix.*` pattern.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Prefix { .. })
    }

    /// True for the empty exact pattern, which no configuration may contain.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Exact(key) if key.is_empty())
    }
}

impl fmt::Display for PermissionPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(key) => write!(f, "{key}"),
            Self::Prefix { prefix } => write!(f, "{prefix}*"),
        }
    }
}

impl From<&str> for PermissionPattern {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for PermissionPattern {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<PermissionPattern> for String {
    fn from(p: PermissionPattern) -> Self {
        p.to_string()
    }
}
