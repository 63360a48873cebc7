//! The feature-permission check.
//!
//! For each table entry in order: if the entry's patterns match the
//! permission and its feature is not enabled, the permission is denied.
//! Otherwise it is allowed. Permissions no entry mentions are allowed
//! whatever the tenant has enabled.

use std::sync::Arc;

use crate::{EnabledFeatureSet, FeatureKey, FeatureRestrictionMap};

/// Whether `permission_key` is usable with the `enabled` features.
///
/// Pure and infallible. Stops at the first restricting feature that is
/// not enabled.
///
/// # Examples
///
/// ```
/// use kinetika_features::{EnabledFeatureSet, FeatureRestrictionMap, is_permission_allowed};
///
/// let map = FeatureRestrictionMap::builtin();
/// let reports = EnabledFeatureSet::from_iter(["finance.reports"]);
/// let invoicing = EnabledFeatureSet::from_iter(["finance.invoicing"]);
///
/// assert!(!is_permission_allowed(&map, "finance.invoice.create", &reports));
/// assert!(is_permission_allowed(&map, "finance.invoice.create", &invoicing));
/// ```
pub fn is_permission_allowed(
    map: &FeatureRestrictionMap,
    permission_key: &str,
    enabled: &EnabledFeatureSet,
) -> bool {
    map.entries()
        .iter()
        .all(|entry| !entry.restricts(permission_key) || enabled.contains(entry.feature().as_str()))
}

/// Outcome of [`FeatureGate::evaluate`], naming the features involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Every restricting feature is enabled (`required` may be empty).
    Allowed {
        /// Features that gate the permission, all enabled
        required: Vec<FeatureKey>,
    },
    /// At least one restricting feature is off.
    Denied {
        /// Restricting features that are not enabled, in table order
        missing: Vec<FeatureKey>,
    },
}

impl GateDecision {
    /// Whether the permission may be used.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }
}

/// Shared handle to an immutable restriction table.
///
/// Cheap to clone; safe to use from any number of threads.
#[derive(Debug, Clone)]
pub struct FeatureGate {
    restrictions: Arc<FeatureRestrictionMap>,
}

impl FeatureGate {
    /// Wraps a restriction table.
    pub fn new(restrictions: FeatureRestrictionMap) -> Self {
        Self {
            restrictions: Arc::new(restrictions),
        }
    }

    /// Gate over [`FeatureRestrictionMap::builtin`].
    pub fn builtin() -> Self {
        Self::new(FeatureRestrictionMap::builtin())
    }

    /// The underlying table.
    pub fn restrictions(&self) -> &FeatureRestrictionMap {
        &self.restrictions
    }

    /// See [`is_permission_allowed`].
    pub fn is_permission_allowed(&self, permission_key: &str, enabled: &EnabledFeatureSet) -> bool {
        is_permission_allowed(&self.restrictions, permission_key, enabled)
    }

    /// Like [`is_permission_allowed`](Self::is_permission_allowed), but
    /// reports every feature involved instead of stopping at the first miss.
    pub fn evaluate(&self, permission_key: &str, enabled: &EnabledFeatureSet) -> GateDecision {
        let (present, missing): (Vec<&FeatureKey>, Vec<&FeatureKey>) = self
            .restrictions
            .restricting_features(permission_key)
            .into_iter()
            .partition(|feature| enabled.contains(feature.as_str()));

        if missing.is_empty() {
            GateDecision::Allowed {
                required: present.into_iter().cloned().collect(),
            }
        } else {
            GateDecision::Denied {
                missing: missing.into_iter().cloned().collect(),
            }
        }
    }
}

impl From<FeatureRestrictionMap> for FeatureGate {
    fn from(restrictions: FeatureRestrictionMap) -> Self {
        Self::new(restrictions)
    }
}

impl From<Arc<FeatureRestrictionMap>> for FeatureGate {
    fn from(restrictions: Arc<FeatureRestrictionMap>) -> Self {
        Self { restrictions }
    }
}
