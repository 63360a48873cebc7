//! The set of features enabled for one tenant.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::FeatureKey;

/// Features currently active for a tenant.
///
/// Built per request by the caller, usually from the tenant's plan plus
/// any per-tenant overrides (see [`EnabledFeatureSet::resolve`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnabledFeatureSet(BTreeSet<FeatureKey>);

impl EnabledFeatureSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Plan features with tenant overrides applied in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use kinetika_features::{EnabledFeatureSet, FeatureOverride};
    ///
    /// let set = EnabledFeatureSet::resolve(
    ///     ["core.rooms", "finance.pos"],
    ///     &[
    ///         FeatureOverride::disable("finance.pos"),
    ///         FeatureOverride::enable("finance.reports"),
    ///     ],
    /// );
    /// assert!(set.contains("core.rooms"));
    /// assert!(!set.contains("finance.pos"));
    /// assert!(set.contains("finance.reports"));
    /// ```
    pub fn resolve<I, K>(plan_features: I, overrides: &[FeatureOverride]) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<FeatureKey>,
    {
        let mut set = Self::from_iter(plan_features);
        for o in overrides {
            if o.enabled {
                set.0.insert(o.feature.clone());
            } else {
                set.0.remove(o.feature.as_str());
            }
        }
        set
    }

    /// Whether `feature` is enabled.
    pub fn contains(&self, feature: &str) -> bool {
        self.0.contains(feature)
    }

    /// Enables a feature. Returns `false` if it was already enabled.
    pub fn insert(&mut self, feature: impl Into<FeatureKey>) -> bool {
        self.0.insert(feature.into())
    }

    /// Number of enabled features.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no feature is enabled.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Enabled features in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &FeatureKey> {
        self.0.iter()
    }
}

impl<K: Into<FeatureKey>> FromIterator<K> for EnabledFeatureSet {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// A per-tenant switch layered on top of the plan's features.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureOverride {
    /// Feature being switched
    pub feature: FeatureKey,
    /// `true` grants the feature, `false` revokes it
    pub enabled: bool,
}

impl FeatureOverride {
    /// Grants `feature` regardless of plan.
    pub fn enable(feature: impl Into<FeatureKey>) -> Self {
        Self {
            feature: feature.into(),
            enabled: true,
        }
    }

    /// Revokes `feature` regardless of plan.
    pub fn disable(feature: impl Into<FeatureKey>) -> Self {
        Self {
            feature: feature.into(),
            enabled: false,
        }
    }
}
