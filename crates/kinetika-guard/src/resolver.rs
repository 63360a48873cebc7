//! In-memory feature resolver.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use kinetika_features::{EnabledFeatureSet, FeatureKey, FeatureOverride};

use crate::{FeatureResolver, GuardError, TenantContext};

/// Resolves features from a fixed plan table plus per-tenant overrides.
///
/// Suitable for tests and for deployments whose plans live in config.
#[derive(Debug, Clone, Default)]
pub struct StaticFeatureResolver {
    plans: HashMap<String, Vec<FeatureKey>>,
    overrides: HashMap<String, Vec<FeatureOverride>>,
}

impl StaticFeatureResolver {
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Define (or replace) the features of `plan`.
    pub fn with_plan<I, K>(mut self, plan: impl Into<String>, features: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<FeatureKey>,
    {
        self.plans
            .insert(plan.into(), features.into_iter().map(Into::into).collect());
        self
    }

    /// Append an override for `tenant_id`.
    pub fn with_override(mut self, tenant_id: impl Into<String>, o: FeatureOverride) -> Self {
        self.overrides.entry(tenant_id.into()).or_default().push(o);
        self
    }

    /// Synchronous resolution used by the async trait method.
    pub fn resolve_now(&self, tenant: &TenantContext) -> Result<EnabledFeatureSet, GuardError> {
        let plan = self
            .plans
            .get(&tenant.plan)
            .ok_or_else(|| GuardError::UnknownPlan(tenant.plan.clone()))?;
        let overrides = self
            .overrides
            .get(&tenant.tenant_id)
            .map(Vec::as_slice)
            .unwrap_or_default();
        Ok(EnabledFeatureSet::resolve(plan.iter().cloned(), overrides))
    }
}

impl FeatureResolver for StaticFeatureResolver {
    fn resolve(
        &self,
        tenant: &TenantContext,
    ) -> Pin<Box<dyn Future<Output = Result<EnabledFeatureSet, GuardError>> + Send + '_>> {
        let result = self.resolve_now(tenant);
        Box::pin(async move { result })
    }
}
