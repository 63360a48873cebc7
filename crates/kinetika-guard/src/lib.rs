//! Feature gating middleware for Kinetika HTTP services.
//!
//! Provides:
//! - [`TenantContext`] — Tenant identity placed in request extensions by upstream auth
//! - [`RequiredPermission`] — The permission a route needs
//! - [`FeatureResolver`] — Trait for looking up a tenant's enabled features
//! - [`StaticFeatureResolver`] — Plan table plus per-tenant overrides
//! - [`FeatureGateLayer`] / [`FeatureGateService`] — Tower middleware returning 403 on denial
//! - [`GuardError`] — Guard-specific error types

mod error;
mod middleware;
mod resolver;
mod tenant;

pub use error::GuardError;
pub use middleware::{FeatureGateLayer, FeatureGateService};
pub use resolver::StaticFeatureResolver;
pub use tenant::{RequiredPermission, TenantContext, permission_from_parts, tenant_from_parts};

use kinetika_features::EnabledFeatureSet;

/// Trait for resolving which features a tenant currently has.
///
/// Implement this over whatever stores subscriptions and overrides.
/// The middleware calls `resolve()` once per gated request.
pub trait FeatureResolver: Send + Sync + 'static {
    /// Resolve the enabled features for `tenant`.
    fn resolve(
        &self,
        tenant: &TenantContext,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<EnabledFeatureSet, GuardError>> + Send + '_>,
    >;
}
