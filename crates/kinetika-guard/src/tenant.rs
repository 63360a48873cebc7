//! Tenant identity and per-route permission, carried in request extensions.

/// The tenant a request acts for.
///
/// Inserted into request extensions by the authentication layer that runs
/// before the feature gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantContext {
    /// Tenant identifier.
    pub tenant_id: String,
    /// Subscription plan name (e.g. `starter`, `pro`).
    pub plan: String,
}

impl TenantContext {
    /// Create a tenant context.
    pub fn new(tenant_id: impl Into<String>, plan: impl Into<String>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            plan: plan.into(),
        }
    }
}

/// The permission key a route requires, set by the router or a handler layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredPermission(pub String);

/// Extract the `TenantContext` from HTTP request `Parts`, if present.
pub fn tenant_from_parts(parts: &http::request::Parts) -> Option<&TenantContext> {
    parts.extensions.get::<TenantContext>()
}

/// Extract the required permission key from HTTP request `Parts`, if present.
pub fn permission_from_parts(parts: &http::request::Parts) -> Option<&str> {
    parts
        .extensions
        .get::<RequiredPermission>()
        .map(|p| p.0.as_str())
}
