//! Tower feature-gating middleware.
//!
//! `FeatureGateLayer` and `FeatureGateService` wrap any inner service with a
//! feature check. Generic over `FeatureResolver` — plug in any plan store.
//!
//! The permission to check comes from the layer (`with_permission`) or,
//! failing that, from a [`RequiredPermission`](crate::RequiredPermission)
//! request extension. Requests with neither pass through unchecked.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::response::IntoResponse;
use http::Request;
use kinetika_features::{FeatureGate, GateDecision};
use tower::{Layer, Service};

use crate::{FeatureResolver, GuardError, RequiredPermission, TenantContext};

/// Tower `Layer` that wraps services with a feature gate.
#[derive(Clone)]
pub struct FeatureGateLayer<R: FeatureResolver> {
    resolver: Arc<R>,
    gate: FeatureGate,
    permission: Option<Arc<str>>,
}

impl<R: FeatureResolver> FeatureGateLayer<R> {
    /// Create a new gate layer with the given resolver and restriction table.
    pub fn new(resolver: Arc<R>, gate: FeatureGate) -> Self {
        Self {
            resolver,
            gate,
            permission: None,
        }
    }

    /// Check `permission` on every request, ignoring request extensions.
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = Some(Arc::from(permission.into()));
        self
    }
}

impl<R: FeatureResolver, S> Layer<S> for FeatureGateLayer<R> {
    type Service = FeatureGateService<R, S>;

    fn layer(&self, inner: S) -> Self::Service {
        FeatureGateService {
            inner,
            resolver: self.resolver.clone(),
            gate: self.gate.clone(),
            permission: self.permission.clone(),
        }
    }
}

/// Tower `Service` that checks tenant features before forwarding requests.
///
/// On success, inserts the tenant's `EnabledFeatureSet` into request
/// extensions where it's available to downstream handlers.
#[derive(Clone)]
pub struct FeatureGateService<R: FeatureResolver, S> {
    inner: S,
    resolver: Arc<R>,
    gate: FeatureGate,
    permission: Option<Arc<str>>,
}

impl<R, S> Service<Request<Body>> for FeatureGateService<R, S>
where
    R: FeatureResolver,
    S: Service<Request<Body>, Error = Infallible> + Clone + Send + 'static,
    S::Response: IntoResponse,
    S::Future: Send,
{
    type Response = axum::response::Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let resolver = self.resolver.clone();
        let gate = self.gate.clone();
        let permission = self
            .permission
            .as_deref()
            .map(str::to_string)
            .or_else(|| {
                req.extensions()
                    .get::<RequiredPermission>()
                    .map(|p| p.0.clone())
            });

        Box::pin(async move {
            // Route declares no permission — nothing to gate
            let Some(permission) = permission else {
                let resp = inner
                    .call(req)
                    .await
                    .unwrap_or_else(|infallible| match infallible {});
                return Ok(resp.into_response());
            };

            let Some(tenant) = req.extensions().get::<TenantContext>().cloned() else {
                log::warn!("Feature check for '{permission}' without tenant context");
                return Ok(error_response(&GuardError::MissingTenant));
            };

            let enabled = match resolver.resolve(&tenant).await {
                Ok(enabled) => enabled,
                Err(err) => {
                    log::error!(
                        "Could not resolve features for tenant {}: {err}",
                        tenant.tenant_id
                    );
                    return Ok(error_response(&err));
                }
            };

            match gate.evaluate(&permission, &enabled) {
                GateDecision::Allowed { .. } => {
                    req.extensions_mut().insert(enabled);
                    let resp = inner
                        .call(req)
                        .await
                        .unwrap_or_else(|infallible| match infallible {});
                    Ok(resp.into_response())
                }
                GateDecision::Denied { missing } => {
                    let err = GuardError::FeatureDisabled {
                        permission,
                        missing: missing.iter().map(ToString::to_string).collect(),
                    };
                    log::warn!("Tenant {} denied: {err}", tenant.tenant_id);
                    Ok(error_response(&err))
                }
            }
        })
    }
}

/// Build a JSON error response for a guard failure.
fn error_response(err: &GuardError) -> axum::response::Response {
    let missing = match err {
        GuardError::FeatureDisabled { missing, .. } => missing.clone(),
        _ => Vec::new(),
    };
    let body = serde_json::json!({
        "error": {
            "category": "feature",
            "message": err.to_string(),
            "missing": missing,
        }
    });

    (
        err.status_code(),
        [(http::header::CONTENT_TYPE, "application/json")],
        serde_json::to_string(&body).unwrap_or_default(),
    )
        .into_response()
}
