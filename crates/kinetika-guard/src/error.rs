//! Guard-specific error types.

use http::StatusCode;

/// Errors that can occur while gating a request.
#[derive(Debug, thiserror::Error)]
pub enum GuardError {
    /// No tenant context was attached to the request.
    #[error("missing tenant context")]
    MissingTenant,

    /// The tenant's plan is not known to the resolver.
    #[error("unknown plan '{0}'")]
    UnknownPlan(String),

    /// The feature store could not be reached.
    #[error("failed to resolve features: {0}")]
    ResolverUnavailable(String),

    /// The permission needs features the tenant does not have.
    #[error("permission '{permission}' requires disabled features: {}", missing.join(", "))]
    FeatureDisabled {
        /// Permission that was checked
        permission: String,
        /// Features that would have to be enabled
        missing: Vec<String>,
    },
}

impl GuardError {
    /// HTTP status the middleware answers with for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            GuardError::MissingTenant => StatusCode::UNAUTHORIZED,
            GuardError::FeatureDisabled { .. } => StatusCode::FORBIDDEN,
            GuardError::UnknownPlan(_) | GuardError::ResolverUnavailable(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Whether the caller (rather than the server) is at fault.
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_error_display() {
        let e = GuardError::MissingTenant;
        assert_eq!(e.to_string(), "missing tenant context");
    }

    #[test]
    fn test_feature_disabled_display() {
        let e = GuardError::FeatureDisabled {
            permission: "marketing.campaign.send".to_string(),
            missing: vec!["marketing.leads".to_string(), "marketing.automation".to_string()],
        };
        assert_eq!(
            e.to_string(),
            "permission 'marketing.campaign.send' requires disabled features: marketing.leads, marketing.automation"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(GuardError::MissingTenant.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            GuardError::FeatureDisabled {
                permission: "studio.create".into(),
                missing: vec![]
            }
            .status_code(),
            StatusCode::FORBIDDEN
        );
        // A broken feature store is a server-side issue, not a client error
        assert!(!GuardError::ResolverUnavailable("timeout".into()).is_client_error());
        assert!(GuardError::MissingTenant.is_client_error());
    }
}
