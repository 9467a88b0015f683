//! Domain models for the `AuthN` resolver module.

use serde::Serialize;
use warden_security::Identity;

/// Result of a successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// The identity produced by the accepting validator.
    pub identity: Identity,
    /// Name of the manager the request path resolved to.
    pub manager: String,
    /// Name of the validator that accepted the credential.
    pub validator: String,
}

/// A manager and its validators in trial order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManagerInfo {
    pub name: String,
    pub validators: Vec<String>,
}

/// A path prefix bound to a manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManagerRouteInfo {
    pub path_prefix: String,
    pub manager: String,
}

/// The configured managers and the routes selecting them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManagerSummary {
    /// Managers in configuration order.
    pub managers: Vec<ManagerInfo>,
    /// Routes in match order.
    pub routes: Vec<ManagerRouteInfo>,
    pub default_manager: String,
}

impl ManagerSummary {
    /// Name of the manager `request_path` resolves to: the first route whose
    /// prefix the path starts with, else the default manager.
    #[must_use]
    pub fn manager_for(&self, request_path: &str) -> &str {
        self.routes
            .iter()
            .find(|route| request_path.starts_with(route.path_prefix.as_str()))
            .map_or(self.default_manager.as_str(), |route| route.manager.as_str())
    }
}
