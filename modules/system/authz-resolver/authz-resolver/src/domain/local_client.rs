//! Local (in-process) client for the `AuthZ` resolver.

use std::sync::Arc;

use authz_resolver_sdk::{
    AuthZResolverClient, AuthZResolverError, Decision, RuleResolution, SecurityRulesConfig,
};
use http::Method;
use warden_security::{Environment, Identity};

use super::{DomainError, Service};

/// Local client wrapping the service.
pub struct AuthZResolverLocalClient {
    svc: Arc<Service>,
}

impl AuthZResolverLocalClient {
    #[must_use]
    pub fn new(svc: Arc<Service>) -> Self {
        Self { svc }
    }
}

fn log_and_convert(op: &str, e: DomainError) -> AuthZResolverError {
    tracing::error!(operation = op, error = ?e, "authz_resolver call failed");
    e.into()
}

impl AuthZResolverClient for AuthZResolverLocalClient {
    fn environment(&self) -> Environment {
        self.svc.environment()
    }

    fn authorize(&self, request_path: &str, method: &Method, identity: &Identity) -> Decision {
        self.svc.authorize(request_path, method, identity)
    }

    fn resolve_rule(&self, request_path: &str, method: &Method) -> RuleResolution {
        self.svc.resolve_rule(request_path, method)
    }

    fn default_rule(&self) -> RuleResolution {
        self.svc.default_rule()
    }

    fn current_rules(&self) -> SecurityRulesConfig {
        self.svc.current_rules()
    }

    fn replace_rules(&self, config: &SecurityRulesConfig) -> Result<(), AuthZResolverError> {
        self.svc
            .replace_rules(config)
            .map_err(|e| log_and_convert("replace_rules", e))
    }
}
