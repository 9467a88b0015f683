//! `AuthZ` resolver module.

use std::sync::{Arc, OnceLock};

use anyhow::Context;
use authz_resolver_sdk::AuthZResolverClient;
use tracing::info;
use warden_security::Environment;

use crate::config::AuthZResolverConfig;
use crate::domain::{AuthZResolverLocalClient, Service};

/// `AuthZ` Resolver module.
///
/// Builds the initial rule table and exposes it as an `AuthZResolverClient`
/// bound to the process environment.
#[derive(Default)]
pub struct AuthZResolver {
    service: OnceLock<Arc<Service>>,
}

impl AuthZResolver {
    /// Initialize the module and return the client for consumers.
    ///
    /// # Errors
    ///
    /// Fails on malformed rule configuration or when called twice.
    #[tracing::instrument(skip_all, fields(environment = %environment))]
    pub fn init(
        &self,
        cfg: &AuthZResolverConfig,
        environment: Environment,
    ) -> anyhow::Result<Arc<dyn AuthZResolverClient>> {
        info!(
            endpoints = cfg.rules.endpoints.len(),
            environments = cfg.rules.environments.len(),
            "Initializing authz_resolver"
        );

        let svc = Arc::new(
            Service::from_config(&cfg.rules, environment)
                .context("invalid authz_resolver rule configuration")?,
        );

        let default = svc.default_rule();
        info!(
            source = ?default.source,
            authenticated = default.rule.requires_authentication(),
            roles = ?default.rule.roles(),
            "Effective default rule"
        );

        self.service
            .set(svc.clone())
            .map_err(|_| anyhow::anyhow!("Service already initialized"))?;

        Ok(Arc::new(AuthZResolverLocalClient::new(svc)))
    }

    #[must_use]
    pub fn service(&self) -> Option<&Arc<Service>> {
        self.service.get()
    }
}
