//! `AuthN` resolver module.

use std::sync::{Arc, OnceLock};

use anyhow::Context;
use authn_resolver_sdk::{AuthNResolverClient, ValidatorRegistry};
use tracing::info;

use crate::config::AuthNResolverConfig;
use crate::domain::{AuthNResolverLocalClient, Service};

/// `AuthN` Resolver module.
///
/// This module:
/// 1. Builds one manager per configured validator list
/// 2. Binds path prefixes to managers
/// 3. Exposes the result as an `AuthNResolverClient`
///
/// Validators must be registered before `init` runs.
#[derive(Default)]
pub struct AuthNResolver {
    service: OnceLock<Arc<Service>>,
}

impl AuthNResolver {
    /// Initialize the module and return the client for consumers.
    ///
    /// # Errors
    ///
    /// Fails on invalid manager configuration or when called twice.
    #[tracing::instrument(skip_all, fields(default_manager = %cfg.default_manager))]
    pub fn init(
        &self,
        cfg: &AuthNResolverConfig,
        registry: &ValidatorRegistry,
    ) -> anyhow::Result<Arc<dyn AuthNResolverClient>> {
        info!(
            managers = cfg.managers.len(),
            routes = cfg.routes.len(),
            validators = ?registry.names(),
            "Initializing authn_resolver"
        );

        let svc = Arc::new(
            Service::from_config(cfg, registry).context("invalid authn_resolver configuration")?,
        );

        for route in &cfg.routes {
            info!(
                prefix = %route.path_prefix,
                manager = %route.manager,
                "Bound path prefix to authentication manager"
            );
        }

        self.service
            .set(svc.clone())
            .map_err(|_| anyhow::anyhow!("Service already initialized"))?;

        Ok(Arc::new(AuthNResolverLocalClient::new(svc)))
    }

    #[must_use]
    pub fn service(&self) -> Option<&Arc<Service>> {
        self.service.get()
    }
}
