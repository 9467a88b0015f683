//! Path-based selection of the authentication manager.

use std::collections::HashMap;
use std::sync::Arc;

use authn_resolver_sdk::{ManagerInfo, ManagerRouteInfo, ManagerSummary, ValidatorRegistry};

use super::authenticator::MultiProviderAuthenticator;
use super::error::DomainError;
use crate::config::AuthNResolverConfig;

/// Picks the manager for a request path.
///
/// Routes are checked in order with a plain prefix test; the first match
/// wins, and unmatched paths get the default manager.
#[derive(Debug)]
pub struct ManagerResolver {
    managers: Vec<Arc<MultiProviderAuthenticator>>,
    routes: Vec<(String, Arc<MultiProviderAuthenticator>)>,
    default: Arc<MultiProviderAuthenticator>,
}

impl ManagerResolver {
    #[must_use]
    pub fn new(
        routes: Vec<(String, Arc<MultiProviderAuthenticator>)>,
        default: Arc<MultiProviderAuthenticator>,
    ) -> Self {
        let mut managers: Vec<Arc<MultiProviderAuthenticator>> = Vec::new();
        for manager in routes.iter().map(|(_, m)| m).chain([&default]) {
            if !managers.iter().any(|known| Arc::ptr_eq(known, manager)) {
                managers.push(manager.clone());
            }
        }
        Self {
            managers,
            routes,
            default,
        }
    }

    /// Build managers and routes from configuration.
    ///
    /// # Errors
    ///
    /// Fails when a manager is empty or defined twice, lists a validator
    /// missing from the registry, or when a route or the default points at
    /// an undefined manager.
    pub fn from_config(
        cfg: &AuthNResolverConfig,
        registry: &ValidatorRegistry,
    ) -> Result<Self, DomainError> {
        let mut managers: HashMap<&str, Arc<MultiProviderAuthenticator>> = HashMap::new();
        let mut ordered = Vec::with_capacity(cfg.managers.len());

        for manager in &cfg.managers {
            if manager.validators.is_empty() {
                return Err(DomainError::EmptyManager(manager.name.clone()));
            }

            let validators = manager
                .validators
                .iter()
                .map(|name| {
                    registry.get(name).ok_or_else(|| DomainError::UnknownValidator {
                        manager: manager.name.clone(),
                        validator: name.clone(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            let built = Arc::new(MultiProviderAuthenticator::new(
                manager.name.clone(),
                validators,
            ));
            ordered.push(built.clone());
            if managers.insert(manager.name.as_str(), built).is_some() {
                return Err(DomainError::DuplicateManager(manager.name.clone()));
            }
        }

        let lookup = |name: &str| {
            managers
                .get(name)
                .cloned()
                .ok_or_else(|| DomainError::UnknownManager(name.to_owned()))
        };

        let routes = cfg
            .routes
            .iter()
            .map(|route| {
                lookup(&route.manager).map(|manager| (route.path_prefix.clone(), manager))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let default = lookup(&cfg.default_manager)?;

        Ok(Self {
            managers: ordered,
            routes,
            default,
        })
    }

    /// Manager for the request path.
    #[must_use]
    pub fn resolve(&self, path: &str) -> &Arc<MultiProviderAuthenticator> {
        self.routes
            .iter()
            .find(|(prefix, _)| path.starts_with(prefix.as_str()))
            .map_or(&self.default, |(_, manager)| manager)
    }

    /// Managers in configuration order, with their routes.
    #[must_use]
    pub fn summary(&self) -> ManagerSummary {
        ManagerSummary {
            managers: self
                .managers
                .iter()
                .map(|m| ManagerInfo {
                    name: m.name().to_owned(),
                    validators: m.validator_names().into_iter().map(str::to_owned).collect(),
                })
                .collect(),
            routes: self
                .routes
                .iter()
                .map(|(prefix, m)| ManagerRouteInfo {
                    path_prefix: prefix.clone(),
                    manager: m.name().to_owned(),
                })
                .collect(),
            default_manager: self.default.name().to_owned(),
        }
    }
}
