//! Service for the `AuthN` resolver.

use authn_resolver_sdk::{AuthenticationResult, ManagerSummary, ValidatorRegistry};
use warden_security::Credential;

use super::error::DomainError;
use super::resolver::ManagerResolver;
use crate::config::AuthNResolverConfig;

/// `AuthN` resolver service.
///
/// Owns the manager resolver built at startup.
#[derive(Debug)]
pub struct Service {
    resolver: ManagerResolver,
}

impl Service {
    #[must_use]
    pub fn new(resolver: ManagerResolver) -> Self {
        Self { resolver }
    }

    /// Build the service from configuration and registered validators.
    ///
    /// # Errors
    ///
    /// Returns a configuration error from [`ManagerResolver::from_config`].
    pub fn from_config(
        cfg: &AuthNResolverConfig,
        registry: &ValidatorRegistry,
    ) -> Result<Self, DomainError> {
        ManagerResolver::from_config(cfg, registry).map(Self::new)
    }

    #[must_use]
    pub fn resolver(&self) -> &ManagerResolver {
        &self.resolver
    }

    #[must_use]
    pub fn managers(&self) -> ManagerSummary {
        self.resolver.summary()
    }

    /// Authenticate a credential with the manager selected by the path.
    ///
    /// # Errors
    ///
    /// Wraps the manager's authentication error.
    #[tracing::instrument(skip_all, fields(path = request_path, kind = %credential.kind(), manager))]
    pub async fn authenticate(
        &self,
        request_path: &str,
        credential: &Credential,
    ) -> Result<AuthenticationResult, DomainError> {
        let manager = self.resolver.resolve(request_path);
        tracing::Span::current().record("manager", manager.name());

        let accepted = manager.authenticate_detailed(credential).await?;

        Ok(AuthenticationResult {
            identity: accepted.identity,
            manager: manager.name().to_owned(),
            validator: accepted.validator,
        })
    }
}
