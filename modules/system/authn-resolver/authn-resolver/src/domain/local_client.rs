//! Local (in-process) client for the `AuthN` resolver.

use std::sync::Arc;

use async_trait::async_trait;
use authn_resolver_sdk::{
    AuthNResolverClient, AuthNResolverError, AuthenticationResult, ManagerSummary,
};
use warden_security::Credential;

use super::{DomainError, Service};

/// Local client wrapping the service.
pub struct AuthNResolverLocalClient {
    svc: Arc<Service>,
}

impl AuthNResolverLocalClient {
    #[must_use]
    pub fn new(svc: Arc<Service>) -> Self {
        Self { svc }
    }
}

fn log_and_convert(op: &str, e: DomainError) -> AuthNResolverError {
    if e.is_credential_failure() {
        tracing::debug!(operation = op, error = %e, "authn_resolver rejected credential");
    } else {
        tracing::error!(operation = op, error = ?e, "authn_resolver call failed");
    }
    e.into()
}

#[async_trait]
impl AuthNResolverClient for AuthNResolverLocalClient {
    async fn authenticate(
        &self,
        request_path: &str,
        credential: &Credential,
    ) -> Result<AuthenticationResult, AuthNResolverError> {
        self.svc
            .authenticate(request_path, credential)
            .await
            .map_err(|e| log_and_convert("authenticate", e))
    }

    fn managers(&self) -> ManagerSummary {
        self.svc.managers()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use warden_security::CredentialKind;

    use super::*;
    use crate::config::AuthNResolverConfig;
    use crate::domain::authenticator::tests::FixedValidator;
    use authn_resolver_sdk::ValidatorRegistry;

    fn client(token: Arc<FixedValidator>, basic: Arc<FixedValidator>) -> AuthNResolverLocalClient {
        let mut registry = ValidatorRegistry::new();
        registry.register(token);
        registry.register(basic);
        let svc = Service::from_config(&AuthNResolverConfig::default(), &registry).unwrap();
        AuthNResolverLocalClient::new(Arc::new(svc))
    }

    #[tokio::test]
    async fn reports_manager_and_validator() {
        let client = client(
            FixedValidator::accepting("token", CredentialKind::BearerToken, "admin"),
            FixedValidator::accepting("basic", CredentialKind::UsernamePassword, "user"),
        );

        let result = client
            .authenticate("/actuator/env", &Credential::bearer("admin-token-123"))
            .await
            .unwrap();

        assert_eq!(result.manager, "actuator");
        assert_eq!(result.validator, "token");
        assert_eq!(result.identity.principal_name(), "admin");
    }

    #[test]
    fn managers_reflect_default_configuration() {
        let client = client(
            FixedValidator::accepting("token", CredentialKind::BearerToken, "admin"),
            FixedValidator::accepting("basic", CredentialKind::UsernamePassword, "user"),
        );

        let summary = client.managers();
        assert_eq!(summary.default_manager, "default");
        assert_eq!(summary.managers.len(), 2);
        assert_eq!(summary.manager_for("/actuator/health"), "actuator");
    }

    #[tokio::test]
    async fn bearer_outside_actuator_is_unsupported() {
        let client = client(
            FixedValidator::accepting("token", CredentialKind::BearerToken, "admin"),
            FixedValidator::accepting("basic", CredentialKind::UsernamePassword, "user"),
        );

        let err = client
            .authenticate("/api/secure", &Credential::bearer("admin-token-123"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            AuthNResolverError::UnsupportedCredentialType(CredentialKind::BearerToken)
        );
    }

    #[tokio::test]
    async fn rejection_passes_through_unchanged() {
        let client = client(
            FixedValidator::rejecting("token", CredentialKind::BearerToken, "invalid or expired token"),
            FixedValidator::accepting("basic", CredentialKind::UsernamePassword, "user"),
        );

        let err = client
            .authenticate("/actuator/env", &Credential::bearer("nope"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            AuthNResolverError::InvalidCredentials("invalid or expired token".to_owned())
        );
    }
}
