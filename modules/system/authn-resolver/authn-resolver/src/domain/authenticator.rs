//! Multi-provider authentication over an ordered list of validators.

use std::fmt;
use std::sync::Arc;

use authn_resolver_sdk::{AuthNResolverError, CredentialValidator};
use warden_security::{Credential, Identity};

/// Identity accepted by a manager, with the validator that accepted it.
#[derive(Debug, Clone)]
pub struct Accepted {
    pub identity: Identity,
    pub validator: String,
}

/// A named authentication manager.
///
/// Tries its validators in order, skipping those that do not support the
/// credential shape. The first success wins.
pub struct MultiProviderAuthenticator {
    name: String,
    validators: Vec<Arc<dyn CredentialValidator>>,
}

impl MultiProviderAuthenticator {
    #[must_use]
    pub fn new(name: impl Into<String>, validators: Vec<Arc<dyn CredentialValidator>>) -> Self {
        Self {
            name: name.into(),
            validators,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Validator names in trial order.
    #[must_use]
    pub fn validator_names(&self) -> Vec<&str> {
        self.validators.iter().map(|v| v.name()).collect()
    }

    /// Authenticate the credential and return the identity.
    ///
    /// # Errors
    ///
    /// See [`authenticate_detailed`](Self::authenticate_detailed).
    pub async fn authenticate(&self, credential: &Credential) -> Result<Identity, AuthNResolverError> {
        self.authenticate_detailed(credential)
            .await
            .map(|accepted| accepted.identity)
    }

    /// Authenticate the credential and report which validator accepted it.
    ///
    /// # Errors
    ///
    /// - `UnsupportedCredentialType` when no validator supports the credential
    /// - the validator's own error when exactly one supporting validator failed
    /// - `AggregatedAuthenticationFailure` carrying the last reason when
    ///   several supporting validators failed
    pub async fn authenticate_detailed(
        &self,
        credential: &Credential,
    ) -> Result<Accepted, AuthNResolverError> {
        let mut attempts = 0_usize;
        let mut last_error: Option<AuthNResolverError> = None;

        for validator in self.validators.iter().filter(|v| v.supports(credential)) {
            attempts += 1;
            match validator.authenticate(credential).await {
                Ok(identity) => {
                    tracing::debug!(
                        manager = %self.name,
                        validator = validator.name(),
                        principal = identity.principal_name(),
                        "credential accepted"
                    );
                    return Ok(Accepted {
                        identity,
                        validator: validator.name().to_owned(),
                    });
                }
                Err(e) => {
                    tracing::debug!(
                        manager = %self.name,
                        validator = validator.name(),
                        error = %e,
                        "validator rejected credential"
                    );
                    last_error = Some(e);
                }
            }
        }

        let Some(last_error) = last_error else {
            return Err(AuthNResolverError::UnsupportedCredentialType(
                credential.kind(),
            ));
        };

        if attempts == 1 {
            return Err(last_error);
        }

        let last_reason = match last_error {
            AuthNResolverError::InvalidCredentials(reason) | AuthNResolverError::Internal(reason) => {
                reason
            }
            other => other.to_string(),
        };
        Err(AuthNResolverError::AggregatedAuthenticationFailure {
            last_reason,
            attempts,
        })
    }
}

impl fmt::Debug for MultiProviderAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiProviderAuthenticator")
            .field("name", &self.name)
            .field("validators", &self.validator_names())
            .finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
pub(crate) mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use tracing_test::traced_test;
    use warden_security::{CredentialKind, Role};

    use super::*;

    /// Test validator with a fixed outcome and a call counter.
    pub(crate) struct FixedValidator {
        name: &'static str,
        kind: CredentialKind,
        outcome: Result<&'static str, &'static str>,
        calls: AtomicUsize,
    }

    impl FixedValidator {
        pub(crate) fn accepting(name: &'static str, kind: CredentialKind, principal: &'static str) -> Arc<Self> {
            Arc::new(Self {
                name,
                kind,
                outcome: Ok(principal),
                calls: AtomicUsize::new(0),
            })
        }

        pub(crate) fn rejecting(name: &'static str, kind: CredentialKind, reason: &'static str) -> Arc<Self> {
            Arc::new(Self {
                name,
                kind,
                outcome: Err(reason),
                calls: AtomicUsize::new(0),
            })
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CredentialValidator for FixedValidator {
        fn name(&self) -> &str {
            self.name
        }

        fn supports(&self, credential: &Credential) -> bool {
            credential.kind() == self.kind
        }

        async fn authenticate(&self, _credential: &Credential) -> Result<Identity, AuthNResolverError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.outcome {
                Ok(principal) => Ok(Identity::builder()
                    .principal_name(principal)
                    .role("USER")
                    .build()
                    .unwrap()),
                Err(reason) => Err(AuthNResolverError::InvalidCredentials(reason.to_owned())),
            }
        }
    }

    #[tokio::test]
    async fn first_supporting_success_wins() {
        let custom = FixedValidator::accepting("custom", CredentialKind::UsernamePassword, "custom-user");
        let basic = FixedValidator::accepting("basic", CredentialKind::UsernamePassword, "basic-user");
        let manager = MultiProviderAuthenticator::new(
            "default",
            vec![custom.clone(), basic.clone()],
        );

        let accepted = manager
            .authenticate_detailed(&Credential::username_password("u", "p"))
            .await
            .unwrap();

        assert_eq!(accepted.identity.principal_name(), "custom-user");
        assert_eq!(accepted.validator, "custom");
        assert!(accepted.identity.has_role(&Role::new("USER")));
        assert_eq!(basic.calls(), 0);
    }

    #[tokio::test]
    async fn falls_through_to_next_supporting_validator() {
        let custom = FixedValidator::rejecting("custom", CredentialKind::UsernamePassword, "not mine");
        let basic = FixedValidator::accepting("basic", CredentialKind::UsernamePassword, "admin");
        let manager = MultiProviderAuthenticator::new(
            "default",
            vec![custom.clone(), basic.clone()],
        );

        let identity = manager
            .authenticate(&Credential::username_password("admin", "adminpass"))
            .await
            .unwrap();

        assert_eq!(identity.principal_name(), "admin");
        assert_eq!(custom.calls(), 1);
        assert_eq!(basic.calls(), 1);
    }

    #[tokio::test]
    async fn unsupported_validators_are_skipped() {
        let token = FixedValidator::accepting("token", CredentialKind::BearerToken, "admin");
        let basic = FixedValidator::accepting("basic", CredentialKind::UsernamePassword, "user");
        let manager = MultiProviderAuthenticator::new("actuator", vec![token.clone(), basic]);

        let identity = manager
            .authenticate(&Credential::username_password("user", "userpass"))
            .await
            .unwrap();

        assert_eq!(identity.principal_name(), "user");
        assert_eq!(token.calls(), 0);
    }

    #[tokio::test]
    async fn no_supporting_validator_is_unsupported_credential_type() {
        let basic = FixedValidator::accepting("basic", CredentialKind::UsernamePassword, "user");
        let manager = MultiProviderAuthenticator::new("default", vec![basic]);

        let err = manager
            .authenticate(&Credential::bearer("admin-token-123"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            AuthNResolverError::UnsupportedCredentialType(CredentialKind::BearerToken)
        );
    }

    #[tokio::test]
    async fn single_supporting_failure_is_invalid_credentials() {
        let basic = FixedValidator::accepting("basic", CredentialKind::UsernamePassword, "user");
        let token = FixedValidator::rejecting("token", CredentialKind::BearerToken, "invalid or expired token");
        let manager = MultiProviderAuthenticator::new("actuator", vec![basic, token]);

        let err = manager
            .authenticate(&Credential::bearer("nope"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            AuthNResolverError::InvalidCredentials("invalid or expired token".to_owned())
        );
    }

    #[tokio::test]
    #[traced_test]
    async fn all_failures_aggregate_with_last_reason() {
        let first = FixedValidator::rejecting("custom", CredentialKind::UsernamePassword, "first reason");
        let second = FixedValidator::rejecting("basic", CredentialKind::UsernamePassword, "second reason");
        let manager = MultiProviderAuthenticator::new("default", vec![first, second]);

        let err = manager
            .authenticate(&Credential::username_password("u", "p"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            AuthNResolverError::AggregatedAuthenticationFailure {
                last_reason: "second reason".to_owned(),
                attempts: 2,
            }
        );
        assert!(logs_contain("first reason"));
        assert!(logs_contain("validator rejected credential"));
    }

    #[test]
    fn debug_lists_validator_names() {
        let manager = MultiProviderAuthenticator::new(
            "actuator",
            vec![
                FixedValidator::accepting("token", CredentialKind::BearerToken, "a"),
                FixedValidator::accepting("basic", CredentialKind::UsernamePassword, "b"),
            ],
        );

        assert_eq!(manager.validator_names(), vec!["token", "basic"]);
        assert!(format!("{manager:?}").contains("token"));
    }
}
