//! Public API trait for the `AuthN` resolver.

use async_trait::async_trait;
use warden_security::Credential;

use crate::error::AuthNResolverError;
use crate::models::{AuthenticationResult, ManagerSummary};

/// Public API trait for the `AuthN` resolver.
///
/// Consumed by the API gateway once per request that carries a credential:
///
/// ```ignore
/// let result = authn.authenticate("/actuator/env", &credential).await?;
/// let identity = result.identity;
/// ```
#[async_trait]
pub trait AuthNResolverClient: Send + Sync {
    /// Pick the manager for `request_path` and run its validators against
    /// the credential.
    ///
    /// # Errors
    ///
    /// - `UnsupportedCredentialType` if no validator of the manager handles the credential
    /// - `InvalidCredentials` if the only supporting validator rejected it
    /// - `AggregatedAuthenticationFailure` if several validators rejected it
    /// - `Internal` for unexpected errors
    async fn authenticate(
        &self,
        request_path: &str,
        credential: &Credential,
    ) -> Result<AuthenticationResult, AuthNResolverError>;

    /// The configured managers, their validators and the path routes.
    fn managers(&self) -> ManagerSummary;
}
