//! Bearer token validator.

use std::sync::Arc;

use async_trait::async_trait;
use authn_resolver_sdk::{AuthNResolverError, CredentialValidator, TokenOracle};
use secrecy::ExposeSecret;
use warden_security::{Credential, Identity};

use super::directory::UserDirectory;

const INVALID_TOKEN: &str = "invalid or expired token";
const UNKNOWN_SUBJECT: &str = "token subject is not a known user";

/// Validates [`Credential::BearerToken`] through a [`TokenOracle`] and
/// grants the roles the directory holds for the token's user.
pub struct TokenValidator {
    name: String,
    oracle: Arc<dyn TokenOracle>,
    directory: Arc<UserDirectory>,
}

impl TokenValidator {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        oracle: Arc<dyn TokenOracle>,
        directory: Arc<UserDirectory>,
    ) -> Self {
        Self {
            name: name.into(),
            oracle,
            directory,
        }
    }
}

#[async_trait]
impl CredentialValidator for TokenValidator {
    fn name(&self) -> &str {
        &self.name
    }

    fn supports(&self, credential: &Credential) -> bool {
        matches!(credential, Credential::BearerToken { .. })
    }

    async fn authenticate(&self, credential: &Credential) -> Result<Identity, AuthNResolverError> {
        let Credential::BearerToken { token } = credential else {
            return Err(AuthNResolverError::UnsupportedCredentialType(
                credential.kind(),
            ));
        };

        let Some(username) = self.oracle.validate(token.expose_secret()).await else {
            return Err(AuthNResolverError::InvalidCredentials(
                INVALID_TOKEN.to_owned(),
            ));
        };

        self.directory
            .get(&username)
            .map(super::directory::UserRecord::identity)
            .ok_or_else(|| {
                tracing::warn!(username = %username, "token oracle returned a user missing from the directory");
                AuthNResolverError::InvalidCredentials(UNKNOWN_SUBJECT.to_owned())
            })
    }
}
