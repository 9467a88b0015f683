//! Username/password validator.

use std::sync::Arc;

use async_trait::async_trait;
use authn_resolver_sdk::{AuthNResolverError, CredentialValidator};
use secrecy::ExposeSecret;
use warden_security::{Credential, Identity};

use super::directory::UserDirectory;

const BAD_CREDENTIALS: &str = "invalid username or password";

/// Validates [`Credential::UsernamePassword`] against the user directory.
pub struct BasicValidator {
    name: String,
    directory: Arc<UserDirectory>,
}

impl BasicValidator {
    #[must_use]
    pub fn new(name: impl Into<String>, directory: Arc<UserDirectory>) -> Self {
        Self {
            name: name.into(),
            directory,
        }
    }
}

#[async_trait]
impl CredentialValidator for BasicValidator {
    fn name(&self) -> &str {
        &self.name
    }

    fn supports(&self, credential: &Credential) -> bool {
        matches!(credential, Credential::UsernamePassword { .. })
    }

    async fn authenticate(&self, credential: &Credential) -> Result<Identity, AuthNResolverError> {
        let Credential::UsernamePassword { username, password } = credential else {
            return Err(AuthNResolverError::UnsupportedCredentialType(
                credential.kind(),
            ));
        };

        match self.directory.get(username) {
            Some(user) if user.password_matches(password.expose_secret()) => Ok(user.identity()),
            _ => Err(AuthNResolverError::InvalidCredentials(
                BAD_CREDENTIALS.to_owned(),
            )),
        }
    }
}
