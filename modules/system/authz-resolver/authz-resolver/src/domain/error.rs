//! Domain errors for the `AuthZ` resolver.

use authz_resolver_sdk::AuthZResolverError;

/// Internal domain errors.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("malformed rule configuration: {0}")]
    MalformedRuleConfiguration(String),
}

impl From<DomainError> for AuthZResolverError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::MalformedRuleConfiguration(msg) => Self::MalformedRuleConfiguration(msg),
        }
    }
}
