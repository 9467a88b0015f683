//! Domain errors for the `AuthN` resolver.

use authn_resolver_sdk::AuthNResolverError;

/// Internal domain errors.
#[derive(thiserror::Error, Debug)]
pub enum DomainError {
    #[error("manager '{manager}' references unknown validator '{validator}'")]
    UnknownValidator { manager: String, validator: String },

    #[error("unknown manager '{0}'")]
    UnknownManager(String),

    #[error("manager '{0}' has no validators")]
    EmptyManager(String),

    #[error("manager '{0}' is defined more than once")]
    DuplicateManager(String),

    #[error(transparent)]
    Authentication(#[from] AuthNResolverError),
}

impl DomainError {
    /// Whether the error is an ordinary credential rejection rather than a
    /// fault worth an error log.
    #[must_use]
    pub fn is_credential_failure(&self) -> bool {
        matches!(self, Self::Authentication(e) if e.is_credential_failure())
    }
}

impl From<DomainError> for AuthNResolverError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Authentication(inner) => inner,
            other @ (DomainError::UnknownValidator { .. }
            | DomainError::UnknownManager(_)
            | DomainError::EmptyManager(_)
            | DomainError::DuplicateManager(_)) => Self::Internal(other.to_string()),
        }
    }
}
