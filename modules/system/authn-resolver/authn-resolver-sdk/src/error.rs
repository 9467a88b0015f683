//! Error types for the `AuthN` resolver module.

use thiserror::Error;
use warden_security::CredentialKind;

/// Errors that can occur when authenticating a credential.
///
/// Messages never contain credential material.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthNResolverError {
    /// No validator in the selected manager accepts this credential shape.
    #[error("unsupported credential type: {0}")]
    UnsupportedCredentialType(CredentialKind),

    /// A validator rejected the credential.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Several validators were tried and all of them failed.
    ///
    /// Only the last failure is surfaced; earlier ones are logged.
    #[error("authentication failed with all {attempts} validators: {last_reason}")]
    AggregatedAuthenticationFailure { last_reason: String, attempts: usize },

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthNResolverError {
    /// Short reason safe to show to the caller.
    #[must_use]
    pub const fn reason_code(&self) -> &'static str {
        match self {
            Self::UnsupportedCredentialType(_) => "unsupported credential type",
            Self::InvalidCredentials(_) => "invalid credentials",
            Self::AggregatedAuthenticationFailure { .. } => "authentication failed",
            Self::Internal(_) => "internal error",
        }
    }

    /// Whether the failure is attributable to the presented credential
    /// rather than to the service.
    #[must_use]
    pub const fn is_credential_failure(&self) -> bool {
        !matches!(self, Self::Internal(_))
    }
}
