//! Plugin API traits for credential validation.
//!
//! Plugins implement [`CredentialValidator`] and register instances in a
//! [`ValidatorRegistry`](crate::ValidatorRegistry) under a stable name.
//! The resolver assembles managers from those names.

use async_trait::async_trait;
use warden_security::{Credential, Identity};

use crate::error::AuthNResolverError;

/// A single credential validation strategy.
///
/// Several validators may support the same credential shape; the order in
/// which a manager lists them is the order in which they are tried.
#[async_trait]
pub trait CredentialValidator: Send + Sync {
    /// Stable name used in manager configuration.
    fn name(&self) -> &str;

    /// Whether this validator handles credentials of this shape.
    fn supports(&self, credential: &Credential) -> bool;

    /// Validate the credential and return the resulting identity.
    ///
    /// Only called for credentials this validator [`supports`](Self::supports).
    ///
    /// # Errors
    ///
    /// - `InvalidCredentials` if the credential is rejected
    /// - `Internal` for unexpected errors
    async fn authenticate(&self, credential: &Credential) -> Result<Identity, AuthNResolverError>;
}

/// Opaque token validation collaborator.
///
/// Stands in for JWT verification, introspection endpoints and similar.
/// Every failure mode (unknown, expired, malformed) collapses to `None`.
#[async_trait]
pub trait TokenOracle: Send + Sync {
    /// Return the username the token was issued to, if the token is valid.
    async fn validate(&self, token: &str) -> Option<String>;
}
