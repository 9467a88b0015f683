//! Error types for the `AuthZ` resolver module.

use thiserror::Error;

/// Errors that can occur when using the `AuthZ` resolver API.
///
/// Access denial is expressed as [`Decision::Deny`](crate::Decision::Deny),
/// never as an error variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthZResolverError {
    /// The rule configuration is invalid. The current table is unchanged.
    #[error("malformed rule configuration: {0}")]
    MalformedRuleConfiguration(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}
