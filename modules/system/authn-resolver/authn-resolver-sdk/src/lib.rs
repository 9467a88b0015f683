#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! `AuthN` Resolver SDK
//!
//! This crate provides the public API for the `authn_resolver` module:
//!
//! - [`AuthNResolverClient`] - Public API trait for consumers
//! - [`CredentialValidator`] - Plugin API trait for validation strategies
//! - [`TokenOracle`] - Collaborator that maps opaque tokens to usernames
//! - [`ValidatorRegistry`] - Named validators, assembled into managers by the resolver
//! - [`AuthenticationResult`] - Authentication result model
//! - [`ManagerSummary`] - Configured managers and their routes
//! - [`AuthNResolverError`] - Error types
//!
//! ## Usage
//!
//! ```ignore
//! use authn_resolver_sdk::AuthNResolverClient;
//!
//! let result = authn.authenticate(req.uri().path(), &credential).await?;
//! let identity = result.identity;
//! ```

pub mod api;
pub mod error;
pub mod models;
pub mod plugin_api;
pub mod registry;

// Re-export main types at crate root
pub use api::AuthNResolverClient;
pub use error::AuthNResolverError;
pub use models::{AuthenticationResult, ManagerInfo, ManagerRouteInfo, ManagerSummary};
pub use plugin_api::{CredentialValidator, TokenOracle};
pub use registry::ValidatorRegistry;
