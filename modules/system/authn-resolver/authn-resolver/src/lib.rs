//! `AuthN` Resolver Module
//!
//! Picks an authentication manager for each request path and runs the
//! manager's ordered validators against the presented credential.
//!
//! Provides the `AuthNResolverClient` implementation consumed by the API
//! gateway.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;
pub mod module;

pub use module::AuthNResolver;
