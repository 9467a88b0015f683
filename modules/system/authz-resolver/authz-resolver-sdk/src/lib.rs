#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! `AuthZ` Resolver SDK
//!
//! This crate provides the public API for the `authz_resolver` module:
//!
//! - [`AuthZResolverClient`] - Public API trait for consumers
//! - [`SecurityRule`], [`Decision`], [`DenyReason`] - Decision models
//! - [`RuleResolution`], [`RuleSource`] - Which rule applied and why
//! - [`SecurityRulesConfig`] - Rule table configuration document
//! - [`AuthZResolverError`] - Error types

pub mod api;
pub mod error;
pub mod models;
pub mod rules;

// Re-export main types at crate root
pub use api::AuthZResolverClient;
pub use error::AuthZResolverError;
pub use models::{Decision, DenyReason, RuleResolution, RuleSource, SecurityRule, parse_method};
pub use rules::{
    EndpointConfig, EndpointEnvironmentConfig, EnvironmentDefaults, RuleConfig,
    SecurityRulesConfig,
};
