#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! API Gateway Module
//!
//! Owns the HTTP server. Every request passes through [`auth::auth_middleware`],
//! which authenticates the presented credential with the `AuthN` resolver
//! and asks the `AuthZ` resolver whether the identity may call the endpoint.

pub mod auth;
pub mod config;
pub mod cors;
pub mod credentials;
pub mod handlers;
pub mod module;
pub mod problem;
pub mod security_debug;

pub use config::ApiGatewayConfig;
pub use module::ApiGateway;
