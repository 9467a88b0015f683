//! `AuthZ` Resolver Module
//!
//! Holds the endpoint security rule table for the process environment and
//! answers allow/deny for each request.
//!
//! The table is an immutable snapshot; replacing it swaps the whole table
//! atomically while in-flight requests keep the snapshot they started with.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;
pub mod module;

pub use module::AuthZResolver;
