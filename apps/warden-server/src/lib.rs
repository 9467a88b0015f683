#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Warden server: configuration loading, logging and module wiring for the
//! `warden-server` binary.

pub mod config;
pub mod logging;
pub mod wiring;
