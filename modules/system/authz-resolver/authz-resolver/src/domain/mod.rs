//! Domain layer for the `AuthZ` resolver.

pub mod error;
pub mod evaluator;
pub mod local_client;
pub mod rule_table;
pub mod service;

pub use error::DomainError;
pub use local_client::AuthZResolverLocalClient;
pub use rule_table::{EndpointPattern, RuleTable, UrlPattern};
pub use service::{RuleSnapshot, Service};
