//! Domain layer for the `AuthN` resolver.

pub mod authenticator;
pub mod error;
pub mod local_client;
pub mod resolver;
pub mod service;

pub use authenticator::{Accepted, MultiProviderAuthenticator};
pub use error::DomainError;
pub use local_client::AuthNResolverLocalClient;
pub use resolver::ManagerResolver;
pub use service::Service;
