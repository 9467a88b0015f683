//! Domain layer for the static `AuthN` plugin.

pub mod basic;
pub mod directory;
pub mod error;
pub mod oracle;
pub mod token;

pub use basic::BasicValidator;
pub use directory::{UserDirectory, UserRecord};
pub use error::DomainError;
pub use oracle::StaticTokenOracle;
pub use token::TokenValidator;
