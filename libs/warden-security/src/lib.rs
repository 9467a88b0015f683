#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Security primitives shared by every Warden module.
//!
//! - [`Credential`] - what a request presents (username/password or bearer token)
//! - [`Identity`] - who the request is, once a validator accepted the credential
//! - [`Role`] - a role name, normalized so `ROLE_ADMIN` and `ADMIN` are equal
//! - [`Environment`] - the deployment stage the process runs in

pub mod constants;
pub mod credential;
pub mod environment;
pub mod identity;
pub mod role;
pub mod serde_secret;

pub use credential::{Credential, CredentialKind};
pub use environment::{Environment, ParseEnvironmentError};
pub use identity::{Identity, IdentityBuilder, IdentityError};
pub use role::Role;
