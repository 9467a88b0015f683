#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Static `AuthN` Plugin
//!
//! Credential validators backed by configuration, for development and testing.
//!
//! - **`basic`**: username/password against a static user directory. Passwords
//!   may be plain text, `{noop}`-prefixed, or `{sha256}<hex>` digests.
//! - **`token`**: bearer tokens resolved to a username by a [`TokenOracle`](authn_resolver_sdk::TokenOracle),
//!   roles taken from the same directory. The built-in oracle is a static table.
//!
//! ## Configuration
//!
//! ```yaml
//! static_authn_plugin:
//!   users:
//!     - username: admin
//!       password: adminpass
//!       roles: [ROLE_ADMIN]
//!   tokens:
//!     - token: admin-token-123
//!       username: admin
//! ```

pub mod config;
pub mod domain;
pub mod module;

pub use module::StaticAuthNPlugin;
