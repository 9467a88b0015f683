//! Configuration for the `AuthZ` resolver.

use authz_resolver_sdk::SecurityRulesConfig;
use serde::{Deserialize, Serialize};

/// Configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthZResolverConfig {
    /// Initial rule table.
    pub rules: SecurityRulesConfig,
}
