//! Rule table configuration document.
//!
//! Environment names are kept as strings here so that an unknown name is
//! reported as a configuration error when the table is built, instead of
//! failing deserialization with a less specific message.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Endpoint security configuration: per-environment defaults and ordered
/// endpoint patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SecurityRulesConfig {
    /// Default rule per environment, applied when no endpoint rule matches.
    pub environments: BTreeMap<String, EnvironmentDefaults>,
    /// Endpoint patterns in match order. The first matching pattern wins.
    pub endpoints: Vec<EndpointConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnvironmentDefaults {
    pub default_authenticated: bool,
    pub default_roles: Vec<String>,
}

impl Default for EnvironmentDefaults {
    fn default() -> Self {
        Self {
            default_authenticated: true,
            default_roles: Vec::new(),
        }
    }
}

/// One URL pattern and its rules per environment.
///
/// `url` is either an exact path or a prefix ending in `/**`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointConfig {
    pub url: String,
    #[serde(default)]
    pub environments: BTreeMap<String, EndpointEnvironmentConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EndpointEnvironmentConfig {
    /// Rules in match order. The first rule listing the method wins.
    pub rules: Vec<RuleConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleConfig {
    pub methods: Vec<String>,
    pub authenticated: bool,
    pub roles: Vec<String>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            methods: vec!["GET".to_owned()],
            authenticated: true,
            roles: Vec::new(),
        }
    }
}
