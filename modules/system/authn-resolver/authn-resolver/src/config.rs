//! Configuration for the `AuthN` resolver.

use serde::{Deserialize, Serialize};

/// Configuration.
///
/// Managers are named, ordered lists of validator names. Routes map path
/// prefixes to managers; the first matching prefix wins and unmatched paths
/// use `default_manager`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthNResolverConfig {
    pub managers: Vec<ManagerConfig>,
    pub routes: Vec<ManagerRoute>,
    pub default_manager: String,
}

impl Default for AuthNResolverConfig {
    fn default() -> Self {
        Self {
            managers: vec![
                ManagerConfig {
                    name: "actuator".to_owned(),
                    validators: vec!["token".to_owned(), "basic".to_owned()],
                },
                ManagerConfig {
                    name: "default".to_owned(),
                    validators: vec!["basic".to_owned()],
                },
            ],
            routes: vec![ManagerRoute {
                path_prefix: "/actuator".to_owned(),
                manager: "actuator".to_owned(),
            }],
            default_manager: "default".to_owned(),
        }
    }
}

/// A named authentication manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManagerConfig {
    pub name: String,
    /// Validator names in trial order.
    pub validators: Vec<String>,
}

/// Routes requests whose path starts with `path_prefix` to `manager`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManagerRoute {
    pub path_prefix: String,
    pub manager: String,
}
