use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::ROLE_PREFIX;

/// A role name.
///
/// A leading `ROLE_` is stripped on construction, so `Role::new("ROLE_ADMIN")`
/// and `Role::new("ADMIN")` are equal. Comparison is case-sensitive otherwise.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Role(String);

impl Role {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        match name.strip_prefix(ROLE_PREFIX) {
            Some(stripped) => Self(stripped.to_owned()),
            None => Self(name),
        }
    }

    /// Role name without the `ROLE_` prefix.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Role {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<&str> for Role {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.0
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn prefix_is_stripped() {
        assert_eq!(Role::new("ROLE_ADMIN"), Role::new("ADMIN"));
        assert_eq!(Role::new("ROLE_ADMIN").as_str(), "ADMIN");
    }

    #[test]
    fn only_leading_prefix_is_stripped() {
        assert_eq!(Role::new("ROLE_ROLE_X").as_str(), "ROLE_X");
        assert_eq!(Role::new("SUPER_ROLE_").as_str(), "SUPER_ROLE_");
    }

    #[test]
    fn comparison_is_case_sensitive() {
        assert_ne!(Role::new("admin"), Role::new("ADMIN"));
    }

    #[test]
    fn deserializes_through_normalization() {
        let roles: Vec<Role> = serde_json::from_str(r#"["ROLE_USER", "MANAGER"]"#).unwrap();
        assert_eq!(roles, vec![Role::new("USER"), Role::new("MANAGER")]);
        assert_eq!(serde_json::to_string(&roles[0]).unwrap(), r#""USER""#);
    }
}
