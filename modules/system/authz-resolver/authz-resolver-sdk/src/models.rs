//! Domain models for the `AuthZ` resolver module.

use std::collections::BTreeSet;
use std::fmt;

use http::Method;
use serde::{Serialize, Serializer};
use warden_security::Role;

/// Access rule for a set of HTTP methods.
///
/// - `authenticated == false`: public, roles are ignored
/// - `authenticated == true`, no roles: any authenticated identity
/// - `authenticated == true` with roles: the identity must hold at least one
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecurityRule {
    #[serde(serialize_with = "serialize_methods")]
    methods: Vec<Method>,
    authenticated: bool,
    roles: BTreeSet<Role>,
}

impl SecurityRule {
    #[must_use]
    pub fn new<M, R>(methods: M, authenticated: bool, roles: R) -> Self
    where
        M: IntoIterator<Item = Method>,
        R: IntoIterator<Item = Role>,
    {
        let mut unique: Vec<Method> = Vec::new();
        for method in methods {
            if !unique.contains(&method) {
                unique.push(method);
            }
        }
        Self {
            methods: unique,
            authenticated,
            roles: roles.into_iter().collect(),
        }
    }

    /// Public rule for the given methods.
    #[must_use]
    pub fn public<M: IntoIterator<Item = Method>>(methods: M) -> Self {
        Self::new(methods, false, Vec::<Role>::new())
    }

    /// Rule applied when nothing else matches: authentication required, no
    /// role constraint.
    #[must_use]
    pub const fn deny_by_default() -> Self {
        Self {
            methods: Vec::new(),
            authenticated: true,
            roles: BTreeSet::new(),
        }
    }

    /// Methods this rule is listed for. Empty for environment defaults.
    #[must_use]
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    #[must_use]
    pub fn requires_authentication(&self) -> bool {
        self.authenticated
    }

    #[must_use]
    pub fn roles(&self) -> &BTreeSet<Role> {
        &self.roles
    }

    #[must_use]
    pub fn is_public(&self) -> bool {
        !self.authenticated
    }

    /// Whether the rule lists `method`, compared ASCII case-insensitively.
    #[must_use]
    pub fn applies_to(&self, method: &Method) -> bool {
        self.methods
            .iter()
            .any(|m| m.as_str().eq_ignore_ascii_case(method.as_str()))
    }
}

fn serialize_methods<S: Serializer>(methods: &[Method], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(methods.iter().map(Method::as_str))
}

/// Parse an HTTP method name case-insensitively.
///
/// # Errors
///
/// Returns the offending input when it is not a valid method token.
pub fn parse_method(name: &str) -> Result<Method, String> {
    if name.is_empty() {
        return Err(name.to_owned());
    }
    Method::from_bytes(name.to_ascii_uppercase().as_bytes()).map_err(|_| name.to_owned())
}

/// Why a request was denied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    /// The rule requires an authenticated identity.
    AuthenticationRequired,
    /// The identity holds none of the rule's roles.
    InsufficientRole,
    /// A credential was presented but rejected; carries the short reason.
    CredentialRejected(String),
}

impl DenyReason {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::AuthenticationRequired => "authentication required",
            Self::InsufficientRole => "insufficient role",
            Self::CredentialRejected(reason) => reason,
        }
    }
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authorization outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Where the applied rule came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleSource {
    /// A configured endpoint pattern matched.
    Endpoint { pattern: String },
    /// No endpoint rule matched; the environment default applied.
    EnvironmentDefault,
    /// No endpoint rule and no environment default; deny-by-default applied.
    Fallback,
}

/// The rule applying to a request, with its origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleResolution {
    pub rule: SecurityRule,
    pub source: RuleSource,
}

impl RuleResolution {
    /// Whether the rule was configured for this exact endpoint.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        matches!(self.source, RuleSource::Endpoint { .. })
    }
}
