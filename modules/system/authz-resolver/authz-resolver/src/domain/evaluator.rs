//! Request authorization.

use authz_resolver_sdk::{Decision, DenyReason, SecurityRule};
use http::Method;
use warden_security::{Environment, Identity};

use super::rule_table::RuleTable;

/// Decide whether `identity` may call `method` on `path` in `environment`.
#[must_use]
pub fn authorize(
    table: &RuleTable,
    path: &str,
    method: &Method,
    environment: Environment,
    identity: &Identity,
) -> Decision {
    evaluate_rule(table.match_rule(path, method, environment), identity)
}

/// Apply a single rule to an identity.
#[must_use]
pub fn evaluate_rule(rule: &SecurityRule, identity: &Identity) -> Decision {
    if rule.is_public() {
        return Decision::Allow;
    }

    if rule.roles().is_empty() {
        return if identity.is_authenticated() {
            Decision::Allow
        } else {
            Decision::Deny(DenyReason::AuthenticationRequired)
        };
    }

    let holds_role = rule.roles().iter().any(|role| identity.has_role(role));
    if identity.is_authenticated() && holds_role {
        Decision::Allow
    } else {
        Decision::Deny(DenyReason::InsufficientRole)
    }
}
