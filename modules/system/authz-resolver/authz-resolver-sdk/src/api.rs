//! Public API trait for the `AuthZ` resolver.

use http::Method;
use warden_security::{Environment, Identity};

use crate::error::AuthZResolverError;
use crate::models::{Decision, RuleResolution};
use crate::rules::SecurityRulesConfig;

/// Public API trait for the `AuthZ` resolver.
///
/// Decisions are pure functions of the current rule table snapshot, the
/// process environment and the identity, so the methods are synchronous.
///
/// ```ignore
/// match authz.authorize(req.uri().path(), req.method(), &identity) {
///     Decision::Allow => next.run(req).await,
///     Decision::Deny(reason) => deny(reason),
/// }
/// ```
pub trait AuthZResolverClient: Send + Sync {
    /// Environment every decision is made for.
    fn environment(&self) -> Environment;

    /// Decide whether `identity` may call `method` on `request_path`.
    fn authorize(&self, request_path: &str, method: &Method, identity: &Identity) -> Decision;

    /// The rule that applies to the request and where it came from.
    fn resolve_rule(&self, request_path: &str, method: &Method) -> RuleResolution;

    /// The rule applied to unmatched requests in the current environment.
    fn default_rule(&self) -> RuleResolution;

    /// Configuration document the current rule table was built from.
    fn current_rules(&self) -> SecurityRulesConfig;

    /// Replace the whole rule table.
    ///
    /// # Errors
    ///
    /// `MalformedRuleConfiguration` if the document is invalid; the current
    /// table stays in effect.
    fn replace_rules(&self, config: &SecurityRulesConfig) -> Result<(), AuthZResolverError>;
}
