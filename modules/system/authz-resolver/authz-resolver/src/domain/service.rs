//! Domain service for the `AuthZ` resolver.

use std::sync::Arc;

use arc_swap::ArcSwap;
use authz_resolver_sdk::{Decision, RuleResolution, SecurityRulesConfig};
use http::Method;
use tracing::info;
use warden_security::{Environment, Identity};

use super::error::DomainError;
use super::evaluator;
use super::rule_table::RuleTable;

/// A validated rule table together with the document it was built from.
#[derive(Debug)]
pub struct RuleSnapshot {
    pub table: RuleTable,
    pub config: SecurityRulesConfig,
}

impl RuleSnapshot {
    fn build(config: &SecurityRulesConfig) -> Result<Self, DomainError> {
        Ok(Self {
            table: RuleTable::from_config(config)?,
            config: config.clone(),
        })
    }
}

/// `AuthZ` resolver service.
///
/// Holds the current rule snapshot and the process environment. Readers
/// load the snapshot once per call; replacement swaps it whole.
pub struct Service {
    rules: ArcSwap<RuleSnapshot>,
    environment: Environment,
}

impl Service {
    #[must_use]
    pub fn new(snapshot: RuleSnapshot, environment: Environment) -> Self {
        Self {
            rules: ArcSwap::from_pointee(snapshot),
            environment,
        }
    }

    /// Build the initial table from configuration.
    ///
    /// # Errors
    ///
    /// `MalformedRuleConfiguration` if the document is invalid.
    pub fn from_config(
        cfg: &SecurityRulesConfig,
        environment: Environment,
    ) -> Result<Self, DomainError> {
        RuleSnapshot::build(cfg).map(|snapshot| Self::new(snapshot, environment))
    }

    #[must_use]
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<RuleSnapshot> {
        self.rules.load_full()
    }

    #[tracing::instrument(level = "debug", skip_all, fields(path = path, method = %method, env = %self.environment))]
    pub fn authorize(&self, path: &str, method: &Method, identity: &Identity) -> Decision {
        let snapshot = self.rules.load();
        let decision = evaluator::authorize(&snapshot.table, path, method, self.environment, identity);
        tracing::debug!(
            principal = identity.principal_name(),
            authenticated = identity.is_authenticated(),
            decision = ?decision,
            "authorization decision"
        );
        decision
    }

    /// Document the current table was built from.
    #[must_use]
    pub fn current_rules(&self) -> SecurityRulesConfig {
        self.rules.load().config.clone()
    }

    #[must_use]
    pub fn resolve_rule(&self, path: &str, method: &Method) -> RuleResolution {
        self.rules.load().table.resolve(path, method, self.environment)
    }

    #[must_use]
    pub fn default_rule(&self) -> RuleResolution {
        self.rules.load().table.default_rule(self.environment)
    }

    /// Validate `cfg` and swap it in.
    ///
    /// # Errors
    ///
    /// `MalformedRuleConfiguration` if the document is invalid; the current
    /// table is left in place.
    pub fn replace_rules(&self, cfg: &SecurityRulesConfig) -> Result<(), DomainError> {
        let snapshot = RuleSnapshot::build(cfg)?;
        let endpoints = snapshot.table.endpoints().len();
        self.rules.store(Arc::new(snapshot));
        info!(endpoints, "Replaced security rule table");
        Ok(())
    }
}
