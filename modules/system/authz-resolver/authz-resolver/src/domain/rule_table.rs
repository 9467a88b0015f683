//! Endpoint security rule table.

use std::collections::HashMap;

use authz_resolver_sdk::{
    EndpointConfig, RuleResolution, RuleSource, SecurityRule, SecurityRulesConfig, parse_method,
};
use http::Method;
use warden_security::{Environment, Role};

use super::error::DomainError;

const PREFIX_WILDCARD: &str = "/**";

/// URL pattern of an endpoint entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlPattern {
    /// Matches the path by byte equality.
    Exact(String),
    /// `prefix/**`: matches any path starting with `prefix`.
    Prefix(String),
}

impl UrlPattern {
    /// Parse a configured URL. A trailing `/**` makes it a prefix pattern.
    #[must_use]
    pub fn parse(url: &str) -> Self {
        match url.strip_suffix(PREFIX_WILDCARD) {
            Some(prefix) => Self::Prefix(prefix.to_owned()),
            None => Self::Exact(url.to_owned()),
        }
    }

    /// Case-sensitive match against a request path.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::Exact(url) => path == url,
            Self::Prefix(prefix) => path.starts_with(prefix.as_str()),
        }
    }
}

/// A URL pattern with its rules per environment.
#[derive(Debug, Clone)]
pub struct EndpointPattern {
    url: String,
    pattern: UrlPattern,
    rules_by_environment: HashMap<Environment, Vec<SecurityRule>>,
}

impl EndpointPattern {
    #[must_use]
    pub fn new(url: impl Into<String>, rules_by_environment: HashMap<Environment, Vec<SecurityRule>>) -> Self {
        let url = url.into();
        Self {
            pattern: UrlPattern::parse(&url),
            url,
            rules_by_environment,
        }
    }

    /// The pattern as configured.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn rules(&self, environment: Environment) -> Option<&[SecurityRule]> {
        self.rules_by_environment
            .get(&environment)
            .map(Vec::as_slice)
    }
}

/// Which step of the lookup produced the rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin<'a> {
    Endpoint(&'a str),
    EnvironmentDefault,
    Fallback,
}

impl Origin<'_> {
    fn to_source(self) -> RuleSource {
        match self {
            Origin::Endpoint(url) => RuleSource::Endpoint {
                pattern: url.to_owned(),
            },
            Origin::EnvironmentDefault => RuleSource::EnvironmentDefault,
            Origin::Fallback => RuleSource::Fallback,
        }
    }
}

/// Read-only rule table.
///
/// Lookup order for a request:
/// 1. endpoint patterns in registration order, first match wins; a pattern
///    with no rules for the environment is skipped
/// 2. within the matched pattern, the first rule listing the method
/// 3. the environment default, when the pattern had no rule for the method
///    or no pattern matched
/// 4. deny-by-default (authentication required) when the environment has
///    no default
#[derive(Debug, Clone)]
pub struct RuleTable {
    default_rule_by_environment: HashMap<Environment, SecurityRule>,
    endpoints: Vec<EndpointPattern>,
    fallback: SecurityRule,
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::new(HashMap::new(), Vec::new())
    }
}

impl RuleTable {
    #[must_use]
    pub fn new(
        default_rule_by_environment: HashMap<Environment, SecurityRule>,
        endpoints: Vec<EndpointPattern>,
    ) -> Self {
        Self {
            default_rule_by_environment,
            endpoints,
            fallback: SecurityRule::deny_by_default(),
        }
    }

    /// Build and validate a table from its configuration document.
    ///
    /// # Errors
    ///
    /// `MalformedRuleConfiguration` on an unknown or repeated environment
    /// name, an empty URL, a rule with no methods, or an invalid method name.
    pub fn from_config(cfg: &SecurityRulesConfig) -> Result<Self, DomainError> {
        let mut defaults = HashMap::with_capacity(cfg.environments.len());
        for (name, env_cfg) in &cfg.environments {
            let env = parse_environment(name, "environment defaults")?;
            let previous = defaults.insert(
                env,
                SecurityRule::new(
                    Vec::<Method>::new(),
                    env_cfg.default_authenticated,
                    env_cfg.default_roles.iter().map(Role::new),
                ),
            );
            if previous.is_some() {
                return Err(duplicate_environment(env, "environment defaults"));
            }
        }

        let endpoints = cfg
            .endpoints
            .iter()
            .enumerate()
            .map(|(index, endpoint)| build_endpoint(index, endpoint))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(defaults, endpoints))
    }

    #[must_use]
    pub fn endpoints(&self) -> &[EndpointPattern] {
        &self.endpoints
    }

    /// The rule that applies to the request.
    #[must_use]
    pub fn match_rule(&self, path: &str, method: &Method, environment: Environment) -> &SecurityRule {
        self.lookup(path, method, environment).0
    }

    /// The rule that applies to the request, with its origin.
    #[must_use]
    pub fn resolve(&self, path: &str, method: &Method, environment: Environment) -> RuleResolution {
        let (rule, origin) = self.lookup(path, method, environment);
        RuleResolution {
            rule: rule.clone(),
            source: origin.to_source(),
        }
    }

    /// The rule for unmatched requests in `environment`.
    #[must_use]
    pub fn default_rule(&self, environment: Environment) -> RuleResolution {
        let (rule, origin) = self.default_for(environment);
        RuleResolution {
            rule: rule.clone(),
            source: origin.to_source(),
        }
    }

    fn lookup(&self, path: &str, method: &Method, environment: Environment) -> (&SecurityRule, Origin<'_>) {
        let matched = self.endpoints.iter().find_map(|endpoint| {
            if !endpoint.pattern.matches(path) {
                return None;
            }
            endpoint.rules(environment).map(|rules| (endpoint, rules))
        });

        if let Some((endpoint, rules)) = matched
            && let Some(rule) = rules.iter().find(|r| r.applies_to(method))
        {
            return (rule, Origin::Endpoint(endpoint.url()));
        }

        self.default_for(environment)
    }

    fn default_for(&self, environment: Environment) -> (&SecurityRule, Origin<'_>) {
        match self.default_rule_by_environment.get(&environment) {
            Some(rule) => (rule, Origin::EnvironmentDefault),
            None => (&self.fallback, Origin::Fallback),
        }
    }
}

fn parse_environment(name: &str, location: &str) -> Result<Environment, DomainError> {
    name.parse().map_err(|_| {
        DomainError::MalformedRuleConfiguration(format!(
            "unknown environment '{name}' in {location}"
        ))
    })
}

fn duplicate_environment(env: Environment, location: &str) -> DomainError {
    DomainError::MalformedRuleConfiguration(format!(
        "environment {env} is listed more than once in {location}"
    ))
}

fn build_endpoint(index: usize, cfg: &EndpointConfig) -> Result<EndpointPattern, DomainError> {
    let url = cfg.url.trim();
    if url.is_empty() {
        return Err(DomainError::MalformedRuleConfiguration(format!(
            "endpoint #{index} has an empty url"
        )));
    }
    let url = if url.starts_with('/') {
        url.to_owned()
    } else {
        format!("/{url}")
    };

    let mut rules_by_environment = HashMap::with_capacity(cfg.environments.len());
    for (name, env_cfg) in &cfg.environments {
        let env = parse_environment(name, &format!("endpoint '{url}'"))?;

        let mut rules = Vec::with_capacity(env_cfg.rules.len());
        for (rule_index, rule) in env_cfg.rules.iter().enumerate() {
            if rule.methods.is_empty() {
                return Err(DomainError::MalformedRuleConfiguration(format!(
                    "endpoint '{url}' rule #{rule_index} for {env} has no methods"
                )));
            }
            let methods = rule
                .methods
                .iter()
                .map(|m| {
                    parse_method(m.trim()).map_err(|bad| {
                        DomainError::MalformedRuleConfiguration(format!(
                            "endpoint '{url}' rule #{rule_index} for {env} has invalid method '{bad}'"
                        ))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            rules.push(SecurityRule::new(
                methods,
                rule.authenticated,
                rule.roles.iter().map(Role::new),
            ));
        }
        if rules_by_environment.insert(env, rules).is_some() {
            return Err(duplicate_environment(env, &format!("endpoint '{url}'")));
        }
    }

    Ok(EndpointPattern::new(url, rules_by_environment))
}
