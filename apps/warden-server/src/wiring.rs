//! Module assembly: plugin validators, then the resolvers, then the gateway.

use api_gateway::ApiGateway;
use authn_resolver::AuthNResolver;
use authn_resolver_sdk::ValidatorRegistry;
use authz_resolver::AuthZResolver;
use static_authn_plugin::StaticAuthNPlugin;
use tracing::info;
use warden_security::Environment;

use crate::config::AppConfig;

/// Build the gateway for `cfg`. The environment is resolved once here and
/// fixed for the life of the process.
///
/// # Errors
///
/// Fails when any module rejects its configuration.
pub fn build_gateway(cfg: &AppConfig) -> anyhow::Result<ApiGateway> {
    let environment = Environment::from_profile(cfg.profile.as_deref());

    let mut registry = ValidatorRegistry::new();
    StaticAuthNPlugin::default().init(&cfg.static_authn_plugin, &mut registry)?;

    let authn = AuthNResolver::default().init(&cfg.authn_resolver, &registry)?;
    let authz = AuthZResolver::default().init(&cfg.authz_resolver, environment)?;

    info!(
        %environment,
        validators = ?registry.names(),
        debug_endpoints = cfg.api_gateway.debug_endpoints,
        "Modules initialized"
    );

    Ok(ApiGateway::new(cfg.api_gateway.clone(), authn, authz))
}
