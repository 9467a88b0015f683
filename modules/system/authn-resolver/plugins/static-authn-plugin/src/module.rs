//! Static `AuthN` plugin module.

use std::sync::{Arc, OnceLock};

use anyhow::Context;
use authn_resolver_sdk::{TokenOracle, ValidatorRegistry};
use secrecy::ExposeSecret;
use tracing::info;

use crate::config::StaticAuthNPluginConfig;
use crate::domain::directory::is_plain_text;
use crate::domain::{BasicValidator, StaticTokenOracle, TokenValidator, UserDirectory};

/// Static `AuthN` plugin module.
///
/// Registers two validators sharing one user directory:
/// - a username/password validator (`basic` by default)
/// - a bearer token validator (`token` by default) backed by a [`TokenOracle`]
#[derive(Default)]
pub struct StaticAuthNPlugin {
    directory: OnceLock<Arc<UserDirectory>>,
}

impl StaticAuthNPlugin {
    /// Initialize with the built-in static token oracle.
    ///
    /// # Errors
    ///
    /// Fails on invalid configuration or when called twice.
    pub fn init(
        &self,
        cfg: &StaticAuthNPluginConfig,
        registry: &mut ValidatorRegistry,
    ) -> anyhow::Result<()> {
        let oracle = StaticTokenOracle::from_config(&cfg.tokens)
            .context("invalid static_authn_plugin token mapping")?;
        info!(token_count = oracle.len(), "Loaded static token table");
        self.init_with_oracle(cfg, Arc::new(oracle), registry)
    }

    /// Initialize with a caller-supplied token oracle.
    ///
    /// # Errors
    ///
    /// Fails on invalid configuration, when a validator name is already taken
    /// in the registry, or when called twice.
    pub fn init_with_oracle(
        &self,
        cfg: &StaticAuthNPluginConfig,
        oracle: Arc<dyn TokenOracle>,
        registry: &mut ValidatorRegistry,
    ) -> anyhow::Result<()> {
        info!("Initializing static_authn_plugin");

        let basic_name = cfg.basic_validator_name.as_str();
        let token_name = cfg.token_validator_name.as_str();
        anyhow::ensure!(
            !basic_name.is_empty() && !token_name.is_empty(),
            "static_authn_plugin validator names must not be empty"
        );
        anyhow::ensure!(
            basic_name != token_name,
            "static_authn_plugin basic and token validators share the name '{basic_name}'"
        );
        for name in [basic_name, token_name] {
            anyhow::ensure!(
                registry.get(name).is_none(),
                "validator '{name}' is already registered"
            );
        }

        let directory = Arc::new(
            UserDirectory::from_config(&cfg.users)
                .context("invalid static_authn_plugin user directory")?,
        );

        let plain_text = cfg
            .users
            .iter()
            .filter(|u| is_plain_text(u.password.expose_secret()))
            .count();
        if plain_text > 0 {
            tracing::warn!(
                users = plain_text,
                "Static AuthN plugin has plain-text passwords configured. \
                 Use {{sha256}} digests outside of development."
            );
        }
        if directory.is_empty() {
            tracing::warn!("Static AuthN plugin has no users; every credential will be rejected");
        }

        self.directory
            .set(directory.clone())
            .map_err(|_| anyhow::anyhow!("Plugin already initialized"))?;

        let replaced = [
            registry.register(Arc::new(BasicValidator::new(
                cfg.basic_validator_name.clone(),
                directory.clone(),
            ))),
            registry.register(Arc::new(TokenValidator::new(
                cfg.token_validator_name.clone(),
                oracle,
                directory.clone(),
            ))),
        ];
        if let Some(previous) = replaced.into_iter().flatten().next() {
            anyhow::bail!("validator '{}' registered twice", previous.name());
        }

        info!(
            users = directory.len(),
            basic = %cfg.basic_validator_name,
            token = %cfg.token_validator_name,
            "Static authn plugin initialized"
        );
        Ok(())
    }

    #[must_use]
    pub fn directory(&self) -> Option<&Arc<UserDirectory>> {
        self.directory.get()
    }
}
