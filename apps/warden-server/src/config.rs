//! Layered application configuration.
//!
//! Sources, later ones winning: compiled defaults, the YAML file,
//! `WARDEN__`-prefixed environment variables (`__` separates nesting levels),
//! and finally the `--profile` flag.

use std::path::{Path, PathBuf};

use anyhow::Context;
use api_gateway::ApiGatewayConfig;
use authn_resolver::config::AuthNResolverConfig;
use authz_resolver::config::AuthZResolverConfig;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use static_authn_plugin::config::StaticAuthNPluginConfig;

pub const DEFAULT_CONFIG_PATH: &str = "config/warden.yaml";
pub const ENV_PREFIX: &str = "WARDEN__";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Text,
        }
    }
}

/// Whole-process configuration, one section per module.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Active profile; selects the rule environment (DEVELOP, QA, PROD).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    pub logging: LoggingConfig,
    pub api_gateway: ApiGatewayConfig,
    pub authn_resolver: AuthNResolverConfig,
    pub static_authn_plugin: StaticAuthNPluginConfig,
    pub authz_resolver: AuthZResolverConfig,
}

impl AppConfig {
    /// Load the layered configuration.
    ///
    /// With no explicit path, `config/warden.yaml` is read when it exists.
    ///
    /// # Errors
    ///
    /// Fails when an explicit config file is missing or any source does not
    /// match the configuration schema.
    pub fn load(config_path: Option<&Path>, profile: Option<&str>) -> anyhow::Result<Self> {
        let path = match config_path {
            Some(path) => {
                anyhow::ensure!(path.exists(), "config file {} not found", path.display());
                Some(path.to_path_buf())
            }
            None => Some(PathBuf::from(DEFAULT_CONFIG_PATH)).filter(|p| p.exists()),
        };

        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = &path {
            tracing::debug!(path = %path.display(), "Loading configuration file");
            figment = figment.merge(Yaml::file(path));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
        if let Some(profile) = profile {
            figment = figment.merge(Serialized::default("profile", profile));
        }

        figment
            .extract()
            .context("invalid configuration")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use figment::Jail;
    use secrecy::ExposeSecret;

    use super::*;

    fn load(path: Option<&str>, profile: Option<&str>) -> figment::error::Result<AppConfig> {
        AppConfig::load(path.map(Path::new), profile).map_err(|e| format!("{e:#}").into())
    }

    #[test]
    fn defaults_without_any_source() {
        Jail::expect_with(|_| {
            let cfg = load(None, None)?;

            assert!(cfg.profile.is_none());
            assert_eq!(cfg.logging.format, LogFormat::Text);
            assert_eq!(cfg.api_gateway.bind_addr, "127.0.0.1:8080");
            assert_eq!(cfg.authn_resolver.default_manager, "default");
            assert!(cfg.authz_resolver.rules.endpoints.is_empty());
            Ok(())
        });
    }

    #[test]
    fn default_path_file_then_env_then_profile_flag() {
        Jail::expect_with(|jail| {
            jail.create_dir("config")?;
            jail.create_file(
                DEFAULT_CONFIG_PATH,
                r"
profile: QA
logging:
  format: json
api_gateway:
  bind_addr: 0.0.0.0:8080
static_authn_plugin:
  users:
    - username: admin
      password: adminpass
      roles: [ROLE_ADMIN]
",
            )?;
            jail.set_env("WARDEN__API_GATEWAY__BIND_ADDR", "0.0.0.0:9090");

            let cfg = load(None, None)?;
            assert_eq!(cfg.profile.as_deref(), Some("QA"));
            assert_eq!(cfg.logging.format, LogFormat::Json);
            assert_eq!(cfg.api_gateway.bind_addr, "0.0.0.0:9090");
            assert_eq!(
                cfg.static_authn_plugin.users[0].password.expose_secret(),
                "adminpass"
            );

            let cfg = load(None, Some("prod"))?;
            assert_eq!(cfg.profile.as_deref(), Some("prod"));
            Ok(())
        });
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        Jail::expect_with(|_| {
            let err = load(Some("nowhere.yaml"), None).unwrap_err();
            assert!(err.to_string().contains("nowhere.yaml not found"));
            Ok(())
        });
    }

    #[test]
    fn unknown_keys_are_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("warden.yaml", "api_gateway:\n  auth_disabled: true\n")?;
            assert!(load(Some("warden.yaml"), None).is_err());
            Ok(())
        });
    }

    #[test]
    fn printed_configuration_redacts_secrets() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "warden.yaml",
                r"
static_authn_plugin:
  users:
    - username: admin
      password: adminpass
  tokens:
    - token: admin-token-123
      username: admin
",
            )?;
            let cfg = load(Some("warden.yaml"), None)?;
            let printed = serde_json::to_string(&cfg).map_err(|e| e.to_string())?;

            assert!(!printed.contains("adminpass"));
            assert!(!printed.contains("admin-token-123"));
            assert!(printed.contains("[REDACTED]"));
            Ok(())
        });
    }
}
