//! Configuration for the static `AuthN` plugin.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Plugin configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticAuthNPluginConfig {
    /// Registry name of the username/password validator.
    pub basic_validator_name: String,

    /// Registry name of the bearer token validator.
    pub token_validator_name: String,

    /// User directory shared by both validators.
    pub users: Vec<UserConfig>,

    /// Static token-to-username mappings served by the built-in oracle.
    pub tokens: Vec<TokenMapping>,
}

impl Default for StaticAuthNPluginConfig {
    fn default() -> Self {
        Self {
            basic_validator_name: "basic".to_owned(),
            token_validator_name: "token".to_owned(),
            users: Vec::new(),
            tokens: Vec::new(),
        }
    }
}

/// A user of the static directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserConfig {
    pub username: String,

    /// Plain text, `{noop}<plain>`, or `{sha256}<hex digest>`.
    #[serde(with = "warden_security::serde_secret")]
    pub password: SecretString,

    /// Role names; a `ROLE_` prefix is accepted and ignored.
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Maps a static bearer token to a directory user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenMapping {
    #[serde(with = "warden_security::serde_secret")]
    pub token: SecretString,
    pub username: String,
}
