use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Deployment stage the process runs in.
///
/// Resolved once at startup and passed explicitly into every authorization
/// decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum Environment {
    #[default]
    Develop,
    Qa,
    Prod,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown environment '{0}', expected one of DEVELOP, QA, PROD")]
pub struct ParseEnvironmentError(pub String);

impl Environment {
    pub const ALL: [Self; 3] = [Self::Develop, Self::Qa, Self::Prod];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Develop => "DEVELOP",
            Self::Qa => "QA",
            Self::Prod => "PROD",
        }
    }

    /// Resolve the environment from the active profile name.
    ///
    /// The profile is matched case-insensitively. A missing or unrecognized
    /// profile falls back to `DEVELOP`.
    #[must_use]
    pub fn from_profile(profile: Option<&str>) -> Self {
        let Some(profile) = profile.map(str::trim).filter(|p| !p.is_empty()) else {
            tracing::info!("No active profile configured, using DEVELOP environment");
            return Self::Develop;
        };

        match profile.parse() {
            Ok(env) => env,
            Err(_) => {
                tracing::warn!(
                    profile,
                    "Active profile does not name a known environment, using DEVELOP"
                );
                Self::Develop
            }
        }
    }
}

impl FromStr for Environment {
    type Err = ParseEnvironmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|env| env.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseEnvironmentError(s.to_owned()))
    }
}

impl TryFrom<String> for Environment {
    type Error = ParseEnvironmentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
