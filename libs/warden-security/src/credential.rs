use std::fmt;

use secrecy::SecretString;

/// A credential presented by a request.
///
/// Secret parts are wrapped in `SecretString` so `Debug` redacts them.
#[derive(Debug, Clone)]
pub enum Credential {
    /// Username and password, as sent with HTTP Basic.
    UsernamePassword {
        username: String,
        password: SecretString,
    },
    /// Opaque bearer token (`Authorization: Bearer` or `X-API-Token`).
    BearerToken { token: SecretString },
}

/// Shape of a [`Credential`], without any of its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialKind {
    UsernamePassword,
    BearerToken,
}

impl Credential {
    #[must_use]
    pub fn username_password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::UsernamePassword {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::BearerToken {
            token: SecretString::from(token.into()),
        }
    }

    #[must_use]
    pub fn kind(&self) -> CredentialKind {
        match self {
            Self::UsernamePassword { .. } => CredentialKind::UsernamePassword,
            Self::BearerToken { .. } => CredentialKind::BearerToken,
        }
    }
}

impl CredentialKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UsernamePassword => "username_password",
            Self::BearerToken => "bearer_token",
        }
    }
}

impl fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
