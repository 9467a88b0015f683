//! Token oracle backed by a static table.

use std::collections::HashMap;

use async_trait::async_trait;
use authn_resolver_sdk::TokenOracle;
use secrecy::ExposeSecret;

use super::error::DomainError;
use crate::config::TokenMapping;

/// Maps fixed tokens to usernames.
#[derive(Default)]
pub struct StaticTokenOracle {
    tokens: HashMap<String, String>,
}

impl StaticTokenOracle {
    /// Build the table from configuration. Later mappings for the same
    /// token override earlier ones.
    ///
    /// # Errors
    ///
    /// Fails when a mapping has an empty token.
    pub fn from_config(mappings: &[TokenMapping]) -> Result<Self, DomainError> {
        let mut tokens = HashMap::with_capacity(mappings.len());
        for m in mappings {
            let token = m.token.expose_secret();
            if token.is_empty() {
                return Err(DomainError::EmptyToken(m.username.clone()));
            }
            tokens.insert(token.to_owned(), m.username.clone());
        }
        Ok(Self { tokens })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl TokenOracle for StaticTokenOracle {
    async fn validate(&self, token: &str) -> Option<String> {
        self.tokens.get(token).cloned()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use secrecy::SecretString;

    use super::*;

    fn mapping(token: &str, username: &str) -> TokenMapping {
        TokenMapping {
            token: SecretString::from(token.to_owned()),
            username: username.to_owned(),
        }
    }

    #[tokio::test]
    async fn known_tokens_resolve_to_usernames() {
        let oracle = StaticTokenOracle::from_config(&[
            mapping("admin-token-123", "admin"),
            mapping("manager-token-456", "manager"),
        ])
        .unwrap();

        assert_eq!(oracle.len(), 2);
        assert_eq!(
            oracle.validate("admin-token-123").await.as_deref(),
            Some("admin")
        );
        assert_eq!(
            oracle.validate("manager-token-456").await.as_deref(),
            Some("manager")
        );
        assert_eq!(oracle.validate("admin-token-124").await, None);
        assert_eq!(oracle.validate("").await, None);
    }

    #[test]
    fn empty_token_is_rejected() {
        assert!(matches!(
            StaticTokenOracle::from_config(&[mapping("", "admin")]),
            Err(DomainError::EmptyToken(ref user)) if user == "admin"
        ));
    }
}
