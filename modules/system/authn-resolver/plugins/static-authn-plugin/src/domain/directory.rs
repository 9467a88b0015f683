//! In-memory user directory.

use std::collections::{BTreeSet, HashMap};

use secrecy::ExposeSecret;
use sha2::{Digest, Sha256};
use warden_security::{Identity, Role};

use super::error::DomainError;
use crate::config::UserConfig;

const SHA256_PREFIX: &str = "{sha256}";
const NOOP_PREFIX: &str = "{noop}";

/// A directory entry. Only the SHA-256 digest of the password is kept.
#[derive(Debug, Clone)]
pub struct UserRecord {
    password_digest: [u8; 32],
    identity: Identity,
}

impl UserRecord {
    #[must_use]
    pub fn username(&self) -> &str {
        self.identity.principal_name()
    }

    #[must_use]
    pub fn roles(&self) -> &BTreeSet<Role> {
        self.identity.roles()
    }

    /// Compares digests, so the comparison time does not depend on where
    /// the candidate first differs from the stored password.
    #[must_use]
    pub fn password_matches(&self, candidate: &str) -> bool {
        let candidate = digest(candidate);
        candidate
            .iter()
            .zip(self.password_digest.iter())
            .fold(0_u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }

    /// Authenticated identity carrying this user's roles.
    #[must_use]
    pub fn identity(&self) -> Identity {
        self.identity.clone()
    }
}

/// Users keyed by username.
#[derive(Debug, Default)]
pub struct UserDirectory {
    users: HashMap<String, UserRecord>,
}

impl UserDirectory {
    /// Build the directory from configuration.
    ///
    /// # Errors
    ///
    /// Fails on duplicate usernames, empty usernames and malformed
    /// `{sha256}` digests.
    pub fn from_config(users: &[UserConfig]) -> Result<Self, DomainError> {
        let mut directory = HashMap::with_capacity(users.len());

        for user in users {
            let identity = Identity::builder()
                .principal_name(user.username.clone())
                .roles(user.roles.iter().map(Role::new))
                .build()
                .map_err(|_| DomainError::EmptyUsername)?;
            let record = UserRecord {
                password_digest: parse_password(&user.username, user.password.expose_secret())?,
                identity,
            };
            if directory.insert(user.username.clone(), record).is_some() {
                return Err(DomainError::DuplicateUser(user.username.clone()));
            }
        }

        Ok(Self { users: directory })
    }

    #[must_use]
    pub fn get(&self, username: &str) -> Option<&UserRecord> {
        self.users.get(username)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

/// Whether the configured password is stored in plain text.
#[must_use]
pub fn is_plain_text(password: &str) -> bool {
    !password.starts_with(SHA256_PREFIX)
}

fn parse_password(username: &str, encoded: &str) -> Result<[u8; 32], DomainError> {
    if let Some(hex_digest) = encoded.strip_prefix(SHA256_PREFIX) {
        let mut out = [0_u8; 32];
        hex::decode_to_slice(hex_digest, &mut out).map_err(|e| DomainError::MalformedPassword {
            username: username.to_owned(),
            reason: e.to_string(),
        })?;
        return Ok(out);
    }

    let plain = encoded.strip_prefix(NOOP_PREFIX).unwrap_or(encoded);
    Ok(digest(plain))
}

fn digest(input: &str) -> [u8; 32] {
    Sha256::digest(input.as_bytes()).into()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use secrecy::SecretString;

    use super::*;

    fn user(username: &str, password: &str, roles: &[&str]) -> UserConfig {
        UserConfig {
            username: username.to_owned(),
            password: SecretString::from(password.to_owned()),
            roles: roles.iter().map(|r| (*r).to_owned()).collect(),
        }
    }

    #[test]
    fn plain_and_noop_passwords_match() {
        let directory = UserDirectory::from_config(&[
            user("admin", "adminpass", &["ROLE_ADMIN"]),
            user("user", "{noop}userpass", &["USER"]),
        ])
        .unwrap();

        assert!(directory.get("admin").unwrap().password_matches("adminpass"));
        assert!(!directory.get("admin").unwrap().password_matches("adminpas"));
        assert!(directory.get("user").unwrap().password_matches("userpass"));
        assert!(!directory.get("user").unwrap().password_matches("{noop}userpass"));
    }

    #[test]
    fn sha256_passwords_match() {
        let encoded = format!("{SHA256_PREFIX}{}", hex::encode(digest("managerpass")));
        let directory =
            UserDirectory::from_config(&[user("manager", &encoded, &["MANAGER"])]).unwrap();

        let record = directory.get("manager").unwrap();
        assert!(record.password_matches("managerpass"));
        assert!(!record.password_matches(&encoded));
    }

    #[test]
    fn identity_carries_normalized_roles() {
        let directory =
            UserDirectory::from_config(&[user("admin", "adminpass", &["ROLE_ADMIN"])]).unwrap();

        let identity = directory.get("admin").unwrap().identity();
        assert_eq!(identity.principal_name(), "admin");
        assert!(identity.is_authenticated());
        assert!(identity.has_role(&Role::new("ADMIN")));
    }

    #[test]
    fn rejects_bad_configuration() {
        assert!(matches!(
            UserDirectory::from_config(&[user("a", "x", &[]), user("a", "y", &[])]),
            Err(DomainError::DuplicateUser(ref name)) if name == "a"
        ));
        assert!(matches!(
            UserDirectory::from_config(&[user("", "x", &[])]),
            Err(DomainError::EmptyUsername)
        ));
        assert!(matches!(
            UserDirectory::from_config(&[user("a", "{sha256}zz", &[])]),
            Err(DomainError::MalformedPassword { .. })
        ));
    }

    #[test]
    fn plain_text_detection() {
        assert!(is_plain_text("adminpass"));
        assert!(is_plain_text("{noop}adminpass"));
        assert!(!is_plain_text("{sha256}00"));
    }
}
