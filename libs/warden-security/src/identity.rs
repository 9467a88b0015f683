use std::collections::BTreeSet;

use serde::Serialize;

use crate::constants::ANONYMOUS_PRINCIPAL;
use crate::role::Role;

/// The authenticated (or anonymous) subject of a request.
///
/// Authenticated identities are only produced by [`Identity::builder`],
/// which credential validators call after accepting a credential. Roles are
/// fixed at construction. The only later change is demotion through
/// [`Identity::set_authenticated`]`(false)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    principal_name: String,
    roles: BTreeSet<Role>,
    authenticated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("cannot mark an identity as authenticated after construction")]
    CannotElevate,

    #[error("an authenticated identity needs a non-empty principal name")]
    MissingPrincipal,
}

impl Identity {
    /// Builder for an authenticated identity.
    #[must_use]
    pub fn builder() -> IdentityBuilder {
        IdentityBuilder::default()
    }

    /// Unauthenticated identity with no roles.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            principal_name: ANONYMOUS_PRINCIPAL.to_owned(),
            roles: BTreeSet::new(),
            authenticated: false,
        }
    }

    #[must_use]
    pub fn principal_name(&self) -> &str {
        &self.principal_name
    }

    #[must_use]
    pub fn roles(&self) -> &BTreeSet<Role> {
        &self.roles
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    #[must_use]
    pub fn has_role(&self, role: &Role) -> bool {
        self.roles.contains(role)
    }

    /// Demote the identity. Passing `true` is rejected: only validators
    /// construct authenticated identities.
    ///
    /// Roles are kept; role rules require an authenticated identity, so a
    /// demoted one is only allowed on public rules.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::CannotElevate`] when `authenticated` is `true`.
    pub fn set_authenticated(&mut self, authenticated: bool) -> Result<(), IdentityError> {
        if authenticated {
            return Err(IdentityError::CannotElevate);
        }
        self.authenticated = false;
        Ok(())
    }
}

#[derive(Default)]
pub struct IdentityBuilder {
    principal_name: Option<String>,
    roles: BTreeSet<Role>,
}

impl IdentityBuilder {
    #[must_use]
    pub fn principal_name(mut self, name: impl Into<String>) -> Self {
        self.principal_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn role(mut self, role: impl Into<Role>) -> Self {
        self.roles.insert(role.into());
        self
    }

    #[must_use]
    pub fn roles<I, R>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Role>,
    {
        self.roles.extend(roles.into_iter().map(Into::into));
        self
    }

    /// Finish an authenticated identity.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::MissingPrincipal`] when no principal name, or
    /// a blank one, was given.
    pub fn build(self) -> Result<Identity, IdentityError> {
        let principal_name = self
            .principal_name
            .filter(|name| !name.trim().is_empty())
            .ok_or(IdentityError::MissingPrincipal)?;
        Ok(Identity {
            principal_name,
            roles: self.roles,
            authenticated: true,
        })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn builder_produces_authenticated_identity() {
        let identity = Identity::builder()
            .principal_name("admin")
            .role("ROLE_ADMIN")
            .build()
            .unwrap();

        assert_eq!(identity.principal_name(), "admin");
        assert!(identity.is_authenticated());
        assert!(identity.has_role(&Role::new("ADMIN")));
        assert_eq!(identity.roles().len(), 1);
    }

    #[test]
    fn builder_deduplicates_equivalent_roles() {
        let identity = Identity::builder()
            .principal_name("manager")
            .roles(["ROLE_MANAGER", "MANAGER", "USER"])
            .build()
            .unwrap();

        let names: Vec<&str> = identity.roles().iter().map(Role::as_str).collect();
        assert_eq!(names, vec!["MANAGER", "USER"]);
    }

    #[test]
    fn anonymous_has_nothing() {
        let identity = Identity::anonymous();

        assert!(!identity.is_authenticated());
        assert!(identity.roles().is_empty());
        assert_eq!(identity.principal_name(), ANONYMOUS_PRINCIPAL);
    }

    #[test]
    fn cannot_elevate_anonymous_identity() {
        let mut identity = Identity::anonymous();

        assert_eq!(
            identity.set_authenticated(true),
            Err(IdentityError::CannotElevate)
        );
        assert!(!identity.is_authenticated());
    }

    #[test]
    fn builder_requires_a_principal() {
        assert_eq!(
            Identity::builder().role("ADMIN").build(),
            Err(IdentityError::MissingPrincipal)
        );
        assert_eq!(
            Identity::builder().principal_name("  ").build(),
            Err(IdentityError::MissingPrincipal)
        );
    }

    #[test]
    fn demotion_keeps_roles_and_cannot_be_undone() {
        let mut identity = Identity::builder()
            .principal_name("user")
            .role("USER")
            .build()
            .unwrap();

        identity.set_authenticated(false).unwrap();

        assert!(!identity.is_authenticated());
        assert!(identity.has_role(&Role::new("USER")));
        assert_eq!(
            identity.set_authenticated(true),
            Err(IdentityError::CannotElevate)
        );
    }
}
