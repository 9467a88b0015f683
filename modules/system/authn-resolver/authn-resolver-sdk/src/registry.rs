//! Named registry of credential validators.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::plugin_api::CredentialValidator;

/// Validators keyed by [`CredentialValidator::name`].
///
/// Plugins register into it during wiring; the resolver looks validators up
/// by the names listed in manager configuration.
#[derive(Default, Clone)]
pub struct ValidatorRegistry {
    validators: HashMap<String, Arc<dyn CredentialValidator>>,
}

impl ValidatorRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a validator under its own name.
    ///
    /// Returns the previously registered validator with the same name, if any.
    pub fn register(
        &mut self,
        validator: Arc<dyn CredentialValidator>,
    ) -> Option<Arc<dyn CredentialValidator>> {
        let name = validator.name().to_owned();
        self.validators.insert(name, validator)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn CredentialValidator>> {
        self.validators.get(name).cloned()
    }

    /// Registered names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.validators.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("validators", &self.names())
            .finish()
    }
}
