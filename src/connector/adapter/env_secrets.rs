use std::collections::HashMap;

use crate::application::SecretsProvider;
use crate::domain::DomainError;

/// [`SecretsProvider`] backed by a snapshot of the process environment.
///
/// The environment is read once at construction; later mutations of the
/// process environment are not observed, which keeps the credential material
/// immutable for the process lifetime. Blank values count as absent.
pub struct EnvSecrets {
    values: HashMap<String, String>,
}

impl EnvSecrets {
    pub fn new() -> Self {
        Self {
            values: std::env::vars().collect(),
        }
    }
}

impl Default for EnvSecrets {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretsProvider for EnvSecrets {
    fn get(&self, key: &str) -> Result<String, DomainError> {
        self.values
            .get(key)
            .filter(|value| !value.trim().is_empty())
            .cloned()
            .ok_or_else(|| DomainError::missing_secret(key))
    }
}

/// Map-backed [`SecretsProvider`] for tests and local experiments.
#[derive(Default)]
pub struct StaticSecrets {
    values: HashMap<String, String>,
}

impl StaticSecrets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl SecretsProvider for StaticSecrets {
    fn get(&self, key: &str) -> Result<String, DomainError> {
        self.values
            .get(key)
            .filter(|value| !value.trim().is_empty())
            .cloned()
            .ok_or_else(|| DomainError::missing_secret(key))
    }
}
