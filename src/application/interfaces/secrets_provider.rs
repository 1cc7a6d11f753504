use crate::domain::DomainError;

/// Read-only access to process-wide credential material.
///
/// Implementors snapshot their source at construction, so values never
/// change during the process lifetime. A missing or blank key yields
/// [`DomainError::MissingSecret`], which dependent operations surface as a
/// configuration error before attempting any outbound call.
pub trait SecretsProvider: Send + Sync {
    fn get(&self, key: &str) -> Result<String, DomainError>;

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_ok()
    }
}
