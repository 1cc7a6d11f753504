use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::application::CopyGenerator;
use crate::domain::{DomainError, ListingPrompt};

const CANNED_RESPONSE: &str = "\
T3 LUMINEUX AVEC BALCON A LYON

Niché dans un quartier calme, ce trois-pièces baigné de lumière vous attend.

Son balcon prolonge le séjour vers l'extérieur, idéal pour les soirées d'été.";

/// Canned-text [`CopyGenerator`] for tests and offline runs.
///
/// Counts its calls so tests can assert exactly how many provider calls a
/// flow performed.
pub struct MockCopyGenerator {
    response: String,
    fail: bool,
    calls: AtomicUsize,
}

impl MockCopyGenerator {
    pub fn new() -> Self {
        Self::with_response(CANNED_RESPONSE)
    }

    pub fn with_response(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// A generator whose every call fails, for exercising the abort path.
    pub fn failing() -> Self {
        Self {
            response: String::new(),
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockCopyGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CopyGenerator for MockCopyGenerator {
    async fn generate(&self, _prompt: &ListingPrompt) -> Result<String, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(DomainError::generation(
                "MockCopyGenerator: simulated provider failure",
            ));
        }
        Ok(self.response.clone())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
