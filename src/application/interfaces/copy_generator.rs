use async_trait::async_trait;

use crate::domain::{DomainError, ListingPrompt};

/// Produces marketing copy for a listing via a hosted text-generation service.
///
/// Implementors encapsulate transport, serialization, and vendor-specific API
/// details, so the two observed provider variants (Gemini, OpenAI) are
/// interchangeable from the caller's perspective.
#[async_trait]
pub trait CopyGenerator: Send + Sync {
    /// Send the prompt and return the generated text verbatim.
    ///
    /// Exactly one attempt per call; retrying is the caller's decision
    /// (nothing in this system retries).
    async fn generate(&self, prompt: &ListingPrompt) -> Result<String, DomainError>;

    /// Provider label, for logging.
    fn name(&self) -> &'static str;
}
