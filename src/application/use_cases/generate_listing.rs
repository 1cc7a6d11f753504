use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use crate::application::{CopyGenerator, ListingLog};
use crate::domain::{DomainError, GeneratedListing, GenerationRequest, ListingPrompt};

/// Result of one successful submission: the generated listing, plus the
/// outcome of the best-effort log append.
#[derive(Debug)]
pub struct GenerationOutcome {
    listing: GeneratedListing,
    log_error: Option<String>,
}

impl GenerationOutcome {
    pub fn listing(&self) -> &GeneratedListing {
        &self.listing
    }

    /// `Some` when the log append failed. The listing itself is still valid
    /// and rendered; callers surface this as a soft warning.
    pub fn log_error(&self) -> Option<&str> {
        self.log_error.as_deref()
    }

    pub fn is_saved(&self) -> bool {
        self.log_error.is_none()
    }
}

/// Orchestrates one submission cycle: prompt construction, a single provider
/// call, then a best-effort append to the listing log.
///
/// Error policy follows the submission flow: a generation failure aborts
/// before any logging, while a logging failure is downgraded to a warning
/// carried in the [`GenerationOutcome`].
pub struct GenerateListingUseCase {
    generator: Arc<dyn CopyGenerator>,
    listing_log: Arc<dyn ListingLog>,
}

impl GenerateListingUseCase {
    pub fn new(generator: Arc<dyn CopyGenerator>, listing_log: Arc<dyn ListingLog>) -> Self {
        Self {
            generator,
            listing_log,
        }
    }

    pub async fn execute(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationOutcome, DomainError> {
        let prompt = ListingPrompt::from_request(&request);

        info!(
            "Generating copy with {} for {} in {}",
            self.generator.name(),
            request.property_type(),
            request.city()
        );

        let start = Instant::now();
        let text = self.generator.generate(&prompt).await?;
        if text.trim().is_empty() {
            return Err(DomainError::generation(format!(
                "{} returned an empty response",
                self.generator.name()
            )));
        }
        info!("Generated {} characters in {:?}", text.len(), start.elapsed());

        let listing = GeneratedListing::new(request, text);

        let log_error = match self.listing_log.append(&listing.to_row()).await {
            Ok(()) => None,
            Err(e) => {
                warn!("Log append failed, listing is still returned: {e}");
                Some(e.to_string())
            }
        };

        Ok(GenerationOutcome { listing, log_error })
    }
}
