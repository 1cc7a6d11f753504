use anyhow::Result;

use crate::connector::api::Container;
use crate::domain::{GenerationRequest, ListingInput};

/// One-shot generation from the command line, reusing the same use case as
/// the web form.
pub struct GenerateController<'a> {
    container: &'a Container,
}

impl<'a> GenerateController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn generate(&self, input: ListingInput) -> Result<String> {
        let request = GenerationRequest::new(input)?;
        let outcome = self.container.generate_use_case().execute(request).await?;

        let mut output = outcome.listing().generated_text().to_string();
        if let Some(err) = outcome.log_error() {
            output.push_str(&format!("\n\n(warning: the listing was not saved: {err})"));
        }
        Ok(output)
    }
}
