use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::{CopyGenerator, GenerateListingUseCase, ListingLog, SecretsProvider};
use crate::connector::adapter::{
    EnvSecrets, GeminiClient, InMemoryListingLog, MockCopyGenerator, OpenAiClient,
    SheetsListingLog,
};

/// Hosted text-generation provider behind the [`CopyGenerator`] seam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Provider {
    #[default]
    Gemini,
    OpenAi,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Gemini => "gemini",
            Provider::OpenAi => "openai",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "gemini" => Provider::Gemini,
            "openai" | "open_ai" => Provider::OpenAi,
            unknown => {
                warn!("Unknown provider '{}', defaulting to Gemini", unknown);
                Provider::Gemini
            }
        }
    }
}

pub struct ContainerConfig {
    pub provider: Provider,
    pub spreadsheet_name: String,
    /// Use the canned-text generator instead of a hosted provider.
    pub mock_generator: bool,
    /// Keep log rows in memory instead of Google Sheets.
    pub memory_log: bool,
}

/// Wires adapters to use cases once at startup.
///
/// Construction performs no I/O: the Sheets handle is resolved lazily on the
/// first append, and provider credentials are checked per call, so a missing
/// secret surfaces as a per-request configuration error instead of a crash.
pub struct Container {
    generator: Arc<dyn CopyGenerator>,
    listing_log: Arc<dyn ListingLog>,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Self {
        Self::with_secrets(config, Arc::new(EnvSecrets::new()))
    }

    /// Construct with an explicit secrets provider (tests inject a static one).
    pub fn with_secrets(config: ContainerConfig, secrets: Arc<dyn SecretsProvider>) -> Self {
        let generator: Arc<dyn CopyGenerator> = if config.mock_generator {
            debug!("Using mock copy generator");
            Arc::new(MockCopyGenerator::new())
        } else {
            debug!("Using {} copy generator", config.provider.as_str());
            match config.provider {
                Provider::Gemini => Arc::new(GeminiClient::new(Arc::clone(&secrets))),
                Provider::OpenAi => Arc::new(OpenAiClient::new(Arc::clone(&secrets))),
            }
        };

        let listing_log: Arc<dyn ListingLog> = if config.memory_log {
            debug!("Using in-memory listing log");
            Arc::new(InMemoryListingLog::new())
        } else {
            Arc::new(SheetsListingLog::new(
                Arc::clone(&secrets),
                config.spreadsheet_name,
            ))
        };

        Self {
            generator,
            listing_log,
        }
    }

    pub fn generate_use_case(&self) -> GenerateListingUseCase {
        GenerateListingUseCase::new(Arc::clone(&self.generator), Arc::clone(&self.listing_log))
    }

    pub fn provider_name(&self) -> &'static str {
        self.generator.name()
    }
}
