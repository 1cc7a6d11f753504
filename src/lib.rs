pub mod application;
pub mod connector;
pub mod domain;

pub use application::{
    CopyGenerator, GenerateListingUseCase, GenerationOutcome, ListingLog, SecretsProvider,
};

pub use connector::{
    build_router, Container, ContainerConfig, EnvSecrets, GeminiClient, InMemoryListingLog,
    MockCopyGenerator, OpenAiClient, Provider, SheetsListingLog, StaticSecrets,
};

pub use domain::{
    DomainError, GeneratedListing, GenerationRequest, ListingInput, ListingPrompt, LogRow,
};
