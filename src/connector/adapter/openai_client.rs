use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::application::{CopyGenerator, SecretsProvider};
use crate::domain::{DomainError, ListingPrompt};

/// Secret key holding the OpenAI API key.
pub const OPENAI_API_KEY_SECRET: &str = "OPENAI_API_KEY";

const COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
/// Fixed model constant; not user-configurable.
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
}

#[derive(serde::Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: String,
}

/// [`CopyGenerator`] backed by the OpenAI chat completions API.
///
/// Functionally interchangeable with [`super::GeminiClient`]; the system
/// instruction and the listing details travel as separate system/user
/// messages.
pub struct OpenAiClient {
    client: reqwest::Client,
    secrets: Arc<dyn SecretsProvider>,
    model: String,
}

impl OpenAiClient {
    pub fn new(secrets: Arc<dyn SecretsProvider>) -> Self {
        Self::with_model(secrets, DEFAULT_MODEL)
    }

    pub fn with_model(secrets: Arc<dyn SecretsProvider>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            secrets,
            model: model.into(),
        }
    }
}

#[async_trait]
impl CopyGenerator for OpenAiClient {
    async fn generate(&self, prompt: &ListingPrompt) -> Result<String, DomainError> {
        // Credential check before any outbound traffic.
        let api_key = self.secrets.get(OPENAI_API_KEY_SECRET)?;

        let request = ApiRequest {
            model: &self.model,
            messages: vec![
                ApiMessage {
                    role: "system",
                    content: prompt.system(),
                },
                ApiMessage {
                    role: "user",
                    content: prompt.details(),
                },
            ],
        };

        let response = self
            .client
            .post(COMPLETIONS_URL)
            .bearer_auth(&api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::generation(format!("OpenAiClient: request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("OpenAiClient: API returned {status}: {body}");
            return Err(DomainError::generation(format!(
                "OpenAiClient: API returned {status}"
            )));
        }

        let api_response: ApiResponse = response.json().await.map_err(|e| {
            DomainError::generation(format!("OpenAiClient: failed to parse response: {e}"))
        })?;

        let text = api_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default();

        if text.is_empty() {
            return Err(DomainError::generation("OpenAiClient: empty response body"));
        }

        Ok(text)
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}
