use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::application::{CopyGenerator, SecretsProvider};
use crate::domain::{DomainError, ListingPrompt};

/// Secret key holding the Gemini API key.
pub const GEMINI_API_KEY_SECRET: &str = "GOOGLE_API_KEY";

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// Fixed model constant; not user-configurable.
const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    #[serde(rename = "systemInstruction")]
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
}

#[derive(serde::Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(serde::Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// Minimal subset of the `generateContent` response we care about.
#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: String,
}

/// [`CopyGenerator`] backed by the Gemini `generateContent` REST API.
///
/// The API key is resolved through the injected [`SecretsProvider`] at call
/// time, so a missing `GOOGLE_API_KEY` fails fast as a configuration error
/// without any network traffic.
pub struct GeminiClient {
    client: reqwest::Client,
    secrets: Arc<dyn SecretsProvider>,
    model: String,
}

impl GeminiClient {
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
impl CopyGenerator for GeminiClient {
    async fn generate(&self, prompt: &ListingPrompt) -> Result<String, DomainError> {
        // Credential check before any outbound traffic.
        let api_key = self.secrets.get(GEMINI_API_KEY_SECRET)?;

        let request = ApiRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: prompt.system(),
                }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part {
                    text: prompt.details(),
                }],
            }],
        };

        let url = format!("{BASE_URL}/{}:generateContent", self.model);
        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::generation(format!("GeminiClient: request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("GeminiClient: API returned {status}: {body}");
            return Err(DomainError::generation(format!(
                "GeminiClient: API returned {status}"
            )));
        }

        let api_response: ApiResponse = response.json().await.map_err(|e| {
            DomainError::generation(format!("GeminiClient: failed to parse response: {e}"))
        })?;

        let text: String = api_response
            .candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(DomainError::generation("GeminiClient: empty response body"));
        }

        Ok(text)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}
