//! HTTP client for the Google Generative Language REST API.
//!
//! Wraps `reqwest` with typed error handling, API key management, and
//! response deserialization for the non-streaming `generateContent`
//! endpoint. Implements [`TextGenerator`] so the extractor service can hold
//! it behind the capability seam.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use pricelens_core::generator::{GenerateError, TextGenerator};

use crate::error::GeminiError;
use crate::types::{ApiErrorBody, Content, GenerateContentRequest, GenerateContentResponse};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Client for the Generative Language `generateContent` endpoint.
///
/// Manages the HTTP client, API key, and base URL. Use [`GeminiClient::new`]
/// for production or [`GeminiClient::with_base_url`] to point at a mock
/// server in tests.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl GeminiClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, GeminiError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeminiError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, GeminiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("pricelens/0.1 (price-locator)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // Url::join appends the models path instead of replacing the last
        // path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| GeminiError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Sends `prompt` as a single user message and returns the answer text
    /// in full (the concatenated text parts of the first candidate).
    ///
    /// # Errors
    ///
    /// - [`GeminiError::Api`] if the API returns a non-2xx status.
    /// - [`GeminiError::Http`] on network failure.
    /// - [`GeminiError::Deserialize`] if the response does not match the
    ///   expected shape.
    /// - [`GeminiError::NoCandidates`] if a 2xx response carries no
    ///   candidates.
    pub async fn generate_text(&self, model: &str, prompt: &str) -> Result<String, GeminiError> {
        let url = self.generate_url(model)?;
        let request = GenerateContentRequest {
            contents: vec![Content::user(prompt)],
        };

        tracing::debug!(model, prompt_len = prompt.len(), "requesting generateContent");

        let response = self.client.post(url).json(&request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map_or(body, |parsed| parsed.error.message);
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| GeminiError::Deserialize {
                context: format!("generateContent({model})"),
                source: e,
            })?;

        if let Some(usage) = &parsed.usage_metadata {
            tracing::debug!(
                model,
                prompt_tokens = usage.prompt_token_count,
                total_tokens = usage.total_token_count,
                "generateContent usage"
            );
        }

        let candidate = parsed
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| GeminiError::NoCandidates {
                model: model.to_owned(),
            })?;

        let text: String = candidate
            .content
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();

        Ok(text)
    }

    /// Builds the `generateContent` URL for `model` with the API key as a
    /// properly percent-encoded query parameter.
    fn generate_url(&self, model: &str) -> Result<Url, GeminiError> {
        let mut url = self
            .base_url
            .join(&format!("models/{model}:generateContent"))
            .map_err(|e| GeminiError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, GenerateError> {
        self.generate_text(model, prompt)
            .await
            .map_err(GenerateError::from)
    }
}
