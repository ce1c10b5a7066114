//! HTTP dispatch to the extractor service.

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::error::SelectorError;

const USER_AGENT: &str = "pricelens/0.1 (selector)";

/// Payload posted to the extractor service: the selected container's outer
/// markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionRequest {
    pub html: String,
}

impl ExtractionRequest {
    #[must_use]
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }
}

/// Decoded reply envelope. The service answers with exactly one of these
/// bodies regardless of status code.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ExtractorReply {
    /// 200: the model's answer text, passed through unparsed.
    Answer { gemini_response: String },
    /// 400/500: the failure message.
    Error { error: String },
    /// Preflight acknowledgement.
    Preflight { message: String },
}

/// Client for the extractor service.
///
/// Performs exactly one attempt per submission: no retry, no client-side
/// timeout beyond the transport's own defaults. Status codes are not
/// inspected; the reply body alone distinguishes answers from failures.
#[derive(Debug)]
pub struct ExtractorClient {
    client: Client,
    endpoint: Url,
}

impl ExtractorClient {
    /// Creates a client posting to `endpoint`.
    ///
    /// # Errors
    ///
    /// - [`SelectorError::InvalidEndpoint`] — `endpoint` is not a valid URL.
    /// - [`SelectorError::Http`] — the underlying `reqwest::Client` cannot
    ///   be constructed.
    pub fn new(endpoint: &str) -> Result<Self, SelectorError> {
        let endpoint = Url::parse(endpoint).map_err(|e| SelectorError::InvalidEndpoint {
            endpoint: endpoint.to_owned(),
            reason: e.to_string(),
        })?;
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client, endpoint })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Posts one extraction request and decodes the reply envelope.
    ///
    /// # Errors
    ///
    /// - [`SelectorError::Http`] — connection or transport failure.
    /// - [`SelectorError::Deserialize`] — the reply body is not one of the
    ///   documented envelopes.
    pub async fn submit(
        &self,
        request: &ExtractionRequest,
    ) -> Result<ExtractorReply, SelectorError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| SelectorError::Deserialize {
            context: format!("extractor reply (status {status})"),
            source: e,
        })
    }
}
