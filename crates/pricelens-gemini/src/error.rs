use thiserror::Error;

use pricelens_core::generator::GenerateError;

/// Errors returned by the Gemini API client.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-2xx status. `message` is the parsed
    /// `error.message` field when the body followed the documented error
    /// shape, otherwise the raw body.
    #[error("Gemini API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A 2xx response carried no candidates to extract text from.
    #[error("Gemini returned no candidates for model {model}")]
    NoCandidates { model: String },

    /// The configured base URL could not be parsed.
    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl From<GeminiError> for GenerateError {
    /// Collapses the client taxonomy into the capability boundary error.
    ///
    /// API-level errors keep the bare upstream message (a quota rejection
    /// surfaces as exactly its message, not a decorated one); everything
    /// else uses the full Display rendering.
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::Api { message, .. } => GenerateError::new(message),
            other => GenerateError::new(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_converts_to_bare_message() {
        let err = GeminiError::Api {
            status: 429,
            message: "quota exceeded".to_owned(),
        };
        let boundary = GenerateError::from(err);
        assert_eq!(boundary.to_string(), "quota exceeded");
    }

    #[test]
    fn no_candidates_converts_to_descriptive_message() {
        let err = GeminiError::NoCandidates {
            model: "gemini-1.5-flash".to_owned(),
        };
        let boundary = GenerateError::from(err);
        assert_eq!(
            boundary.to_string(),
            "Gemini returned no candidates for model gemini-1.5-flash"
        );
    }
}
