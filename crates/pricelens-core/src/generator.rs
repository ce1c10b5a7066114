//! The text-generation capability seam.
//!
//! The extractor service never talks to a concrete model API directly; it
//! holds a [`TextGenerator`] and awaits a single non-streaming call per
//! request. Provider crates implement the trait and map their own typed
//! errors into [`GenerateError`], keeping the original capability message
//! intact so it can be surfaced to the caller verbatim.

use async_trait::async_trait;
use thiserror::Error;

/// Boundary error for a failed generation call.
///
/// Carries only the capability's message. Providers collapse their internal
/// error taxonomy into this before it crosses the seam; an empty message is
/// allowed and is replaced with a generic one at the response boundary.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct GenerateError {
    pub message: String,
}

impl GenerateError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A text-generation capability: one prompt in, the full answer text out.
///
/// Single attempt, no streaming, no retry; concurrency and timeouts are the
/// implementor's concern.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate the complete textual answer for `prompt` using `model`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError`] with the underlying capability's message on
    /// any failure (network, quota, credential, malformed response).
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, GenerateError>;
}
