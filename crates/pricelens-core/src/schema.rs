//! The documented output schema for price-locator answers.
//!
//! The extractor service returns the model's text untouched; parsing it into
//! this schema is the caller's job. The types here accept the shapes the
//! extraction contract instructs the model to produce, including the
//! `null` selector/type fields of a no-price answer and a markdown-fenced
//! JSON body.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The model's answer could not be parsed as an [`ExtractionResult`].
#[derive(Debug, Error)]
#[error("model output does not conform to the extraction schema: {0}")]
pub struct SchemaNonconformance(#[source] pub serde_json::Error);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectorKind {
    Css,
    Xpath,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// One locator candidate for a price-bearing element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorCandidate {
    /// CSS selector or XPath expression; `null` when no price was found.
    pub selector: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<SelectorKind>,
    #[serde(default)]
    pub confidence: Option<Confidence>,
    /// Normalized price as emitted by the model: a bare integer, no
    /// currency symbol, fractional part discarded.
    #[serde(rename = "Price", default)]
    pub price: Option<String>,
}

impl SelectorCandidate {
    /// The normalized integer price, when the model followed the contract.
    ///
    /// Returns `None` for missing or malformed values rather than coercing.
    #[must_use]
    pub fn price_value(&self) -> Option<i64> {
        self.price.as_deref()?.trim().parse::<i64>().ok()
    }
}

/// The complete answer the extraction contract asks the model to produce.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub price_found: bool,
    #[serde(default)]
    pub selectors: Vec<SelectorCandidate>,
}

impl ExtractionResult {
    /// Parse a model answer, tolerating a markdown code fence around the JSON.
    ///
    /// Tries the raw text first, then the text with ```` ```json ````/```` ``` ````
    /// fences stripped, then the outermost `{…}` slice as a last resort.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaNonconformance`] when none of the attempts yield a
    /// conforming document.
    pub fn from_model_text(text: &str) -> Result<Self, SchemaNonconformance> {
        let trimmed = text.trim();

        serde_json::from_str(trimmed)
            .or_else(|_| {
                let unfenced = trimmed
                    .trim_start_matches("```json")
                    .trim_start_matches("```")
                    .trim_end_matches("```")
                    .trim();
                serde_json::from_str(unfenced)
            })
            .or_else(|e| {
                // Last resort for answers with surrounding prose.
                match (trimmed.find('{'), trimmed.rfind('}')) {
                    (Some(start), Some(end)) if end > start => {
                        serde_json::from_str(&trimmed[start..=end])
                    }
                    _ => Err(e),
                }
            })
            .map_err(SchemaNonconformance)
    }
}
