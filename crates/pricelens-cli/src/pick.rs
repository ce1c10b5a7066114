//! Pick command: drive activations end-to-end against a saved page.
//!
//! Activation failures for one target are logged and skipped rather than
//! propagated so a single bad selector does not abort the whole run.

use std::path::Path;

use pricelens_core::schema::{Confidence, ExtractionResult, SelectorKind};
use pricelens_selector::{
    on_activate, Activation, ExtractorClient, ExtractorReply, HighlightManager, Page,
    SelectorSession,
};

pub(crate) async fn run_pick(
    page_path: &Path,
    targets: &[String],
    endpoint: &str,
    dry_run: bool,
) -> anyhow::Result<()> {
    let markup = std::fs::read_to_string(page_path)?;
    let page = Page::parse(&markup);

    if dry_run {
        return run_dry(&page, targets);
    }

    let client = ExtractorClient::new(endpoint)?;
    let (mut session, mut events) = SelectorSession::new(page, client);

    let mut dispatched = 0u32;
    for target in targets {
        match session.activate(target) {
            Ok(Activation::Passthrough) => {
                println!("{target}: interactive element, default action runs");
            }
            Ok(Activation::NoContainer) => {
                println!("{target}: no enclosing container, nothing sent");
            }
            Ok(Activation::Dispatch(_)) => {
                dispatched += 1;
                let summary = session
                    .highlighted_summary()
                    .unwrap_or_else(|| "container".to_owned());
                println!("{target}: submitted {summary}");
            }
            Err(e) => {
                tracing::warn!(selector = %target, error = %e, "activation failed, skipping");
            }
        }
    }

    drop(session);
    if dispatched == 0 {
        println!("nothing submitted");
        return Ok(());
    }

    // Stale replies were already dropped inside the session; everything
    // arriving here is current.
    while let Some(event) = events.recv().await {
        match event.outcome {
            Ok(ExtractorReply::Answer { gemini_response }) => {
                print_answer(event.sequence, &gemini_response);
            }
            Ok(ExtractorReply::Error { error }) => {
                println!("#{}: service error: {error}", event.sequence);
            }
            Ok(ExtractorReply::Preflight { message }) => {
                println!("#{}: unexpected preflight reply: {message}", event.sequence);
            }
            Err(e) => println!("#{}: request failed: {e}", event.sequence),
        }
    }

    Ok(())
}

fn run_dry(page: &Page, targets: &[String]) -> anyhow::Result<()> {
    let mut highlight = HighlightManager::new();
    for target in targets {
        match on_activate(page, &mut highlight, target) {
            Ok(Activation::Passthrough) => {
                println!("{target}: interactive element, default action runs");
            }
            Ok(Activation::NoContainer) => {
                println!("{target}: no enclosing container, nothing would be sent");
            }
            Ok(Activation::Dispatch(request)) => {
                println!(
                    "dry-run: {target}: would submit {} bytes of markup",
                    request.html.len()
                );
            }
            Err(e) => println!("{target}: {e}"),
        }
    }
    Ok(())
}

/// Pretty-print an answer when it conforms to the documented schema,
/// otherwise show the raw text. Schema enforcement stays the caller's
/// choice; the service never rejects a nonconforming answer.
fn print_answer(sequence: u64, text: &str) {
    match ExtractionResult::from_model_text(text) {
        Ok(result) => {
            println!("#{sequence}: price_found={}", result.price_found);
            for candidate in &result.selectors {
                let selector = candidate.selector.as_deref().unwrap_or("-");
                let line = format!(
                    "  [{}] {} {selector}",
                    confidence_label(candidate.confidence),
                    kind_label(candidate.kind),
                );
                match candidate.price_value() {
                    Some(price) => println!("{line} => {price}"),
                    None => match candidate.price.as_deref() {
                        Some(raw) => println!("{line} => {raw}"),
                        None => println!("{line}"),
                    },
                }
            }
        }
        Err(e) => {
            tracing::debug!(error = %e, "answer does not match the documented schema");
            println!("#{sequence}: {text}");
        }
    }
}

fn kind_label(kind: Option<SelectorKind>) -> &'static str {
    match kind {
        Some(SelectorKind::Css) => "css",
        Some(SelectorKind::Xpath) => "xpath",
        None => "-",
    }
}

fn confidence_label(confidence: Option<Confidence>) -> &'static str {
    match confidence {
        Some(Confidence::High) => "high",
        Some(Confidence::Medium) => "medium",
        Some(Confidence::Low) => "low",
        None => "-",
    }
}
