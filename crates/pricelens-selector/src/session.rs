//! A selector session: one parsed page, one highlight, many in-flight
//! extraction requests.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use crate::activation::{on_activate, Activation};
use crate::client::{ExtractionRequest, ExtractorClient, ExtractorReply};
use crate::dom::{summarize, Page};
use crate::error::SelectorError;
use crate::highlight::HighlightManager;

/// A completed extraction attempt, tagged with its activation sequence.
#[derive(Debug)]
pub struct SessionEvent {
    pub sequence: u64,
    pub outcome: Result<ExtractorReply, SelectorError>,
}

/// Drives activations against one page and dispatches the resulting
/// requests without blocking.
///
/// Each dispatch runs as a detached task; nothing is cancelled when a new
/// activation arrives, so several requests may be in flight at once.
/// Completions are surfaced through the event channel in completion order,
/// except that a reply older than one already surfaced is dropped as stale:
/// the newest answer always stands.
pub struct SelectorSession {
    page: Page,
    highlight: HighlightManager,
    client: Arc<ExtractorClient>,
    next_sequence: u64,
    newest_surfaced: Arc<AtomicU64>,
    events: mpsc::UnboundedSender<SessionEvent>,
}

impl SelectorSession {
    /// Creates a session and the receiving end of its event channel. The
    /// channel closes once the session and all in-flight dispatches are
    /// done.
    #[must_use]
    pub fn new(
        page: Page,
        client: ExtractorClient,
    ) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let session = Self {
            page,
            highlight: HighlightManager::new(),
            client: Arc::new(client),
            next_sequence: 1,
            newest_surfaced: Arc::new(AtomicU64::new(0)),
            events,
        };
        (session, receiver)
    }

    /// Handles one activation; a selected container is dispatched
    /// immediately as a detached task.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Propagates target-resolution failures from [`on_activate`]; highlight
    /// state is untouched on error.
    pub fn activate(&mut self, target_css: &str) -> Result<Activation, SelectorError> {
        let activation = on_activate(&self.page, &mut self.highlight, target_css)?;
        if let Activation::Dispatch(request) = &activation {
            self.dispatch(request.clone());
        }
        Ok(activation)
    }

    /// Display form of the currently highlighted container, if any.
    #[must_use]
    pub fn highlighted_summary(&self) -> Option<String> {
        self.highlight
            .highlighted()
            .and_then(|id| self.page.element(id))
            .map(summarize)
    }

    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }

    fn dispatch(&mut self, request: ExtractionRequest) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        let client = Arc::clone(&self.client);
        let newest_surfaced = Arc::clone(&self.newest_surfaced);
        let events = self.events.clone();

        debug!(sequence, bytes = request.html.len(), "dispatching extraction request");
        tokio::spawn(async move {
            let outcome = client.submit(&request).await;
            // A newer activation's reply has already been surfaced; this
            // one would roll the answer backwards.
            if newest_surfaced.fetch_max(sequence, Ordering::AcqRel) > sequence {
                debug!(sequence, "dropping stale extraction reply");
                return;
            }
            // Receiver may be gone; the dispatch stays fire-and-forget.
            let _ = events.send(SessionEvent { sequence, outcome });
        });
    }
}
