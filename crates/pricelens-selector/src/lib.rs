pub mod activation;
pub mod client;
pub mod dom;
pub mod error;
pub mod highlight;
pub mod session;
pub mod walk;

pub use activation::{on_activate, Activation};
pub use client::{ExtractionRequest, ExtractorClient, ExtractorReply};
pub use dom::Page;
pub use error::SelectorError;
pub use highlight::{HighlightManager, HIGHLIGHT_OUTLINE};
pub use session::{SelectorSession, SessionEvent};
pub use walk::{nearest_container, ParentLookup};
