//! Parsed-page adapter over `scraper::Html`.
//!
//! Resolves click targets by CSS selector, classifies elements for the
//! activation flow, and serializes the selected container's outer markup.

use ego_tree::NodeId;
use scraper::{ElementRef, Html, Selector};

use crate::error::SelectorError;
use crate::walk::ParentLookup;

/// Tags whose default activation behavior is never intercepted.
pub const INTERACTIVE_LEAF_TAGS: [&str; 3] = ["a", "input", "textarea"];

/// The block-container tag the upward walk stops at.
pub const BLOCK_CONTAINER_TAG: &str = "div";

/// A parsed HTML document.
pub struct Page {
    document: Html,
}

impl Page {
    /// Parses a full document. HTML parsing is error-tolerant; malformed
    /// markup yields a best-effort tree rather than an error.
    #[must_use]
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    /// Resolves a click target: the first element matching `css` in
    /// document order.
    ///
    /// # Errors
    ///
    /// - [`SelectorError::InvalidSelector`] — `css` does not parse.
    /// - [`SelectorError::TargetNotFound`] — no element matches.
    pub fn click_target(&self, css: &str) -> Result<ElementRef<'_>, SelectorError> {
        let selector = Selector::parse(css).map_err(|e| SelectorError::InvalidSelector {
            selector: css.to_owned(),
            reason: e.to_string(),
        })?;
        self.document
            .select(&selector)
            .next()
            .ok_or_else(|| SelectorError::TargetNotFound {
                selector: css.to_owned(),
            })
    }

    /// All block containers in document order. This is the set a highlight
    /// reset clears, so re-running it after any activation sequence yields
    /// the same list.
    #[must_use]
    pub fn block_containers(&self) -> Vec<ElementRef<'_>> {
        let selector = Selector::parse(BLOCK_CONTAINER_TAG).expect("static selector parses");
        self.document.select(&selector).collect()
    }

    /// Re-resolves a node id captured earlier, if it still names an element.
    #[must_use]
    pub fn element(&self, id: NodeId) -> Option<ElementRef<'_>> {
        self.document.tree.get(id).and_then(ElementRef::wrap)
    }
}

/// True for `a`, `input`, and `textarea` targets.
#[must_use]
pub fn is_interactive_leaf(element: ElementRef<'_>) -> bool {
    INTERACTIVE_LEAF_TAGS.contains(&element.value().name())
}

/// True for `div` elements.
#[must_use]
pub fn is_block_container(element: ElementRef<'_>) -> bool {
    element.value().name() == BLOCK_CONTAINER_TAG
}

/// Short display form: tag, `#id`, `.class` list, and serialized size.
#[must_use]
pub fn summarize(element: ElementRef<'_>) -> String {
    let value = element.value();
    let mut label = value.name().to_owned();
    if let Some(id) = value.id() {
        label.push('#');
        label.push_str(id);
    }
    for class in value.classes() {
        label.push('.');
        label.push_str(class);
    }
    let bytes = element.html().len();
    format!("{label} ({bytes} bytes)")
}

impl ParentLookup for ElementRef<'_> {
    /// Element parents only; text and document nodes end the walk.
    fn parent_node(&self) -> Option<Self> {
        self.parent().and_then(ElementRef::wrap)
    }
}
