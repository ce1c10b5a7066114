//! Exclusive-highlight bookkeeping for the selected container.

use ego_tree::NodeId;

/// Outline style applied to the highlighted container, cleared from
/// everything else.
pub const HIGHLIGHT_OUTLINE: &str = "3px solid blue";

/// Tracks which container currently carries the highlight.
///
/// At most one node is highlighted at any time: setting a new target
/// implicitly clears the previous one.
#[derive(Debug, Default)]
pub struct HighlightManager {
    highlighted: Option<NodeId>,
}

impl HighlightManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently highlighted node, if any.
    #[must_use]
    pub fn highlighted(&self) -> Option<NodeId> {
        self.highlighted
    }

    #[must_use]
    pub fn is_highlighted(&self, id: NodeId) -> bool {
        self.highlighted == Some(id)
    }

    /// Highlights `id` exclusively. Returns the node that lost its
    /// highlight, or `None` when nothing was highlighted or `id` already
    /// held it.
    pub fn set_highlighted(&mut self, id: NodeId) -> Option<NodeId> {
        let displaced = self.highlighted.take().filter(|prev| *prev != id);
        self.highlighted = Some(id);
        displaced
    }

    /// Clears the highlight, returning the node that held it.
    pub fn reset(&mut self) -> Option<NodeId> {
        self.highlighted.take()
    }
}
