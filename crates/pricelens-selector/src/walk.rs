//! Upward ancestor walk, independent of any concrete DOM type.

/// A node that can name its parent. Implemented for `scraper::ElementRef`
/// in [`crate::dom`]; tests implement it over synthetic trees.
pub trait ParentLookup: Sized {
    /// The enclosing node, or `None` at the root.
    fn parent_node(&self) -> Option<Self>;
}

/// Returns the first ancestor-or-self of `start` satisfying `is_container`,
/// walking strictly upward. `None` when the walk exhausts the chain.
#[must_use]
pub fn nearest_container<N, P>(start: N, is_container: P) -> Option<N>
where
    N: ParentLookup,
    P: Fn(&N) -> bool,
{
    let mut current = Some(start);
    while let Some(node) = current {
        if is_container(&node) {
            return Some(node);
        }
        current = node.parent_node();
    }
    None
}
