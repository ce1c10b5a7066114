//! Pointer-activation handling: decide whether a click selects a container.

use crate::client::ExtractionRequest;
use crate::dom::{is_block_container, is_interactive_leaf, Page};
use crate::error::SelectorError;
use crate::highlight::HighlightManager;
use crate::walk::nearest_container;

/// Outcome of one pointer activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// The target is an interactive leaf; its default action runs and
    /// selection state is untouched.
    Passthrough,
    /// The default action was suppressed but no block container encloses
    /// the target; selection state is untouched.
    NoContainer,
    /// A container was selected and highlighted; the request holds its
    /// outer markup, ready for dispatch.
    Dispatch(ExtractionRequest),
}

impl Activation {
    /// Whether the activation suppressed the target's default action.
    /// Interactive leaves keep their default behavior; everything else is
    /// intercepted.
    #[must_use]
    pub fn default_suppressed(&self) -> bool {
        !matches!(self, Activation::Passthrough)
    }
}

/// Handles one activation against `target_css`.
///
/// Interactive leaves (`a`, `input`, `textarea`) pass through untouched.
/// Otherwise the walk ascends from the target to the nearest enclosing
/// block container; finding one highlights it exclusively and produces a
/// dispatchable request from its outer markup. A missing container changes
/// nothing.
///
/// # Errors
///
/// Returns [`SelectorError::InvalidSelector`] or
/// [`SelectorError::TargetNotFound`] when `target_css` resolves no element.
pub fn on_activate(
    page: &Page,
    highlight: &mut HighlightManager,
    target_css: &str,
) -> Result<Activation, SelectorError> {
    let target = page.click_target(target_css)?;
    if is_interactive_leaf(target) {
        return Ok(Activation::Passthrough);
    }
    match nearest_container(target, |el| is_block_container(*el)) {
        Some(container) => {
            highlight.set_highlighted(container.id());
            Ok(Activation::Dispatch(ExtractionRequest::new(container.html())))
        }
        None => Ok(Activation::NoContainer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <div id="outer" class="card">
            <div id="inner">
                <p><span id="amount">$12.50</span></p>
            </div>
            <a id="link" href="/more">details</a>
            <input id="field" type="text">
            <textarea id="box"></textarea>
        </div>
        <p id="stray">outside any div</p>
    "#;

    fn setup() -> (Page, HighlightManager) {
        (Page::parse(PAGE), HighlightManager::new())
    }

    #[test]
    fn interactive_leaves_pass_through_untouched() {
        let (page, mut highlight) = setup();
        for css in ["#link", "#field", "#box"] {
            let activation = on_activate(&page, &mut highlight, css).expect("activation");
            assert_eq!(activation, Activation::Passthrough, "{css}");
            assert!(!activation.default_suppressed());
        }
        assert_eq!(highlight.highlighted(), None);
    }

    #[test]
    fn click_inside_nested_divs_selects_the_nearest() {
        let (page, mut highlight) = setup();
        let activation = on_activate(&page, &mut highlight, "#amount").expect("activation");
        assert!(activation.default_suppressed());

        let inner = page.click_target("#inner").expect("inner div");
        assert!(highlight.is_highlighted(inner.id()));

        match activation {
            Activation::Dispatch(request) => assert_eq!(request.html, inner.html()),
            other => panic!("expected dispatch, got: {other:?}"),
        }
    }

    #[test]
    fn click_directly_on_a_container_selects_itself() {
        let (page, mut highlight) = setup();
        let activation = on_activate(&page, &mut highlight, "#inner").expect("activation");
        let inner = page.click_target("#inner").expect("inner div");
        assert!(highlight.is_highlighted(inner.id()));
        match activation {
            Activation::Dispatch(request) => {
                assert!(request.html.starts_with("<div id=\"inner\""));
                assert!(request.html.contains("$12.50"));
            }
            other => panic!("expected dispatch, got: {other:?}"),
        }
    }

    #[test]
    fn target_without_container_suppresses_but_sends_nothing() {
        let (page, mut highlight) = setup();
        let activation = on_activate(&page, &mut highlight, "#stray").expect("activation");
        assert_eq!(activation, Activation::NoContainer);
        assert!(activation.default_suppressed());
        assert_eq!(highlight.highlighted(), None);
    }

    #[test]
    fn successive_activations_move_the_highlight_exclusively() {
        let (page, mut highlight) = setup();

        on_activate(&page, &mut highlight, "#amount").expect("first");
        let inner = page.click_target("#inner").expect("inner div");
        assert!(highlight.is_highlighted(inner.id()));

        // Second activation lands outside #inner but inside #outer.
        on_activate(&page, &mut highlight, "#outer").expect("second");
        let outer = page.click_target("#outer").expect("outer div");
        assert!(highlight.is_highlighted(outer.id()));
        assert!(!highlight.is_highlighted(inner.id()));
    }

    #[test]
    fn failed_activation_leaves_highlight_alone() {
        let (page, mut highlight) = setup();
        on_activate(&page, &mut highlight, "#amount").expect("first");
        let before = highlight.highlighted();

        let err = on_activate(&page, &mut highlight, "#missing").expect_err("no target");
        assert!(matches!(err, SelectorError::TargetNotFound { .. }));
        assert_eq!(highlight.highlighted(), before);
    }
}
