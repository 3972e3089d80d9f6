//! Selection context: where the caret is and which field owns it.

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, Node, Window};
use weft_editor_core::{AncestorInfo, SelectionSnapshot, SmolStr};

/// The element holding the selection anchor and its editing host.
#[derive(Debug, Clone)]
pub struct SelectionContext {
    pub anchor: Element,
    /// Outermost editable ancestor of `anchor`, if it is inside one.
    pub editable_root: Option<Element>,
    pub snapshot: SelectionSnapshot,
}

/// Capture the current selection.
///
/// Returns `None` when there is no selection. A selection outside every
/// editable region yields a context whose `editable_root` is `None`.
pub fn current_selection_context(window: &Window) -> Option<SelectionContext> {
    let selection = window.get_selection().ok().flatten()?;
    let node = selection.anchor_node()?;
    let anchor = anchor_element(&node)?;

    let mut ancestors = Vec::new();
    let mut editable_root = None;
    let mut in_host = true;
    let mut current = Some(anchor.clone());
    while let Some(el) = current {
        let info = describe(&el);
        in_host &= info.editable;
        if in_host {
            editable_root = Some(el.clone());
        }
        ancestors.push(info);
        current = el.parent_element();
    }

    Some(SelectionContext {
        anchor,
        editable_root,
        snapshot: SelectionSnapshot::new(ancestors),
    })
}

/// Snapshot of the current selection's ancestry.
pub fn selection_snapshot(window: &Window) -> Option<SelectionSnapshot> {
    current_selection_context(window).map(|ctx| ctx.snapshot)
}

/// Text nodes report their parent element.
fn anchor_element(node: &Node) -> Option<Element> {
    match node.dyn_ref::<Element>() {
        Some(el) => Some(el.clone()),
        None => node.parent_element(),
    }
}

fn describe(el: &Element) -> AncestorInfo {
    let tag = SmolStr::new(el.tag_name().to_ascii_lowercase());
    let id = el.id();
    let href = if tag == "a" {
        el.get_attribute("href")
    } else {
        None
    };
    AncestorInfo {
        editable: el
            .dyn_ref::<HtmlElement>()
            .is_some_and(HtmlElement::is_content_editable),
        id: (!id.is_empty()).then(|| SmolStr::new(id)),
        href,
        tag,
    }
}
