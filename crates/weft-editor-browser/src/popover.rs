//! Popover manager: one overlay + panel pair per editor.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};
use weft_editor_core::{AnchorRect, EditorError, OVERLAY_CSS, PopoverPlacement, PopoverSlot};

use crate::dom_error;

pub const PANEL_CLASS: &str = "editor-popup";
pub const OVERLAY_CLASS: &str = "editor-popup-overlay";

/// An open popover. Owns the listeners of its content.
pub struct PopoverSession {
    overlay: HtmlElement,
    panel: HtmlElement,
    listeners: Vec<EventListener>,
}

impl PopoverSession {
    pub fn panel(&self) -> &HtmlElement {
        &self.panel
    }

    /// Detach both elements. Listeners are released on a later tick since
    /// this usually runs inside one of them.
    fn teardown(self) {
        self.overlay.remove();
        self.panel.remove();
        let listeners = self.listeners;
        wasm_bindgen_futures::spawn_local(async move {
            drop(listeners);
        });
    }
}

type Slot = Rc<RefCell<PopoverSlot<PopoverSession>>>;

/// Shows and dismisses popovers for a single editor instance.
#[derive(Clone)]
pub struct PopoverManager {
    document: Document,
    slot: Slot,
}

impl PopoverManager {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            slot: Rc::new(RefCell::new(PopoverSlot::new())),
        }
    }

    /// Open `content` in a panel below `anchor`.
    ///
    /// Any popover already open is torn down first. `listeners` are kept
    /// alive for as long as the popover is open.
    pub fn show(
        &self,
        anchor: &Element,
        content: &Element,
        width: Option<u32>,
        height: Option<u32>,
        listeners: Vec<EventListener>,
    ) -> Result<(), EditorError> {
        self.dismiss();

        let body = self
            .document
            .body()
            .ok_or_else(|| EditorError::missing("body"))?;

        let rect = anchor.get_bounding_client_rect();
        let anchor_rect = AnchorRect::new(rect.left(), rect.top(), rect.width(), rect.height());
        let placement = PopoverPlacement::below(&anchor_rect, width, height);

        let overlay = self.create_div(OVERLAY_CLASS)?;
        for (property, value) in OVERLAY_CSS {
            overlay
                .style()
                .set_property(property, value)
                .map_err(dom_error)?;
        }

        let panel = self.create_div(PANEL_CLASS)?;
        for (property, value) in placement.css() {
            panel
                .style()
                .set_property(property, &value)
                .map_err(dom_error)?;
        }
        panel.append_child(content).map_err(dom_error)?;

        body.append_child(&overlay).map_err(dom_error)?;
        body.append_child(&panel).map_err(dom_error)?;

        let weak = Rc::downgrade(&self.slot);
        let mut listeners = listeners;
        listeners.push(EventListener::new(&overlay, "click", move |_| {
            dismiss_weak(&weak);
        }));

        let displaced = self.slot.borrow_mut().open(PopoverSession {
            overlay,
            panel,
            listeners,
        });
        if let Some(old) = displaced {
            old.teardown();
        }
        tracing::debug!(
            target: "weft::popover",
            left = placement.left,
            top = placement.top,
            "popover opened"
        );
        Ok(())
    }

    /// Close the open popover. Returns whether one was open.
    pub fn dismiss(&self) -> bool {
        dismiss_slot(&self.slot)
    }

    pub fn is_open(&self) -> bool {
        self.slot.borrow().is_open()
    }

    /// The open panel, if any.
    pub fn panel(&self) -> Option<HtmlElement> {
        self.slot.borrow().current().map(|s| s.panel().clone())
    }

    fn create_div(&self, class: &str) -> Result<HtmlElement, EditorError> {
        let el = self
            .document
            .create_element("div")
            .map_err(dom_error)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| EditorError::Dom("div is not an HtmlElement".into()))?;
        el.set_class_name(class);
        Ok(el)
    }
}

fn dismiss_slot(slot: &RefCell<PopoverSlot<PopoverSession>>) -> bool {
    // Release the borrow before touching the DOM.
    let session = slot.borrow_mut().dismiss();
    match session {
        Some(session) => {
            session.teardown();
            tracing::debug!(target: "weft::popover", "popover dismissed");
            true
        }
        None => false,
    }
}

fn dismiss_weak(slot: &Weak<RefCell<PopoverSlot<PopoverSession>>>) {
    if let Some(slot) = slot.upgrade() {
        dismiss_slot(&slot);
    }
}
