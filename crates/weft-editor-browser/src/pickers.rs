//! DOM rendering of picker panels.

use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};
use weft_editor_core::{EditorError, PickerLayout, PickerOption, PickerPanel};

use crate::dom_error;

/// Callback invoked with the option the user picked.
pub type PickHandler = Rc<dyn Fn(&PickerOption)>;

/// Build the DOM for `panel`.
///
/// Every option gets a `mousedown` listener that calls `on_pick`. The
/// listeners are returned so the popover can own them.
pub fn render_panel(
    document: &Document,
    panel: &PickerPanel,
    on_pick: PickHandler,
) -> Result<(Element, Vec<EventListener>), EditorError> {
    let mut listeners = Vec::new();
    let container = create(document, "div", "")?;

    match panel.layout {
        PickerLayout::Grid => {
            container.set_class_name("editor-flexbox");
            for row in &panel.rows {
                let row_el = create(document, "div", "")?;
                for option in row {
                    let el = render_option(document, option)?;
                    listeners.push(on_mousedown(&el, option.clone(), on_pick.clone()));
                    row_el.append_child(&el).map_err(dom_error)?;
                }
                container.append_child(&row_el).map_err(dom_error)?;
            }
        }
        PickerLayout::Ladder => {
            for option in panel.rows.iter().flatten() {
                let el = render_option(document, option)?;
                listeners.push(on_mousedown(&el, option.clone(), on_pick.clone()));
                container.append_child(&el).map_err(dom_error)?;
            }
        }
    }

    if let Some(trailer) = &panel.trailer {
        let el = render_option(document, trailer)?;
        listeners.push(on_mousedown(&el, trailer.clone(), on_pick.clone()));
        container.append_child(&el).map_err(dom_error)?;
    }

    Ok((container.into(), listeners))
}

fn render_option(document: &Document, option: &PickerOption) -> Result<HtmlElement, EditorError> {
    let el = match option {
        PickerOption::Color(code) => {
            let swatch = create(document, "div", "editor-popup-button-color")?;
            swatch
                .style()
                .set_property("background-color", code)
                .map_err(dom_error)?;
            swatch
        }
        PickerOption::Icon(glyph) => {
            let icon = create(document, "span", "editor-button editor-popup-button-icon")?;
            icon.set_text_content(Some(glyph.as_str()));
            icon
        }
        PickerOption::FontSize(level) => {
            let row = create(document, "div", "editor-button")?;
            let sample = create(document, "font", "")?;
            sample
                .set_attribute("size", &level.to_string())
                .map_err(dom_error)?;
            sample.set_text_content(Some(option.label()));
            row.append_child(&sample).map_err(dom_error)?;
            row
        }
        PickerOption::Heading(level) => {
            let row = create(document, "div", "editor-button")?;
            let sample = create(document, &format!("h{level}"), "")?;
            sample.set_text_content(Some(option.label()));
            row.append_child(&sample).map_err(dom_error)?;
            row
        }
        PickerOption::NormalText => {
            let row = create(document, "div", "editor-button")?;
            let text = create(document, "span", "")?;
            text.set_text_content(Some(option.label()));
            row.append_child(&text).map_err(dom_error)?;
            row
        }
        PickerOption::ResetColor => {
            let reset = create(document, "div", "editor-button editor-center")?;
            reset.set_text_content(Some(option.label()));
            reset
        }
    };
    Ok(el)
}

fn on_mousedown(el: &HtmlElement, option: PickerOption, on_pick: PickHandler) -> EventListener {
    // Keep the editor selection: a default mousedown would move focus.
    EventListener::new_with_options(
        el,
        "mousedown",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            event.prevent_default();
            on_pick(&option);
        },
    )
}

fn create(document: &Document, tag: &str, class: &str) -> Result<HtmlElement, EditorError> {
    let el = document
        .create_element(tag)
        .map_err(dom_error)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| EditorError::Dom(format!("<{tag}> is not an HtmlElement")))?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    Ok(el)
}
