//! Browser DOM layer for the weft rich-text editor.
//!
//! This crate wires the platform-independent logic in `weft-editor-core`
//! to the DOM. It assumes a `wasm32-unknown-unknown` target environment.
//!
//! # Architecture
//!
//! - `backend`: `execCommand`-based `FormattingBackend`
//! - `selection`: selection snapshots and active-field lookup
//! - `popover`: overlay + panel lifecycle
//! - `pickers`: DOM rendering of picker panels
//! - `image`: file reading, canvas re-encoding, interactive resize
//! - `mirror`: one- and two-way mirror bindings
//! - `controller`: the `Editor` that ties it together
//!
//! # Re-exports
//!
//! This crate re-exports `weft-editor-core` for convenience, so consumers
//! only need to depend on `weft-editor-browser`.

// Re-export core crate
pub use weft_editor_core;
pub use weft_editor_core::*;

pub mod backend;
pub mod controller;
pub mod image;
pub mod mirror;
pub mod pickers;
pub mod popover;
pub mod selection;

pub use backend::ExecCommandBackend;
pub use controller::{ContentCallback, Editor};
pub use image::{ResizeOutcome, compress, read_file_as_data_uri, resize_interactive};
pub use mirror::{MirrorBinding, MirrorElement, bind_mirror};
pub use pickers::render_panel;
pub use popover::PopoverManager;
pub use selection::{SelectionContext, current_selection_context, selection_snapshot};

use wasm_bindgen::JsValue;

/// Convert a thrown JS value into an editor error.
pub(crate) fn dom_error(err: JsValue) -> EditorError {
    EditorError::Dom(
        err.as_string()
            .unwrap_or_else(|| format!("{err:?}")),
    )
}

/// The window's document, as an element factory.
pub(crate) fn document() -> Result<web_sys::Document, EditorError> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| EditorError::missing("document"))
}
