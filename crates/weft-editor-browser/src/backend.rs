//! `document.execCommand` formatting backend.

use web_sys::HtmlDocument;
use weft_editor_core::{FormattingBackend, FormattingCommand};

/// Runs formatting commands through the browser's native rich-text editing.
///
/// With no selection inside an editable region the browser ignores the
/// command and reports `false`; that is passed through as-is.
#[derive(Clone)]
pub struct ExecCommandBackend {
    document: HtmlDocument,
}

impl ExecCommandBackend {
    pub fn new(document: HtmlDocument) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &HtmlDocument {
        &self.document
    }
}

impl FormattingBackend for ExecCommandBackend {
    fn execute(&self, command: &FormattingCommand) -> bool {
        let name = command.native_name();
        let result = match command.value() {
            Some(value) => self
                .document
                .exec_command_with_show_ui_and_value(name, false, &value),
            None => self.document.exec_command(name),
        };
        match result {
            Ok(applied) => {
                tracing::trace!(target: "weft::command", command = name, applied, "execCommand");
                applied
            }
            Err(err) => {
                tracing::warn!(target: "weft::command", command = name, ?err, "execCommand threw");
                false
            }
        }
    }
}
