//! JsEditor - the editor wrapper for JavaScript.

use wasm_bindgen::prelude::*;
use weft_editor_browser::{Catalog, Editor, EditorOptions, FormattingCommand};

use crate::types::JsEditorOptions;

/// The editor instance exposed to JavaScript.
#[wasm_bindgen]
pub struct JsEditor {
    inner: Editor,
}

#[wasm_bindgen]
impl JsEditor {
    /// Bind the elements with ids `editor_fields` and wire the toolbar.
    #[wasm_bindgen(constructor)]
    pub fn new(editor_fields: Vec<String>, options: JsValue) -> Result<JsEditor, JsError> {
        let options: EditorOptions = JsEditorOptions::from_js(options)?.into();
        let config = options.resolve()?;
        let inner = Editor::new(editor_fields.iter().map(String::as_str), config)?;
        Ok(Self { inner })
    }

    /// Register `callback(fieldId, html)`, called after every content change.
    #[wasm_bindgen(js_name = setCallbackOnContentChange)]
    pub fn set_callback_on_content_change(&self, callback: js_sys::Function) {
        self.inner.set_on_content_change(move |id, html| {
            let result = callback.call2(
                &JsValue::NULL,
                &JsValue::from_str(id),
                &JsValue::from_str(html),
            );
            if let Err(err) = result {
                tracing::warn!(target: "weft::editor", ?err, "content callback threw");
            }
        });
    }

    /// Mirror a field into another element. Two-way needs a textarea target.
    #[wasm_bindgen(js_name = linkFieldToElement)]
    pub fn link_field_to_element(
        &self,
        editor_id: &str,
        element_id: &str,
        two_way: Option<bool>,
    ) -> Result<(), JsError> {
        self.inner
            .link_field_to_element(editor_id, element_id, two_way.unwrap_or(false))?;
        Ok(())
    }

    /// Current HTML of a field.
    #[wasm_bindgen]
    pub fn content(&self, id: &str) -> Option<String> {
        self.inner.content(id)
    }

    #[wasm_bindgen(js_name = fieldIds)]
    pub fn field_ids(&self) -> Vec<String> {
        self.inner.field_ids()
    }

    /// Run a formatting command by its `execCommand` name.
    #[wasm_bindgen]
    pub fn exec(&self, name: &str, value: Option<String>) -> Result<bool, JsError> {
        let command = FormattingCommand::from_name(name, value.as_deref())
            .ok_or_else(|| JsError::new(&format!("Unknown or incomplete command: {}", name)))?;
        Ok(self.inner.apply(&command))
    }

    /// Prompt for a link and apply it to the selection.
    #[wasm_bindgen]
    pub fn link(&self) {
        self.inner.link();
    }

    #[wasm_bindgen(js_name = insertHtml)]
    pub fn insert_html(&self, html: &str) {
        self.inner.insert_html(html);
    }

    /// Re-scan fields, e.g. after the host replaced their content.
    #[wasm_bindgen(js_name = initContent)]
    pub fn init_content(&self) {
        self.inner.init_content();
    }

    #[wasm_bindgen(js_name = dismissPopover)]
    pub fn dismiss_popover(&self) -> bool {
        self.inner.dismiss_popover()
    }

    /// The built-in color palette.
    #[wasm_bindgen(js_name = defaultColors)]
    pub fn default_colors() -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&Catalog::default_colors())
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    /// The built-in icon set.
    #[wasm_bindgen(js_name = defaultIcons)]
    pub fn default_icons() -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&Catalog::default_icons())
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }
}
