//! Types exposed to JavaScript via wasm-bindgen.

use serde::{Deserialize, Serialize};
use tsify_next::Tsify;
use wasm_bindgen::prelude::*;
use weft_editor_browser::{Catalog, EditorOptions};

/// Editor options as passed from JavaScript.
///
/// camelCase is canonical; the snake_case spellings are accepted too.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase", default)]
pub struct JsEditorOptions {
    /// Color palette rows, e.g. `[["#000", "#fff"]]`.
    #[tsify(optional)]
    pub colors: Option<Vec<Vec<String>>>,
    /// Icon rows.
    #[tsify(optional)]
    pub icons: Option<Vec<Vec<String>>>,
    #[serde(alias = "image_max_width")]
    #[tsify(optional)]
    pub image_max_width: Option<u32>,
    /// Percentage, 0-100. Defaults to 80.
    #[serde(alias = "image_quality")]
    #[tsify(optional)]
    pub image_quality: Option<u32>,
}

impl JsEditorOptions {
    /// Read options from an arbitrary JS value. `undefined` and `null` mean
    /// "all defaults".
    pub fn from_js(value: JsValue) -> Result<Self, JsError> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        serde_wasm_bindgen::from_value(value)
            .map_err(|e| JsError::new(&format!("Invalid options: {}", e)))
    }
}

impl From<JsEditorOptions> for EditorOptions {
    fn from(options: JsEditorOptions) -> Self {
        Self {
            colors: options.colors.map(Catalog::from_rows),
            icons: options.icons.map(Catalog::from_rows),
            image_max_width: options.image_max_width,
            image_quality: options.image_quality,
        }
    }
}
