//! Editor options as supplied by the host, and the validated configuration.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::catalog::Catalog;
use crate::embed::{ImageQuality, RESIZE_HINT};
use crate::error::EditorError;

/// Options accepted at construction. Every field is optional.
///
/// Keys may be given in snake_case or camelCase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorOptions {
    /// Color palette rows. Defaults to the built-in 8×10 palette.
    pub colors: Option<Catalog>,
    /// Icon rows. Defaults to the built-in 8×5 set.
    pub icons: Option<Catalog>,
    /// Inserted images wider than this are scaled down.
    #[serde(alias = "imageMaxWidth")]
    pub image_max_width: Option<u32>,
    /// Encoder quality, `0..=100`. Defaults to 80.
    #[serde(alias = "imageQuality")]
    pub image_quality: Option<u32>,
}

impl EditorOptions {
    /// Fill defaults and validate.
    pub fn resolve(self) -> Result<EditorConfig, EditorError> {
        let image_quality = match self.image_quality {
            Some(q) => ImageQuality::new(q)?,
            None => ImageQuality::default(),
        };
        Ok(EditorConfig {
            colors: self.colors.unwrap_or_else(Catalog::default_colors),
            icons: self.icons.unwrap_or_else(Catalog::default_icons),
            image_max_width: self.image_max_width.filter(|w| *w > 0),
            image_quality,
            resize_hint: SmolStr::new_static(RESIZE_HINT),
        })
    }
}

/// Resolved editor configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    pub colors: Catalog,
    pub icons: Catalog,
    pub image_max_width: Option<u32>,
    pub image_quality: ImageQuality,
    /// Title set on embedded images.
    pub resize_hint: SmolStr,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            colors: Catalog::default_colors(),
            icons: Catalog::default_icons(),
            image_max_width: None,
            image_quality: ImageQuality::default(),
            resize_hint: SmolStr::new_static(RESIZE_HINT),
        }
    }
}
