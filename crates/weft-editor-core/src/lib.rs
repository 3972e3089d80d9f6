//! weft-editor-core: platform-independent logic for the weft rich-text editor.
//!
//! This crate provides:
//! - `FormattingCommand` and the `FormattingBackend` trait
//! - The toolbar class-name contract
//! - Picker catalogs and option resolution
//! - Popover placement and the single-session slot
//! - Active-field resolution from a selection snapshot
//! - Link classification, mirror binding rules, image pipeline math

pub mod actions;
pub mod catalog;
pub mod config;
pub mod embed;
pub mod error;
pub mod execute;
pub mod link;
pub mod mirror;
pub mod picker;
pub mod platform;
pub mod popover;
pub mod toolbar;
pub mod types;

pub use actions::{
    BlockTag, FormattingCommand, KeydownResult, MAX_FONT_SIZE, MAX_HEADING_LEVEL, Modifiers,
    handle_keydown,
};
pub use catalog::{Catalog, DEFAULT_COLORS, DEFAULT_ICONS};
pub use config::{EditorConfig, EditorOptions};
pub use embed::{
    DEFAULT_IMAGE_QUALITY, DataUri, ImageEmbed, ImageQuality, RESIZE_HINT, constrain_dimensions,
    display_percentage, parse_percentage, reencode,
};
pub use error::EditorError;
pub use execute::{apply_keydown, apply_link_input, apply_picker_option};
pub use link::{LinkIntent, classify_link_input, is_email, is_phone_number};
pub use mirror::{ElementKind, LinkedMirror, MirrorDirection, MirrorEvent, Propagation};
pub use picker::{FieldStyle, PickerKind, PickerLayout, PickerOption, PickerPanel};
pub use platform::FormattingBackend;
pub use popover::{AnchorRect, OVERLAY_CSS, PopoverPlacement, PopoverSlot};
pub use smol_str::SmolStr;
pub use toolbar::{ToolbarAction, ToolbarControl};
pub use types::{
    AncestorInfo, FieldHandle, FieldSet, FieldState, SelectionSnapshot, active_field,
};

pub type Result<T, E = EditorError> = std::result::Result<T, E>;
