//! Picker panels: which options each picker offers and what they do.
//!
//! Rendering is left to the platform layer. This module decides the option
//! layout and turns an activated option into formatting commands.

use smol_str::SmolStr;

use crate::actions::{BlockTag, FormattingCommand, MAX_FONT_SIZE, MAX_HEADING_LEVEL};
use crate::catalog::Catalog;

/// The four popover pickers. Color and highlight share a panel shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickerKind {
    ForeColor,
    Highlight,
    Icon,
    FontSize,
    Heading,
}

/// How the options of a panel are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerLayout {
    /// Rows of small swatches or glyphs.
    Grid,
    /// One option per line.
    Ladder,
}

/// One selectable value in a picker panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerOption {
    Color(SmolStr),
    Icon(SmolStr),
    FontSize(u8),
    Heading(u8),
    /// Clears block formatting back to a paragraph.
    NormalText,
    /// Restores the active field's own color. Resolved at activation time.
    ResetColor,
}

/// Computed colors of the active editor field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldStyle {
    pub color: SmolStr,
    pub background_color: SmolStr,
}

impl PickerOption {
    /// Label shown for options that render as text.
    pub fn label(&self) -> &str {
        match self {
            Self::Color(code) => code.as_str(),
            Self::Icon(glyph) => glyph.as_str(),
            Self::FontSize(_) => "Textsize",
            Self::Heading(_) => "Headersize",
            Self::NormalText => "Normal text",
            Self::ResetColor => "Reset",
        }
    }

    /// Whether activating this option needs the active field's style.
    pub fn needs_field_style(&self) -> bool {
        matches!(self, Self::ResetColor)
    }

    /// Commands to run when this option is activated in a `kind` picker.
    ///
    /// `style` is the active field's computed style at the moment of
    /// activation. A reset with no active field resolves to no commands.
    pub fn resolve(&self, kind: PickerKind, style: Option<&FieldStyle>) -> Vec<FormattingCommand> {
        match self {
            Self::Color(code) => {
                let code = SmolStr::new(code.trim_start_matches('#'));
                vec![color_command(kind, code)]
            }
            Self::ResetColor => match style {
                Some(style) => {
                    let value = match kind {
                        PickerKind::Highlight => style.background_color.clone(),
                        _ => style.color.clone(),
                    };
                    vec![color_command(kind, value)]
                }
                None => {
                    tracing::debug!(target: "weft::picker", "color reset without active field");
                    Vec::new()
                }
            },
            Self::Icon(glyph) => vec![FormattingCommand::InsertText(glyph.to_string())],
            Self::FontSize(level) => FormattingCommand::font_size(*level).into_iter().collect(),
            Self::Heading(level) => match BlockTag::heading(*level) {
                Some(tag) => vec![
                    FormattingCommand::RemoveFormat,
                    FormattingCommand::FormatBlock(tag),
                ],
                None => Vec::new(),
            },
            Self::NormalText => vec![
                FormattingCommand::RemoveFormat,
                FormattingCommand::FormatBlock(BlockTag::Paragraph),
            ],
        }
    }
}

fn color_command(kind: PickerKind, value: SmolStr) -> FormattingCommand {
    match kind {
        PickerKind::Highlight => FormattingCommand::HiliteColor(value),
        _ => FormattingCommand::ForeColor(value),
    }
}

/// The full option set of a picker, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerPanel {
    pub kind: PickerKind,
    pub layout: PickerLayout,
    pub rows: Vec<Vec<PickerOption>>,
    /// Extra option rendered after the rows (reset / normal text).
    pub trailer: Option<PickerOption>,
}

impl PickerPanel {
    /// Build the panel for `kind` from the configured catalogs.
    pub fn build(kind: PickerKind, colors: &Catalog, icons: &Catalog) -> Self {
        match kind {
            PickerKind::ForeColor | PickerKind::Highlight => Self {
                kind,
                layout: PickerLayout::Grid,
                rows: grid(colors, PickerOption::Color),
                trailer: Some(PickerOption::ResetColor),
            },
            PickerKind::Icon => Self {
                kind,
                layout: PickerLayout::Grid,
                rows: grid(icons, PickerOption::Icon),
                trailer: None,
            },
            PickerKind::FontSize => Self {
                kind,
                layout: PickerLayout::Ladder,
                rows: (1..=MAX_FONT_SIZE)
                    .map(|level| vec![PickerOption::FontSize(level)])
                    .collect(),
                trailer: None,
            },
            PickerKind::Heading => Self {
                kind,
                layout: PickerLayout::Ladder,
                rows: (1..=MAX_HEADING_LEVEL)
                    .map(|level| vec![PickerOption::Heading(level)])
                    .collect(),
                trailer: Some(PickerOption::NormalText),
            },
        }
    }

    /// Every option in render order, trailer last.
    pub fn options(&self) -> impl Iterator<Item = &PickerOption> {
        self.rows.iter().flatten().chain(self.trailer.as_ref())
    }
}

fn grid(catalog: &Catalog, make: fn(SmolStr) -> PickerOption) -> Vec<Vec<PickerOption>> {
    catalog
        .rows()
        .iter()
        .map(|row| row.iter().cloned().map(make).collect())
        .collect()
}
