//! Formatting commands and key handling.
//!
//! Platform-agnostic definitions for the operations a toolbar or key press can
//! request. A `FormattingCommand` names a mutation of the current selection;
//! how it is carried out is up to a [`FormattingBackend`](crate::FormattingBackend).

use smol_str::SmolStr;

/// Highest level accepted by the font-size command.
pub const MAX_FONT_SIZE: u8 = 7;

/// Highest heading level.
pub const MAX_HEADING_LEVEL: u8 = 6;

/// Block-level element used by the `formatBlock` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockTag {
    /// Plain paragraph ("normal text").
    Paragraph,
    /// Heading `H1`..`H6`.
    Heading(u8),
}

impl BlockTag {
    /// Heading block for `level`, or `None` outside `1..=6`.
    pub fn heading(level: u8) -> Option<Self> {
        (1..=MAX_HEADING_LEVEL)
            .contains(&level)
            .then_some(Self::Heading(level))
    }

    /// Tag name handed to the platform.
    pub fn tag_name(&self) -> SmolStr {
        match self {
            Self::Paragraph => SmolStr::new_static("p"),
            Self::Heading(level) => smol_str::format_smolstr!("H{level}"),
        }
    }

    /// Parse a tag name such as `p`, `h2` or `<H3>`.
    pub fn parse(tag: &str) -> Option<Self> {
        let tag = tag.trim().trim_start_matches('<').trim_end_matches('>');
        if tag.eq_ignore_ascii_case("p") {
            return Some(Self::Paragraph);
        }
        let level = tag.strip_prefix(['h', 'H'])?.parse::<u8>().ok()?;
        Self::heading(level)
    }
}

/// All formatting operations the editor can request.
///
/// These map one-to-one onto the host platform's native rich-text commands.
/// Commands that carry a value (colors, sizes, URLs, literal text) hold it
/// directly so a command can be executed without further context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormattingCommand {
    // === Inline style ===
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Subscript,
    Superscript,
    /// Foreground color. Accepts any CSS color; palette entries are passed
    /// without the leading `#`.
    ForeColor(SmolStr),
    /// Background (highlight) color.
    HiliteColor(SmolStr),
    /// Legacy font size, `1..=7`.
    FontSize(u8),
    /// Strip inline formatting from the selection.
    RemoveFormat,

    // === Block structure ===
    FormatBlock(BlockTag),
    InsertUnorderedList,
    InsertOrderedList,
    JustifyLeft,
    JustifyCenter,
    JustifyRight,
    Indent,
    Outdent,

    // === History ===
    Undo,
    Redo,

    // === Links ===
    CreateLink(String),
    Unlink,

    // === Literal insertion ===
    InsertText(String),
    InsertHtml(String),
}

impl FormattingCommand {
    /// Font-size command for `level`, or `None` outside `1..=7`.
    pub fn font_size(level: u8) -> Option<Self> {
        (1..=MAX_FONT_SIZE)
            .contains(&level)
            .then_some(Self::FontSize(level))
    }

    /// Native command identifier (the `execCommand` vocabulary).
    pub fn native_name(&self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Underline => "underline",
            Self::Strikethrough => "strikeThrough",
            Self::Subscript => "subscript",
            Self::Superscript => "superscript",
            Self::ForeColor(_) => "foreColor",
            Self::HiliteColor(_) => "hiliteColor",
            Self::FontSize(_) => "fontSize",
            Self::RemoveFormat => "removeFormat",
            Self::FormatBlock(_) => "formatBlock",
            Self::InsertUnorderedList => "insertUnorderedList",
            Self::InsertOrderedList => "insertOrderedList",
            Self::JustifyLeft => "justifyLeft",
            Self::JustifyCenter => "justifyCenter",
            Self::JustifyRight => "justifyRight",
            Self::Indent => "indent",
            Self::Outdent => "outdent",
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::CreateLink(_) => "createLink",
            Self::Unlink => "unlink",
            Self::InsertText(_) => "insertText",
            Self::InsertHtml(_) => "insertHTML",
        }
    }

    /// Value argument for the native command, if it takes one.
    pub fn value(&self) -> Option<SmolStr> {
        match self {
            Self::ForeColor(color) | Self::HiliteColor(color) => Some(color.clone()),
            Self::FontSize(level) => Some(smol_str::format_smolstr!("{level}")),
            Self::FormatBlock(tag) => Some(tag.tag_name()),
            Self::CreateLink(url) => Some(SmolStr::new(url)),
            Self::InsertText(text) | Self::InsertHtml(text) => Some(SmolStr::new(text)),
            _ => None,
        }
    }

    /// Build a command from its native name and optional value.
    ///
    /// Names are matched case-insensitively. Commands that require a value
    /// return `None` when it is missing or malformed.
    pub fn from_name(name: &str, value: Option<&str>) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        let cmd = match name.as_str() {
            "bold" => Self::Bold,
            "italic" => Self::Italic,
            "underline" => Self::Underline,
            "strikethrough" => Self::Strikethrough,
            "subscript" => Self::Subscript,
            "superscript" => Self::Superscript,
            "forecolor" => Self::ForeColor(SmolStr::new(value?)),
            "hilitecolor" | "backcolor" => Self::HiliteColor(SmolStr::new(value?)),
            "fontsize" => Self::font_size(value?.trim().parse().ok()?)?,
            "removeformat" => Self::RemoveFormat,
            "formatblock" => Self::FormatBlock(BlockTag::parse(value?)?),
            "insertunorderedlist" => Self::InsertUnorderedList,
            "insertorderedlist" => Self::InsertOrderedList,
            "justifyleft" => Self::JustifyLeft,
            "justifycenter" => Self::JustifyCenter,
            "justifyright" => Self::JustifyRight,
            "indent" => Self::Indent,
            "outdent" => Self::Outdent,
            "undo" => Self::Undo,
            "redo" => Self::Redo,
            "createlink" => Self::CreateLink(value?.to_string()),
            "unlink" => Self::Unlink,
            "inserttext" => Self::InsertText(value?.to_string()),
            "inserthtml" => Self::InsertHtml(value?.to_string()),
            _ => return None,
        };
        Some(cmd)
    }

    /// Whether this command inserts content rather than restyling it.
    pub fn is_insertion(&self) -> bool {
        matches!(self, Self::InsertText(_) | Self::InsertHtml(_))
    }
}

/// Modifier key state for a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };

    pub const SHIFT: Self = Self {
        ctrl: false,
        alt: false,
        shift: true,
        meta: false,
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        alt: false,
        shift: false,
        meta: false,
    };
}

/// Result of handling a keydown event.
#[derive(Debug, Clone, PartialEq)]
pub enum KeydownResult {
    /// Prevent default and execute the command instead.
    Handled(FormattingCommand),
    /// Let the platform handle the key.
    PassThrough,
}

/// Decide what a keydown inside an editable region should do.
///
/// Tab (with or without Shift) inserts a literal tab character instead of
/// moving focus out of the editor. Chords involving Ctrl, Alt or Meta are left
/// to the platform.
pub fn handle_keydown(key: &str, modifiers: Modifiers) -> KeydownResult {
    if modifiers.ctrl || modifiers.alt || modifiers.meta {
        return KeydownResult::PassThrough;
    }
    match key {
        "Tab" => KeydownResult::Handled(FormattingCommand::InsertText("\t".to_string())),
        _ => KeydownResult::PassThrough,
    }
}
