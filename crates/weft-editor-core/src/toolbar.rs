//! Toolbar class-name contract.
//!
//! The host page marks toolbar controls with fixed class names. Each class
//! maps to either a direct command, a picker, the link prompt, or the image
//! upload handler.

use crate::actions::FormattingCommand;
use crate::picker::PickerKind;

/// Every control the editor knows how to wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolbarControl {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Color,
    HighlightColor,
    FontSize,
    HeadingSize,
    Link,
    Icon,
    HorizontalRule,
    UnorderedList,
    OrderedList,
    AlignLeft,
    AlignCenter,
    AlignRight,
    Subscript,
    Superscript,
    Indent,
    Outdent,
    Undo,
    Redo,
    Image,
}

/// What activating a control does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolbarAction {
    Command(FormattingCommand),
    Picker(PickerKind),
    Link,
    ImageUpload,
}

impl ToolbarControl {
    pub const ALL: [Self; 23] = [
        Self::Bold,
        Self::Italic,
        Self::Underline,
        Self::Strikethrough,
        Self::Color,
        Self::HighlightColor,
        Self::FontSize,
        Self::HeadingSize,
        Self::Link,
        Self::Icon,
        Self::HorizontalRule,
        Self::UnorderedList,
        Self::OrderedList,
        Self::AlignLeft,
        Self::AlignCenter,
        Self::AlignRight,
        Self::Subscript,
        Self::Superscript,
        Self::Indent,
        Self::Outdent,
        Self::Undo,
        Self::Redo,
        Self::Image,
    ];

    pub fn class_name(self) -> &'static str {
        match self {
            Self::Bold => "editor-btn-bold",
            Self::Italic => "editor-btn-italic",
            Self::Underline => "editor-btn-underline",
            Self::Strikethrough => "editor-btn-strikethrough",
            Self::Color => "editor-btn-color",
            Self::HighlightColor => "editor-btn-highlitecolor",
            Self::FontSize => "editor-btn-fontsize",
            Self::HeadingSize => "editor-btn-headersize",
            Self::Link => "editor-btn-link",
            Self::Icon => "editor-btn-icon",
            Self::HorizontalRule => "editor-btn-hr",
            Self::UnorderedList => "editor-btn-unorderedlist",
            Self::OrderedList => "editor-btn-orderedlist",
            Self::AlignLeft => "editor-btn-alignleft",
            Self::AlignCenter => "editor-btn-aligncenter",
            Self::AlignRight => "editor-btn-alignright",
            Self::Subscript => "editor-btn-subscript",
            Self::Superscript => "editor-btn-superscript",
            Self::Indent => "editor-btn-indent",
            Self::Outdent => "editor-btn-outdent",
            Self::Undo => "editor-btn-undo",
            Self::Redo => "editor-btn-redo",
            Self::Image => "editor-btn-img",
        }
    }

    /// CSS selector matching every instance of this control.
    pub fn selector(self) -> String {
        format!(".{}", self.class_name())
    }

    pub fn from_class_name(class: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.class_name() == class)
    }

    /// DOM event that activates the control. File inputs report `change`.
    pub fn trigger_event(self) -> &'static str {
        match self {
            Self::Image => "change",
            _ => "click",
        }
    }

    pub fn action(self) -> ToolbarAction {
        use FormattingCommand as Cmd;
        match self {
            Self::Bold => ToolbarAction::Command(Cmd::Bold),
            Self::Italic => ToolbarAction::Command(Cmd::Italic),
            Self::Underline => ToolbarAction::Command(Cmd::Underline),
            Self::Strikethrough => ToolbarAction::Command(Cmd::Strikethrough),
            Self::Color => ToolbarAction::Picker(PickerKind::ForeColor),
            Self::HighlightColor => ToolbarAction::Picker(PickerKind::Highlight),
            Self::FontSize => ToolbarAction::Picker(PickerKind::FontSize),
            Self::HeadingSize => ToolbarAction::Picker(PickerKind::Heading),
            Self::Link => ToolbarAction::Link,
            Self::Icon => ToolbarAction::Picker(PickerKind::Icon),
            Self::HorizontalRule => ToolbarAction::Command(Cmd::InsertHtml("<hr>".to_string())),
            Self::UnorderedList => ToolbarAction::Command(Cmd::InsertUnorderedList),
            Self::OrderedList => ToolbarAction::Command(Cmd::InsertOrderedList),
            Self::AlignLeft => ToolbarAction::Command(Cmd::JustifyLeft),
            Self::AlignCenter => ToolbarAction::Command(Cmd::JustifyCenter),
            Self::AlignRight => ToolbarAction::Command(Cmd::JustifyRight),
            Self::Subscript => ToolbarAction::Command(Cmd::Subscript),
            Self::Superscript => ToolbarAction::Command(Cmd::Superscript),
            Self::Indent => ToolbarAction::Command(Cmd::Indent),
            Self::Outdent => ToolbarAction::Command(Cmd::Outdent),
            Self::Undo => ToolbarAction::Command(Cmd::Undo),
            Self::Redo => ToolbarAction::Command(Cmd::Redo),
            Self::Image => ToolbarAction::ImageUpload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_class_names_unique() {
        let names: HashSet<_> = ToolbarControl::ALL.iter().map(|c| c.class_name()).collect();
        assert_eq!(names.len(), ToolbarControl::ALL.len());
    }

    #[test]
    fn test_class_name_lookup() {
        for control in ToolbarControl::ALL {
            assert_eq!(ToolbarControl::from_class_name(control.class_name()), Some(control));
        }
        assert_eq!(ToolbarControl::from_class_name("editor-btn-nope"), None);
    }

    #[test]
    fn test_only_image_listens_for_change() {
        let change: Vec<_> = ToolbarControl::ALL
            .into_iter()
            .filter(|c| c.trigger_event() == "change")
            .collect();
        assert_eq!(change, vec![ToolbarControl::Image]);
        assert_eq!(ToolbarControl::Image.action(), ToolbarAction::ImageUpload);
    }

    #[test]
    fn test_picker_controls() {
        let pickers: Vec<_> = ToolbarControl::ALL
            .into_iter()
            .filter_map(|c| match c.action() {
                ToolbarAction::Picker(kind) => Some(kind),
                _ => None,
            })
            .collect();
        assert_eq!(
            pickers,
            vec![
                PickerKind::ForeColor,
                PickerKind::Highlight,
                PickerKind::FontSize,
                PickerKind::Heading,
                PickerKind::Icon,
            ]
        );
    }

    #[test]
    fn test_selector_snapshot() {
        insta::assert_snapshot!(ToolbarControl::HighlightColor.selector(), @".editor-btn-highlitecolor");
    }
}
