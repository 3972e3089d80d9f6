//! Mirror bindings between an editor field and another element.
//!
//! A mirror keeps a second element (a textarea holding the HTML source, or a
//! preview surface) in step with an editor field. The rules live here; the
//! platform layer owns the listeners and performs the copies.

use smol_str::SmolStr;

/// Whether edits flow back from the target to the editor field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MirrorDirection {
    #[default]
    OneWay,
    TwoWay,
}

impl MirrorDirection {
    pub fn from_flag(two_way: bool) -> Self {
        if two_way { Self::TwoWay } else { Self::OneWay }
    }
}

/// How content is read from and written to an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// Plain-text control, accessed through `value`.
    TextArea,
    /// Anything else, accessed through `innerHTML`.
    Rich,
}

impl ElementKind {
    /// Classify an element by its tag name.
    pub fn from_tag(tag: &str) -> Self {
        if tag.eq_ignore_ascii_case("textarea") {
            Self::TextArea
        } else {
            Self::Rich
        }
    }

    /// Event fired when the user changes this element's content.
    pub fn change_event(self) -> &'static str {
        match self {
            Self::TextArea => "keyup",
            Self::Rich => "input",
        }
    }
}

/// Something happened on one end of a mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorEvent {
    /// The editor field fired `input`.
    SourceChanged,
    /// The user typed into the target.
    TargetKeyup,
}

/// One step the platform must perform in response to a [`MirrorEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// Copy editor content into the target.
    SourceToTarget,
    /// Copy target content into the editor.
    TargetToSource,
    /// Dispatch a synthetic `input` event on the editor field.
    NotifySource,
}

/// A binding from an editor field (`source`) to another element (`target`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedMirror {
    pub source: SmolStr,
    pub target: SmolStr,
    pub target_kind: ElementKind,
    direction: MirrorDirection,
}

impl LinkedMirror {
    /// Create a binding. Two-way is only honored for textarea targets;
    /// other targets are bound one-way.
    pub fn new(
        source: impl Into<SmolStr>,
        target: impl Into<SmolStr>,
        target_kind: ElementKind,
        requested: MirrorDirection,
    ) -> Self {
        let source = source.into();
        let target = target.into();
        let direction = match (requested, target_kind) {
            (MirrorDirection::TwoWay, ElementKind::Rich) => {
                tracing::warn!(
                    target: "weft::mirror",
                    from = %source,
                    to = %target,
                    "two-way binding needs a textarea target; binding one-way"
                );
                MirrorDirection::OneWay
            }
            (direction, _) => direction,
        };
        Self {
            source,
            target,
            target_kind,
            direction,
        }
    }

    pub fn direction(&self) -> MirrorDirection {
        self.direction
    }

    pub fn is_two_way(&self) -> bool {
        self.direction == MirrorDirection::TwoWay
    }

    /// Steps to perform for `event`, in order.
    ///
    /// A target keyup copies into the editor and notifies it; the resulting
    /// `input` copies back once. Programmatic writes fire no keyup, so the
    /// exchange ends there.
    pub fn propagations(&self, event: MirrorEvent) -> Vec<Propagation> {
        match event {
            MirrorEvent::SourceChanged => vec![Propagation::SourceToTarget],
            MirrorEvent::TargetKeyup if self.is_two_way() => {
                vec![Propagation::TargetToSource, Propagation::NotifySource]
            }
            MirrorEvent::TargetKeyup => Vec::new(),
        }
    }
}
