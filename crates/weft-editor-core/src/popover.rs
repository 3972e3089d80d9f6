//! Popover placement and session bookkeeping.
//!
//! A popover is a panel anchored below a toolbar control plus a transparent
//! overlay that catches outside clicks. At most one is open per editor: the
//! `PopoverSlot` is owned by the editor instance (not global), and opening a
//! new session hands the previous one back for teardown.

/// Viewport rectangle of an anchor element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnchorRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl AnchorRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Where and how large to draw a popover panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopoverPlacement {
    pub left: f64,
    pub top: f64,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl PopoverPlacement {
    /// Place a panel flush below `anchor`, left edges aligned.
    pub fn below(anchor: &AnchorRect, width: Option<u32>, height: Option<u32>) -> Self {
        Self {
            left: anchor.left,
            top: anchor.bottom(),
            width,
            height,
        }
    }

    /// CSS declarations for the panel, as `(property, value)` pairs.
    pub fn css(&self) -> Vec<(&'static str, String)> {
        let mut decls = vec![
            ("left", format!("{}px", self.left)),
            ("top", format!("{}px", self.top)),
        ];
        if let Some(width) = self.width {
            decls.push(("width", format!("{width}px")));
        }
        if let Some(height) = self.height {
            decls.push(("height", format!("{height}px")));
        }
        decls
    }
}

/// Full-viewport transparent overlay styling.
pub const OVERLAY_CSS: [(&str, &str); 7] = [
    ("display", "block"),
    ("position", "fixed"),
    ("top", "0"),
    ("bottom", "0"),
    ("left", "0"),
    ("right", "0"),
    ("opacity", "1"),
];

/// Holds the currently open popover session, if any.
#[derive(Debug)]
pub struct PopoverSlot<S> {
    current: Option<S>,
    opened: u64,
}

impl<S> Default for PopoverSlot<S> {
    fn default() -> Self {
        Self {
            current: None,
            opened: 0,
        }
    }
}

impl<S> PopoverSlot<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `session` as the open one.
    ///
    /// Returns the session it displaced; the caller must tear it down.
    #[must_use = "a displaced session must be torn down"]
    pub fn open(&mut self, session: S) -> Option<S> {
        self.opened += 1;
        self.current.replace(session)
    }

    /// Take the open session out. `None` when nothing is open.
    pub fn dismiss(&mut self) -> Option<S> {
        self.current.take()
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&S> {
        self.current.as_ref()
    }

    /// Sessions opened over the slot's lifetime.
    pub fn opened_count(&self) -> u64 {
        self.opened
    }
}
