//! Editor fields and selection context.
//!
//! These types are platform-agnostic. The browser layer captures a
//! `SelectionSnapshot` from the live selection and asks [`active_field`]
//! which registered field, if any, the user is working in.

use smol_str::SmolStr;

use crate::error::EditorError;

/// A registered editable region, identified by its element id.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldHandle {
    /// Registration order.
    pub index: usize,
    pub id: SmolStr,
}

/// The ordered set of fields an editor manages. Ids are unique.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldSet {
    fields: Vec<FieldHandle>,
}

impl FieldSet {
    /// Register `ids` in order. Fails on the first repeated id.
    pub fn new<I, S>(ids: I) -> Result<Self, EditorError>
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        let mut fields: Vec<FieldHandle> = Vec::new();
        for id in ids {
            let id = id.into();
            if fields.iter().any(|f| f.id == id) {
                return Err(EditorError::DuplicateField(id));
            }
            fields.push(FieldHandle {
                index: fields.len(),
                id,
            });
        }
        Ok(Self { fields })
    }

    pub fn get(&self, id: &str) -> Option<&FieldHandle> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldHandle> {
        self.fields.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Lifecycle of a field. `Editing` once the field has been made editable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FieldState {
    #[default]
    Idle,
    Editing,
}

/// One element on the path from the selection up to the document root.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AncestorInfo {
    /// Lowercase tag name.
    pub tag: SmolStr,
    pub id: Option<SmolStr>,
    /// Whether the element has `contenteditable` set to a truthy value.
    pub editable: bool,
    /// `href` for anchor elements.
    pub href: Option<String>,
}

impl AncestorInfo {
    pub fn element(tag: &str) -> Self {
        Self {
            tag: SmolStr::new(tag.to_ascii_lowercase()),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(SmolStr::new(id));
        self
    }

    pub fn editable(mut self) -> Self {
        self.editable = true;
        self
    }

    pub fn with_href(mut self, href: &str) -> Self {
        self.href = Some(href.to_string());
        self
    }
}

/// Ancestry of the current selection anchor, innermost element first.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SelectionSnapshot {
    pub ancestors: Vec<AncestorInfo>,
}

impl SelectionSnapshot {
    pub fn new(ancestors: Vec<AncestorInfo>) -> Self {
        Self { ancestors }
    }

    /// The outermost contiguous editable ancestor, i.e. the editing host.
    pub fn editable_root(&self) -> Option<&AncestorInfo> {
        self.ancestors
            .iter()
            .take_while(|a| a.editable)
            .last()
    }

    /// `href` of the nearest enclosing link inside the editing host.
    pub fn current_link(&self) -> Option<&str> {
        self.ancestors
            .iter()
            .take_while(|a| a.editable)
            .find(|a| a.tag == "a")
            .and_then(|a| a.href.as_deref())
    }
}

/// The registered field that contains the selection, if any.
///
/// Selections outside every editing host, or inside an editing host that is
/// not one of `fields`, resolve to `None`.
pub fn active_field(
    selection: Option<&SelectionSnapshot>,
    fields: &FieldSet,
) -> Option<FieldHandle> {
    let root = selection?.editable_root()?;
    let id = root.id.as_deref()?;
    fields.get(id).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> FieldSet {
        FieldSet::new(["title", "body"]).unwrap()
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = FieldSet::new(["a", "b", "a"]).unwrap_err();
        assert!(matches!(err, EditorError::DuplicateField(id) if id == "a"));
    }

    #[test]
    fn test_registration_order() {
        let set = fields();
        assert_eq!(set.ids().collect::<Vec<_>>(), vec!["title", "body"]);
        assert_eq!(set.get("body").map(|f| f.index), Some(1));
        assert!(!set.contains("footer"));
    }

    #[test]
    fn test_active_field_from_nested_selection() {
        let snapshot = SelectionSnapshot::new(vec![
            AncestorInfo::element("b").editable(),
            AncestorInfo::element("p").editable(),
            AncestorInfo::element("div").with_id("body").editable(),
            AncestorInfo::element("section"),
            AncestorInfo::element("body"),
        ]);
        let active = active_field(Some(&snapshot), &fields()).unwrap();
        assert_eq!(active.id, "body");
        assert_eq!(active.index, 1);
    }

    #[test]
    fn test_no_active_field() {
        assert_eq!(active_field(None, &fields()), None);

        let outside = SelectionSnapshot::new(vec![
            AncestorInfo::element("p"),
            AncestorInfo::element("body"),
        ]);
        assert_eq!(active_field(Some(&outside), &fields()), None);

        let unregistered = SelectionSnapshot::new(vec![
            AncestorInfo::element("div").with_id("notes").editable(),
        ]);
        assert_eq!(active_field(Some(&unregistered), &fields()), None);
    }

    #[test]
    fn test_current_link_stops_at_editing_host() {
        let inside = SelectionSnapshot::new(vec![
            AncestorInfo::element("span").editable(),
            AncestorInfo::element("a").with_href("https://a.test").editable(),
            AncestorInfo::element("div").with_id("body").editable(),
        ]);
        assert_eq!(inside.current_link(), Some("https://a.test"));

        let outside = SelectionSnapshot::new(vec![
            AncestorInfo::element("div").with_id("body").editable(),
            AncestorInfo::element("a").with_href("https://page.test"),
        ]);
        assert_eq!(outside.current_link(), None);
    }
}
