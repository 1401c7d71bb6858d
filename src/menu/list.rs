use crate::error::{LapsecamError, Result};

/// An ordered set of (label, value) pairs with one current selection.
///
/// Lists are append-only while the menu system is assembled at startup and
/// immutable in shape afterwards; only the selection index moves. An empty
/// list yields `None` from every accessor instead of failing.
pub struct SelectableList<T> {
    name: String,
    items: Vec<(String, T)>,
    selected: usize,
}

impl<T> SelectableList<T> {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
            selected: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn selected_index(&self) -> usize {
        self.clamped()
    }

    /// Append an item and return its index. The first item, or any item
    /// appended with `is_default`, becomes the selection.
    pub fn append<S: Into<String>>(&mut self, label: S, value: T, is_default: bool) -> usize {
        self.items.push((label.into(), value));
        let index = self.items.len() - 1;
        if is_default || index == 0 {
            self.selected = index;
        }
        index
    }

    /// Set the selection index. Out-of-range indices are rejected and leave
    /// the selection unchanged.
    pub fn set_selection(&mut self, index: usize) -> Result<usize> {
        if index < self.items.len() {
            self.selected = index;
            Ok(index)
        } else {
            Err(LapsecamError::Selection {
                index,
                len: self.items.len(),
            })
        }
    }

    /// The value of the current selection, or `None` for an empty list.
    pub fn current_value(&self) -> Option<&T> {
        self.items.get(self.clamped()).map(|(_, v)| v)
    }

    /// The (label, value) of the current selection, or `None` for an empty list.
    pub fn current(&self) -> Option<(&str, &T)> {
        self.items
            .get(self.clamped())
            .map(|(l, v)| (l.as_str(), v))
    }

    /// Advance the selection by one, wrapping past the end, and return the
    /// new (label, value). An empty list returns `None` without mutating.
    pub fn advance_selection(&mut self) -> Option<(&str, &T)> {
        if self.items.is_empty() {
            return None;
        }
        self.selected = (self.clamped() + 1) % self.items.len();
        self.current()
    }

    /// The (label, value) at `index` modulo the list length, without moving
    /// the selection.
    pub fn at(&self, index: usize) -> Option<(&str, &T)> {
        if self.items.is_empty() {
            return None;
        }
        self.items
            .get(index % self.items.len())
            .map(|(l, v)| (l.as_str(), v))
    }

    // Selection index, clamped back to 0 should it ever be invalid.
    fn clamped(&self) -> usize {
        if self.selected < self.items.len() {
            self.selected
        } else {
            0
        }
    }
}

/// Type-erased view of a list, used by the navigator to cycle and render
/// lists of different value types.
pub trait MenuEntry {
    fn name(&self) -> &str;
    fn current_label(&self) -> &str;
    fn advance(&mut self) -> &str;
}

impl<T> MenuEntry for SelectableList<T> {
    fn name(&self) -> &str {
        self.name.as_str()
    }

    fn current_label(&self) -> &str {
        self.current().map(|(l, _)| l).unwrap_or("")
    }

    fn advance(&mut self) -> &str {
        let _ = self.advance_selection();
        self.current_label()
    }
}
