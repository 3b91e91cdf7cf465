//! Checkbox selection over table rows.

use std::collections::BTreeSet;

/// Set of selected row ids.
///
/// "Select all" always applies to the rows currently shown, which the
/// caller passes in; rows hidden by a filter or on another page keep their
/// state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<String>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one row. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn set(&mut self, id: &str, selected: bool) {
        if selected {
            self.ids.insert(id.to_string());
        } else {
            self.ids.remove(id);
        }
    }

    /// Select or clear every row in `visible`.
    pub fn set_all<'a>(&mut self, visible: impl IntoIterator<Item = &'a str>, selected: bool) {
        for id in visible {
            self.set(id, selected);
        }
    }

    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Whether every row in `visible` is selected. An empty view is never
    /// fully selected.
    #[must_use]
    pub fn all_selected<'a>(&self, visible: impl IntoIterator<Item = &'a str>) -> bool {
        let mut any = false;
        for id in visible {
            if !self.is_selected(id) {
                return false;
            }
            any = true;
        }
        any
    }

    /// Whether any row in `visible` is selected.
    #[must_use]
    pub fn any_selected<'a>(&self, visible: impl IntoIterator<Item = &'a str>) -> bool {
        visible.into_iter().any(|id| self.is_selected(id))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Forget ids of rows that no longer exist.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.ids.retain(|id| keep(id));
    }
}
