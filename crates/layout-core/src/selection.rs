//! Selection Controller
//!
//! At most one item is selected; the selection gates remove and rename.

use crate::domain::ItemId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<ItemId>,
}

impl Selection {
    pub fn selected(&self) -> Option<ItemId> {
        self.selected
    }

    pub fn is_selected(&self, id: ItemId) -> bool {
        self.selected == Some(id)
    }

    /// Select an item, returning the one it replaced
    pub fn select(&mut self, id: ItemId) -> Option<ItemId> {
        self.selected.replace(id).filter(|previous| *previous != id)
    }

    /// Clear the selection, returning what was selected
    pub fn clear(&mut self) -> Option<ItemId> {
        self.selected.take()
    }

    /// Drop the selection if it points at `id`
    pub fn forget(&mut self, id: ItemId) {
        if self.selected == Some(id) {
            self.selected = None;
        }
    }

    pub fn remap(&mut self, old: ItemId, new: ItemId) {
        if self.selected == Some(old) {
            self.selected = Some(new);
        }
    }

    pub fn can_remove(&self) -> bool {
        self.selected.is_some()
    }

    pub fn can_edit_properties(&self) -> bool {
        self.selected.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_selection() {
        let mut selection = Selection::default();
        assert!(!selection.can_remove());
        assert_eq!(selection.select(ItemId::Persisted(1)), None);
        assert_eq!(selection.select(ItemId::Persisted(2)), Some(ItemId::Persisted(1)));
        assert!(selection.is_selected(ItemId::Persisted(2)));
        assert!(!selection.is_selected(ItemId::Persisted(1)));
        assert_eq!(selection.select(ItemId::Persisted(2)), None);
        assert!(selection.can_edit_properties());
    }

    #[test]
    fn test_forget_and_remap() {
        let mut selection = Selection::default();
        selection.select(ItemId::Temporary(1));
        selection.forget(ItemId::Persisted(9));
        assert!(selection.can_remove());
        selection.remap(ItemId::Temporary(1), ItemId::Persisted(9));
        assert_eq!(selection.selected(), Some(ItemId::Persisted(9)));
        selection.forget(ItemId::Persisted(9));
        assert_eq!(selection.clear(), None);
    }
}
