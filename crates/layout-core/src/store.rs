//! Item Store
//!
//! The working set of items on the current hierarchy level, plus the
//! original snapshot it is diffed against and reverted to.
//!
//! The snapshot always mirrors the last-known server state: it is replaced
//! on load and only advanced by successful sync operations.

use crate::domain::{ItemId, ItemPatch, LayoutItem};
use crate::error::{LayoutError, LayoutResult};
use crate::geometry::Rect;

/// A server operation that succeeded and must be folded into the snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncedChange {
    /// Item as sent, already carrying its server id
    Created(LayoutItem),
    /// Item as sent in the update request
    Updated(LayoutItem),
    Deleted(u64),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemStore {
    items: Vec<LayoutItem>,
    original: Vec<LayoutItem>,
    next_temp: u32,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the working set and the snapshot with server data
    pub fn load(&mut self, items: Vec<LayoutItem>) {
        let items: Vec<LayoutItem> = items.into_iter().map(LayoutItem::normalized).collect();
        self.original = items.clone();
        self.items = items;
    }

    /// Re-take the snapshot from the working set
    pub fn snapshot(&mut self) {
        self.original = self.items.clone();
    }

    /// Restore the snapshot, dropping every unsaved item
    pub fn revert_to_snapshot(&mut self) {
        self.items = self.original.clone();
    }

    pub fn items(&self) -> &[LayoutItem] {
        &self.items
    }

    pub fn original(&self) -> &[LayoutItem] {
        &self.original
    }

    pub fn get(&self, id: ItemId) -> Option<&LayoutItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Issue a temporary id that is never reused in this store
    pub fn next_temp_id(&mut self) -> u32 {
        self.next_temp += 1;
        self.next_temp
    }

    pub fn add(&mut self, item: LayoutItem) -> LayoutResult<()> {
        if self.contains(item.id) {
            return Err(LayoutError::DuplicateItem(item.id));
        }
        self.items.push(item);
        Ok(())
    }

    /// Apply a patch; Ok(false) when it changed nothing
    pub fn update(&mut self, id: ItemId, patch: &ItemPatch) -> LayoutResult<bool> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(LayoutError::ItemNotFound(id))?;
        Ok(item.apply(patch))
    }

    pub fn remove(&mut self, id: ItemId) -> LayoutResult<LayoutItem> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(LayoutError::ItemNotFound(id))?;
        Ok(self.items.remove(index))
    }

    /// Remove every item from the working set; the snapshot is kept
    pub fn clear(&mut self) -> usize {
        let count = self.items.len();
        self.items.clear();
        count
    }

    /// Occupancy of all items, optionally skipping one
    pub fn occupied(&self, except: Option<ItemId>) -> Vec<Rect> {
        self.items
            .iter()
            .filter(|item| Some(item.id) != except)
            .map(LayoutItem::rect)
            .collect()
    }

    /// Swap a working-set id in place
    pub fn replace_id(&mut self, old: ItemId, new: ItemId) -> LayoutResult<()> {
        if self.contains(new) {
            return Err(LayoutError::DuplicateItem(new));
        }
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == old)
            .ok_or(LayoutError::ItemNotFound(old))?;
        item.id = new;
        Ok(())
    }

    /// Whether a server id is already known to the working set or snapshot
    pub fn knows_server_id(&self, id: u64) -> bool {
        let id = ItemId::Persisted(id);
        self.contains(id) || self.original.iter().any(|item| item.id == id)
    }

    /// Fold a successful server operation into the snapshot
    pub fn mark_synced(&mut self, change: SyncedChange) {
        match change {
            SyncedChange::Created(item) => {
                self.original.retain(|o| o.id != item.id);
                self.original.push(item);
            }
            SyncedChange::Updated(item) => {
                match self.original.iter_mut().find(|o| o.id == item.id) {
                    Some(existing) => *existing = item,
                    None => self.original.push(item),
                }
            }
            SyncedChange::Deleted(id) => {
                self.original.retain(|o| o.id != ItemId::Persisted(id));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ItemType, ParentRef};
    use crate::geometry::Cell;

    fn persisted(id: u64, x: u32) -> LayoutItem {
        LayoutItem {
            id: ItemId::Persisted(id),
            name: format!("Room {}", id),
            item_type: ItemType::Room,
            parent_id: Some(1),
            position_x: x,
            position_y: 0,
            width: 2,
            height: 2,
            status: None,
        }
    }

    fn loaded() -> ItemStore {
        let mut store = ItemStore::new();
        store.load(vec![persisted(10, 0), persisted(11, 2)]);
        store
    }

    #[test]
    fn test_load_takes_independent_snapshot() {
        let mut store = loaded();
        store.update(ItemId::Persisted(10), &ItemPatch::move_to(Cell::new(6, 6))).unwrap();
        assert_eq!(store.original()[0].position_x, 0);
        assert_eq!(store.get(ItemId::Persisted(10)).unwrap().position_x, 6);
    }

    #[test]
    fn test_revert_discards_everything_since_load() {
        let mut store = loaded();
        let before = store.original().to_vec();
        let temp = store.next_temp_id();
        store
            .add(LayoutItem::new_temporary(
                temp,
                ItemType::Room,
                ParentRef::Item(1),
                Cell::new(4, 0),
            ))
            .unwrap();
        store.update(ItemId::Persisted(11), &ItemPatch::rename("Lab")).unwrap();
        store.remove(ItemId::Persisted(10)).unwrap();

        store.revert_to_snapshot();
        assert_eq!(store.items(), before.as_slice());
    }

    #[test]
    fn test_temp_ids_are_not_reused_after_revert() {
        let mut store = loaded();
        let first = store.next_temp_id();
        store.revert_to_snapshot();
        assert!(store.next_temp_id() > first);
    }

    #[test]
    fn test_add_rejects_duplicate() {
        let mut store = loaded();
        let err = store.add(persisted(10, 4)).unwrap_err();
        assert_eq!(err, LayoutError::DuplicateItem(ItemId::Persisted(10)));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_update_and_remove_missing() {
        let mut store = loaded();
        assert!(store.update(ItemId::Temporary(1), &ItemPatch::rename("x")).is_err());
        assert!(store.remove(ItemId::Persisted(99)).is_err());
    }

    #[test]
    fn test_occupied_excludes_one() {
        let store = loaded();
        assert_eq!(store.occupied(None).len(), 2);
        assert_eq!(store.occupied(Some(ItemId::Persisted(10))), vec![Rect::new(2, 0, 2, 2)]);
    }

    #[test]
    fn test_replace_id() {
        let mut store = loaded();
        let temp = ItemId::Temporary(store.next_temp_id());
        store
            .add(LayoutItem::new_temporary(1, ItemType::Room, ParentRef::Item(1), Cell::new(4, 0)))
            .unwrap();
        store.replace_id(temp, ItemId::Persisted(12)).unwrap();
        assert!(store.contains(ItemId::Persisted(12)));
        assert!(!store.contains(temp));
        assert!(store.replace_id(ItemId::Persisted(12), ItemId::Persisted(11)).is_err());
    }

    #[test]
    fn test_mark_synced_advances_snapshot_only() {
        let mut store = loaded();
        store.remove(ItemId::Persisted(10)).unwrap();
        store.mark_synced(SyncedChange::Deleted(10));
        assert_eq!(store.original().len(), 1);
        assert!(!store.knows_server_id(10));

        let mut renamed = persisted(11, 2);
        renamed.name = "Server Room".into();
        store.mark_synced(SyncedChange::Updated(renamed));
        assert_eq!(store.original()[0].name, "Server Room");
        assert_eq!(store.items()[0].name, "Room 11");
    }
}
