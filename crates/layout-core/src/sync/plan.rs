//! Save Planning
//!
//! Partitions the working set against the snapshot into creates, updates
//! and deletes. The three sets are disjoint: creates carry temporary ids,
//! updates and deletes carry server ids, and an id is either present in the
//! working set or not.

use crate::domain::{ItemId, ItemPatch, LayoutItem, ParentRef};
use crate::error::{LayoutError, LayoutResult};
use crate::store::ItemStore;

/// One server call to make
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedOp {
    /// New item, still carrying its temporary id
    Create(LayoutItem),
    /// Persisted item with the fields that changed
    Update { id: u64, patch: ItemPatch, item: LayoutItem },
    /// Persisted item missing from the working set
    Delete { id: u64, name: String },
}

impl PlannedOp {
    pub fn describe(&self) -> String {
        match self {
            PlannedOp::Create(item) => format!("create '{}'", item.name),
            PlannedOp::Update { item, .. } => format!("update '{}'", item.name),
            PlannedOp::Delete { name, .. } => format!("delete '{}'", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavePlan {
    pub parent: ParentRef,
    pub ops: Vec<PlannedOp>,
    /// Full working set at planning time, for bulk saves
    pub items: Vec<LayoutItem>,
}

impl SavePlan {
    /// Diff the store; fails if any created or changed item has a blank name
    pub fn build(store: &ItemStore, parent: ParentRef) -> LayoutResult<Self> {
        let mut ops = Vec::new();

        for item in store.items() {
            match item.id {
                ItemId::Temporary(_) => {
                    ensure_named(item)?;
                    ops.push(PlannedOp::Create(item.clone()));
                }
                ItemId::Persisted(id) => {
                    let base = store.original().iter().find(|o| o.id == item.id);
                    let patch = match base {
                        Some(base) => item.diff(base),
                        // persisted but unknown to the snapshot: send everything mutable
                        None => ItemPatch {
                            name: Some(item.name.clone()),
                            position_x: Some(item.position_x),
                            position_y: Some(item.position_y),
                        },
                    };
                    if !patch.is_empty() {
                        ensure_named(item)?;
                        ops.push(PlannedOp::Update { id, patch, item: item.clone() });
                    }
                }
            }
        }

        for base in store.original() {
            if let ItemId::Persisted(id) = base.id {
                if !store.contains(base.id) {
                    ops.push(PlannedOp::Delete { id, name: base.name.clone() });
                }
            }
        }

        Ok(Self {
            parent,
            ops,
            items: store.items().to_vec(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn creates(&self) -> impl Iterator<Item = &LayoutItem> {
        self.ops.iter().filter_map(|op| match op {
            PlannedOp::Create(item) => Some(item),
            _ => None,
        })
    }

    pub fn update_count(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, PlannedOp::Update { .. })).count()
    }

    pub fn delete_count(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, PlannedOp::Delete { .. })).count()
    }
}

fn ensure_named(item: &LayoutItem) -> LayoutResult<()> {
    if item.name.trim().is_empty() {
        Err(LayoutError::EmptyName)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemType;
    use crate::geometry::Cell;

    fn building(id: u64, x: u32) -> LayoutItem {
        LayoutItem {
            id: ItemId::Persisted(id),
            name: format!("Building {}", id),
            item_type: ItemType::Building,
            parent_id: None,
            position_x: x,
            position_y: 0,
            width: 3,
            height: 2,
            status: None,
        }
    }

    #[test]
    fn test_clean_store_plans_nothing() {
        let mut store = ItemStore::new();
        store.load(vec![building(1, 0), building(2, 3)]);
        assert!(SavePlan::build(&store, ParentRef::Root).unwrap().is_empty());
    }

    #[test]
    fn test_partition() {
        let mut store = ItemStore::new();
        store.load(vec![building(1, 0), building(2, 3), building(3, 6)]);

        let temp = store.next_temp_id();
        store
            .add(LayoutItem::new_temporary(
                temp,
                ItemType::Building,
                ParentRef::Root,
                Cell::new(9, 0),
            ))
            .unwrap();
        store.update(ItemId::Persisted(2), &ItemPatch::rename("Annex")).unwrap();
        store.remove(ItemId::Persisted(3)).unwrap();

        let plan = SavePlan::build(&store, ParentRef::Root).unwrap();
        assert_eq!(plan.creates().count(), 1);
        assert_eq!(plan.update_count(), 1);
        assert_eq!(plan.delete_count(), 1);
        assert!(plan.ops.contains(&PlannedOp::Update {
            id: 2,
            patch: ItemPatch::rename("Annex"),
            item: store.get(ItemId::Persisted(2)).unwrap().clone(),
        }));
        assert!(plan.ops.contains(&PlannedOp::Delete { id: 3, name: "Building 3".into() }));
    }

    #[test]
    fn test_removed_temporary_item_plans_nothing() {
        let mut store = ItemStore::new();
        store.load(vec![]);
        let temp = store.next_temp_id();
        store
            .add(LayoutItem::new_temporary(
                temp,
                ItemType::Building,
                ParentRef::Root,
                Cell::new(0, 0),
            ))
            .unwrap();
        store.remove(ItemId::Temporary(temp)).unwrap();
        assert!(SavePlan::build(&store, ParentRef::Root).unwrap().is_empty());
    }

    #[test]
    fn test_blank_name_blocks_plan() {
        let mut store = ItemStore::new();
        store.load(vec![building(1, 0)]);
        store.update(ItemId::Persisted(1), &ItemPatch::rename("  ")).unwrap();
        assert_eq!(SavePlan::build(&store, ParentRef::Root).unwrap_err(), LayoutError::EmptyName);
    }
}
