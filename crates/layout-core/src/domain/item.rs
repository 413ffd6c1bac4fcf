//! Layout Item Entity
//!
//! A building, floor, room or piece of equipment placed on the grid of its
//! parent container.

use serde::{Deserialize, Serialize};

use super::id::{ItemId, ParentRef};
use super::item_type::{EquipmentStatus, ItemType};
use crate::geometry::{Cell, Rect};

/// A spatial item on the current hierarchy level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutItem {
    pub id: ItemId,
    pub name: String,
    pub item_type: ItemType,
    /// Containing item (None = root level)
    #[serde(default)]
    pub parent_id: Option<u64>,
    /// Grid column of the top-left cell
    #[serde(default)]
    pub position_x: u32,
    /// Grid row of the top-left cell
    #[serde(default)]
    pub position_y: u32,
    /// Width in cells; 0 means "use the type's footprint"
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EquipmentStatus>,
}

impl LayoutItem {
    /// Create an unsaved item at a cell
    pub fn new_temporary(temp: u32, item_type: ItemType, parent: ParentRef, cell: Cell) -> Self {
        let (width, height) = item_type.footprint();
        Self {
            id: ItemId::Temporary(temp),
            name: format!("New {}", item_type.display_name()),
            item_type,
            parent_id: parent.server_id(),
            position_x: cell.x,
            position_y: cell.y,
            width,
            height,
            status: None,
        }
    }

    /// Fill in sizes the server left out
    pub fn normalized(mut self) -> Self {
        let (width, height) = self.item_type.footprint();
        if self.width == 0 {
            self.width = width;
        }
        if self.height == 0 {
            self.height = height;
        }
        self
    }

    pub fn cell(&self) -> Cell {
        Cell::new(self.position_x, self.position_y)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.position_x, self.position_y, self.width, self.height)
    }

    pub fn is_container(&self) -> bool {
        self.item_type.can_have_children()
    }

    /// Fields of `self` that differ from `base`
    pub fn diff(&self, base: &LayoutItem) -> ItemPatch {
        ItemPatch {
            name: (self.name != base.name).then(|| self.name.clone()),
            position_x: (self.position_x != base.position_x).then_some(self.position_x),
            position_y: (self.position_y != base.position_y).then_some(self.position_y),
        }
    }

    /// Apply a patch, returning true if anything changed
    pub fn apply(&mut self, patch: &ItemPatch) -> bool {
        let before = (self.name.clone(), self.position_x, self.position_y);
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(x) = patch.position_x {
            self.position_x = x;
        }
        if let Some(y) = patch.position_y {
            self.position_y = y;
        }
        before != (self.name.clone(), self.position_x, self.position_y)
    }
}

/// Mutable subset of an item, also the body of an update request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_x: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_y: Option<u32>,
}

impl ItemPatch {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn move_to(cell: Cell) -> Self {
        Self {
            position_x: Some(cell.x),
            position_y: Some(cell.y),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.position_x.is_none() && self.position_y.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_temporary_item() {
        let item =
            LayoutItem::new_temporary(1, ItemType::Rack, ParentRef::Item(8), Cell::new(2, 3));
        assert_eq!(item.id, ItemId::Temporary(1));
        assert_eq!(item.name, "New Server Rack");
        assert_eq!(item.parent_id, Some(8));
        assert_eq!(item.rect(), Rect::new(2, 3, 1, 2));
    }

    #[test]
    fn test_server_payload_defaults() {
        let json = r#"{"id": 4, "name": "HQ", "item_type": "building", "position_x": 1, "position_y": 0}"#;
        let item: LayoutItem = serde_json::from_str(json).unwrap();
        let item = item.normalized();
        assert_eq!(item.id, ItemId::Persisted(4));
        assert_eq!((item.width, item.height), (3, 2));
        assert_eq!(item.parent_id, None);
        assert_eq!(item.status, None);
    }

    #[test]
    fn test_diff_and_apply() {
        let base = LayoutItem::new_temporary(1, ItemType::Server, ParentRef::Root, Cell::new(0, 0));
        let mut edited = base.clone();
        assert!(edited.apply(&ItemPatch::rename("Core")));
        assert!(!edited.apply(&ItemPatch::rename("Core")));

        let patch = edited.diff(&base);
        assert_eq!(patch, ItemPatch::rename("Core"));
        assert!(base.diff(&base).is_empty());
    }

    #[test]
    fn test_patch_serializes_only_changed_fields() {
        let json = serde_json::to_string(&ItemPatch::move_to(Cell::new(4, 1))).unwrap();
        assert_eq!(json, r#"{"position_x":4,"position_y":1}"#);
    }
}
