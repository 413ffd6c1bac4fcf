//! Hierarchy Rules
//!
//! What can be placed in what: root → building → floor → room → equipment.

use serde::{Deserialize, Serialize};

use super::id::ParentRef;
use super::item_type::ItemType;
use crate::error::{LayoutError, LayoutResult};

const EQUIPMENT: &[ItemType] = &[
    ItemType::Computer,
    ItemType::Server,
    ItemType::NetworkSwitch,
    ItemType::Router,
    ItemType::Printer,
    ItemType::Ups,
    ItemType::Rack,
];

/// The kind of container whose children are being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParentKind {
    #[default]
    Root,
    Type(ItemType),
}

impl ParentKind {
    pub fn item_type(&self) -> Option<ItemType> {
        match self {
            ParentKind::Root => None,
            ParentKind::Type(t) => Some(*t),
        }
    }
}

/// Child types permitted directly under a parent
pub fn allowed_children(parent: ParentKind) -> &'static [ItemType] {
    match parent {
        ParentKind::Root => &[ItemType::Building],
        ParentKind::Type(ItemType::Building) => &[ItemType::Floor],
        ParentKind::Type(ItemType::Floor) => &[ItemType::Room],
        ParentKind::Type(ItemType::Room) => EQUIPMENT,
        ParentKind::Type(_) => &[],
    }
}

/// Reject a child type that the hierarchy table does not allow
pub fn validate_child(parent: ParentKind, child: ItemType) -> LayoutResult<()> {
    let allowed = allowed_children(parent);
    if allowed.contains(&child) {
        Ok(())
    } else {
        Err(LayoutError::InvalidChildType {
            parent: parent.item_type(),
            child,
            allowed: allowed.to_vec(),
        })
    }
}

/// One breadcrumb entry above the current level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crumb {
    pub id: u64,
    pub name: String,
}

/// The level currently shown in the editor
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HierarchyLevel {
    pub parent: ParentRef,
    pub parent_kind: ParentKind,
    /// Ancestors of the parent, outermost first
    pub ancestors: Vec<Crumb>,
}

impl HierarchyLevel {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn child_of(id: u64, parent_type: ItemType, ancestors: Vec<Crumb>) -> Self {
        Self {
            parent: ParentRef::Item(id),
            parent_kind: ParentKind::Type(parent_type),
            ancestors,
        }
    }

    pub fn allowed_children(&self) -> &'static [ItemType] {
        allowed_children(self.parent_kind)
    }

    /// Where "back" leads: the innermost ancestor, or the root level
    pub fn back_href(&self) -> String {
        match (self.parent, self.ancestors.last()) {
            (ParentRef::Root, _) | (_, None) => "/layout/".to_string(),
            (_, Some(crumb)) => format!("/layout/{}/", crumb.id),
        }
    }
}
