//! Domain Layer
//!
//! Layout items, their identifiers, and the building hierarchy rules.
//! This layer has NO external dependencies (except serde for serialization).

mod hierarchy;
mod id;
mod item;
mod item_type;

pub use hierarchy::{allowed_children, validate_child, Crumb, HierarchyLevel, ParentKind};
pub use id::{ItemId, ParentRef, TEMP_ID_PREFIX};
pub use item::{ItemPatch, LayoutItem};
pub use item_type::{EquipmentStatus, ItemType};
