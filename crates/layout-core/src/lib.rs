//! Layout Core
//!
//! Platform-independent editing core of the NexusGrid layout editor.
//!
//! Architecture:
//! - `domain`: items, ids and the building hierarchy rules
//! - `geometry`: grid placement and clamping
//! - `store` / `selection` / `drag`: editor state pieces
//! - `session`: edit-mode state machine over the pieces above
//! - `sync`: save planning and the server API

pub mod config;
pub mod csrf;
pub mod domain;
pub mod drag;
pub mod error;
pub mod geometry;
pub mod selection;
pub mod session;
pub mod store;
pub mod sync;

pub use config::EditorConfig;
pub use csrf::CsrfSources;
pub use domain::{
    allowed_children, validate_child, Crumb, EquipmentStatus, HierarchyLevel, ItemId, ItemPatch,
    ItemType, LayoutItem, ParentKind, ParentRef,
};
pub use drag::PointerPoint;
pub use error::{LayoutError, LayoutResult};
pub use geometry::{Cell, GridSettings, Rect};
pub use session::{
    ConfirmRequest, EditMode, EditorCommand, LayoutSession, NavTarget, Outcome, PendingAction,
    SaveSummary,
};
pub use sync::{HttpLayoutApi, LayoutApi, SaveReport, SaveStrategy, SyncClient};
