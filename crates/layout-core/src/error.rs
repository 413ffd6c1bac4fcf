//! Editor Errors
//!
//! One error type for every layer of the editor core.

use thiserror::Error;

use crate::domain::{ItemId, ItemType};

/// Common result type for editor operations
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Editor-level errors
///
/// Validation variants are raised before any network call. Transport and
/// server variants come from the sync client. Reconciliation variants abort
/// the save batch they were found in.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("Cannot add {} to this level. Valid types are: {}", .child.display_name(), display_list(.allowed))]
    InvalidChildType {
        parent: Option<ItemType>,
        child: ItemType,
        allowed: Vec<ItemType>,
    },

    #[error("Item name cannot be empty")]
    EmptyName,

    #[error("Item {0} not found")]
    ItemNotFound(ItemId),

    #[error("Item {0} already exists")]
    DuplicateItem(ItemId),

    #[error("This action is only available in edit mode")]
    NotInEditMode,

    #[error("Please select an item first")]
    NothingSelected,

    #[error("A save is already in progress")]
    SaveInProgress,

    #[error("No save is in progress")]
    NotSaving,

    #[error("There is nothing to confirm")]
    NoPendingAction,

    #[error("Network error: {0}")]
    Transport(String),

    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Server did not return an id for new item {0}")]
    MissingServerId(ItemId),

    #[error("Server id {0} is already used by another item")]
    IdCollision(u64),

    #[error("{0} is not a pending temporary item")]
    UnknownTempId(ItemId),

    #[error("Invalid editor configuration: {0}")]
    Config(String),
}

impl LayoutError {
    /// Reconciliation failures abort the whole save batch
    pub fn is_reconciliation(&self) -> bool {
        matches!(
            self,
            LayoutError::MissingServerId(_)
                | LayoutError::IdCollision(_)
                | LayoutError::UnknownTempId(_)
        )
    }
}

fn display_list(types: &[ItemType]) -> String {
    if types.is_empty() {
        return "none".to_string();
    }
    types.iter().map(|t| t.display_name()).collect::<Vec<_>>().join(", ")
}
