//! Editor Commands
//!
//! Everything the UI can ask of a session, and what it gets back.

use crate::domain::{ItemId, ItemType};
use crate::drag::PointerPoint;

#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    EnterEdit,
    /// Leave edit mode, asking first if anything changed
    Cancel,
    SelectItem(ItemId),
    Deselect,
    AddItem(ItemType),
    BeginDrag { id: ItemId, pointer: PointerPoint },
    PointerMove(PointerPoint),
    PointerUp,
    Rename { id: ItemId, name: String },
    RemoveSelected,
    /// Remove every item on the level
    Reset,
    /// Open a container's own level
    Open(ItemId),
    Back,
    /// Run the pending confirmation
    Confirm,
    /// Drop the pending confirmation
    Dismiss,
}

/// Where a navigation leads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavTarget {
    Level(u64),
    Url(String),
}

impl NavTarget {
    pub fn href(&self) -> String {
        match self {
            NavTarget::Level(id) => format!("/layout/{}/", id),
            NavTarget::Url(url) => url.clone(),
        }
    }
}

/// An action waiting for the user to confirm it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    DiscardAndExit,
    Remove(ItemId),
    ResetLayout,
    Navigate(NavTarget),
}

impl PendingAction {
    pub fn confirm_request(&self) -> ConfirmRequest {
        match self {
            PendingAction::DiscardAndExit => ConfirmRequest::new(
                "You have unsaved changes",
                "Are you sure you want to exit without saving? Your changes will be discarded.",
                "Discard",
            ),
            PendingAction::Remove(_) => ConfirmRequest::new(
                "Remove Item",
                "This may have child items. Are you sure you want to remove it and all its contents?",
                "Remove",
            ),
            PendingAction::ResetLayout => ConfirmRequest::new(
                "Reset Layout",
                "Are you sure you want to reset the layout? All items will be removed.",
                "Reset",
            ),
            PendingAction::Navigate(NavTarget::Level(_)) => ConfirmRequest::new(
                "You have unsaved changes",
                "Are you sure you want to navigate away without saving?",
                "Leave",
            ),
            PendingAction::Navigate(NavTarget::Url(_)) => ConfirmRequest::new(
                "You have unsaved changes",
                "Are you sure you want to leave without saving?",
                "Leave",
            ),
        }
    }
}

/// Text for a confirmation dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmRequest {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
}

impl ConfirmRequest {
    pub fn new(title: &str, message: &str, confirm_label: &str) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
            confirm_label: confirm_label.to_string(),
        }
    }
}

/// What a dispatched command did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Changed,
    Unchanged,
    NeedsConfirmation(ConfirmRequest),
    Navigate(NavTarget),
}

impl Outcome {
    pub fn changed(changed: bool) -> Self {
        if changed {
            Outcome::Changed
        } else {
            Outcome::Unchanged
        }
    }
}
