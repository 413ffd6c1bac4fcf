//! UI State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Holds only what
//! the editor session does not: toasts, open dialogs, loading state.

use layout_core::{ConfirmRequest, ItemId};
use leptos::prelude::*;
use reactive_stores::Store;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

/// Item whose properties dialog is open
#[derive(Clone, Debug, PartialEq)]
pub struct RenameTarget {
    pub id: ItemId,
    pub name: String,
}

#[derive(Clone, Debug, Default, Store)]
pub struct UiState {
    pub toasts: Vec<Toast>,
    pub next_toast_id: u32,
    /// Confirmation dialog currently shown
    pub confirm: Option<ConfirmRequest>,
    pub renaming: Option<RenameTarget>,
    pub loading: bool,
    pub add_menu_open: bool,
}

/// Type alias for the store
pub type UiStore = Store<UiState>;

/// Get the UI store from context
pub fn use_ui_store() -> UiStore {
    expect_context::<UiStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Add a toast, returning its id
pub fn store_push_toast(store: &UiStore, kind: ToastKind, message: String) -> u32 {
    let id = {
        let field = store.next_toast_id();
        let mut next = field.write();
        *next += 1;
        *next
    };
    store.toasts().write().push(Toast { id, kind, message });
    id
}

/// Remove a toast by ID
pub fn store_dismiss_toast(store: &UiStore, toast_id: u32) {
    store.toasts().write().retain(|toast| toast.id != toast_id);
}
