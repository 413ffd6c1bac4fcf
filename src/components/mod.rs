//! UI Components
//!
//! Leptos components of the layout editor.

mod breadcrumbs;
mod confirm_modal;
mod edit_toolbar;
mod layout_canvas;
mod rename_modal;
mod toast_container;

pub use breadcrumbs::Breadcrumbs;
pub use confirm_modal::ConfirmModal;
pub use edit_toolbar::EditToolbar;
pub use layout_canvas::LayoutCanvas;
pub use rename_modal::RenameModal;
pub use toast_container::ToastContainer;
