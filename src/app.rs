//! NexusGrid Layout Editor App
//!
//! Root component: owns the editor context and lays out toolbar, canvas and
//! dialogs.

use layout_core::EditorConfig;
use leptos::prelude::*;

use crate::components::{
    Breadcrumbs, ConfirmModal, EditToolbar, LayoutCanvas, RenameModal, ToastContainer,
};
use crate::context::EditorContext;

#[component]
pub fn App(config: EditorConfig) -> impl IntoView {
    let ctx = EditorContext::new(&config);

    // Provide context to all children
    provide_context(ctx);
    provide_context(ctx.ui);

    ctx.load();

    // Browser leave-page prompt while there are unsaved changes
    let unload = window_event_listener(leptos::ev::beforeunload, move |ev| {
        if let Some(message) = ctx.session.with_untracked(|s| s.leave_warning()) {
            ev.prevent_default();
            ev.set_return_value(message);
        }
    });
    on_cleanup(move || unload.remove());

    view! {
        <div class="layout-editor">
            <Breadcrumbs />
            <EditToolbar />
            <LayoutCanvas />
            <RenameModal />
            <ConfirmModal />
            <ToastContainer />
        </div>
    }
}
