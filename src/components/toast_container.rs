//! Toast Container Component

use leptos::prelude::*;

use crate::store::{store_dismiss_toast, use_ui_store, UiStateStoreFields};

#[component]
pub fn ToastContainer() -> impl IntoView {
    let ui = use_ui_store();

    view! {
        <div class="toast-container">
            <For each=move || ui.toasts().get() key=|toast| toast.id let:toast>
                <div class=toast.kind.css_class() role="alert">
                    <span class="toast-message">{toast.message.clone()}</span>
                    <button
                        class="toast-close"
                        on:click=move |_| store_dismiss_toast(&ui, toast.id)
                    >
                        "×"
                    </button>
                </div>
            </For>
        </div>
    }
}
