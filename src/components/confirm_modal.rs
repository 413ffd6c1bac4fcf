//! Confirm Modal Component
//!
//! Shows the session's pending confirmation with confirm/cancel actions.

use leptos::prelude::*;

use crate::context::use_editor;
use crate::store::UiStateStoreFields;

#[component]
pub fn ConfirmModal() -> impl IntoView {
    let ctx = use_editor();
    let request = move || ctx.ui.confirm().get();

    view! {
        {move || request().map(|request| view! {
            <div class="modal-backdrop" on:click=move |_| ctx.dismiss()>
                <div class="modal-dialog" on:click=|ev| ev.stop_propagation()>
                    <h5 class="modal-title">{request.title.clone()}</h5>
                    <p class="modal-message">{request.message.clone()}</p>
                    <div class="modal-actions">
                        <button class="btn btn-secondary" on:click=move |_| ctx.dismiss()>
                            "Cancel"
                        </button>
                        <button class="btn btn-danger" on:click=move |_| ctx.confirm()>
                            {request.confirm_label.clone()}
                        </button>
                    </div>
                </div>
            </div>
        })}
    }
}
