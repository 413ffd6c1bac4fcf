//! Rename Modal Component
//!
//! Properties dialog for the selected item. Closes only when the rename was
//! accepted; a rejected name leaves the dialog open with its error toast.

use layout_core::EditorCommand;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::context::use_editor;
use crate::store::UiStateStoreFields;

#[component]
pub fn RenameModal() -> impl IntoView {
    let ctx = use_editor();
    let ui = ctx.ui;
    let (name, set_name) = signal(String::new());

    // Seed the input whenever the dialog opens
    Effect::new(move |_| {
        if let Some(target) = ui.renaming().get() {
            set_name.set(target.name);
        }
    });

    let submit = move || {
        let Some(target) = ui.renaming().get_untracked() else {
            return;
        };
        let command = EditorCommand::Rename {
            id: target.id,
            name: name.get_untracked(),
        };
        if ctx.dispatch(command).is_some() {
            ui.renaming().set(None);
        }
    };
    let close = move || ui.renaming().set(None);

    view! {
        <Show when=move || ui.renaming().get().is_some()>
            <div class="modal-backdrop" on:click=move |_| close()>
                <div class="modal-dialog" on:click=|ev| ev.stop_propagation()>
                    <h5 class="modal-title">"Item Properties"</h5>
                    <label for="item-name-input">"Name"</label>
                    <input
                        id="item-name-input"
                        type="text"
                        prop:value=move || name.get()
                        on:input=move |ev| {
                            let input = ev
                                .target()
                                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok());
                            if let Some(input) = input {
                                set_name.set(input.value());
                            }
                        }
                        on:keydown=move |ev: web_sys::KeyboardEvent| match ev.key().as_str() {
                            "Enter" => submit(),
                            "Escape" => close(),
                            _ => {}
                        }
                    />
                    <div class="modal-actions">
                        <button class="btn btn-secondary" on:click=move |_| close()>
                            "Cancel"
                        </button>
                        <button class="btn btn-primary" on:click=move |_| submit()>"Save"</button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
