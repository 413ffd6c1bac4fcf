//! Edit Toolbar Component
//!
//! View-mode and edit-mode controls. The add menu only offers the types the
//! current level accepts.

use layout_core::{EditorCommand, ParentRef};
use leptos::prelude::*;

use crate::context::use_editor;
use crate::store::UiStateStoreFields;

#[component]
pub fn EditToolbar() -> impl IntoView {
    let ctx = use_editor();
    let ui = ctx.ui;
    let (allowed, has_parent) = ctx
        .session
        .with_untracked(|s| (s.level().allowed_children(), s.level().parent != ParentRef::Root));

    let editing = move || ctx.is_editing();
    let can_remove = move || ctx.session.with(|s| s.selection().can_remove());
    let can_edit = move || ctx.session.with(|s| s.selection().can_edit_properties());
    let dirty = move || ctx.session.with(|s| s.has_unsaved_changes());
    let saving = move || ctx.session.with(|s| s.is_saving());
    let menu_open = move || ui.add_menu_open().get();

    view! {
        <div class="edit-toolbar">
            <Show when=move || !editing()>
                <div class="view-controls">
                    <Show when=move || has_parent>
                        <button
                            class="btn btn-secondary"
                            on:click=move |_| {
                                ctx.dispatch(EditorCommand::Back);
                            }
                        >
                            <i class="fas fa-arrow-left"></i>
                            " Back"
                        </button>
                    </Show>
                    <Show when=move || !allowed.is_empty()>
                        <button
                            class="btn btn-primary"
                            on:click=move |_| {
                                ctx.dispatch(EditorCommand::EnterEdit);
                            }
                        >
                            <i class="fas fa-edit"></i>
                            " Edit Layout"
                        </button>
                    </Show>
                </div>
            </Show>

            <Show when=editing>
                <div class="edit-controls">
                    <div class="add-menu">
                        <button
                            class="btn btn-success"
                            on:click=move |_| ui.add_menu_open().update(|open| *open = !*open)
                        >
                            <i class="fas fa-plus"></i>
                            " Add Item"
                        </button>
                        <Show when=menu_open>
                            <ul class="add-menu-list">
                                {allowed.iter().map(|&item_type| view! {
                                    <li>
                                        <button
                                            class="add-menu-item"
                                            on:click=move |_| {
                                                ui.add_menu_open().set(false);
                                                ctx.dispatch(EditorCommand::AddItem(item_type));
                                            }
                                        >
                                            <i
                                                class=format!("fas {}", item_type.icon())
                                                style=format!("color: {};", item_type.color())
                                            ></i>
                                            " "
                                            {item_type.display_name()}
                                        </button>
                                    </li>
                                }).collect_view()}
                            </ul>
                        </Show>
                    </div>

                    <button
                        class="btn btn-outline-secondary"
                        disabled=move || !can_edit()
                        on:click=move |_| ctx.open_properties()
                    >
                        <i class="fas fa-pen"></i>
                        " Properties"
                    </button>
                    <button
                        class="btn btn-outline-danger"
                        disabled=move || !can_remove()
                        on:click=move |_| { ctx.dispatch(EditorCommand::RemoveSelected); }
                    >
                        <i class="fas fa-trash"></i>
                        " Remove"
                    </button>
                    <button
                        class="btn btn-outline-warning"
                        on:click=move |_| {
                            ctx.dispatch(EditorCommand::Reset);
                        }
                    >
                        <i class="fas fa-undo"></i>
                        " Reset Layout"
                    </button>

                    <span class="toolbar-spacer"></span>
                    <Show when=dirty>
                        <span class="unsaved-indicator">"Unsaved changes"</span>
                    </Show>

                    <button class="btn btn-primary" disabled=saving on:click=move |_| ctx.save()>
                        <i class="fas fa-save"></i>
                        {move || if saving() { " Saving..." } else { " Save" }}
                    </button>
                    <button
                        class="btn btn-secondary"
                        disabled=saving
                        on:click=move |_| { ctx.dispatch(EditorCommand::Cancel); }
                    >
                        " Cancel"
                    </button>
                </div>
            </Show>
        </div>
    }
}
