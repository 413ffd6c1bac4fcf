//! Layout Canvas Component
//!
//! The grid of items on the current level. Items are keyed by id, so a
//! temporary item gets a fresh node once the server assigns its id.
//! Uses leptos-dragdrop for mouse and touch dragging in edit mode.

use layout_core::{EditorCommand, GridSettings, ItemId, PointerPoint};
use leptos::prelude::*;
use leptos_dragdrop::*;

use crate::context::use_editor;
use crate::store::UiStateStoreFields;

fn pointer(pos: PointerPos) -> PointerPoint {
    PointerPoint::new(pos.x, pos.y)
}

#[component]
pub fn LayoutCanvas() -> impl IntoView {
    let ctx = use_editor();
    let grid = ctx.session.with_untracked(|s| *s.grid());

    // Create DnD signals
    let dnd = create_dnd_signals::<ItemId>();
    bind_global_pointer_handlers(
        dnd,
        move |id, start| {
            ctx.dispatch(EditorCommand::BeginDrag { id, pointer: pointer(start) });
        },
        move |_, pos| {
            ctx.dispatch(EditorCommand::PointerMove(pointer(pos)));
        },
        move |_| {
            ctx.dispatch(EditorCommand::PointerUp);
        },
    );

    let item_ids = move || {
        ctx.session
            .with(|s| s.items().iter().map(|item| item.id).collect::<Vec<_>>())
    };
    let is_empty = move || ctx.session.with(|s| s.items().is_empty());
    let loading = move || ctx.ui.loading().get();

    let canvas_style = move || {
        let rows = ctx.session.with(|s| s.rows());
        format!(
            "width: {}px; height: {}px;",
            f64::from(grid.columns) * grid.cell_width_px,
            f64::from(rows) * grid.cell_height_px,
        )
    };

    let on_canvas_click = move |_| {
        if ctx.is_editing_untracked() && !dnd.drag_just_ended_read.get_untracked() {
            ctx.dispatch(EditorCommand::Deselect);
        }
    };

    view! {
        <div
            class=move || if ctx.is_editing() { "layout-canvas editing" } else { "layout-canvas" }
            style=canvas_style
            on:click=on_canvas_click
        >
            <Show when=loading>
                <div class="canvas-message">"Loading layout..."</div>
            </Show>
            <Show when=move || is_empty() && !loading()>
                <div class="canvas-message">
                    {move || if ctx.is_editing() {
                        "Use Add Item to place the first item."
                    } else {
                        "No items yet. Click Edit Layout to add items."
                    }}
                </div>
            </Show>
            <For each=item_ids key=|id| *id let:id>
                <GridItem id=id dnd=dnd grid=grid />
            </For>
        </div>
    }
}

/// One item on the grid
#[component]
fn GridItem(id: ItemId, dnd: DndSignals<ItemId>, grid: GridSettings) -> impl IntoView {
    let ctx = use_editor();
    let item = Memo::new(move |_| ctx.session.with(|s| s.store().get(id).cloned()));
    let is_selected = move || ctx.session.with(|s| s.selection().is_selected(id));
    let is_dragging = move || dnd.dragging_id_read.get() == Some(id);

    let class = move || {
        let mut class = String::from("grid-item");
        if ctx.is_editing() {
            class.push_str(" editable");
        }
        if is_selected() {
            class.push_str(" selected");
        }
        if is_dragging() {
            class.push_str(" dragging");
        }
        if id.is_temporary() {
            class.push_str(" unsaved");
        }
        if let Some(status) = item.get().and_then(|i| i.status) {
            class.push(' ');
            class.push_str(status.css_class());
        }
        class
    };

    let style = move || {
        item.get()
            .map(|i| {
                format!(
                    "left: {}px; top: {}px; width: {}px; height: {}px; border-color: {};",
                    f64::from(i.position_x) * grid.cell_width_px,
                    f64::from(i.position_y) * grid.cell_height_px,
                    f64::from(i.width) * grid.cell_width_px,
                    f64::from(i.height) * grid.cell_height_px,
                    i.item_type.color(),
                )
            })
            .unwrap_or_default()
    };

    let on_mousedown = make_on_mousedown(dnd, id);
    let on_touchstart = make_on_touchstart(dnd, id);

    let on_click = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        if dnd.drag_just_ended_read.get_untracked() {
            return;
        }
        if ctx.is_editing_untracked() {
            ctx.dispatch(EditorCommand::SelectItem(id));
        } else {
            ctx.dispatch(EditorCommand::Open(id));
        }
    };

    let on_dblclick = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        if ctx.is_editing_untracked() && ctx.dispatch(EditorCommand::SelectItem(id)).is_some() {
            ctx.open_properties();
        }
    };

    view! {
        <div
            class=class
            style=style
            on:mousedown=move |ev| if ctx.is_editing_untracked() { on_mousedown(ev) }
            on:touchstart=move |ev| if ctx.is_editing_untracked() { on_touchstart(ev) }
            on:click=on_click
            on:dblclick=on_dblclick
        >
            {move || item.get().map(|i| view! {
                <i
                    class=format!("fas {} item-icon", i.item_type.icon())
                    style=format!("color: {};", i.item_type.color())
                ></i>
                <span class="item-name">{i.name.clone()}</span>
                {i.status.map(|status| view! {
                    <span class="item-status">{status.label()}</span>
                })}
            })}
        </div>
    }
}
