//! Leptos DragDrop Utilities
//!
//! Pointer dragging for Leptos with mouse and touch events.
//! Uses movement threshold to distinguish click from drag.

use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Pointer position in client pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerPos {
    pub x: f64,
    pub y: f64,
}

/// DnD state signals, keyed by the caller's item id type
pub struct DndSignals<K: Send + Sync + 'static> {
    pub dragging_id_read: ReadSignal<Option<K>>,
    pub dragging_id_write: WriteSignal<Option<K>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Pending item id (pressed but not yet dragging)
    pub pending_id_read: ReadSignal<Option<K>>,
    pub pending_id_write: WriteSignal<Option<K>>,
    /// Press position for movement detection
    pub start_read: ReadSignal<PointerPos>,
    pub start_write: WriteSignal<PointerPos>,
}

impl<K: Send + Sync + 'static> Clone for DndSignals<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: Send + Sync + 'static> Copy for DndSignals<K> {}

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: f64 = 5.0;

pub fn create_dnd_signals<K: Copy + Send + Sync + 'static>() -> DndSignals<K> {
    let (dragging_id_read, dragging_id_write) = signal(None::<K>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_id_read, pending_id_write) = signal(None::<K>);
    let (start_read, start_write) = signal(PointerPos::default());
    DndSignals {
        dragging_id_read,
        dragging_id_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_id_read,
        pending_id_write,
        start_read,
        start_write,
    }
}

/// Whether the pointer moved far enough from the press point to drag
pub fn exceeds_threshold(start: PointerPos, now: PointerPos) -> bool {
    (now.x - start.x).abs() > DRAG_THRESHOLD_PX || (now.y - start.y).abs() > DRAG_THRESHOLD_PX
}

pub fn pointer_from_mouse(ev: &web_sys::MouseEvent) -> PointerPos {
    PointerPos {
        x: f64::from(ev.client_x()),
        y: f64::from(ev.client_y()),
    }
}

/// First active touch, falling back to the touch that just lifted
pub fn pointer_from_touch(ev: &web_sys::TouchEvent) -> Option<PointerPos> {
    ev.touches()
        .get(0)
        .or_else(|| ev.changed_touches().get(0))
        .map(|touch| PointerPos {
            x: f64::from(touch.client_x()),
            y: f64::from(touch.client_y()),
        })
}

/// Form controls inside an item keep their own pointer behavior
fn is_control(target: Option<web_sys::EventTarget>) -> bool {
    target.is_some_and(|t| {
        t.dyn_ref::<web_sys::HtmlInputElement>().is_some()
            || t.dyn_ref::<web_sys::HtmlButtonElement>().is_some()
            || t.dyn_ref::<web_sys::HtmlSelectElement>().is_some()
    })
}

/// End drag operation
///
/// `drag_just_ended` stays set for 100ms so the click that follows the
/// release can be ignored.
pub fn end_drag<K: Send + Sync + 'static>(dnd: &DndSignals<K>) {
    dnd.dragging_id_write.set(None);
    dnd.pending_id_write.set(None);
    dnd.drag_just_ended_write.set(true);

    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended_write;
        let cb = Closure::<dyn FnMut()>::new(move || {
            clear.set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            100,
        );
        cb.forget();
    }
}

/// Create mousedown handler for draggable items
/// Records pending drag with start position
pub fn make_on_mousedown<K: Copy + Send + Sync + 'static>(
    dnd: DndSignals<K>,
    item_id: K,
) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 || is_control(ev.target()) {
            return;
        }
        dnd.pending_id_write.set(Some(item_id));
        dnd.start_write.set(pointer_from_mouse(&ev));
    }
}

/// Create touchstart handler for draggable items
pub fn make_on_touchstart<K: Copy + Send + Sync + 'static>(
    dnd: DndSignals<K>,
    item_id: K,
) -> impl Fn(web_sys::TouchEvent) + Copy + 'static {
    move |ev: web_sys::TouchEvent| {
        if ev.touches().length() != 1 || is_control(ev.target()) {
            return;
        }
        if let Some(pos) = pointer_from_touch(&ev) {
            dnd.pending_id_write.set(Some(item_id));
            dnd.start_write.set(pos);
        }
    }
}

/// Shared move logic: promote a pending press to a drag, then report moves
fn handle_move<K, S, M>(dnd: &DndSignals<K>, pos: PointerPos, on_start: &S, on_move: &M) -> bool
where
    K: Copy + Send + Sync + 'static,
    S: Fn(K, PointerPos),
    M: Fn(K, PointerPos),
{
    if let Some(id) = dnd.dragging_id_read.get_untracked() {
        on_move(id, pos);
        return true;
    }
    let Some(id) = dnd.pending_id_read.get_untracked() else {
        return false;
    };
    let start = dnd.start_read.get_untracked();
    if !exceeds_threshold(start, pos) {
        return false;
    }
    dnd.dragging_id_write.set(Some(id));
    on_start(id, start);
    on_move(id, pos);
    true
}

/// Shared release logic
fn handle_end<K, E>(dnd: &DndSignals<K>, on_end: &E)
where
    K: Copy + Send + Sync + 'static,
    E: Fn(K),
{
    match dnd.dragging_id_read.get_untracked() {
        Some(id) => {
            end_drag(dnd);
            on_end(id);
        }
        // plain click: the click event fires naturally on the element
        None => dnd.pending_id_write.set(None),
    }
}

/// Bind document-level move and release handlers for mouse and touch
///
/// `on_start` receives the press position once the threshold is crossed,
/// `on_move` every position after that, and `on_end` the released id.
pub fn bind_global_pointer_handlers<K, S, M, E>(
    dnd: DndSignals<K>,
    on_start: S,
    on_move: M,
    on_end: E,
)
where
    K: Copy + Send + Sync + 'static,
    S: Fn(K, PointerPos) + 'static,
    M: Fn(K, PointerPos) + 'static,
    E: Fn(K) + 'static,
{
    let Some(doc) = web_sys::window().and_then(|win| win.document()) else {
        return;
    };
    let on_start = Rc::new(on_start);
    let on_move = Rc::new(on_move);
    let on_end = Rc::new(on_end);

    let mouse_move = {
        let (on_start, on_move) = (on_start.clone(), on_move.clone());
        Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
            handle_move(&dnd, pointer_from_mouse(&ev), &*on_start, &*on_move);
        })
    };
    let _ = doc.add_event_listener_with_callback("mousemove", mouse_move.as_ref().unchecked_ref());
    mouse_move.forget();

    let touch_move = Closure::<dyn FnMut(web_sys::TouchEvent)>::new(move |ev: web_sys::TouchEvent| {
        if let Some(pos) = pointer_from_touch(&ev) {
            // keep the page from scrolling under a dragged item
            if handle_move(&dnd, pos, &*on_start, &*on_move) {
                ev.prevent_default();
            }
        }
    });
    let options = web_sys::AddEventListenerOptions::new();
    options.set_passive(false);
    let _ = doc.add_event_listener_with_callback_and_add_event_listener_options(
        "touchmove",
        touch_move.as_ref().unchecked_ref(),
        &options,
    );
    touch_move.forget();

    for event in ["mouseup", "touchend", "touchcancel"] {
        let on_end = on_end.clone();
        let release = Closure::<dyn FnMut(web_sys::Event)>::new(move |_ev: web_sys::Event| {
            handle_end(&dnd, &*on_end);
        });
        let _ = doc.add_event_listener_with_callback(event, release.as_ref().unchecked_ref());
        release.forget();
    }
}
