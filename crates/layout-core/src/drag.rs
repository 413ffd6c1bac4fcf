//! Drag Controller
//!
//! idle → dragging on pointer-down over an item (edit mode only), back to
//! idle on pointer-up. Every pointer-move recomputes the item's cell from the
//! total pointer delta; the position is committed to the Item Store as it
//! changes, so there is no separate drop step.

use crate::domain::ItemId;
use crate::geometry::{clamp_to_bounds, pixel_delta_to_cells, Cell};

/// Pointer position in client pixels (mouse or first touch)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerPoint {
    pub x: f64,
    pub y: f64,
}

impl PointerPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Everything needed to turn a pointer position into a bounded cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragBounds {
    pub cell_width_px: f64,
    pub cell_height_px: f64,
    pub columns: u32,
    pub rows: u32,
    pub item_width: u32,
    pub item_height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveDrag {
    pub id: ItemId,
    pub start: PointerPoint,
    /// Cell before the drag began
    pub origin: Cell,
    /// Cell last written to the store
    pub current: Cell,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(ActiveDrag),
}

/// Result of releasing the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragEnd {
    pub id: ItemId,
    pub origin: Cell,
    pub cell: Cell,
}

impl DragEnd {
    pub fn moved(&self) -> bool {
        self.origin != self.cell
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn dragging_id(&self) -> Option<ItemId> {
        match self.state {
            DragState::Dragging(drag) => Some(drag.id),
            DragState::Idle => None,
        }
    }

    pub fn begin(&mut self, id: ItemId, start: PointerPoint, origin: Cell) {
        self.state = DragState::Dragging(ActiveDrag {
            id,
            start,
            origin,
            current: origin,
        });
    }

    /// The cell the pointer now points at, if it differs from the last one
    pub fn candidate(&self, pointer: PointerPoint, bounds: &DragBounds) -> Option<(ItemId, Cell)> {
        let DragState::Dragging(drag) = self.state else {
            return None;
        };
        let (dx, dy) = pixel_delta_to_cells(
            pointer.x - drag.start.x,
            pointer.y - drag.start.y,
            bounds.cell_width_px,
            bounds.cell_height_px,
        );
        let cell = clamp_to_bounds(
            i64::from(drag.origin.x) + dx,
            i64::from(drag.origin.y) + dy,
            bounds.item_width,
            bounds.item_height,
            bounds.columns,
            bounds.rows,
        );
        (cell != drag.current).then_some((drag.id, cell))
    }

    /// Record that `cell` was written to the store
    pub fn commit(&mut self, cell: Cell) {
        if let DragState::Dragging(drag) = &mut self.state {
            drag.current = cell;
        }
    }

    pub fn end(&mut self) -> Option<DragEnd> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(drag) => Some(DragEnd {
                id: drag.id,
                origin: drag.origin,
                cell: drag.current,
            }),
            DragState::Idle => None,
        }
    }

    pub fn remap(&mut self, old: ItemId, new: ItemId) {
        if let DragState::Dragging(drag) = &mut self.state {
            if drag.id == old {
                drag.id = new;
            }
        }
    }

    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}
