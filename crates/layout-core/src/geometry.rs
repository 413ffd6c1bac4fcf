//! Geometry and Placement
//!
//! Pure grid arithmetic: empty-slot search for new items, bounds clamping
//! and pixel-to-cell translation for dragging.

use serde::{Deserialize, Serialize};

/// Columns of the layout grid
pub const GRID_COLUMNS: u32 = 12;

/// Extra rows scanned (and shown) below the lowest item
pub const ROW_BUFFER: u32 = 2;

/// A grid cell (column, row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cell {
    pub x: u32,
    pub y: u32,
}

impl Cell {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned block of cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// First column past the right edge
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// First row past the bottom edge
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn at(&self, cell: Cell) -> Rect {
        Rect::new(cell.x, cell.y, self.width, self.height)
    }
}

/// Grid dimensions and cell size in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSettings {
    pub columns: u32,
    pub min_rows: u32,
    pub row_buffer: u32,
    pub cell_width_px: f64,
    pub cell_height_px: f64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            columns: GRID_COLUMNS,
            min_rows: 8,
            row_buffer: ROW_BUFFER,
            cell_width_px: 90.0,
            cell_height_px: 90.0,
        }
    }
}

impl GridSettings {
    /// First free top-left cell for a `width × height` block
    pub fn find_empty_position(&self, width: u32, height: u32, occupied: &[Rect]) -> Cell {
        find_empty_position_in(self.columns, self.row_buffer, width, height, occupied)
    }

    /// Rows the container currently spans
    pub fn rows(&self, occupied: &[Rect]) -> u32 {
        grid_rows(occupied, self.min_rows, self.row_buffer)
    }
}

/// Row-major scan for the first cell where a `width × height` block fits
///
/// Scans rows `0..=max_bottom + height + buffer`; the row at `max_bottom` is
/// always free, so a cell is always found. Blocks wider than the grid are
/// treated as full width.
pub fn find_empty_position_in(
    columns: u32,
    buffer: u32,
    width: u32,
    height: u32,
    occupied: &[Rect],
) -> Cell {
    let columns = columns.max(1);
    let width = width.clamp(1, columns);
    let height = height.max(1);
    let max_bottom = occupied.iter().map(Rect::bottom).max().unwrap_or(0);
    let rows = max_bottom.saturating_add(height).saturating_add(buffer);

    for y in 0..=rows {
        for x in 0..=(columns - width) {
            let candidate = Rect::new(x, y, width, height);
            if !occupied.iter().any(|r| r.overlaps(&candidate)) {
                return Cell::new(x, y);
            }
        }
    }

    Cell::new(0, max_bottom)
}

/// Clamp a position so the item stays inside the container
///
/// Coordinates may be negative mid-drag. An item larger than the container
/// clamps to 0 on that axis.
pub fn clamp_to_bounds(
    x: i64,
    y: i64,
    item_width: u32,
    item_height: u32,
    container_width: u32,
    container_height: u32,
) -> Cell {
    let max_x = i64::from(container_width.saturating_sub(item_width));
    let max_y = i64::from(container_height.saturating_sub(item_height));
    // both bounds fit in u32
    Cell::new(x.clamp(0, max_x) as u32, y.clamp(0, max_y) as u32)
}

/// Translate a pointer delta in pixels into a whole-cell delta
pub fn pixel_delta_to_cells(dx: f64, dy: f64, cell_width: f64, cell_height: f64) -> (i64, i64) {
    let to_cells = |delta: f64, size: f64| {
        if size <= 0.0 || !delta.is_finite() {
            0
        } else {
            (delta / size).round() as i64
        }
    };
    (to_cells(dx, cell_width), to_cells(dy, cell_height))
}

/// Container height in rows: lowest item plus a buffer, never below `min_rows`
pub fn grid_rows(occupied: &[Rect], min_rows: u32, buffer: u32) -> u32 {
    let max_bottom = occupied.iter().map(Rect::bottom).max().unwrap_or(0);
    max_bottom.saturating_add(buffer).max(min_rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn place(width: u32, height: u32, occupied: &[Rect]) -> Cell {
        GridSettings::default().find_empty_position(width, height, occupied)
    }

    #[test]
    fn test_empty_grid_places_at_origin() {
        assert_eq!(place(3, 2, &[]), Cell::new(0, 0));
    }

    #[test]
    fn test_places_right_of_existing() {
        let occupied = [Rect::new(0, 0, 3, 2)];
        assert_eq!(place(3, 2, &occupied), Cell::new(3, 0));
    }

    #[test]
    fn test_wraps_to_next_free_row() {
        let occupied = [Rect::new(0, 0, 6, 1), Rect::new(6, 0, 6, 1)];
        assert_eq!(place(1, 1, &occupied), Cell::new(0, 1));
    }

    #[test]
    fn test_fills_gap_before_appending() {
        let occupied = [Rect::new(0, 0, 2, 2), Rect::new(4, 0, 8, 2)];
        assert_eq!(place(2, 2, &occupied), Cell::new(2, 0));
        assert_eq!(place(3, 1, &occupied), Cell::new(0, 2));
    }

    #[test]
    fn test_oversized_item_uses_full_width() {
        assert_eq!(place(20, 1, &[Rect::new(0, 0, 1, 1)]), Cell::new(0, 1));
    }

    #[test]
    fn test_clamp_to_bounds() {
        assert_eq!(clamp_to_bounds(-3, -1, 2, 2, 12, 8), Cell::new(0, 0));
        assert_eq!(clamp_to_bounds(11, 7, 2, 2, 12, 8), Cell::new(10, 6));
        assert_eq!(clamp_to_bounds(4, 3, 2, 2, 12, 8), Cell::new(4, 3));
        assert_eq!(clamp_to_bounds(4, 3, 20, 2, 12, 8), Cell::new(0, 3));
    }

    #[test]
    fn test_pixel_delta_rounds_to_nearest_cell() {
        assert_eq!(pixel_delta_to_cells(44.0, 46.0, 90.0, 90.0), (0, 1));
        assert_eq!(pixel_delta_to_cells(-136.0, 0.0, 90.0, 90.0), (-2, 0));
        assert_eq!(pixel_delta_to_cells(100.0, 100.0, 0.0, 90.0), (0, 1));
    }

    #[test]
    fn test_grid_rows() {
        assert_eq!(grid_rows(&[], 8, 2), 8);
        assert_eq!(grid_rows(&[Rect::new(0, 9, 1, 2)], 8, 2), 13);
    }

    #[test]
    fn test_far_edges_saturate() {
        let far = Rect::new(u32::MAX - 1, u32::MAX - 1, 5, 5);
        assert_eq!(far.right(), u32::MAX);
        assert_eq!(far.bottom(), u32::MAX);
        assert!(far.overlaps(&Rect::new(u32::MAX - 1, u32::MAX - 1, 1, 1)));
        assert_eq!(place(2, 2, &[far]), Cell::new(0, 0));
        assert_eq!(grid_rows(&[far], 8, 2), u32::MAX);
    }

    fn rect_strategy() -> impl Strategy<Value = Rect> {
        (0u32..12, 0u32..10, 1u32..5, 1u32..4).prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_found_slot_is_free_and_row_major_first(
            occupied in proptest::collection::vec(rect_strategy(), 0..12),
            w in 1u32..6,
            h in 1u32..4,
        ) {
            let cell = place(w, h, &occupied);
            let placed = Rect::new(cell.x, cell.y, w, h);
            prop_assert!(placed.right() <= GRID_COLUMNS);
            prop_assert!(occupied.iter().all(|r| !r.overlaps(&placed)));

            // no earlier cell in row-major order fits
            for y in 0..=cell.y {
                for x in 0..=(GRID_COLUMNS - w) {
                    if (y, x) >= (cell.y, cell.x) {
                        break;
                    }
                    let earlier = Rect::new(x, y, w, h);
                    prop_assert!(occupied.iter().any(|r| r.overlaps(&earlier)));
                }
            }
        }

        #[test]
        fn prop_clamped_position_stays_inside(
            x in -50i64..50,
            y in -50i64..50,
            w in 1u32..6,
            h in 1u32..6,
            cw in 6u32..16,
            ch in 6u32..16,
        ) {
            let cell = clamp_to_bounds(x, y, w, h, cw, ch);
            prop_assert!(cell.x <= cw - w);
            prop_assert!(cell.y <= ch - h);
        }
    }
}
