//! Grid module - the store of settled blocks.
//!
//! A dynamically sized grid backed by a flat row-major array for cache
//! locality. Dimensions are derived from the viewport and the grid is fully
//! rebuilt (never partially resized) whenever the viewport changes.
//! Coordinates: (col, row) with row 0 at the top. Rows above the visible area
//! (row < 0) are always passable.

use crate::types::Cell;

/// The settled-block grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: i16,
    height: i16,
    /// Flat array of cells, row-major order (row * width + col).
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid with the given dimensions.
    ///
    /// Negative or zero dimensions yield a valid zero-area grid.
    pub fn new(width: i16, height: i16) -> Self {
        let mut grid = Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
        };
        grid.reset(width, height);
        grid
    }

    /// Replace the grid with a new all-empty one of the given dimensions.
    pub fn reset(&mut self, width: i16, height: i16) {
        self.width = width.max(0);
        self.height = height.max(0);
        let len = (self.width as usize) * (self.height as usize);
        self.cells.clear();
        self.cells.resize(len, None);
    }

    pub fn width(&self) -> i16 {
        self.width
    }

    pub fn height(&self) -> i16 {
        self.height
    }

    /// Whether the grid has at least one cell.
    pub fn has_area(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Calculate flat index from (col, row) coordinates.
    #[inline(always)]
    fn index(&self, col: i16, row: i16) -> Option<usize> {
        if col < 0 || col >= self.width || row < 0 || row >= self.height {
            return None;
        }
        Some((row as usize) * (self.width as usize) + (col as usize))
    }

    /// Get cell at (col, row). Returns `None` if out of bounds.
    pub fn get(&self, col: i16, row: i16) -> Option<Cell> {
        self.index(col, row).map(|idx| self.cells[idx])
    }

    /// Set cell at (col, row). Returns false if out of bounds.
    pub fn set(&mut self, col: i16, row: i16, cell: Cell) -> bool {
        match self.index(col, row) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether (col, row) holds a settled block.
    ///
    /// Rows above the visible area are never occupied.
    pub fn is_occupied(&self, col: i16, row: i16) -> bool {
        matches!(self.get(col, row), Some(Some(_)))
    }

    /// Whether every column of `row` is occupied.
    pub fn is_row_complete(&self, row: i16) -> bool {
        if row < 0 || row >= self.height || self.width == 0 {
            return false;
        }
        let start = (row as usize) * (self.width as usize);
        let end = start + self.width as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Remove `row`, shift every row above it down by one, and insert an
    /// empty row at the top.
    pub fn remove_row(&mut self, row: i16) {
        if row < 0 || row >= self.height {
            return;
        }
        let width = self.width as usize;

        // Shift rows above down by one; copy_within handles overlap.
        for dst in (1..=row as usize).rev() {
            let src_start = (dst - 1) * width;
            self.cells.copy_within(src_start..src_start + width, dst * width);
        }

        for cell in &mut self.cells[..width] {
            *cell = None;
        }
    }

    /// Discard the bottommost row, shifting the whole stack down.
    ///
    /// Used for stack relief and as the spawn-blocked fallback.
    pub fn shift_down_discard_bottom(&mut self) {
        self.remove_row(self.height - 1);
    }

    /// The topmost row containing any settled block, or `None` when empty.
    pub fn highest_occupied_row(&self) -> Option<i16> {
        let width = self.width as usize;
        if width == 0 {
            return None;
        }
        (0..self.height).find(|&row| {
            let start = (row as usize) * width;
            self.cells[start..start + width].iter().any(|c| c.is_some())
        })
    }

    /// Number of settled blocks.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Raw cells, row-major.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn new_grid_is_empty() {
        let grid = Grid::new(10, 20);
        assert_eq!(grid.width(), 10);
        assert_eq!(grid.height(), 20);
        assert_eq!(grid.occupied_count(), 0);
        assert_eq!(grid.highest_occupied_row(), None);
    }

    #[test]
    fn degenerate_dimensions_clamp_to_zero_area() {
        let grid = Grid::new(-3, 20);
        assert_eq!(grid.width(), 0);
        assert!(!grid.has_area());
        assert_eq!(grid.cells().len(), 0);

        let grid = Grid::new(0, 0);
        assert!(!grid.has_area());
        assert_eq!(grid.highest_occupied_row(), None);
    }

    #[test]
    fn set_and_get_roundtrip() {
        let mut grid = Grid::new(10, 20);
        assert!(grid.set(5, 10, Some(PieceKind::T)));
        assert_eq!(grid.get(5, 10), Some(Some(PieceKind::T)));
        assert!(grid.is_occupied(5, 10));

        assert!(grid.set(5, 10, None));
        assert!(!grid.is_occupied(5, 10));
    }

    #[test]
    fn set_out_of_bounds_is_rejected() {
        let mut grid = Grid::new(10, 20);
        assert!(!grid.set(-1, 0, Some(PieceKind::O)));
        assert!(!grid.set(10, 0, Some(PieceKind::O)));
        assert!(!grid.set(0, -1, Some(PieceKind::O)));
        assert!(!grid.set(0, 20, Some(PieceKind::O)));
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn negative_rows_are_never_occupied() {
        let mut grid = Grid::new(10, 20);
        grid.set(3, 0, Some(PieceKind::I));
        assert!(!grid.is_occupied(3, -1));
        assert!(!grid.is_occupied(3, -100));
    }

    #[test]
    fn row_completeness() {
        let mut grid = Grid::new(4, 5);
        for col in 0..4 {
            grid.set(col, 2, Some(PieceKind::S));
        }
        assert!(grid.is_row_complete(2));

        grid.set(1, 2, None);
        assert!(!grid.is_row_complete(2));

        assert!(!grid.is_row_complete(-1));
        assert!(!grid.is_row_complete(5));
    }

    #[test]
    fn remove_row_shifts_rows_above_down() {
        let mut grid = Grid::new(3, 4);
        // Row 1 marker, row 2 full.
        grid.set(0, 1, Some(PieceKind::L));
        for col in 0..3 {
            grid.set(col, 2, Some(PieceKind::Z));
        }
        let before = grid.occupied_count();

        grid.remove_row(2);

        // Net occupancy drops by exactly the width.
        assert_eq!(grid.occupied_count(), before - 3);
        // The marker moved from row 1 to row 2.
        assert!(grid.is_occupied(0, 2));
        assert!(!grid.is_occupied(0, 1));
        // Top row is empty.
        for col in 0..3 {
            assert!(!grid.is_occupied(col, 0));
        }
        // Rows below the removed one are untouched.
        assert!(!grid.is_occupied(0, 3));
    }

    #[test]
    fn shift_down_discard_bottom_drops_bottom_row_only() {
        let mut grid = Grid::new(3, 4);
        grid.set(0, 3, Some(PieceKind::J));
        grid.set(1, 0, Some(PieceKind::J));

        grid.shift_down_discard_bottom();

        assert!(!grid.is_occupied(0, 3));
        assert!(grid.is_occupied(1, 1));
        assert_eq!(grid.occupied_count(), 1);
    }

    #[test]
    fn shift_on_zero_area_grid_is_noop() {
        let mut grid = Grid::new(0, 0);
        grid.shift_down_discard_bottom();
        grid.remove_row(0);
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn highest_occupied_row_finds_topmost() {
        let mut grid = Grid::new(5, 10);
        grid.set(4, 7, Some(PieceKind::I));
        grid.set(0, 3, Some(PieceKind::O));
        assert_eq!(grid.highest_occupied_row(), Some(3));
    }

    #[test]
    fn reset_rebuilds_dimensions() {
        let mut grid = Grid::new(5, 5);
        grid.set(2, 2, Some(PieceKind::T));

        grid.reset(8, 3);
        assert_eq!(grid.width(), 8);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.occupied_count(), 0);
    }
}
