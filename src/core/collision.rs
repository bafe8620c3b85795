//! Collision resolver.
//!
//! A single pure function so hypothetical moves can be probed without
//! touching any state.

use crate::core::grid::Grid;
use crate::core::piece::FallingPiece;

/// Whether `piece`, displaced by (dx, dy), overlaps the side walls, the
/// floor, or a settled block.
///
/// Rows above the visible top edge are passable: there is no ceiling check,
/// since pieces spawn above the grid and descend into it.
pub fn collides(grid: &Grid, piece: &FallingPiece, dx: i16, dy: i16) -> bool {
    piece.cells().any(|(col, row)| {
        let col = col + dx;
        let row = row + dy;
        if col < 0 || col >= grid.width() || row >= grid.height() {
            return true;
        }
        row >= 0 && grid.is_occupied(col, row)
    })
}
