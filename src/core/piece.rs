//! Falling piece entity.

use crate::core::pieces::{get_shape, PieceShape};
use crate::types::PieceKind;

/// One piece currently descending.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallingPiece {
    pub kind: PieceKind,
    /// Anchor column.
    pub x: i16,
    /// Anchor row; negative while the piece is above the visible area.
    pub y: i16,
    /// Unit offsets, copied from the template at spawn.
    pub units: PieceShape,
    /// Timestamp of the last accepted steering move (ms).
    pub last_steer_ms: u64,
    /// Whether this piece has already triggered its successor
    /// (progress spawn policy only).
    pub triggered_next: bool,
}

impl FallingPiece {
    /// Instantiate a piece from its template at the given anchor.
    pub fn new(kind: PieceKind, x: i16, y: i16) -> Self {
        Self {
            kind,
            x,
            y,
            units: get_shape(kind),
            last_steer_ms: 0,
            triggered_next: false,
        }
    }

    /// Absolute (col, row) of every unit.
    pub fn cells(&self) -> impl Iterator<Item = (i16, i16)> + '_ {
        self.units
            .iter()
            .map(move |&(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Horizontal center: average of the min and max absolute unit columns.
    pub fn center_col(&self) -> f32 {
        let mut min = i16::MAX;
        let mut max = i16::MIN;
        for (col, _) in self.cells() {
            min = min.min(col);
            max = max.max(col);
        }
        (min + max) as f32 / 2.0
    }

    /// Whether any unit lies within `radius` cells of the pointer cell
    /// (Euclidean distance).
    pub fn is_near(&self, pointer_col: i16, pointer_row: i16, radius: f32) -> bool {
        self.cells().any(|(col, row)| {
            let dx = (pointer_col - col) as f32;
            let dy = (pointer_row - row) as f32;
            dx * dx + dy * dy <= radius * radius
        })
    }
}
