//! Pieces module - the fixed catalog of block shapes.
//!
//! Seven tetromino templates, each four unit offsets relative to the piece
//! anchor. The backdrop never rotates pieces, so one orientation per kind is
//! the whole catalog.

use crate::types::PieceKind;

/// Offset of a single unit relative to the piece anchor.
pub type UnitOffset = (i16, i16);

/// Shape of a piece - four unit offsets.
pub type PieceShape = [UnitOffset; 4];

/// Get the shape for a piece kind.
pub fn get_shape(kind: PieceKind) -> PieceShape {
    match kind {
        // Square
        PieceKind::O => [(-1, 0), (0, 0), (-1, 1), (0, 1)],
        // Line
        PieceKind::I => [(-2, 0), (-1, 0), (0, 0), (1, 0)],
        // Right zigzag
        PieceKind::S => [(0, 0), (1, 0), (-1, 1), (0, 1)],
        // Left zigzag
        PieceKind::Z => [(-1, 0), (0, 0), (0, 1), (1, 1)],
        // Right angle
        PieceKind::L => [(-1, 0), (0, 0), (1, 0), (-1, -1)],
        // Left angle
        PieceKind::J => [(-1, 0), (0, 0), (1, 0), (1, -1)],
        // T-shape
        PieceKind::T => [(-1, 0), (0, 0), (1, 0), (0, -1)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_four_units() {
        for kind in PieceKind::ALL {
            assert_eq!(get_shape(kind).len(), 4);
        }
    }

    #[test]
    fn shapes_have_no_duplicate_units() {
        for kind in PieceKind::ALL {
            let shape = get_shape(kind);
            for i in 0..4 {
                for j in i + 1..4 {
                    assert_ne!(shape[i], shape[j], "duplicate unit in {:?}", kind);
                }
            }
        }
    }

    #[test]
    fn shapes_are_connected() {
        // Every unit touches at least one other unit edge-to-edge.
        for kind in PieceKind::ALL {
            let shape = get_shape(kind);
            for &(x, y) in &shape {
                let touches = shape.iter().any(|&(ox, oy)| {
                    (x - ox).abs() + (y - oy).abs() == 1
                });
                assert!(touches, "disconnected unit in {:?}", kind);
            }
        }
    }
}
